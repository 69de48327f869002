//! 加密服务
//!
//! 摘要（MD5、SHA-2 系列）、Base64 与 XOR。摘要输出为小写十六进制字符串。

use std::fs::File;
use std::io::Read;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use sha2::Digest;

use super::filesystem::FileSystemService;
use crate::core::{KernelError, KernelResult};

pub use md5::Md5;
pub use sha2::{Sha224, Sha256, Sha384, Sha512};

const READ_CHUNK: usize = 64 * 1024;

/// 加密协作者
pub struct CryptoService;

impl CryptoService {
    /// 文本摘要
    pub fn hash_text<D: Digest>(text: &str) -> String {
        hex::encode(D::digest(text.as_bytes()))
    }

    /// 文件摘要（分块读取）
    pub fn hash_file<D: Digest>(path: &Path) -> KernelResult<String> {
        let mut file = File::open(path).map_err(|e| KernelError::io(path, e))?;
        let mut hasher = D::new();
        let mut buffer = vec![0u8; READ_CHUNK];
        loop {
            let read = file.read(&mut buffer).map_err(|e| KernelError::io(path, e))?;
            if read == 0 {
                break;
            }
            hasher.update(&buffer[..read]);
        }
        Ok(hex::encode(hasher.finalize()))
    }

    pub fn base64_encode(text: &str) -> String {
        STANDARD.encode(text.as_bytes())
    }

    /// 解码结果必须是合法的 UTF-8 文本
    pub fn base64_decode(text: &str) -> KernelResult<String> {
        let bytes = Self::decode_bytes(text)?;
        String::from_utf8(bytes)
            .map_err(|_| KernelError::Decode("decoded base64 is not valid UTF-8".to_string()))
    }

    pub fn base64_encode_file(source: &Path, destination: &Path) -> KernelResult<()> {
        let data = FileSystemService::read_bytes(source)?;
        FileSystemService::write_text(destination, &STANDARD.encode(data))
    }

    pub fn base64_decode_file(source: &Path, destination: &Path) -> KernelResult<()> {
        let text = FileSystemService::read_text(source)?;
        let data = Self::decode_bytes(&text)?;
        FileSystemService::write_bytes(destination, &data)
    }

    fn decode_bytes(text: &str) -> KernelResult<Vec<u8>> {
        STANDARD
            .decode(text.trim())
            .map_err(|e| KernelError::Decode(format!("invalid base64: {}", e)))
    }

    /// 使用循环密钥逐字节异或
    pub fn xor(data: &[u8], key: &[u8]) -> KernelResult<Vec<u8>> {
        if key.is_empty() {
            return Err(KernelError::InvalidInput("xor key must not be empty".to_string()));
        }
        Ok(data
            .iter()
            .zip(key.iter().cycle())
            .map(|(byte, k)| byte ^ k)
            .collect())
    }

    /// 文本异或，结果以十六进制返回
    pub fn xor_encrypt(plain: &str, key: &str) -> KernelResult<String> {
        Self::xor(plain.as_bytes(), key.as_bytes()).map(hex::encode)
    }

    pub fn xor_encrypt_file(source: &Path, destination: &Path, key: &str) -> KernelResult<()> {
        let data = FileSystemService::read_bytes(source)?;
        let encrypted = Self::xor(&data, key.as_bytes())?;
        FileSystemService::write_bytes(destination, &encrypted)
    }
}
