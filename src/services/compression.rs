//! 文件压缩模块
//!
//! 使用 flate2 以 zlib 或 gzip 容器格式压缩、解压整个文件。
//! 输出先写入目标目录下的临时文件，成功后再替换目标，源与目标可以是同一路径。
//!
//! ```text
//! ┌─────────────────┐      ┌─────────────────┐      ┌─────────────────┐
//! │  Source file    │ ───▶ │ Zlib/Gz Encoder │ ───▶ │ Destination     │
//! └─────────────────┘      └─────────────────┘      └─────────────────┘
//! ```

use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use flate2::bufread::{MultiGzDecoder, ZlibDecoder};
use flate2::write::{GzEncoder, ZlibEncoder};
use flate2::Compression;
use tempfile::NamedTempFile;

use super::filesystem::FileSystemService;
use crate::core::{KernelError, KernelResult};

/// 允许的最高压缩级别
pub const MAX_LEVEL: u32 = 9;

/// 容器格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerFormat {
    Zlib,
    Gzip,
}

impl fmt::Display for ContainerFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerFormat::Zlib => f.write_str("zlib"),
            ContainerFormat::Gzip => f.write_str("gzip"),
        }
    }
}

/// 压缩协作者
pub struct CompressionService;

impl CompressionService {
    /// 压缩 `source` 到 `destination`
    ///
    /// # 参数
    /// - `level`: 压缩级别 (0 - 9)
    pub fn compress_file(
        format: ContainerFormat,
        source: &Path,
        destination: &Path,
        level: u32,
    ) -> KernelResult<()> {
        if level > MAX_LEVEL {
            return Err(KernelError::InvalidInput(format!(
                "compression level {} is outside 0..={}",
                level, MAX_LEVEL
            )));
        }
        let file = File::open(source).map_err(|e| KernelError::io(source, e))?;
        let mut staged = Self::stage(destination)?;
        {
            let mut input = BufReader::new(file);
            let output = BufWriter::new(staged.as_file_mut());
            let level = Compression::new(level);

            let written = match format {
                ContainerFormat::Zlib => {
                    let mut encoder = ZlibEncoder::new(output, level);
                    io::copy(&mut input, &mut encoder).and_then(|_| encoder.finish())
                }
                ContainerFormat::Gzip => {
                    let mut encoder = GzEncoder::new(output, level);
                    io::copy(&mut input, &mut encoder).and_then(|_| encoder.finish())
                }
            };
            let written = written.and_then(|mut output| output.flush());
            written.map_err(|e| KernelError::io(destination, e))?;
        }
        Self::commit(staged, destination)?;

        tracing::debug!(
            target: "services",
            %format,
            source = %source.display(),
            destination = %destination.display(),
            "compressed"
        );
        Ok(())
    }

    /// 解压 `source` 到 `destination`
    pub fn uncompress_file(
        format: ContainerFormat,
        source: &Path,
        destination: &Path,
    ) -> KernelResult<()> {
        let file = File::open(source).map_err(|e| KernelError::io(source, e))?;
        let mut staged = Self::stage(destination)?;
        {
            let input = BufReader::new(file);
            let mut output = BufWriter::new(staged.as_file_mut());

            let copied = match format {
                ContainerFormat::Zlib => io::copy(&mut ZlibDecoder::new(input), &mut output),
                ContainerFormat::Gzip => io::copy(&mut MultiGzDecoder::new(input), &mut output),
            };
            copied.map_err(|e| {
                KernelError::Decode(format!("{} stream in '{}': {}", format, source.display(), e))
            })?;
            output.flush().map_err(|e| KernelError::io(destination, e))?;
        }
        Self::commit(staged, destination)
    }

    /// 在目标所在目录创建临时文件；失败时随 drop 删除
    fn stage(destination: &Path) -> KernelResult<NamedTempFile> {
        FileSystemService::ensure_parent(destination)?;
        let directory = match destination.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        NamedTempFile::new_in(directory).map_err(|e| KernelError::io(destination, e))
    }

    fn commit(staged: NamedTempFile, destination: &Path) -> KernelResult<()> {
        staged
            .persist(destination)
            .map(|_| ())
            .map_err(|e| KernelError::io(destination, e.error))
    }
}
