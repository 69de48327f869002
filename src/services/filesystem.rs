//! 文件系统服务
//!
//! 所有错误都携带出错的路径。写文件时会自动创建缺失的父目录。

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::{KernelError, KernelResult};

/// 文件系统协作者
pub struct FileSystemService;

impl FileSystemService {
    pub fn read_text(path: &Path) -> KernelResult<String> {
        fs::read_to_string(path).map_err(|e| KernelError::io(path, e))
    }

    pub fn read_bytes(path: &Path) -> KernelResult<Vec<u8>> {
        fs::read(path).map_err(|e| KernelError::io(path, e))
    }

    pub fn write_text(path: &Path, text: &str) -> KernelResult<()> {
        Self::write_bytes(path, text.as_bytes())
    }

    pub fn write_bytes(path: &Path, data: &[u8]) -> KernelResult<()> {
        Self::ensure_parent(path)?;
        fs::write(path, data).map_err(|e| KernelError::io(path, e))
    }

    /// 为目标文件创建父目录
    pub fn ensure_parent(path: &Path) -> KernelResult<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                fs::create_dir_all(parent).map_err(|e| KernelError::io(parent, e))
            }
            _ => Ok(()),
        }
    }

    /// 列出目录的直接子项（完整路径，按字典序排序）
    pub fn read_directory(path: &Path) -> KernelResult<Vec<PathBuf>> {
        let mut entries = fs::read_dir(path)
            .map_err(|e| KernelError::io(path, e))?
            .map(|entry| entry.map(|entry| entry.path()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| KernelError::io(path, e))?;
        entries.sort();
        Ok(entries)
    }

    pub fn is_file(path: &Path) -> bool {
        path.is_file()
    }

    pub fn is_directory(path: &Path) -> bool {
        path.is_dir()
    }

    pub fn create_directory(path: &Path) -> KernelResult<()> {
        fs::create_dir_all(path).map_err(|e| KernelError::io(path, e))
    }

    /// 转换为绝对路径（不访问文件系统，也不解析符号链接）
    pub fn resolve(path: &Path) -> KernelResult<PathBuf> {
        std::path::absolute(path).map_err(|e| KernelError::io(path, e))
    }
}

/// 路径的脚本侧文本形式，分隔符统一为 `/`
pub fn path_text(path: &Path) -> String {
    let text = path.to_string_lossy();
    if cfg!(windows) {
        text.replace('\\', "/")
    } else {
        text.into_owned()
    }
}
