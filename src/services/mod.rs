//! 协作者服务层
//!
//! 桥接层调用的本地能力：控制台、文件系统、摘要与编码、压缩、专有格式编解码、JSON。
//! 无状态的服务以关联函数提供；有状态的部分（控制台、编解码注册表、借用台账、
//! 转换限制）集中在 [`HostServices`] 中，由同一运行时上的所有本地函数共享。

pub mod codec;
pub mod compression;
pub mod console;
pub mod crypto;
pub mod filesystem;
pub mod json;

use std::fmt;
use std::sync::Arc;

pub use codec::{CodecId, CodecRegistry, FileCodec};
pub use compression::{CompressionService, ContainerFormat};
pub use console::{Color, MemoryShell, Shell, StdShell};
pub use crypto::CryptoService;
pub use filesystem::FileSystemService;
pub use json::JsonService;

use crate::bindings::convert::DEFAULT_MAX_DEPTH;
use crate::bindings::GuardLedger;
use crate::config::HostConfig;

/// 本地函数共享的宿主服务
///
/// `Send + Sync`：多个独立的运行时可以在不同线程上共享同一份服务。
pub struct HostServices {
    shell: Arc<dyn Shell>,
    codecs: CodecRegistry,
    ledger: GuardLedger,
    max_depth: usize,
    default_level: u32,
}

impl HostServices {
    pub fn new(shell: Arc<dyn Shell>) -> Self {
        Self {
            shell,
            codecs: CodecRegistry::new(),
            ledger: GuardLedger::new(),
            max_depth: DEFAULT_MAX_DEPTH,
            default_level: 6,
        }
    }

    /// 按配置创建
    pub fn from_config(config: &HostConfig, shell: Arc<dyn Shell>) -> Self {
        Self::new(shell)
            .with_max_depth(config.bridge.max_depth)
            .with_default_level(config.compression.default_level)
    }

    pub fn with_codecs(mut self, codecs: CodecRegistry) -> Self {
        self.codecs = codecs;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_default_level(mut self, level: u32) -> Self {
        self.default_level = level;
        self
    }

    pub fn shell(&self) -> &dyn Shell {
        self.shell.as_ref()
    }

    pub fn codecs(&self) -> &CodecRegistry {
        &self.codecs
    }

    pub fn ledger(&self) -> &GuardLedger {
        &self.ledger
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn default_level(&self) -> u32 {
        self.default_level
    }
}

impl fmt::Debug for HostServices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostServices")
            .field("codecs", &self.codecs)
            .field("ledger", &self.ledger)
            .field("max_depth", &self.max_depth)
            .field("default_level", &self.default_level)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_services_are_shareable() {
        assert_send_sync::<HostServices>();
    }

    #[test]
    fn test_from_config() {
        let mut config = HostConfig::default();
        config.bridge.max_depth = 12;
        config.compression.default_level = 1;
        let services = HostServices::from_config(&config, Arc::new(MemoryShell::new()));
        assert_eq!(services.max_depth(), 12);
        assert_eq!(services.default_level(), 1);
        assert!(services.codecs().is_empty());
    }
}
