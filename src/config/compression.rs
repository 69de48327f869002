//! 压缩配置

use serde::{Deserialize, Serialize};
use super::{ConfigResult, ConfigError};

/// 压缩配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressionConfig {
    /// 调用未给出压缩级别时使用的级别 (0 - 9)
    pub default_level: u32,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self { default_level: 6 }
    }
}

impl CompressionConfig {
    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        if self.default_level > 9 {
            return Err(ConfigError::ValidationError(format!(
                "Invalid default compression level {}",
                self.default_level
            )));
        }
        Ok(())
    }
}
