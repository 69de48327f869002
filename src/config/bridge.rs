//! 桥接配置

use serde::{Deserialize, Serialize};
use super::{ConfigResult, ConfigError};

/// 桥接配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// 安装本地函数的全局对象名称
    pub namespace: String,

    /// 文档转换的最大嵌套深度
    pub max_depth: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            namespace: "Kernel".to_string(),
            max_depth: 256,
        }
    }
}

impl BridgeConfig {
    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        if !is_identifier(&self.namespace) {
            return Err(ConfigError::ValidationError(format!(
                "Invalid namespace '{}'",
                self.namespace
            )));
        }
        if self.max_depth == 0 {
            return Err(ConfigError::ValidationError("max_depth must be at least 1".to_string()));
        }
        Ok(())
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_rules() {
        assert!(is_identifier("Kernel"));
        assert!(is_identifier("_host$"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("9lives"));
        assert!(!is_identifier("a.b"));
    }
}
