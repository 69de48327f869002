//! 日志初始化
//!
//! `RUST_LOG` 优先；未设置时使用配置中的日志级别。

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::{LogLevel, LoggingConfig};

impl LogLevel {
    /// 转换为 `EnvFilter` 指令
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_directive()))
}

/// 初始化全局日志订阅者
///
/// 重复调用是安全的，已存在的订阅者会被保留。
pub fn initialize_logging(config: &LoggingConfig) {
    if config.log_to_file {
        match OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log_file_path)
        {
            Ok(file) => {
                let _ = tracing_subscriber::fmt()
                    .with_env_filter(env_filter(config))
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .try_init();
            }
            Err(error) => {
                eprintln!(
                    "cannot open log file {}: {}",
                    config.log_file_path, error
                );
            }
        }
    } else if config.log_to_console {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter(config))
            .with_writer(std::io::stderr)
            .try_init();
    }
    tracing::info!(target: "host", "Script host starting");
}
