//! 核心模块
//!
//! 包含宿主的核心功能：
//! - `host` - 宿主入口：加载配置、初始化日志、运行脚本文件
//! - `error` - 错误类型定义
//! - `logging` - 日志订阅者初始化
//! - `macros` - 通用宏

pub mod error;
pub mod host;
pub mod logging;
#[macro_use]
pub mod macros;

// 重新导出错误类型
pub use error::{
    BridgeError, BridgeResult, ErrorKind, HostError, HostResult, KernelError, KernelResult,
};

// 重新导出主要类型
pub use host::Host;
pub use logging::initialize_logging;
