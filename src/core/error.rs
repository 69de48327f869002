//! 统一错误处理模块
//!
//! 提供脚本宿主范围内的错误类型定义
//!
//! ## 错误类型分层
//!
//! - **协作者错误** (`KernelError`): 文件、编解码、加密、压缩等本地库报告的失败
//! - **桥接错误** (`BridgeError`): 参数个数、类型、范围、不可转换值，以及包装后的协作者错误
//! - **宿主错误** (`HostError`): 运行时初始化、配置、未捕获的脚本异常
//!
//! `BridgeError` 在调度边界被转换为脚本可见的异常，永远不会以未处理的本地故障进入运行时。

use std::fmt;
use std::path::PathBuf;

use rquickjs::{Ctx, Exception};
use thiserror::Error;

use crate::config::ConfigError;
use crate::services::CodecId;

/// 宿主顶层错误类型
#[derive(Error, Debug)]
pub enum HostError {
    #[error("Initialization error: {0}")]
    Init(String),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Runtime error: {0}")]
    Runtime(#[from] rquickjs::Error),

    #[error("Uncaught exception: {0}")]
    Script(String),

    #[error("Bridge error: {0}")]
    Bridge(#[from] BridgeError),

    #[error("Collaborator error: {0}")]
    Kernel(#[from] KernelError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// 协作者（本地库）错误
#[derive(Error, Debug)]
pub enum KernelError {
    #[error("cannot access '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("decode failed: {0}")]
    Decode(String),

    #[error("json error: {0}")]
    Json(String),

    #[error("codec '{0}' is not available")]
    CodecUnavailable(CodecId),

    #[error("{codec} failed: {reason}")]
    Codec { codec: CodecId, reason: String },
}

impl KernelError {
    /// 为指定路径包装 IO 错误
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// 跨边界调用失败的种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Arity,
    TypeMismatch,
    Range,
    UnsupportedValue,
    Collaborator,
    Script,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Arity => "ArityError",
            ErrorKind::TypeMismatch => "TypeMismatchError",
            ErrorKind::Range => "RangeError",
            ErrorKind::UnsupportedValue => "UnsupportedValueError",
            ErrorKind::Collaborator => "CollaboratorError",
            ErrorKind::Script => "ScriptError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 本地函数调度错误
///
/// 每个变体对应一种脚本可见的失败；`throw` 负责把它变成挂起的脚本异常。
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("argument expected {expected} but received {actual}")]
    Arity { expected: String, actual: usize },

    #[error("argument {position} expected {expected} but received {found}")]
    TypeMismatch {
        position: usize,
        expected: &'static str,
        found: String,
    },

    #[error("{0}")]
    Range(String),

    #[error("value of type {0} has no document representation")]
    UnsupportedValue(String),

    #[error(transparent)]
    Collaborator(#[from] KernelError),

    #[error("script error: {0}")]
    Script(#[from] rquickjs::Error),
}

impl BridgeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BridgeError::Arity { .. } => ErrorKind::Arity,
            BridgeError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            BridgeError::Range(_) => ErrorKind::Range,
            BridgeError::UnsupportedValue(_) => ErrorKind::UnsupportedValue,
            BridgeError::Collaborator(_) => ErrorKind::Collaborator,
            BridgeError::Script(_) => ErrorKind::Script,
        }
    }

    /// 将错误抛入脚本运行时
    ///
    /// 类型类错误映射为 `TypeError`，范围错误映射为 `RangeError`，协作者错误映射为
    /// 普通 `Error`。脚本自身抛出的异常已处于挂起状态，原样返回。
    pub fn throw(self, ctx: &Ctx<'_>) -> rquickjs::Error {
        match self {
            BridgeError::Script(error) => error,
            BridgeError::Range(message) => Exception::throw_range(ctx, &message),
            error @ BridgeError::Collaborator(_) => {
                Exception::throw_message(ctx, &error.to_string())
            }
            error => Exception::throw_type(ctx, &error.to_string()),
        }
    }
}

pub type HostResult<T> = Result<T, HostError>;
pub type KernelResult<T> = Result<T, KernelError>;
pub type BridgeResult<T> = Result<T, BridgeError>;
