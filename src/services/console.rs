//! 控制台服务
//!
//! `Shell` 是脚本 `Console.print` / `Console.readline` 背后的协作者。
//! `StdShell` 连接到进程的标准输入输出，`MemoryShell` 把输出记录在内存中，
//! 并按顺序回放预先排队的输入，供测试和嵌入方使用。

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::sync::Mutex;

use crate::core::{KernelError, KernelResult};

/// 输出颜色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    #[default]
    Default,
    Red,
    Green,
    Cyan,
    Yellow,
}

impl Color {
    /// 从脚本传入的颜色代码构造；未知代码回退为 `Default`
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => Color::Red,
            2 => Color::Green,
            3 => Color::Cyan,
            4 => Color::Yellow,
            _ => Color::Default,
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Color::Default => 0,
            Color::Red => 1,
            Color::Green => 2,
            Color::Cyan => 3,
            Color::Yellow => 4,
        }
    }

    fn ansi(self) -> Option<&'static str> {
        match self {
            Color::Default => None,
            Color::Red => Some("\x1b[31m"),
            Color::Green => Some("\x1b[32m"),
            Color::Cyan => Some("\x1b[36m"),
            Color::Yellow => Some("\x1b[33m"),
        }
    }
}

/// 控制台协作者
pub trait Shell: Send + Sync {
    /// 原样输出文本（不追加换行）
    fn print(&self, text: &str, color: Color);

    /// 读取一行输入，去掉行尾换行符
    fn input(&self) -> KernelResult<String>;
}

/// 标准输入输出控制台
#[derive(Debug, Default)]
pub struct StdShell;

impl StdShell {
    pub fn new() -> Self {
        Self
    }
}

impl Shell for StdShell {
    fn print(&self, text: &str, color: Color) {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        let result = match color.ansi() {
            Some(code) => write!(out, "{}{}\x1b[0m", code, text),
            None => out.write_all(text.as_bytes()),
        };
        if let Err(error) = result.and_then(|_| out.flush()) {
            tracing::warn!(target: "script.console", "stdout write failed: {}", error);
        }
    }

    fn input(&self) -> KernelResult<String> {
        let mut line = String::new();
        io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|e| KernelError::io("<stdin>", e))?;
        Ok(trim_line_ending(line))
    }
}

fn trim_line_ending(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}

/// 内存控制台
#[derive(Debug, Default)]
pub struct MemoryShell {
    printed: Mutex<Vec<(String, Color)>>,
    pending_input: Mutex<VecDeque<String>>,
}

impl MemoryShell {
    pub fn new() -> Self {
        Self::default()
    }

    /// 预先排入若干行输入
    pub fn with_input<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            printed: Mutex::new(Vec::new()),
            pending_input: Mutex::new(lines.into_iter().map(Into::into).collect()),
        }
    }

    pub fn push_input(&self, line: impl Into<String>) {
        if let Ok(mut pending) = self.pending_input.lock() {
            pending.push_back(line.into());
        }
    }

    /// 已输出的文本及颜色
    pub fn printed(&self) -> Vec<(String, Color)> {
        self.printed
            .lock()
            .map(|printed| printed.clone())
            .unwrap_or_default()
    }

    /// 已输出文本的拼接
    pub fn output(&self) -> String {
        self.printed().into_iter().map(|(text, _)| text).collect()
    }
}

impl Shell for MemoryShell {
    fn print(&self, text: &str, color: Color) {
        if let Ok(mut printed) = self.printed.lock() {
            printed.push((text.to_string(), color));
        }
    }

    fn input(&self) -> KernelResult<String> {
        self.pending_input
            .lock()
            .ok()
            .and_then(|mut pending| pending.pop_front())
            .ok_or_else(|| KernelError::InvalidInput("no console input available".to_string()))
    }
}
