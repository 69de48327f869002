//! JSON 服务
//!
//! 解析文本为 [`Document`]，并按脚本约定输出：
//! - `indent < 0`：紧凑输出
//! - `indent >= 0`：换行，每层缩进 `indent` 个制表符
//! - `ensure_ascii`：非 ASCII 字符输出为 `\uXXXX`（小写十六进制，UTF-16 代理对）

use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::ser::{CompactFormatter, Formatter, PrettyFormatter};
use serde_json::Serializer;

use super::filesystem::FileSystemService;
use crate::bindings::Document;
use crate::core::{KernelError, KernelResult};

/// JSON 协作者
pub struct JsonService;

impl JsonService {
    pub fn parse(text: &str) -> KernelResult<Document> {
        serde_json::from_str(text).map_err(|e| KernelError::Json(e.to_string()))
    }

    pub fn dump(document: &Document, indent: i32, ensure_ascii: bool) -> KernelResult<String> {
        // 标量与空容器不会输出缩进，不必构造缩进单元
        let nested = match document {
            Document::Array(items) => !items.is_empty(),
            Document::Object(map) => !map.is_empty(),
            _ => false,
        };
        if indent < 0 || !nested {
            Self::write_with(document, CompactFormatter, ensure_ascii)
        } else {
            let unit = "\t".repeat(indent as usize);
            Self::write_with(document, PrettyFormatter::with_indent(unit.as_bytes()), ensure_ascii)
        }
    }

    pub fn read_file(path: &Path) -> KernelResult<Document> {
        let text = FileSystemService::read_text(path)?;
        Self::parse(&text).map_err(|error| match error {
            KernelError::Json(reason) => {
                KernelError::Json(format!("{}: {}", path.display(), reason))
            }
            other => other,
        })
    }

    pub fn write_file(
        path: &Path,
        document: &Document,
        indent: i32,
        ensure_ascii: bool,
    ) -> KernelResult<()> {
        let text = Self::dump(document, indent, ensure_ascii)?;
        FileSystemService::write_text(path, &text)
    }

    fn write_with<F: Formatter>(
        document: &Document,
        formatter: F,
        ensure_ascii: bool,
    ) -> KernelResult<String> {
        let mut buffer = Vec::with_capacity(128);
        let result = if ensure_ascii {
            let mut serializer = Serializer::with_formatter(&mut buffer, AsciiEscape(formatter));
            document.serialize(&mut serializer)
        } else {
            let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
            document.serialize(&mut serializer)
        };
        result.map_err(|e| KernelError::Json(e.to_string()))?;
        String::from_utf8(buffer).map_err(|e| KernelError::Json(e.to_string()))
    }
}

/// 在内层格式化器之上转义所有非 ASCII 字符
struct AsciiEscape<F>(F);

impl<F: Formatter> Formatter for AsciiEscape<F> {
    fn write_string_fragment<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let mut start = 0;
        for (index, ch) in fragment.char_indices() {
            if ch.is_ascii() {
                continue;
            }
            writer.write_all(fragment[start..index].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = index + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }

    fn begin_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_array(writer)
    }

    fn end_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.0.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_object(writer)
    }

    fn end_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.0.begin_object_key(writer, first)
    }

    fn end_object_key<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object_key(writer)
    }

    fn begin_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object_value(writer)
    }
}
