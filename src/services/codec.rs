//! 专有格式编解码注册表
//!
//! 宿主为每种操作注册一个 `FileCodec` 实现；桥接层只负责按 `CodecId` 查找并调用。
//! 未注册的编解码器以协作者错误报告给脚本。

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::core::{KernelError, KernelResult};

/// 文件到文件的编解码操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodecId {
    RtonDecode,
    RtonEncode,
    RsbUnpack,
    RsbPack,
    RsgUnpack,
    RsgPack,
    AnimationDecode,
    AnimationEncode,
    SoundBankDecode,
    SoundBankEncode,
}

impl CodecId {
    pub const ALL: [CodecId; 10] = [
        CodecId::RtonDecode,
        CodecId::RtonEncode,
        CodecId::RsbUnpack,
        CodecId::RsbPack,
        CodecId::RsgUnpack,
        CodecId::RsgPack,
        CodecId::AnimationDecode,
        CodecId::AnimationEncode,
        CodecId::SoundBankDecode,
        CodecId::SoundBankEncode,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CodecId::RtonDecode => "PopCap.RTON.decode",
            CodecId::RtonEncode => "PopCap.RTON.encode",
            CodecId::RsbUnpack => "PopCap.RSB.unpack",
            CodecId::RsbPack => "PopCap.RSB.pack",
            CodecId::RsgUnpack => "PopCap.RSG.unpack",
            CodecId::RsgPack => "PopCap.RSG.pack",
            CodecId::AnimationDecode => "PopCap.Animation.decode",
            CodecId::AnimationEncode => "PopCap.Animation.encode",
            CodecId::SoundBankDecode => "WWise.SoundBank.decode",
            CodecId::SoundBankEncode => "WWise.SoundBank.encode",
        }
    }
}

impl fmt::Display for CodecId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 编解码协作者
pub trait FileCodec: Send + Sync {
    fn run(&self, source: &Path, destination: &Path) -> KernelResult<()>;
}

impl<F> FileCodec for F
where
    F: Fn(&Path, &Path) -> KernelResult<()> + Send + Sync,
{
    fn run(&self, source: &Path, destination: &Path) -> KernelResult<()> {
        self(source, destination)
    }
}

/// 编解码注册表
#[derive(Clone, Default)]
pub struct CodecRegistry {
    codecs: HashMap<CodecId, Arc<dyn FileCodec>>,
}

impl CodecRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册实现，返回被替换的旧实现
    pub fn register(
        &mut self,
        id: CodecId,
        codec: Arc<dyn FileCodec>,
    ) -> Option<Arc<dyn FileCodec>> {
        let previous = self.codecs.insert(id, codec);
        if previous.is_some() {
            tracing::warn!(target: "services", codec = %id, "Codec implementation replaced");
        }
        previous
    }

    pub fn with(mut self, id: CodecId, codec: impl FileCodec + 'static) -> Self {
        self.register(id, Arc::new(codec));
        self
    }

    pub fn contains(&self, id: CodecId) -> bool {
        self.codecs.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }

    pub fn run(&self, id: CodecId, source: &Path, destination: &Path) -> KernelResult<()> {
        let codec = self
            .codecs
            .get(&id)
            .ok_or(KernelError::CodecUnavailable(id))?;
        tracing::debug!(
            target: "services",
            codec = %id,
            source = %source.display(),
            destination = %destination.display(),
            "running codec"
        );
        codec.run(source, destination)
    }
}

impl fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<_> = self.codecs.keys().map(|id| id.as_str()).collect();
        ids.sort_unstable();
        f.debug_struct("CodecRegistry").field("codecs", &ids).finish()
    }
}
