//! Compression bindings for the zlib and gzip containers.
//!
//! The level argument is validated before the source file is opened.

use rquickjs::Value;

use super::api::ScriptApi;
use crate::bindings::{Arity, Call};
use crate::core::{BridgeError, BridgeResult};
use crate::services::compression::MAX_LEVEL;
use crate::services::{CompressionService, ContainerFormat};

pub fn register(api: &mut ScriptApi) {
    api.register_function("Compression.Zlib.compress_fs", Arity::OneOf(&[2, 3]), zlib_compress);
    api.register_function("Compression.Zlib.uncompress_fs", Arity::Exactly(2), zlib_uncompress);
    api.register_function("Compression.Gzip.compress_fs", Arity::OneOf(&[2, 3]), gzip_compress);
    api.register_function("Compression.Gzip.uncompress_fs", Arity::Exactly(2), gzip_uncompress);
}

/// Explicit level if given, otherwise the configured default.
fn level(call: &Call<'_, '_>) -> BridgeResult<u32> {
    let Some(level) = call.optional_i32(2)? else {
        return Ok(call.services().default_level());
    };
    u32::try_from(level)
        .ok()
        .filter(|level| *level <= MAX_LEVEL)
        .ok_or_else(|| {
            BridgeError::Range(format!(
                "compression level must be between 0 and {}, received {}",
                MAX_LEVEL, level
            ))
        })
}

fn compress<'js>(call: &Call<'js, '_>, format: ContainerFormat) -> BridgeResult<Value<'js>> {
    let level = level(call)?;
    let source = call.string(0)?;
    let destination = call.string(1)?;
    CompressionService::compress_file(format, source.as_path(), destination.as_path(), level)?;
    Ok(call.undefined())
}

fn uncompress<'js>(call: &Call<'js, '_>, format: ContainerFormat) -> BridgeResult<Value<'js>> {
    let source = call.string(0)?;
    let destination = call.string(1)?;
    CompressionService::uncompress_file(format, source.as_path(), destination.as_path())?;
    Ok(call.undefined())
}

crate::native_forwarders!(compress => {
    zlib_compress: ContainerFormat::Zlib,
    gzip_compress: ContainerFormat::Gzip,
});

crate::native_forwarders!(uncompress => {
    zlib_uncompress: ContainerFormat::Zlib,
    gzip_uncompress: ContainerFormat::Gzip,
});
