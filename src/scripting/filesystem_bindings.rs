//! File system and path bindings.

use rquickjs::{Array, Value};

use super::api::ScriptApi;
use crate::bindings::{Arity, Call};
use crate::core::BridgeResult;
use crate::services::filesystem::path_text;
use crate::services::FileSystemService;

pub fn register(api: &mut ScriptApi) {
    api.register_function("FileSystem.read_file", Arity::Exactly(1), read_file);
    api.register_function("FileSystem.write_file", Arity::Exactly(2), write_file);
    api.register_function("FileSystem.read_directory", Arity::Exactly(1), read_directory);
    api.register_function("FileSystem.is_file", Arity::Exactly(1), is_file);
    api.register_function("FileSystem.is_directory", Arity::Exactly(1), is_directory);
    api.register_function("FileSystem.create_directory", Arity::Exactly(1), create_directory);
    api.register_function("Path.resolve", Arity::Exactly(1), resolve);
}

fn read_file<'js>(call: &Call<'js, '_>) -> BridgeResult<Value<'js>> {
    let path = call.string(0)?;
    let text = FileSystemService::read_text(path.as_path())?;
    call.string_value(&text)
}

fn write_file<'js>(call: &Call<'js, '_>) -> BridgeResult<Value<'js>> {
    let path = call.string(0)?;
    let data = call.string(1)?;
    FileSystemService::write_text(path.as_path(), &data)?;
    Ok(call.undefined())
}

/// Immediate children of a directory as path strings, sorted.
fn read_directory<'js>(call: &Call<'js, '_>) -> BridgeResult<Value<'js>> {
    let path = call.string(0)?;
    let entries = FileSystemService::read_directory(path.as_path())?;
    let array = Array::new(call.ctx().clone())?;
    for (index, entry) in entries.iter().enumerate() {
        array.set(index, call.string_value(&path_text(entry))?)?;
    }
    Ok(array.into_value())
}

fn is_file<'js>(call: &Call<'js, '_>) -> BridgeResult<Value<'js>> {
    let path = call.string(0)?;
    Ok(call.bool_value(FileSystemService::is_file(path.as_path())))
}

fn is_directory<'js>(call: &Call<'js, '_>) -> BridgeResult<Value<'js>> {
    let path = call.string(0)?;
    Ok(call.bool_value(FileSystemService::is_directory(path.as_path())))
}

fn create_directory<'js>(call: &Call<'js, '_>) -> BridgeResult<Value<'js>> {
    let path = call.string(0)?;
    FileSystemService::create_directory(path.as_path())?;
    Ok(call.undefined())
}

fn resolve<'js>(call: &Call<'js, '_>) -> BridgeResult<Value<'js>> {
    let path = call.string(0)?;
    let resolved = FileSystemService::resolve(path.as_path())?;
    call.string_value(&path_text(&resolved))
}
