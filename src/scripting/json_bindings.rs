//! JSON bindings. Values cross the boundary through the document converter.

use rquickjs::Value;

use super::api::ScriptApi;
use crate::bindings::{Arity, Call};
use crate::core::BridgeResult;
use crate::services::JsonService;

pub fn register(api: &mut ScriptApi) {
    api.register_function("JSON.deserialize", Arity::Exactly(1), deserialize);
    api.register_function("JSON.serialize", Arity::Exactly(3), serialize);
    api.register_function("JSON.deserialize_fs", Arity::Exactly(1), deserialize_fs);
    api.register_function("JSON.serialize_fs", Arity::Exactly(4), serialize_fs);
}

fn deserialize<'js>(call: &Call<'js, '_>) -> BridgeResult<Value<'js>> {
    let text = call.string(0)?;
    let document = JsonService::parse(&text)?;
    call.script_value(&document)
}

/// `serialize(value, indent, ascii)`: tab indentation, `indent` tabs per level.
fn serialize<'js>(call: &Call<'js, '_>) -> BridgeResult<Value<'js>> {
    let document = call.document(0)?;
    let indent = call.i32(1)?;
    let ascii = call.bool(2)?;
    let text = JsonService::dump(&document, indent, ascii)?;
    call.string_value(&text)
}

fn deserialize_fs<'js>(call: &Call<'js, '_>) -> BridgeResult<Value<'js>> {
    let path = call.string(0)?;
    let document = JsonService::read_file(path.as_path())?;
    call.script_value(&document)
}

fn serialize_fs<'js>(call: &Call<'js, '_>) -> BridgeResult<Value<'js>> {
    let path = call.string(0)?;
    let document = call.document(1)?;
    let indent = call.i32(2)?;
    let ascii = call.bool(3)?;
    JsonService::write_file(path.as_path(), &document, indent, ascii)?;
    Ok(call.undefined())
}
