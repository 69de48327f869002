//! `JavaScript.evaluate` / `JavaScript.evaluate_fs`: run source in the calling
//! context and hand back whatever it evaluates to. A script exception raised
//! by the evaluated code stays pending and reaches the caller unchanged.

use rquickjs::Value;

use super::api::ScriptApi;
use crate::bindings::{Arity, Call};
use crate::core::BridgeResult;
use crate::services::FileSystemService;

pub fn register(api: &mut ScriptApi) {
    api.register_function("JavaScript.evaluate", Arity::Exactly(1), evaluate);
    api.register_function("JavaScript.evaluate_fs", Arity::Exactly(1), evaluate_fs);
}

fn evaluate<'js>(call: &Call<'js, '_>) -> BridgeResult<Value<'js>> {
    let source = call.string(0)?;
    Ok(call.ctx().eval::<Value<'js>, _>(source.as_str())?)
}

fn evaluate_fs<'js>(call: &Call<'js, '_>) -> BridgeResult<Value<'js>> {
    let path = call.string(0)?;
    let source = FileSystemService::read_text(path.as_path())?;
    tracing::debug!(target: "scripting", path = %path.as_path().display(), "evaluating file");
    Ok(call.ctx().eval::<Value<'js>, _>(source)?)
}
