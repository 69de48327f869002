//! Console bindings: `Console.print`, `Console.readline`.

use rquickjs::Value;

use super::api::ScriptApi;
use crate::bindings::{Arity, Call};
use crate::core::BridgeResult;
use crate::services::Color;

pub fn register(api: &mut ScriptApi) {
    api.register_function("Console.print", Arity::OneOf(&[1, 2]), print);
    api.register_function("Console.readline", Arity::Exactly(0), readline);
}

/// `print(text, color?)`. Unknown color codes print in the default color.
fn print<'js>(call: &Call<'js, '_>) -> BridgeResult<Value<'js>> {
    let text = call.string(0)?;
    let color = call
        .optional_i32(1)?
        .map(Color::from_code)
        .unwrap_or_default();
    tracing::debug!(target: "script.console", "{}", &*text);
    call.services().shell().print(&text, color);
    Ok(call.undefined())
}

fn readline<'js>(call: &Call<'js, '_>) -> BridgeResult<Value<'js>> {
    let line = call.services().shell().input()?;
    call.string_value(&line)
}
