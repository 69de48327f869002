//! Scalar Converter
//!
//! Narrowing of script values into native primitives and construction of
//! new script values from native primitives.

use rquickjs::{Ctx, Type, Value};

use crate::core::{BridgeError, BridgeResult};

/// Closed classification of a script value's tag.
///
/// Both conversion directions match on this enum, so a new variant has to be
/// handled everywhere before the crate compiles again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptTag {
    Undefined,
    Null,
    Bool,
    Int,
    BigInt,
    Float,
    String,
    Object,
    Array,
    /// Functions, symbols and anything else without a scalar or document
    /// form. Carries the runtime's name for the tag.
    Unsupported(String),
}

impl ScriptTag {
    pub fn of(value: &Value<'_>) -> Self {
        match value.type_of() {
            Type::Undefined => ScriptTag::Undefined,
            Type::Null => ScriptTag::Null,
            Type::Bool => ScriptTag::Bool,
            Type::Int => ScriptTag::Int,
            Type::BigInt => ScriptTag::BigInt,
            Type::Float => ScriptTag::Float,
            Type::String => ScriptTag::String,
            Type::Array => ScriptTag::Array,
            // Error instances are ordinary objects for conversion purposes.
            Type::Object | Type::Exception => ScriptTag::Object,
            other => ScriptTag::Unsupported(format!("{:?}", other).to_lowercase()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ScriptTag::Undefined => "undefined",
            ScriptTag::Null => "null",
            ScriptTag::Bool => "boolean",
            ScriptTag::Int => "integer",
            ScriptTag::BigInt => "bigint",
            ScriptTag::Float => "float",
            ScriptTag::String => "string",
            ScriptTag::Object => "object",
            ScriptTag::Array => "array",
            ScriptTag::Unsupported(name) => name,
        }
    }
}

pub(crate) fn mismatch(expected: &'static str, value: &Value<'_>, position: usize) -> BridgeError {
    BridgeError::TypeMismatch {
        position,
        expected,
        found: ScriptTag::of(value).name().to_string(),
    }
}

/// Returns the string handle behind `value`. Only the String tag is accepted;
/// `position` is the 1-based parameter position used in the error.
pub fn expect_string<'js>(
    value: &Value<'js>,
    position: usize,
) -> BridgeResult<rquickjs::String<'js>> {
    value
        .as_string()
        .cloned()
        .ok_or_else(|| mismatch("string", value, position))
}

pub fn extract_bool(value: &Value<'_>, position: usize) -> BridgeResult<bool> {
    value
        .as_bool()
        .ok_or_else(|| mismatch("boolean", value, position))
}

/// Narrows a number to `i32`.
///
/// Integers pass through. Floats follow the runtime's `ToInt32`: truncation
/// toward zero and wrapping modulo 2^32, with NaN and infinities mapping to 0.
/// No further range check is applied.
pub fn extract_i32(value: &Value<'_>, position: usize) -> BridgeResult<i32> {
    if let Some(int) = value.as_int() {
        return Ok(int);
    }
    if let Some(float) = value.as_float() {
        return Ok(to_int32(float));
    }
    Err(mismatch("integer", value, position))
}

pub fn to_int32(number: f64) -> i32 {
    if !number.is_finite() {
        return 0;
    }
    let truncated = number.trunc();
    let modulo = truncated.rem_euclid(4_294_967_296.0);
    if modulo >= 2_147_483_648.0 {
        (modulo - 4_294_967_296.0) as i32
    } else {
        modulo as i32
    }
}

/// Allocates a new script string. Fails only when the runtime is out of memory.
pub fn to_string<'js>(ctx: &Ctx<'js>, text: &str) -> BridgeResult<Value<'js>> {
    Ok(rquickjs::String::from_str(ctx.clone(), text)?.into_value())
}

pub fn to_bool<'js>(ctx: &Ctx<'js>, value: bool) -> Value<'js> {
    Value::new_bool(ctx.clone(), value)
}

pub fn to_float<'js>(ctx: &Ctx<'js>, value: f64) -> Value<'js> {
    Value::new_float(ctx.clone(), value)
}

pub fn to_undefined<'js>(ctx: &Ctx<'js>) -> Value<'js> {
    Value::new_undefined(ctx.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rquickjs::{Context, Runtime};

    fn with_ctx<F: FnOnce(Ctx<'_>)>(f: F) {
        let runtime = Runtime::new().unwrap();
        let context = Context::full(&runtime).unwrap();
        context.with(f);
    }

    #[test]
    fn test_to_int32_wraps() {
        assert_eq!(to_int32(3.9), 3);
        assert_eq!(to_int32(-3.9), -3);
        assert_eq!(to_int32(f64::NAN), 0);
        assert_eq!(to_int32(f64::INFINITY), 0);
        assert_eq!(to_int32(4_294_967_296.0 + 5.0), 5);
        assert_eq!(to_int32(2_147_483_648.0), i32::MIN);
    }

    #[test]
    fn test_tags() {
        with_ctx(|ctx| {
            let cases = [
                ("undefined", ScriptTag::Undefined),
                ("null", ScriptTag::Null),
                ("true", ScriptTag::Bool),
                ("42", ScriptTag::Int),
                ("42n", ScriptTag::BigInt),
                ("1.5", ScriptTag::Float),
                ("'text'", ScriptTag::String),
                ("({})", ScriptTag::Object),
                ("[1]", ScriptTag::Array),
            ];
            for (source, tag) in cases {
                let value: Value = ctx.eval(source).unwrap();
                assert_eq!(ScriptTag::of(&value), tag, "{}", source);
            }

            let function: Value = ctx.eval("(function () {})").unwrap();
            assert!(matches!(ScriptTag::of(&function), ScriptTag::Unsupported(_)));
        });
    }

    #[test]
    fn test_extract_i32_accepts_numbers_only() {
        with_ctx(|ctx| {
            let int: Value = ctx.eval("7").unwrap();
            assert_eq!(extract_i32(&int, 1).unwrap(), 7);

            let float: Value = ctx.eval("-2.75").unwrap();
            assert_eq!(extract_i32(&float, 1).unwrap(), -2);

            let text: Value = ctx.eval("'7'").unwrap();
            let error = extract_i32(&text, 2).unwrap_err();
            assert_eq!(
                error.to_string(),
                "argument 2 expected integer but received string"
            );
        });
    }

    #[test]
    fn test_extract_bool_is_strict() {
        with_ctx(|ctx| {
            let value: Value = ctx.eval("false").unwrap();
            assert!(!extract_bool(&value, 1).unwrap());

            let value: Value = ctx.eval("0").unwrap();
            assert!(extract_bool(&value, 1).is_err());
        });
    }

    #[test]
    fn test_constructors() {
        with_ctx(|ctx| {
            assert!(to_undefined(&ctx).is_undefined());
            assert_eq!(to_bool(&ctx, true).as_bool(), Some(true));
            let text = to_string(&ctx, "héllo").unwrap();
            let decoded: String = text.as_string().unwrap().to_string().unwrap();
            assert_eq!(decoded, "héllo");
            let number = to_float(&ctx, 0.5);
            assert_eq!(number.as_number(), Some(0.5));
        });
    }
}
