//! Structured Document Converter
//!
//! Recursive conversion between script value trees and [`Document`] trees.
//!
//! Integers are deliberately asymmetric across the boundary: a small script
//! integer becomes `Document::Float`, a script BigInt becomes `Document::Int`,
//! and every document integer comes back as a script BigInt.

use rquickjs::convert::Coerced;
use rquickjs::object::Property;
use rquickjs::{Array, BigInt, Ctx, Object, Value};

use super::document::{Document, DocumentMap};
use super::scalar::{self, ScriptTag};
use crate::core::{BridgeError, BridgeResult};

pub const DEFAULT_MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, Copy)]
pub struct Converter {
    max_depth: usize,
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl Converter {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    fn enter(&self, depth: usize) -> BridgeResult<()> {
        if depth > self.max_depth {
            return Err(BridgeError::Range(format!(
                "document nesting exceeds {} levels",
                self.max_depth
            )));
        }
        Ok(())
    }

    /// Script value to document.
    pub fn to_document(&self, value: &Value<'_>) -> BridgeResult<Document> {
        self.document_at(value, 0)
    }

    fn document_at(&self, value: &Value<'_>, depth: usize) -> BridgeResult<Document> {
        self.enter(depth)?;
        match ScriptTag::of(value) {
            ScriptTag::Array => {
                let Some(array) = value.as_array() else {
                    return Err(BridgeError::UnsupportedValue("array".to_string()));
                };
                let length = array.len() as u32 as usize;
                let mut items = Vec::with_capacity(length);
                for index in 0..length {
                    let element: Value = array.get(index)?;
                    items.push(self.document_at(&element, depth + 1)?);
                }
                Ok(Document::Array(items))
            }
            ScriptTag::Object => {
                let Some(object) = value.as_object() else {
                    return Err(BridgeError::UnsupportedValue("object".to_string()));
                };
                let mut map = DocumentMap::new();
                for entry in object.props::<String, Value>() {
                    let (key, property) = entry?;
                    map.insert(key, self.document_at(&property, depth + 1)?);
                }
                Ok(Document::Object(map))
            }
            ScriptTag::String => {
                let text = scalar::expect_string(value, 1)?.to_string()?;
                Ok(Document::String(text))
            }
            ScriptTag::Bool => Ok(Document::Bool(scalar::extract_bool(value, 1)?)),
            ScriptTag::Float => value
                .as_float()
                .map(Document::Float)
                .ok_or_else(|| scalar::mismatch("float", value, 1)),
            ScriptTag::Int => value
                .as_int()
                .map(|int| Document::Float(f64::from(int)))
                .ok_or_else(|| scalar::mismatch("integer", value, 1)),
            ScriptTag::BigInt => match value.as_big_int() {
                Some(big) => Ok(Document::Int(exact_i64(value, big.clone().to_i64()?)?)),
                None => Err(scalar::mismatch("bigint", value, 1)),
            },
            ScriptTag::Undefined | ScriptTag::Null => Ok(Document::Null),
            ScriptTag::Unsupported(name) => Err(BridgeError::UnsupportedValue(name)),
        }
    }

    /// Document to script value.
    pub fn to_script_value<'js>(
        &self,
        ctx: &Ctx<'js>,
        document: &Document,
    ) -> BridgeResult<Value<'js>> {
        self.script_value_at(ctx, document, 0)
    }

    fn script_value_at<'js>(
        &self,
        ctx: &Ctx<'js>,
        document: &Document,
        depth: usize,
    ) -> BridgeResult<Value<'js>> {
        self.enter(depth)?;
        match document {
            Document::Object(map) => {
                let object = Object::new(ctx.clone())?;
                for (key, value) in map.iter() {
                    let value = self.script_value_at(ctx, value, depth + 1)?;
                    object.prop(
                        key,
                        Property::from(value).writable().configurable().enumerable(),
                    )?;
                }
                Ok(object.into_value())
            }
            Document::Array(items) => {
                let array = Array::new(ctx.clone())?;
                for (index, item) in items.iter().enumerate() {
                    array.set(index, self.script_value_at(ctx, item, depth + 1)?)?;
                }
                Ok(array.into_value())
            }
            Document::String(text) => scalar::to_string(ctx, text),
            Document::Bool(value) => Ok(scalar::to_bool(ctx, *value)),
            Document::Int(value) => Ok(BigInt::from_i64(ctx.clone(), *value)?.into_value()),
            Document::UInt(value) => {
                let signed = i64::try_from(*value).map_err(|_| {
                    BridgeError::Range(format!(
                        "unsigned integer {} does not fit in a 64-bit signed integer",
                        value
                    ))
                })?;
                Ok(BigInt::from_i64(ctx.clone(), signed)?.into_value())
            }
            Document::Float(value) => Ok(scalar::to_float(ctx, *value)),
            Document::Null => Ok(scalar::to_undefined(ctx)),
        }
    }
}

/// `to_i64` wraps modulo 2^64; the decimal text of the original BigInt must
/// match the narrowed value.
fn exact_i64(value: &Value<'_>, narrowed: i64) -> BridgeResult<i64> {
    let Coerced(text) = value.get::<Coerced<String>>()?;
    if text != narrowed.to_string() {
        return Err(BridgeError::Range(format!(
            "bigint {} does not fit in a 64-bit signed integer",
            text
        )));
    }
    Ok(narrowed)
}
