//! Dispatch Contract
//!
//! Every native function exposed to scripts goes through the same pipeline:
//!
//! 1. the argument count is checked against the declared [`Arity`];
//! 2. arguments are extracted through [`Call`], strings borrowed inside the
//!    call's [`CallScope`];
//! 3. exactly one collaborator runs with native arguments;
//! 4. the native result is converted back, or `undefined` is returned;
//! 5. any failure becomes a script exception after every borrow is released.

use std::fmt;

use rquickjs::{Ctx, Value};

use super::convert::Converter;
use super::document::Document;
use super::guard::{BorrowedStr, CallScope};
use super::scalar;
use crate::core::{BridgeError, BridgeResult};
use crate::services::HostServices;

/// Signature shared by every exposed native function.
pub type NativeFn = for<'js, 'c> fn(&Call<'js, 'c>) -> BridgeResult<Value<'js>>;

/// Accepted argument counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    OneOf(&'static [usize]),
}

impl Arity {
    pub fn accepts(&self, count: usize) -> bool {
        match self {
            Arity::Exactly(expected) => *expected == count,
            Arity::OneOf(accepted) => accepted.contains(&count),
        }
    }

    pub fn check(&self, count: usize) -> BridgeResult<()> {
        if self.accepts(count) {
            Ok(())
        } else {
            Err(BridgeError::Arity {
                expected: self.to_string(),
                actual: count,
            })
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(expected) => write!(f, "{}", expected),
            Arity::OneOf(accepted) => {
                for (index, count) in accepted.iter().enumerate() {
                    if index > 0 {
                        f.write_str(" or ")?;
                    }
                    write!(f, "{}", count)?;
                }
                Ok(())
            }
        }
    }
}

/// A named native function together with its declared arity.
#[derive(Clone, Copy)]
pub struct Binding {
    pub name: &'static str,
    pub arity: Arity,
    pub call: NativeFn,
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish()
    }
}

/// Arguments and services for one native call.
pub struct Call<'js, 'c> {
    ctx: &'c Ctx<'js>,
    args: &'c [Value<'js>],
    services: &'c HostServices,
    scope: CallScope<'c>,
}

impl<'js, 'c> Call<'js, 'c> {
    pub fn new(ctx: &'c Ctx<'js>, args: &'c [Value<'js>], services: &'c HostServices) -> Self {
        Self {
            ctx,
            args,
            services,
            scope: CallScope::new(services.ledger()),
        }
    }

    pub fn ctx(&self) -> &Ctx<'js> {
        self.ctx
    }

    pub fn services(&self) -> &HostServices {
        self.services
    }

    pub fn scope(&self) -> &CallScope<'c> {
        &self.scope
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn value(&self, index: usize) -> BridgeResult<&Value<'js>> {
        self.args.get(index).ok_or_else(|| BridgeError::Arity {
            expected: format!("at least {}", index + 1),
            actual: self.args.len(),
        })
    }

    /// Borrows argument `index` as a string for the rest of the call.
    pub fn string(&self, index: usize) -> BridgeResult<BorrowedStr<'js, '_>> {
        self.scope.borrow_str(self.value(index)?, index + 1)
    }

    pub fn bool(&self, index: usize) -> BridgeResult<bool> {
        scalar::extract_bool(self.value(index)?, index + 1)
    }

    pub fn i32(&self, index: usize) -> BridgeResult<i32> {
        scalar::extract_i32(self.value(index)?, index + 1)
    }

    /// `None` when the argument was not supplied.
    pub fn optional_i32(&self, index: usize) -> BridgeResult<Option<i32>> {
        if index < self.args.len() {
            self.i32(index).map(Some)
        } else {
            Ok(None)
        }
    }

    pub fn document(&self, index: usize) -> BridgeResult<Document> {
        self.converter().to_document(self.value(index)?)
    }

    pub fn converter(&self) -> Converter {
        Converter::new(self.services.max_depth())
    }

    pub fn script_value(&self, document: &Document) -> BridgeResult<Value<'js>> {
        self.converter().to_script_value(self.ctx, document)
    }

    pub fn undefined(&self) -> Value<'js> {
        scalar::to_undefined(self.ctx)
    }

    pub fn string_value(&self, text: &str) -> BridgeResult<Value<'js>> {
        scalar::to_string(self.ctx, text)
    }

    pub fn bool_value(&self, value: bool) -> Value<'js> {
        scalar::to_bool(self.ctx, value)
    }
}

/// Runs `binding` and returns its native result or bridge error.
///
/// The arity check happens before any argument is touched, and every string
/// borrowed by the call is released before this returns.
pub fn invoke<'js>(
    ctx: &Ctx<'js>,
    binding: &Binding,
    services: &HostServices,
    args: &[Value<'js>],
) -> BridgeResult<Value<'js>> {
    binding.arity.check(args.len())?;
    let call = Call::new(ctx, args, services);
    let result = (binding.call)(&call);
    debug_assert_eq!(call.scope().open(), 0, "{} leaked a borrowed string", binding.name);
    result
}

/// Entry point used by installed script functions. Bridge errors are thrown
/// into the runtime as exceptions.
pub fn dispatch<'js>(
    ctx: &Ctx<'js>,
    binding: &Binding,
    services: &HostServices,
    args: &[Value<'js>],
) -> rquickjs::Result<Value<'js>> {
    tracing::trace!(target: "bridge", function = binding.name, argc = args.len(), "dispatch");
    invoke(ctx, binding, services, args).map_err(|error| {
        tracing::debug!(
            target: "bridge",
            function = binding.name,
            kind = %error.kind(),
            "{}",
            error
        );
        error.throw(ctx)
    })
}
