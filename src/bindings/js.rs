//! JavaScript installation using rquickjs
//!
//! Publishes every registered [`Binding`] as a function on nested namespace
//! objects under one global, e.g. `Kernel.Encryption.SHA256.hash`.

use std::sync::Arc;

use rquickjs::function::Rest;
use rquickjs::{Ctx, Function, Object, Value};

use super::protocol::{dispatch, Binding};
use crate::core::BridgeResult;
use crate::services::HostServices;

/// Returns `parent[name]`, creating an empty object when it is missing.
fn namespace_object<'js>(
    ctx: &Ctx<'js>,
    parent: &Object<'js>,
    name: &str,
) -> BridgeResult<Object<'js>> {
    if let Some(existing) = parent.get::<_, Option<Object>>(name)? {
        return Ok(existing);
    }
    let object = Object::new(ctx.clone())?;
    parent.set(name, object.clone())?;
    Ok(object)
}

/// Installs one binding under `root`, following the dotted path in its name.
pub fn install_binding<'js>(
    ctx: &Ctx<'js>,
    root: &Object<'js>,
    binding: Binding,
    services: Arc<HostServices>,
) -> BridgeResult<()> {
    let (path, leaf) = match binding.name.rsplit_once('.') {
        Some((path, leaf)) => (Some(path), leaf),
        None => (None, binding.name),
    };

    let mut target = root.clone();
    if let Some(path) = path {
        for segment in path.split('.') {
            target = namespace_object(ctx, &target, segment)?;
        }
    }

    let function = Function::new(
        ctx.clone(),
        move |ctx: Ctx<'js>, args: Rest<Value<'js>>| -> rquickjs::Result<Value<'js>> {
            dispatch(&ctx, &binding, &services, &args.0)
        },
    )?;
    target.set(leaf, function)?;
    Ok(())
}

/// Installs `bindings` under the global object `namespace`.
pub fn install<'js, 'b>(
    ctx: &Ctx<'js>,
    namespace: &str,
    bindings: impl IntoIterator<Item = &'b Binding>,
    services: &Arc<HostServices>,
) -> BridgeResult<()> {
    let root = namespace_object(ctx, &ctx.globals(), namespace)?;
    let mut installed = 0usize;
    for binding in bindings {
        install_binding(ctx, &root, *binding, Arc::clone(services))?;
        installed += 1;
    }
    tracing::debug!(target: "scripting", namespace, installed, "Native functions installed");
    Ok(())
}
