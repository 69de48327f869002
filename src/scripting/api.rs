use std::collections::BTreeMap;

use crate::bindings::{Arity, Binding, NativeFn};

use super::{
    compression_bindings, console_bindings, encryption_bindings, engine_bindings,
    filesystem_bindings, json_bindings, support_bindings,
};

/// 脚本API - 按限定名登记所有暴露给脚本的本地函数
#[derive(Debug, Clone, Default)]
pub struct ScriptApi {
    registered_functions: BTreeMap<&'static str, Binding>,
}

impl ScriptApi {
    /// 空注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册全部内置函数
    pub fn with_builtins() -> Self {
        let mut api = Self::new();
        api.register_builtin_functions();
        api
    }

    /// 注册内置函数
    fn register_builtin_functions(&mut self) {
        console_bindings::register(self);
        filesystem_bindings::register(self);
        engine_bindings::register(self);
        encryption_bindings::register(self);
        compression_bindings::register(self);
        support_bindings::register(self);
        json_bindings::register(self);
    }

    /// 注册自定义函数，同名函数会被替换
    pub fn register_function(&mut self, name: &'static str, arity: Arity, call: NativeFn) {
        self.register(Binding { name, arity, call });
    }

    pub fn register(&mut self, binding: Binding) {
        if self.registered_functions.insert(binding.name, binding).is_some() {
            tracing::warn!(
                target: "scripting",
                function = binding.name,
                "Native function replaced"
            );
        }
    }

    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.registered_functions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.registered_functions.contains_key(name)
    }

    /// 按限定名排序
    pub fn bindings(&self) -> impl Iterator<Item = &Binding> {
        self.registered_functions.values()
    }

    pub fn len(&self) -> usize {
        self.registered_functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registered_functions.is_empty()
    }
}
