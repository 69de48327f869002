// ============================================================================
// 脚本运行时
// 每个 ScriptingRuntime 拥有独立的 QuickJS Runtime 与 Context，
// 并在全局命名空间对象下安装全部本地函数
// ============================================================================

pub mod api;
pub mod compression_bindings;
pub mod console_bindings;
pub mod encryption_bindings;
pub mod engine_bindings;
pub mod filesystem_bindings;
pub mod json_bindings;
pub mod support_bindings;

pub use api::ScriptApi;

use std::path::Path;
use std::sync::Arc;

use rquickjs::{Context, Ctx, Runtime, Value};

use crate::bindings::{js, Converter, Document};
use crate::config::HostConfig;
use crate::core::{HostError, HostResult};
use crate::services::{FileSystemService, HostServices, Shell};

pub struct ScriptingRuntime {
    #[allow(dead_code)]
    runtime: Runtime,
    context: Context,
    services: Arc<HostServices>,
    namespace: String,
}

impl ScriptingRuntime {
    /// 按配置创建运行时并安装内置函数
    pub fn new(config: &HostConfig, shell: Arc<dyn Shell>) -> HostResult<Self> {
        let services = Arc::new(HostServices::from_config(config, shell));
        Self::with_api(&ScriptApi::with_builtins(), services, &config.bridge.namespace)
    }

    /// 使用现成的服务（例如带有已注册编解码器的服务）创建运行时
    pub fn with_services(services: Arc<HostServices>, namespace: &str) -> HostResult<Self> {
        Self::with_api(&ScriptApi::with_builtins(), services, namespace)
    }

    /// 只安装 `api` 中的函数
    pub fn with_api(
        api: &ScriptApi,
        services: Arc<HostServices>,
        namespace: &str,
    ) -> HostResult<Self> {
        let runtime = Runtime::new()?;
        let context = Context::full(&runtime)?;
        context.with(|ctx| js::install(&ctx, namespace, api.bindings(), &services))?;
        tracing::info!(
            target: "scripting",
            namespace,
            functions = api.len(),
            "Scripting runtime ready"
        );

        Ok(Self {
            runtime,
            context,
            services,
            namespace: namespace.to_string(),
        })
    }

    pub fn services(&self) -> &Arc<HostServices> {
        &self.services
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// 执行脚本，丢弃结果
    pub fn run_script(&self, code: &str) -> HostResult<()> {
        self.context.with(|ctx| {
            ctx.eval::<(), _>(code)
                .map_err(|error| script_failure(&ctx, error))
        })
    }

    /// 执行脚本文件
    pub fn run_file(&self, path: &Path) -> HostResult<()> {
        let source = FileSystemService::read_text(path)?;
        tracing::info!(target: "scripting", path = %path.display(), "Running script");
        self.run_script(&source)
    }

    /// 执行脚本并把结果转换为 [`Document`]
    pub fn evaluate(&self, code: &str) -> HostResult<Document> {
        let max_depth = self.services.max_depth();
        self.context.with(|ctx| {
            let value = ctx
                .eval::<Value, _>(code)
                .map_err(|error| script_failure(&ctx, error))?;
            Ok(Converter::new(max_depth).to_document(&value)?)
        })
    }

    /// 在上下文中运行任意闭包
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: for<'js> FnOnce(Ctx<'js>) -> R,
    {
        self.context.with(f)
    }
}

/// 把未捕获的脚本异常转换为宿主错误
fn script_failure(ctx: &Ctx<'_>, error: rquickjs::Error) -> HostError {
    if !matches!(error, rquickjs::Error::Exception) {
        return HostError::Runtime(error);
    }
    let thrown = ctx.catch();
    let message = if let Some(exception) = thrown.as_exception() {
        let name = exception
            .get::<_, Option<String>>("name")
            .ok()
            .flatten()
            .unwrap_or_else(|| "Error".to_string());
        format!("{}: {}", name, exception.message().unwrap_or_default())
    } else if let Some(text) = thrown.as_string() {
        text.to_string().unwrap_or_default()
    } else {
        format!("{:?}", thrown)
    };
    tracing::debug!(target: "scripting", "Uncaught exception: {}", message);
    HostError::Script(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::MemoryShell;

    fn runtime() -> ScriptingRuntime {
        ScriptingRuntime::new(&HostConfig::default(), Arc::new(MemoryShell::new())).unwrap()
    }

    #[test]
    fn test_evaluate_returns_document() {
        let runtime = runtime();
        let document = runtime.evaluate("({ a: 1, b: 'two' })").unwrap();
        assert_eq!(document.get("a"), Some(&Document::Float(1.0)));
        assert_eq!(document.get("b").and_then(Document::as_str), Some("two"));
    }

    #[test]
    fn test_uncaught_exception_message() {
        let runtime = runtime();
        let error = runtime.run_script("throw new TypeError('boom')").unwrap_err();
        assert_eq!(error.to_string(), "Uncaught exception: TypeError: boom");
    }

    #[test]
    fn test_namespace_is_configurable() {
        let mut config = HostConfig::default();
        config.bridge.namespace = "Sen".to_string();
        let runtime = ScriptingRuntime::new(&config, Arc::new(MemoryShell::new())).unwrap();
        let document = runtime
            .evaluate("typeof Sen.Encryption.SHA256.hash + typeof globalThis.Kernel")
            .unwrap();
        assert_eq!(document, Document::from("functionundefined"));
    }

    #[test]
    fn test_independent_runtimes() {
        let first = runtime();
        let second = runtime();
        first.run_script("globalThis.marker = 1").unwrap();
        assert_eq!(
            second.evaluate("typeof marker").unwrap(),
            Document::from("undefined")
        );
    }
}
