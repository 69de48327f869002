//! 宿主入口
//!
//! `script_host [--config <file>] <script.js>...`

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::HostConfig;
use crate::core::{initialize_logging, HostError, HostResult};
use crate::scripting::ScriptingRuntime;
use crate::services::StdShell;

/// 命令行参数
#[derive(Debug, Default, PartialEq, Eq)]
pub struct HostArgs {
    pub config: Option<PathBuf>,
    pub scripts: Vec<PathBuf>,
}

impl HostArgs {
    /// 解析参数（不含程序名）
    pub fn parse<I, S>(args: I) -> HostResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut parsed = HostArgs::default();
        let mut args = args.into_iter().map(Into::into);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" | "-c" => {
                    let path = args.next().ok_or_else(|| {
                        HostError::Init("--config requires a file path".to_string())
                    })?;
                    parsed.config = Some(PathBuf::from(path));
                }
                _ => parsed.scripts.push(PathBuf::from(arg)),
            }
        }
        if parsed.scripts.is_empty() {
            return Err(HostError::Init(
                "usage: script_host [--config <file>] <script.js>...".to_string(),
            ));
        }
        Ok(parsed)
    }
}

/// 脚本宿主
pub struct Host;

impl Host {
    /// 从进程参数运行
    pub fn run() -> HostResult<()> {
        let args = HostArgs::parse(std::env::args().skip(1))?;
        Self::run_with(args)
    }

    pub fn run_with(args: HostArgs) -> HostResult<()> {
        let config = Self::load_config(args.config.as_deref())?;
        initialize_logging(&config.logging);

        let runtime = ScriptingRuntime::new(&config, Arc::new(StdShell::new()))?;
        for script in &args.scripts {
            runtime.run_file(script)?;
        }
        tracing::info!(target: "host", scripts = args.scripts.len(), "All scripts finished");
        Ok(())
    }

    /// 加载配置：显式路径优先，其次自动查找；随后应用环境变量并验证
    pub fn load_config(path: Option<&std::path::Path>) -> HostResult<HostConfig> {
        let mut config = match path {
            Some(path) => HostConfig::from_file(path)?,
            None => HostConfig::load_or_default(),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }
}
