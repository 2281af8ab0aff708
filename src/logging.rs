//! 日志初始化
//!
//! 库内部只使用`tracing`宏打点；二进制入口调用[`init_tracing`]安装订阅器。
//! 默认级别为`info`，可用环境变量`RUST_LOG`覆盖（如`RUST_LOG=coord_recon=debug`）。

use std::io::IsTerminal;

use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt, util::SubscriberInitExt};

use crate::errors::{ReconError, Result};

/// 安装全局`tracing`订阅器；重复调用会返回错误
pub fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    Registry::default()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| ReconError::Logging(e.to_string()))
}
