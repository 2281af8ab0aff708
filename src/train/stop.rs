//! 提前终止信号
//!
//! 训练循环只在检查点轮询[`StopSignal`]，请求终止后本次迭代照常结束，
//! 随后仍会执行收尾的报告。

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

pub trait StopSignal {
    /// 在检查点`iteration`处是否应当终止训练
    fn should_stop(&mut self, iteration: usize) -> bool;
}

/// 从不终止
#[derive(Debug, Default, Clone, Copy)]
pub struct NeverStop;

impl StopSignal for NeverStop {
    fn should_stop(&mut self, _iteration: usize) -> bool {
        false
    }
}

/// 可跨线程共享的终止标志
#[derive(Debug, Default, Clone)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

impl StopSignal for StopFlag {
    fn should_stop(&mut self, _iteration: usize) -> bool {
        self.is_requested()
    }
}

/// 由闭包决定是否终止
pub struct StopWhen<F>(pub F);

impl<F: FnMut(usize) -> bool> StopSignal for StopWhen<F> {
    fn should_stop(&mut self, iteration: usize) -> bool {
        (self.0)(iteration)
    }
}

/// 指定文件出现时终止（如在输出目录下`touch STOP`）
#[derive(Debug, Clone)]
pub struct StopFile {
    path: PathBuf,
}

impl StopFile {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl StopSignal for StopFile {
    fn should_stop(&mut self, iteration: usize) -> bool {
        let found = self.path.exists();
        if found {
            tracing::info!(iteration, path = %self.path.display(), "检测到终止文件");
        }
        found
    }
}
