//! 组件生命周期
//!
//! 挂载时发起的加载返回一个 [`LoadHandle`]，卸载时调用 `abort()` 取消仍在进行的请求

use futures::future::{AbortHandle, AbortRegistration};

/// 可取消的加载句柄
#[derive(Debug, Clone)]
pub struct LoadHandle {
    inner: AbortHandle,
}

impl LoadHandle {
    pub(crate) fn new_pair() -> (Self, AbortRegistration) {
        let (inner, registration) = AbortHandle::new_pair();
        (Self { inner }, registration)
    }

    /// 取消加载（组件卸载）
    pub fn abort(&self) {
        self.inner.abort();
    }

    pub fn is_aborted(&self) -> bool {
        self.inner.is_aborted()
    }
}

/// 同步的是/否确认
///
/// 删除等不可撤销操作在发起请求前必须经过确认
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}
