use std::fmt;
use std::future::Future;
use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture};
use shared::{ProfileUpdateRequest, SharedError};

pub type SubmitFuture = LocalBoxFuture<'static, Result<(), SharedError>>;

/// Asynchronous save operation injected into the profile form.
///
/// Two handlers are equal only when they wrap the same closure, which is what
/// Yew needs to decide whether props changed.
#[derive(Clone)]
pub struct SubmitHandler {
    inner: Rc<dyn Fn(ProfileUpdateRequest) -> SubmitFuture>,
}

impl SubmitHandler {
    pub fn new<F, Fut>(handler: F) -> Self
    where
        F: Fn(ProfileUpdateRequest) -> Fut + 'static,
        Fut: Future<Output = Result<(), SharedError>> + 'static,
    {
        Self {
            inner: Rc::new(move |payload| handler(payload).boxed_local()),
        }
    }

    pub fn call(&self, payload: ProfileUpdateRequest) -> SubmitFuture {
        (self.inner)(payload)
    }
}

impl PartialEq for SubmitHandler {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for SubmitHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SubmitHandler(..)")
    }
}
