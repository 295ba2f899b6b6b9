//! Panic isolation around builder and source invocations.
//!
//! Builders and sources are plugged-in code. A fault that escapes their
//! error channel must not abort the whole resolution run, so every
//! invocation goes through one of these wrappers and comes back as an
//! `Err(message)` the engine turns into a per-identifier source failure.

use std::any::Any;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};

use futures::FutureExt;

/// Run a synchronous builder or translator call, converting a panic into an
/// error message.
pub(super) fn catch_sync<T>(f: impl FnOnce() -> T) -> Result<T, String> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(panic_message)
}

/// Run a source future, converting a panic into an error message.
pub(super) async fn catch_async<T>(fut: impl Future<Output = T>) -> Result<T, String> {
    AssertUnwindSafe(fut).catch_unwind().await.map_err(panic_message)
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "panicked with a non-string payload".to_string()
    }
}
