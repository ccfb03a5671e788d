use crate::shared::errors::AppResult;
use futures::FutureExt;
use std::any::Any;
use std::future::Future;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Run provider code so that neither an `Err` nor a panic escapes.
/// Either failure is reduced to its message.
///
/// `call` builds the handler future; a panic while building it is caught
/// as well as one while polling it.
pub(crate) async fn isolate<T, F, C>(call: C) -> Result<T, String>
where
    C: FnOnce() -> F,
    F: Future<Output = AppResult<T>>,
{
    let fut = match catch_unwind(AssertUnwindSafe(call)) {
        Ok(fut) => fut,
        Err(payload) => return Err(panic_message(payload.as_ref())),
    };

    match AssertUnwindSafe(fut).catch_unwind().await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(e.to_string()),
        Err(payload) => Err(panic_message(payload.as_ref())),
    }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("panicked: {}", message)
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("panicked: {}", message)
    } else {
        "panicked".to_string()
    }
}
