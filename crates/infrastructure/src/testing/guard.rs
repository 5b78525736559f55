//! Panic isolation for user-supplied callbacks.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};

/// Runs `f`, turning a panic into its message when `catch` is set.
///
/// With `catch` off, panics propagate unchanged.
pub fn run_guarded<T>(catch: bool, f: impl FnOnce() -> T) -> Result<T, String> {
    if !catch {
        return Ok(f());
    }
    catch_unwind(AssertUnwindSafe(f)).map_err(|payload| panic_message(payload.as_ref()))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
