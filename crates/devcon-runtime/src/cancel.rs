//! Cancellation plumbing shared by the port adapters and the services.

use std::future::Future;

use devcon_common::error::{DevconError, Result};
use tokio_util::sync::CancellationToken;

/// Fails with [`DevconError::Cancelled`] if `cancel` has already fired.
///
/// # Errors
///
/// Returns [`DevconError::Cancelled`] naming `operation`.
pub fn check(cancel: &CancellationToken, operation: &'static str) -> Result<()> {
    if cancel.is_cancelled() {
        return Err(DevconError::Cancelled { operation });
    }
    Ok(())
}

/// Runs `fut` until it completes or `cancel` fires, whichever is first.
///
/// A token that fired before the call never polls `fut`.
///
/// # Errors
///
/// Returns the error of `fut`, or [`DevconError::Cancelled`] naming
/// `operation` if the token fired first.
pub async fn guarded<T, F>(cancel: &CancellationToken, operation: &'static str, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    check(cancel, operation)?;
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(DevconError::Cancelled { operation }),
        result = fut => result,
    }
}
