use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Sleeps for `delay` unless `cancel` fires first.
///
/// Returns `true` when the run was cancelled, before or during the sleep.
pub async fn courtesy_delay(delay: Duration, cancel: &CancellationToken) -> bool {
    if cancel.is_cancelled() {
        return true;
    }
    if delay.is_zero() {
        return false;
    }
    tokio::select! {
        _ = cancel.cancelled() => true,
        _ = tokio::time::sleep(delay) => false,
    }
}
