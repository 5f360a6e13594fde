//! Deadline wrappers for calls that leave the process

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::errors::{DomainError, DomainResult};

/// Run a storage call under `limit`; on timeout fail with `Persistence`
pub(crate) async fn storage_call<T, F>(
    limit: Duration,
    operation: &'static str,
    call: F,
) -> DomainResult<T>
where
    F: Future<Output = DomainResult<T>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => {
            warn!(operation, timeout_ms = limit.as_millis() as u64, "storage call timed out");
            Err(DomainError::persistence(format!(
                "{} timed out after {}ms",
                operation,
                limit.as_millis()
            )))
        }
    }
}
