//! Waiting on long-running import operations

use std::time::Duration;

use crate::error::{Error, Result};
use crate::providers::FileSearchBackend;
use crate::types::Operation;

/// Poll `operation` at a fixed interval until it reports done
///
/// Returns only after `done == true` has been observed. No timeout: an
/// operation that never completes blocks forever. A completed operation that
/// carries an error status is returned as `Error::Provisioning`.
pub async fn wait_for_operation(
    backend: &dyn FileSearchBackend,
    mut operation: Operation,
    interval: Duration,
) -> Result<Operation> {
    while !operation.done {
        tokio::time::sleep(interval).await;
        operation = backend.get_operation(&operation.name).await?;
        tracing::debug!("Operation {} done={}", operation.name, operation.done);
    }

    if let Some(reason) = operation.failure() {
        return Err(Error::provisioning(format!(
            "Import {} failed: {}",
            operation.name, reason
        )));
    }

    tracing::info!("Import completed: {}", operation.name);
    Ok(operation)
}
