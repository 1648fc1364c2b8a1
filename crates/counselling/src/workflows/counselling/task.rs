use super::request::{AllocationError, AllocationRequest};
use super::result::AllocationResult;
use tokio::task::JoinError;

/// Run an allocation on the blocking pool so async callers stay responsive.
///
/// The allocation always runs to completion; there is no partial result. Dropping the
/// returned future does not cancel the work already handed to the blocking pool.
pub async fn allocate_in_background(
    request: AllocationRequest,
) -> Result<AllocationResult, AllocationTaskError> {
    let result = tokio::task::spawn_blocking(move || request.run()).await??;
    Ok(result)
}

#[derive(Debug, thiserror::Error)]
pub enum AllocationTaskError {
    #[error(transparent)]
    Rejected(#[from] AllocationError),
    #[error("allocation task did not complete: {0}")]
    Join(#[from] JoinError),
}
