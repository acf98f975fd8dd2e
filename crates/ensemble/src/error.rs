use thiserror::Error;

/// Error type carried across the boundary traits.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while applying a topology update.
#[derive(Debug, Error)]
pub enum Error {
    /// The supervisor failed to boot the local ensemble process.
    #[error("failed to start ensemble process: {0}")]
    Start(#[source] BoxError),

    /// Communication with the admin protocol failed during a reconfiguration
    /// attempt. Fatal to the invocation and never retried here; the next
    /// topology event retries naturally because the recorded current config
    /// still holds the last known-good membership.
    #[error("ensemble reconfiguration failed: {0}")]
    Reconfiguration(#[source] BoxError),
}
