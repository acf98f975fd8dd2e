//! Boundary trait for local ensemble-process supervision.

use async_trait::async_trait;

use crate::config::EnsembleConfig;
use crate::error::BoxError;

/// Boots and supervises the local consensus server process.
///
/// Restarts and lifecycle management beyond the initial start are the
/// supervisor's own concern; the orchestrator only needs "is started".
#[async_trait]
pub trait EnsembleSupervisor
where
    Self: Send + Sync + 'static,
{
    /// Opaque handle to the started process.
    type Handle: Send + Sync + 'static;

    /// Starts the local process with `config` as its bootstrap membership.
    ///
    /// # Errors
    ///
    /// Returns an error if the process could not be started.
    async fn start(&self, config: &EnsembleConfig) -> Result<Self::Handle, BoxError>;
}
