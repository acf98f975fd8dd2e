//! Boundary traits for the ensemble's administrative protocol.
//!
//! The protocol itself (wire format, retries, leader routing) belongs to an
//! external client library; this crate only drives it.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::BoxError;

/// Session-establishment timeout for administrative connections.
pub const SESSION_TIMEOUT: Duration = Duration::from_secs(30);

/// Opens administrative sessions against a running ensemble.
#[async_trait]
pub trait AdminClient
where
    Self: Send + Sync + 'static,
{
    /// Session type produced by a successful connect.
    type Session: AdminSession;

    /// Connects to the ensemble reachable at `connect_spec`, a comma-joined
    /// list of `hostname:client_port` pairs.
    ///
    /// # Errors
    ///
    /// Returns an error if no session could be established within
    /// `session_timeout`.
    async fn connect(
        &self,
        connect_spec: &str,
        session_timeout: Duration,
    ) -> Result<Self::Session, BoxError>;
}

/// One administrative exchange with a running ensemble.
///
/// Sessions are scoped to a single request/response exchange and are never
/// pooled; [`AdminSession::close`] runs on every exit path.
#[async_trait]
pub trait AdminSession
where
    Self: Send + Sync + 'static,
{
    /// Applies a membership change unconditionally, against whatever
    /// configuration version the ensemble currently holds.
    ///
    /// `joining` and `leaving` are comma-joined descriptor lists
    /// (`id=hostname:quorum_port:election_port`), empty strings when a list
    /// is empty. Returns the ensemble's newly committed configuration bytes.
    ///
    /// # Errors
    ///
    /// Returns an error on any communication, protocol, or interruption
    /// failure; the caller aborts the whole reconfiguration attempt.
    async fn reconfigure(&mut self, joining: &str, leaving: &str) -> Result<Bytes, BoxError>;

    /// Closes the session.
    async fn close(self);
}
