//! In-memory implementations of the ensemble boundary traits for tests.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use nodewarden_ensemble::{
    AdminClient, AdminSession, BoxError, EnsembleConfig, EnsembleSupervisor,
};

/// Opaque handle returned by [`MockSupervisor`].
#[derive(Debug)]
pub struct MockHandle;

/// Supervisor recording every started config, optionally failing.
#[derive(Clone, Default)]
pub struct MockSupervisor {
    started: Arc<Mutex<Vec<EnsembleConfig>>>,
    fail: bool,
}

impl MockSupervisor {
    /// Creates a supervisor whose starts succeed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a supervisor whose starts fail.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            started: Arc::new(Mutex::new(Vec::new())),
            fail: true,
        }
    }

    /// Configs passed to successful `start` calls, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn started(&self) -> Vec<EnsembleConfig> {
        self.started.lock().unwrap().clone()
    }
}

#[async_trait]
impl EnsembleSupervisor for MockSupervisor {
    type Handle = MockHandle;

    async fn start(&self, config: &EnsembleConfig) -> Result<MockHandle, BoxError> {
        if self.fail {
            return Err("mock supervisor start failure".into());
        }
        self.started.lock().unwrap().push(config.clone());
        Ok(MockHandle)
    }
}

/// Record of one `reconfigure` call observed by a [`MockSession`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReconfigureCall {
    /// Connection spec the session was opened against.
    pub connect_spec: String,
    /// Comma-joined joining descriptors.
    pub joining: String,
    /// Comma-joined leaving descriptors.
    pub leaving: String,
}

#[derive(Default)]
struct AdminState {
    fail_connect: bool,
    fail_reconfigure: bool,
    connects: Mutex<Vec<String>>,
    calls: Mutex<Vec<ReconfigureCall>>,
    closed: AtomicUsize,
}

/// Admin client recording connects and reconfigure calls, optionally
/// scripted to fail at either step.
#[derive(Clone, Default)]
pub struct MockAdminClient {
    state: Arc<AdminState>,
}

impl MockAdminClient {
    /// Creates a client whose sessions succeed and return a fixed committed
    /// config payload.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a client whose connects fail.
    #[must_use]
    pub fn failing_connect() -> Self {
        Self {
            state: Arc::new(AdminState {
                fail_connect: true,
                ..AdminState::default()
            }),
        }
    }

    /// Creates a client whose reconfigure calls fail after being recorded.
    #[must_use]
    pub fn failing_reconfigure() -> Self {
        Self {
            state: Arc::new(AdminState {
                fail_reconfigure: true,
                ..AdminState::default()
            }),
        }
    }

    /// Connection specs of every session opened, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn connects(&self) -> Vec<String> {
        self.state.connects.lock().unwrap().clone()
    }

    /// Every reconfigure call observed, in order, including failed ones.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<ReconfigureCall> {
        self.state.calls.lock().unwrap().clone()
    }

    /// Number of sessions closed so far.
    #[must_use]
    pub fn closed_sessions(&self) -> usize {
        self.state.closed.load(Ordering::SeqCst)
    }
}

/// Session handed out by [`MockAdminClient`].
pub struct MockSession {
    state: Arc<AdminState>,
    connect_spec: String,
}

#[async_trait]
impl AdminClient for MockAdminClient {
    type Session = MockSession;

    async fn connect(
        &self,
        connect_spec: &str,
        _session_timeout: Duration,
    ) -> Result<MockSession, BoxError> {
        if self.state.fail_connect {
            return Err("mock admin connect failure".into());
        }
        self.state
            .connects
            .lock()
            .unwrap()
            .push(connect_spec.to_string());
        Ok(MockSession {
            state: Arc::clone(&self.state),
            connect_spec: connect_spec.to_string(),
        })
    }
}

#[async_trait]
impl AdminSession for MockSession {
    async fn reconfigure(&mut self, joining: &str, leaving: &str) -> Result<Bytes, BoxError> {
        self.state.calls.lock().unwrap().push(ReconfigureCall {
            connect_spec: self.connect_spec.clone(),
            joining: joining.to_string(),
            leaving: leaving.to_string(),
        });
        if self.state.fail_reconfigure {
            return Err("mock admin reconfigure failure".into());
        }
        Ok(Bytes::from_static(b"version=200000000"))
    }

    async fn close(self) {
        self.state.closed.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> EnsembleConfig {
        EnsembleConfig {
            members: vec![],
            dynamic_reconfiguration: true,
        }
    }

    #[tokio::test]
    async fn supervisor_records_starts() {
        let supervisor = MockSupervisor::new();
        supervisor.start(&config()).await.unwrap();
        assert_eq!(supervisor.started().len(), 1);
    }

    #[tokio::test]
    async fn failing_supervisor_records_nothing() {
        let supervisor = MockSupervisor::failing();
        assert!(supervisor.start(&config()).await.is_err());
        assert!(supervisor.started().is_empty());
    }

    #[tokio::test]
    async fn session_records_exchange_and_close() {
        let client = MockAdminClient::new();
        let mut session = client
            .connect("a:2181", Duration::from_secs(30))
            .await
            .unwrap();
        let applied = session.reconfigure("1=a:2182:2183", "").await.unwrap();
        session.close().await;

        assert!(!applied.is_empty());
        assert_eq!(client.connects(), vec!["a:2181".to_string()]);
        assert_eq!(client.calls().len(), 1);
        assert_eq!(client.closed_sessions(), 1);
    }
}
