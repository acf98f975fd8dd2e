//! The reconfiguration orchestrator.

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::admin::{AdminClient, AdminSession, SESSION_TIMEOUT};
use crate::config::EnsembleConfig;
use crate::error::{Error, Result};
use crate::plan::ReconfigurationPlan;
use crate::supervisor::EnsembleSupervisor;

struct State<H> {
    current: Option<EnsembleConfig>,
    process: Option<H>,
}

/// Applies topology-driven membership changes to a locally supervised
/// consensus ensemble.
///
/// One instance per managed ensemble. The first topology event boots the
/// local process with the pushed config as its bootstrap membership; later
/// events reconfigure the live ensemble through the admin protocol when the
/// membership actually changed and dynamic reconfiguration is enabled.
///
/// The whole transition runs under one mutex, so overlapping [`Self::apply`]
/// calls serialize; callers are still expected to invoke it from a single
/// update worker.
pub struct Reconfigurer<S, C>
where
    S: EnsembleSupervisor,
    C: AdminClient,
{
    supervisor: S,
    admin: C,
    state: Mutex<State<S::Handle>>,
}

impl<S, C> Reconfigurer<S, C>
where
    S: EnsembleSupervisor,
    C: AdminClient,
{
    /// Creates an orchestrator with no recorded config and no process.
    pub fn new(supervisor: S, admin: C) -> Self {
        Self {
            supervisor,
            admin,
            state: Mutex::new(State {
                current: None,
                process: None,
            }),
        }
    }

    /// Handles one topology event.
    ///
    /// Starts the local process on the first event (no reconfiguration is
    /// attempted on that path, whatever the flag says). On later events, runs
    /// the reconfiguration protocol when dynamic reconfiguration is enabled
    /// and the config structurally changed, then records `new_config` as
    /// current. A failing reconfiguration propagates before that assignment,
    /// so the recorded config keeps pointing at the last membership the
    /// running process actually holds.
    ///
    /// # Errors
    ///
    /// [`Error::Start`] if the supervisor fails to boot the process;
    /// [`Error::Reconfiguration`] if the admin protocol exchange fails.
    pub async fn apply(&self, new_config: EnsembleConfig) -> Result<()> {
        let mut state = self.state.lock().await;

        if state.process.is_none() {
            debug!("starting local ensemble process");
            let handle = self
                .supervisor
                .start(&new_config)
                .await
                .map_err(Error::Start)?;
            state.process = Some(handle);
        }

        if let Some(current) = &state.current {
            if Self::should_reconfigure(current, &new_config) {
                self.reconfigure(current, &new_config).await?;
            }
        }

        state.current = Some(new_config);
        Ok(())
    }

    /// Whether a live reconfiguration is warranted: dynamic reconfiguration
    /// enabled on the new config and the config structurally changed, flag
    /// included.
    fn should_reconfigure(current: &EnsembleConfig, new_config: &EnsembleConfig) -> bool {
        new_config.dynamic_reconfiguration && new_config != current
    }

    /// The last config recorded by a completed [`Self::apply`] call.
    pub async fn current_config(&self) -> Option<EnsembleConfig> {
        self.state.lock().await.current.clone()
    }

    /// Whether the local process has been started.
    pub async fn is_started(&self) -> bool {
        self.state.lock().await.process.is_some()
    }

    async fn reconfigure(&self, current: &EnsembleConfig, target: &EnsembleConfig) -> Result<()> {
        let plan = ReconfigurationPlan::between(current, target);
        info!(
            joining = ?plan.joining(),
            leaving = ?plan.leaving(),
            "reconfiguring ensemble membership"
        );

        // The running process still holds the current membership, so the
        // session targets the current members, not the new ones.
        let connect_spec = current.connection_spec();
        let mut session = self
            .admin
            .connect(&connect_spec, SESSION_TIMEOUT)
            .await
            .map_err(Error::Reconfiguration)?;

        let outcome = session
            .reconfigure(&plan.joining_csv(), &plan.leaving_csv())
            .await;
        session.close().await;

        let applied = outcome.map_err(Error::Reconfiguration)?;
        info!(
            "applied ensemble config: {}",
            String::from_utf8_lossy(&applied)
        );
        Ok(())
    }
}
