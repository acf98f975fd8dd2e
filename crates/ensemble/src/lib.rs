//! Live membership reconfiguration for the cluster's consensus ensemble.
//!
//! Each topology change pushes a new [`EnsembleConfig`] at the
//! [`Reconfigurer`], which boots the locally supervised consensus process on
//! the first event and thereafter applies membership changes through the
//! ensemble's administrative protocol without taking the ensemble offline.
//! The admin protocol and process supervision are boundary traits; this crate
//! only orchestrates calls to them.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod admin;
mod config;
mod error;
mod plan;
mod reconfigurer;
mod supervisor;

pub use admin::{AdminClient, AdminSession, SESSION_TIMEOUT};
pub use config::{EnsembleConfig, EnsembleMember};
pub use error::{BoxError, Error, Result};
pub use plan::ReconfigurationPlan;
pub use reconfigurer::Reconfigurer;
pub use supervisor::EnsembleSupervisor;
