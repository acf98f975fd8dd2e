//! Ensemble membership value types pushed by the topology source.

use serde::{Deserialize, Serialize};

/// One member of the consensus ensemble.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnsembleMember {
    /// Identifier unique within one configuration.
    pub id: u32,
    /// Host the member runs on.
    pub hostname: String,
    /// Port carrying quorum data traffic.
    pub quorum_port: u16,
    /// Port used for leader election.
    pub election_port: u16,
    /// Port clients connect to.
    pub client_port: u16,
}

impl EnsembleMember {
    /// Canonical descriptor used by the admin protocol's membership-change
    /// calls: `id=hostname:quorum_port:election_port`.
    #[must_use]
    pub fn descriptor(&self) -> String {
        format!(
            "{}={}:{}:{}",
            self.id, self.hostname, self.quorum_port, self.election_port
        )
    }
}

/// Desired ensemble membership, supplied externally on every topology change.
///
/// Compared structurally, flag included, to detect no-op updates.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnsembleConfig {
    /// Members in announcement order.
    pub members: Vec<EnsembleMember>,
    /// Whether live membership changes may be applied to a running ensemble.
    pub dynamic_reconfiguration: bool,
}

impl EnsembleConfig {
    /// Connection spec for the admin protocol: `hostname:client_port` of
    /// every member, comma-joined.
    #[must_use]
    pub fn connection_spec(&self) -> String {
        self.members
            .iter()
            .map(|member| format!("{}:{}", member.hostname, member.client_port))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Descriptor of every member, in member order.
    #[must_use]
    pub fn descriptors(&self) -> Vec<String> {
        self.members.iter().map(EnsembleMember::descriptor).collect()
    }
}
