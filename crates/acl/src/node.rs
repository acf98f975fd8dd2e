//! Fleet-member value types consumed by the rule engine.

use std::net::IpAddr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Role a fleet member plays in the cluster.
///
/// The rule engine branches on this closed set; `ConfigServer` marks nodes
/// hosting the cluster's metadata/consensus quorum.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum NodeRole {
    /// Runs tenant workloads.
    Tenant,
    /// Bare host carrying tenant containers.
    Host,
    /// Routing layer node.
    Proxy,
    /// Hosts the metadata/consensus quorum.
    ConfigServer,
}

/// A fleet member that may appear in another node's trust declaration.
///
/// The address must be a single IPv4 or IPv6 literal and is validated at
/// construction; everything else about the node is opaque to this crate.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Node {
    hostname: String,
    role: NodeRole,
    address: IpAddr,
}

impl Node {
    /// Creates a node, validating `address` as an IPv4 or IPv6 literal.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAddress`] if `address` parses as neither
    /// family.
    pub fn new(hostname: impl Into<String>, role: NodeRole, address: &str) -> Result<Self> {
        let address = address.parse().map_err(|_| Error::InvalidAddress {
            address: address.to_string(),
        })?;

        Ok(Self {
            hostname: hostname.into(),
            role,
            address,
        })
    }

    /// The node's hostname.
    #[must_use]
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// The node's role.
    #[must_use]
    pub const fn role(&self) -> NodeRole {
        self.role
    }

    /// The node's validated address.
    #[must_use]
    pub const fn address(&self) -> IpAddr {
        self.address
    }
}
