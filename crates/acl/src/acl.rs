//! The trust declaration and the rule engine over it.

use std::collections::{BTreeMap, BTreeSet};
use std::net::IpAddr;
use std::str::FromStr;

use cidr::IpCidr;
use tracing::debug;

use crate::node::{Node, NodeRole};
use crate::rule::{Chain, IpFamily, Rule};

/// Service ports of the metadata/consensus ensemble: client, quorum data,
/// and leader election. On config servers these are locked down to trusted
/// peers only.
pub const ENSEMBLE_SERVICE_PORTS: [u16; 3] = [2181, 2182, 2183];

/// A node's trust declaration: the ports, peer nodes, and networks it accepts
/// inbound traffic from.
///
/// Constructed fresh whenever the upstream declaration changes and never
/// mutated. Ordered containers are used throughout so rule generation is
/// deterministic by construction, whatever order the inputs arrived in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Acl {
    trusted_ports: BTreeSet<u16>,
    // Keyed by address string; gives uniqueness by address and the
    // lexicographic ascending iteration the rule output requires.
    trusted_nodes: BTreeMap<String, Node>,
    trusted_networks: BTreeSet<String>,
}

impl Acl {
    /// Creates a trust declaration.
    ///
    /// Ports are destination TCP ports in the range 1–65535. Nodes are
    /// deduplicated by address. Networks are CIDR literals kept exactly as
    /// supplied.
    pub fn new(
        trusted_ports: impl IntoIterator<Item = u16>,
        trusted_nodes: impl IntoIterator<Item = Node>,
        trusted_networks: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            trusted_ports: trusted_ports.into_iter().collect(),
            trusted_nodes: trusted_nodes
                .into_iter()
                .map(|node| (node.address().to_string(), node))
                .collect(),
            trusted_networks: trusted_networks.into_iter().collect(),
        }
    }

    /// Trusted destination ports, ascending.
    pub fn trusted_ports(&self) -> impl Iterator<Item = u16> + '_ {
        self.trusted_ports.iter().copied()
    }

    /// Trusted peer nodes, ascending by address string.
    pub fn trusted_nodes(&self) -> impl Iterator<Item = &Node> {
        self.trusted_nodes.values()
    }

    /// Trusted network CIDR literals, ascending.
    pub fn trusted_networks(&self) -> impl Iterator<Item = &str> {
        self.trusted_networks.iter().map(String::as_str)
    }

    /// Generates the ordered rule sequence for one IP family.
    ///
    /// `self_role` is the role of the node the rules are generated for;
    /// config servers get an extra block restricting the ensemble service
    /// ports to trusted peers. Pure and deterministic: logically equal
    /// declarations yield identical output regardless of insertion order.
    #[must_use]
    pub fn to_rules(&self, family: IpFamily, self_role: NodeRole) -> Vec<Rule> {
        let mut rules = vec![
            Rule::PolicyAccept(Chain::Input),
            Rule::PolicyAccept(Chain::Forward),
            Rule::PolicyAccept(Chain::Output),
            Rule::AcceptEstablished,
            Rule::AcceptLoopback,
            Rule::AcceptIcmp(family),
        ];

        if !self.trusted_ports.is_empty() {
            rules.push(Rule::AcceptTcpPorts(
                self.trusted_ports.iter().copied().collect(),
            ));
        }

        let family_nodes: Vec<&Node> = self
            .trusted_nodes
            .values()
            .filter(|node| family.matches(node.address()))
            .collect();

        // Config servers expose the ensemble service ports to trusted peers
        // only; everyone else is rejected on those ports before the general
        // per-node accepts below.
        if self_role == NodeRole::ConfigServer {
            for node in &family_nodes {
                rules.push(Rule::AcceptTcpPortsFrom {
                    ports: ENSEMBLE_SERVICE_PORTS.to_vec(),
                    source: host_source(node.address(), family),
                });
            }
            rules.push(Rule::RejectTcpPorts {
                ports: ENSEMBLE_SERVICE_PORTS.to_vec(),
                family,
            });
        }

        for node in &family_nodes {
            rules.push(Rule::AcceptSource(host_source(node.address(), family)));
        }

        for network in &self.trusted_networks {
            match network_family(network) {
                Some(network_family) if network_family == family => {
                    rules.push(Rule::AcceptSource(network.clone()));
                }
                Some(_) => {}
                None => debug!(%network, "skipping unparsable trusted network"),
            }
        }

        rules.push(Rule::RejectAll(family));
        rules
    }

    /// Like [`Self::to_rules`], rendered to iptables lines.
    #[must_use]
    pub fn to_rule_lines(&self, family: IpFamily, self_role: NodeRole) -> Vec<String> {
        self.to_rules(family, self_role)
            .iter()
            .map(ToString::to_string)
            .collect()
    }
}

fn host_source(address: IpAddr, family: IpFamily) -> String {
    format!("{address}/{}", family.host_prefix_len())
}

fn network_family(network: &str) -> Option<IpFamily> {
    match IpCidr::from_str(network) {
        Ok(IpCidr::V4(_)) => Some(IpFamily::Ipv4),
        Ok(IpCidr::V6(_)) => Some(IpFamily::Ipv6),
        Err(_) => None,
    }
}
