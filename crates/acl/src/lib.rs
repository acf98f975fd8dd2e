//! Deterministic packet-filter rule generation from a node's trust declaration.
//!
//! A node's trust declaration ([`Acl`]) names the ports, peer nodes, and
//! networks it accepts inbound traffic from. [`Acl::to_rules`] turns one
//! declaration into an ordered rule sequence for a single IP family, ready for
//! an external applier. Generation is pure and permutation-invariant: two
//! logically equal declarations always render byte-identical output.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod acl;
mod error;
mod node;
mod rule;

pub use acl::{Acl, ENSEMBLE_SERVICE_PORTS};
pub use error::{Error, Result};
pub use node::{Node, NodeRole};
pub use rule::{Chain, IpFamily, Rule};
