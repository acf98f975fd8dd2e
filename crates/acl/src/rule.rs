//! Typed packet-filter rule records and their iptables rendering.
//!
//! Exact token spelling matters: the external applier consumes the rendered
//! lines verbatim, so [`Rule`]'s `Display` output is part of the contract.

use std::fmt;
use std::net::IpAddr;

/// IP family a rule sequence is generated for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IpFamily {
    /// IPv4.
    Ipv4,
    /// IPv6.
    Ipv6,
}

impl IpFamily {
    /// Both families, in a fixed order.
    pub const ALL: [Self; 2] = [Self::Ipv4, Self::Ipv6];

    /// Protocol name matched by the family's ICMP accept rule.
    #[must_use]
    pub const fn icmp_protocol(self) -> &'static str {
        match self {
            Self::Ipv4 => "icmp",
            Self::Ipv6 => "ipv6-icmp",
        }
    }

    /// ICMP unreachable code used by the family's reject rules.
    #[must_use]
    pub const fn reject_code(self) -> &'static str {
        match self {
            Self::Ipv4 => "icmp-port-unreachable",
            Self::Ipv6 => "icmp6-port-unreachable",
        }
    }

    /// Prefix length of a single-host source match.
    #[must_use]
    pub const fn host_prefix_len(self) -> u8 {
        match self {
            Self::Ipv4 => 32,
            Self::Ipv6 => 128,
        }
    }

    /// Whether `address` belongs to this family.
    #[must_use]
    pub const fn matches(self, address: IpAddr) -> bool {
        matches!(
            (self, address),
            (Self::Ipv4, IpAddr::V4(_)) | (Self::Ipv6, IpAddr::V6(_))
        )
    }
}

/// Built-in filter chain a policy rule applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Chain {
    /// Inbound traffic.
    Input,
    /// Forwarded traffic.
    Forward,
    /// Outbound traffic.
    Output,
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Input => "INPUT",
            Self::Forward => "FORWARD",
            Self::Output => "OUTPUT",
        })
    }
}

/// One directive in the generated rule sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rule {
    /// Accept-all default policy for a chain.
    PolicyAccept(Chain),
    /// Accept packets of an established or related connection.
    AcceptEstablished,
    /// Accept all loopback-interface traffic.
    AcceptLoopback,
    /// Accept the family's ICMP protocol.
    AcceptIcmp(IpFamily),
    /// Accept TCP packets whose destination port is in the list.
    AcceptTcpPorts(Vec<u16>),
    /// Accept TCP packets to the listed ports from one source.
    AcceptTcpPortsFrom {
        /// Destination ports, multiport form.
        ports: Vec<u16>,
        /// Source address or CIDR, rendered verbatim.
        source: String,
    },
    /// Reject TCP packets to the listed ports from anywhere.
    RejectTcpPorts {
        /// Destination ports, multiport form.
        ports: Vec<u16>,
        /// Family selecting the reject-with code.
        family: IpFamily,
    },
    /// Accept all traffic from one source address or CIDR.
    AcceptSource(String),
    /// Final default reject on the INPUT chain.
    RejectAll(IpFamily),
}

fn join_ports(ports: &[u16]) -> String {
    ports
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PolicyAccept(chain) => write!(f, "-P {chain} ACCEPT"),
            Self::AcceptEstablished => {
                f.write_str("-A INPUT -m state --state RELATED,ESTABLISHED -j ACCEPT")
            }
            Self::AcceptLoopback => f.write_str("-A INPUT -i lo -j ACCEPT"),
            Self::AcceptIcmp(family) => {
                write!(f, "-A INPUT -p {} -j ACCEPT", family.icmp_protocol())
            }
            Self::AcceptTcpPorts(ports) => write!(
                f,
                "-A INPUT -p tcp -m multiport --dports {} -j ACCEPT",
                join_ports(ports)
            ),
            Self::AcceptTcpPortsFrom { ports, source } => write!(
                f,
                "-A INPUT -p tcp -m multiport --dports {} -s {source} -j ACCEPT",
                join_ports(ports)
            ),
            Self::RejectTcpPorts { ports, family } => write!(
                f,
                "-A INPUT -p tcp -m multiport --dports {} -j REJECT --reject-with {}",
                join_ports(ports),
                family.reject_code()
            ),
            Self::AcceptSource(source) => write!(f, "-A INPUT -s {source} -j ACCEPT"),
            Self::RejectAll(family) => write!(
                f,
                "-A INPUT -j REJECT --reject-with {}",
                family.reject_code()
            ),
        }
    }
}
