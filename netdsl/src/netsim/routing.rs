// NetDSL: Command Interpreter for Simulated Network Topologies
// Copyright (C) 2021  Tibor Schneider
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! # Routing statements
//!
//! Routing protocols are not simulated. A statement is only recorded on the device and rendered as
//! the configuration lines a router would accept.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::net::Ipv4Addr;

/// Routing protocol tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutingProtocol {
    /// Open Shortest Path First
    Ospf,
    /// Enhanced Interior Gateway Routing Protocol
    Eigrp,
    /// Routing Information Protocol (version 2)
    Rip,
}

impl fmt::Display for RoutingProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ospf => "ospf",
            Self::Eigrp => "eigrp",
            Self::Rip => "rip",
        })
    }
}

/// A single network statement of a routing protocol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "protocol", rename_all = "lowercase")]
pub enum RoutingStatement {
    /// `network <network> <wildcard> area <area>` below `router ospf <process>`
    Ospf {
        /// OSPF process id
        process: u32,
        /// Network address
        network: Ipv4Addr,
        /// Wildcard (inverse) mask
        wildcard: Ipv4Addr,
        /// Area id
        area: u32,
    },
    /// `network <network> <wildcard>` below `router eigrp <asn>`
    Eigrp {
        /// Autonomous system number
        asn: u32,
        /// Network address
        network: Ipv4Addr,
        /// Wildcard (inverse) mask
        wildcard: Ipv4Addr,
    },
    /// `network <network>` below `router rip`
    Rip {
        /// Classful network address
        network: Ipv4Addr,
    },
}

impl RoutingStatement {
    /// Protocol of the statement
    pub fn protocol(&self) -> RoutingProtocol {
        match self {
            Self::Ospf { .. } => RoutingProtocol::Ospf,
            Self::Eigrp { .. } => RoutingProtocol::Eigrp,
            Self::Rip { .. } => RoutingProtocol::Rip,
        }
    }

    /// Generate the configuration lines for this statement, including the `router` line.
    pub fn cli(&self) -> Vec<String> {
        let mut lines = match self {
            Self::Ospf { process, .. } => vec![format!("router ospf {}", process)],
            Self::Eigrp { asn, .. } => vec![format!("router eigrp {}", asn)],
            Self::Rip { .. } => vec![String::from("router rip"), String::from("version 2")],
        };
        lines.push(self.network_cli());
        lines
    }

    /// The `network` line of the statement, without the `router` line.
    pub fn network_cli(&self) -> String {
        match self {
            Self::Ospf { network, wildcard, area, .. } => {
                format!("network {} {} area {}", network, wildcard, area)
            }
            Self::Eigrp { network, wildcard, .. } => format!("network {} {}", network, wildcard),
            Self::Rip { network } => format!("network {}", network),
        }
    }
}

impl fmt::Display for RoutingStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ospf { process, network, wildcard, area } => {
                write!(f, "ospf {}: network {} {} area {}", process, network, wildcard, area)
            }
            Self::Eigrp { asn, network, wildcard } => {
                write!(f, "eigrp {}: network {} {}", asn, network, wildcard)
            }
            Self::Rip { network } => write!(f, "rip: network {}", network),
        }
    }
}

/// Routing configuration of a single device, keyed by protocol. OSPF and EIGRP may hold
/// statements of several processes, RIP accumulates all networks under its single instance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoutingConfig {
    statements: BTreeMap<RoutingProtocol, Vec<RoutingStatement>>,
}

impl RoutingConfig {
    /// Create an empty routing configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the exact same statement is already configured.
    pub fn contains(&self, statement: &RoutingStatement) -> bool {
        self.statements
            .get(&statement.protocol())
            .map(|s| s.contains(statement))
            .unwrap_or(false)
    }

    /// Append a statement. Returns `false` (and leaves the config untouched) if the same statement
    /// was already present.
    pub fn add(&mut self, statement: RoutingStatement) -> bool {
        if self.contains(&statement) {
            return false;
        }
        self.statements.entry(statement.protocol()).or_default().push(statement);
        true
    }

    /// Get all statements of a protocol, in the order they were added.
    pub fn get(&self, protocol: RoutingProtocol) -> &[RoutingStatement] {
        self.statements.get(&protocol).map(|s| s.as_slice()).unwrap_or(&[])
    }

    /// Iterate over all statements, grouped by protocol.
    pub fn iter(&self) -> impl Iterator<Item = &RoutingStatement> {
        self.statements.values().flatten()
    }

    /// Returns true if no routing protocol is configured
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}
