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

//! Module containing all type definitions

use petgraph::prelude::*;
use petgraph::stable_graph::StableGraph;
use serde::Serialize;
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;
use thiserror::Error;

type IndexType = u32;
/// Device Identification (and index into the topology graph)
pub type DeviceId = NodeIndex<IndexType>;
/// Physical topology. Every node is a device, every edge a connection labelled with its cable.
pub type Topology = StableGraph<(), CableType, Undirected, IndexType>;

/// Kind of a network device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    /// Layer-3 router
    Router,
    /// Switch
    Switch,
    /// End host
    Host,
    /// Server
    Server,
}

impl DeviceKind {
    /// Keywords accepted on the command line, in the order of the enum variants.
    pub const KEYWORDS: &'static [&'static str] = &["router", "switch", "host", "server"];

    /// Returns true if the device may run routing protocols.
    pub fn is_routing_capable(&self) -> bool {
        matches!(self, Self::Router)
    }

    /// Returns true if the device may carry access lists.
    pub fn is_filtering_capable(&self) -> bool {
        matches!(self, Self::Router | Self::Switch)
    }
}

impl FromStr for DeviceKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "router" => Ok(Self::Router),
            "switch" => Ok(Self::Switch),
            "host" => Ok(Self::Host),
            "server" => Ok(Self::Server),
            _ => Err(()),
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Router => "router",
            Self::Switch => "switch",
            Self::Host => "host",
            Self::Server => "server",
        })
    }
}

/// Cable (medium) of a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CableType {
    /// Copper ethernet
    Ethernet,
    /// Serial WAN link
    Serial,
    /// Optical fiber
    Fiber,
}

impl CableType {
    /// Keywords accepted on the command line.
    pub const KEYWORDS: &'static [&'static str] = &["ethernet", "serial", "fiber"];
}

impl FromStr for CableType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ethernet" => Ok(Self::Ethernet),
            "serial" => Ok(Self::Serial),
            "fiber" => Ok(Self::Fiber),
            _ => Err(()),
        }
    }
}

impl fmt::Display for CableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ethernet => "ethernet",
            Self::Serial => "serial",
            Self::Fiber => "fiber",
        })
    }
}

/// Network Errors
///
/// These are raised by the [`Network`](super::Network) itself whenever a mutation would violate
/// one of its invariants. Commands are validated before they reach the network, so any of these
/// errors surfacing during execution points to a gap in validation.
#[derive(Error, Debug, PartialEq)]
pub enum NetworkError {
    /// Device name is not present in the topology
    #[error("Network device name was not found in topology: {0}")]
    DeviceNameNotFound(String),
    /// Device is not present in the topology
    #[error("Network device was not found in topology: {0:?}")]
    DeviceNotFound(DeviceId),
    /// Device name is already used
    #[error("Network device name is already used: {0}")]
    DeviceNameExists(String),
    /// Connection from a device to itself
    #[error("Cannot connect {0} to itself")]
    SelfConnection(String),
    /// Connection between the two devices already exists
    #[error("Devices are already connected: {0} <-> {1}")]
    DevicesAlreadyConnected(String, String),
    /// Address is already assigned to a different interface
    #[error("Address {0} is already assigned to {1} {2}")]
    AddressInUse(Ipv4Addr, String, String),
    /// Network statement exists already
    #[error("Routing statement already configured on {0}: {1}")]
    RoutingStatementExists(String, String),
}
