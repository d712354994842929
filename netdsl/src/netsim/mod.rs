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

#![deny(missing_docs, missing_debug_implementations)]

//! # NetSim
//!
//! The network state of an interpreter session: devices, the connections between them, their
//! configuration and the configuration lines generated so far. Nothing is simulated on the data
//! plane; routing statements and ACL rules are only recorded.
//!
//! ## Example usage
//!
//! ```rust
//! use netdsl::netsim::{CableType, DeviceKind, Network};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut net = Network::new();
//!
//!     net.add_device("R1", DeviceKind::Router)?;
//!     net.add_device("SW1", DeviceKind::Switch)?;
//!     net.add_link("R1", "SW1", CableType::Ethernet)?;
//!
//!     let lines = net.set_interface(
//!         "R1",
//!         "g0/0",
//!         "192.168.1.1".parse()?,
//!         "255.255.255.0".parse()?,
//!     )?;
//!     assert_eq!(lines, vec!["interface g0/0", "ip address 192.168.1.1 255.255.255.0"]);
//!     assert_eq!(net.get_connection("SW1", "R1"), Some(CableType::Ethernet));
//!
//!     Ok(())
//! }
//! ```

pub mod acl;
pub mod device;
pub(crate) mod network;
pub mod printer;
pub mod routing;
pub mod snapshot;
pub(crate) mod types;

pub use device::{Device, Interface};
pub use network::{HistoryEntry, Network};
pub use snapshot::{Connection, DeviceSummary, TopologySnapshot};
pub use types::{CableType, DeviceId, DeviceKind, NetworkError, Topology};
