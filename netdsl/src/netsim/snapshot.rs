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

//! Read-only view on the topology, handed to visualization layers.

use crate::netsim::{CableType, DeviceKind};
use serde::Serialize;

/// Summary of a single device
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceSummary {
    /// Name of the device
    pub name: String,
    /// Kind of the device
    pub kind: DeviceKind,
}

/// Connection between two devices. The endpoints are unordered; they are stored in the order in
/// which they were given when the connection was created.
#[derive(Debug, Clone, Eq, Serialize)]
pub struct Connection {
    /// Both endpoints
    pub endpoints: [String; 2],
    /// Cable type
    pub cable: CableType,
}

impl Connection {
    /// Returns true if `device` is one of the endpoints
    pub fn contains(&self, device: &str) -> bool {
        self.endpoints.iter().any(|e| e == device)
    }

    /// Returns true if the connection joins `a` and `b`, in any order.
    pub fn joins(&self, a: &str, b: &str) -> bool {
        (self.endpoints[0] == a && self.endpoints[1] == b)
            || (self.endpoints[0] == b && self.endpoints[1] == a)
    }
}

impl PartialEq for Connection {
    fn eq(&self, other: &Self) -> bool {
        self.cable == other.cable && self.joins(&other.endpoints[0], &other.endpoints[1])
    }
}

/// Snapshot of the topology at one point in time
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TopologySnapshot {
    /// All devices in the order they were added
    pub devices: Vec<DeviceSummary>,
    /// All connections in the order they were created
    pub connections: Vec<Connection>,
}
