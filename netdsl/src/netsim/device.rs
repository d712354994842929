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

//! Module defining a network device and its configuration block.

use crate::netsim::acl::{AclRule, SEQUENCE_STEP};
use crate::netsim::routing::RoutingConfig;
use crate::netsim::{DeviceId, DeviceKind};

use indexmap::IndexMap;
use serde::Serialize;
use std::net::Ipv4Addr;

/// Layer-3 settings of an interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Interface {
    /// Assigned address
    pub address: Ipv4Addr,
    /// Subnet mask
    pub mask: Ipv4Addr,
}

impl Interface {
    /// Prefix length of the subnet mask. The mask is assumed to be contiguous.
    pub fn prefix_len(&self) -> u32 {
        u32::from(self.mask).leading_ones()
    }
}

/// Network device (router, switch, host or server)
#[derive(Debug, Clone)]
pub struct Device {
    /// Name of the device, unique in the network
    name: String,
    /// ID of the device
    device_id: DeviceId,
    /// Kind of the device
    kind: DeviceKind,
    /// Configured hostname. If not set, the name is used.
    hostname: Option<String>,
    /// Interfaces, in the order in which they were first configured
    pub(crate) interfaces: IndexMap<String, Interface>,
    /// Routing protocol statements
    pub(crate) routing: RoutingConfig,
    /// ACL rules in arrival order
    pub(crate) acls: Vec<AclRule>,
    /// Generated configuration lines, in the order they were emitted
    pub(crate) cli: Vec<String>,
}

impl Device {
    pub(crate) fn new(name: String, device_id: DeviceId, kind: DeviceKind) -> Self {
        Self {
            name,
            device_id,
            kind,
            hostname: None,
            interfaces: IndexMap::new(),
            routing: RoutingConfig::new(),
            acls: Vec::new(),
            cli: Vec::new(),
        }
    }

    /// Return the name of the device
    pub fn name(&self) -> &str {
        self.name.as_ref()
    }

    /// Return the ID of the device
    pub fn device_id(&self) -> DeviceId {
        self.device_id
    }

    /// Return the kind of the device
    pub fn kind(&self) -> DeviceKind {
        self.kind
    }

    /// Return the hostname, which defaults to the name of the device.
    pub fn hostname(&self) -> &str {
        self.hostname.as_deref().unwrap_or(&self.name)
    }

    pub(crate) fn set_hostname(&mut self, hostname: String) {
        self.hostname = Some(hostname);
    }

    /// Get the configuration of a single interface
    pub fn get_interface(&self, iface: &str) -> Option<&Interface> {
        self.interfaces.get(iface)
    }

    /// Iterate over all interfaces in configuration order
    pub fn interfaces(&self) -> impl Iterator<Item = (&str, &Interface)> {
        self.interfaces.iter().map(|(n, i)| (n.as_str(), i))
    }

    /// Routing configuration of the device
    pub fn routing(&self) -> &RoutingConfig {
        &self.routing
    }

    /// All ACL rules, in the order they were added
    pub fn acl_rules(&self) -> &[AclRule] {
        &self.acls
    }

    /// Rules of a single access list
    pub fn acl(&self, number: u32) -> impl Iterator<Item = &AclRule> {
        self.acls.iter().filter(move |r| r.number == number)
    }

    /// Sequence number the next rule of access list `number` will receive.
    pub fn next_acl_sequence(&self, number: u32) -> u32 {
        self.acl(number).map(|r| r.sequence).max().unwrap_or(0) + SEQUENCE_STEP
    }

    /// Accumulated configuration lines of this device
    pub fn cli(&self) -> &[String] {
        &self.cli
    }
}
