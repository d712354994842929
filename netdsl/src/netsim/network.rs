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

//! # Top-level Network module
//!
//! This module holds the complete state of an interpreter session: the physical topology, the
//! configuration of every device, and the log of all generated configuration lines.

use crate::netsim::acl::{AclAction, AclEntry, AclRule};
use crate::netsim::device::{Device, Interface};
use crate::netsim::routing::{RoutingProtocol, RoutingStatement};
use crate::netsim::snapshot::{Connection, DeviceSummary, TopologySnapshot};
use crate::netsim::{CableType, DeviceId, DeviceKind, NetworkError, Topology};

use log::*;
use serde::Serialize;
use std::collections::HashMap;
use std::net::Ipv4Addr;

/// A single line in the session-wide configuration log
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    /// Device on which the line was generated
    pub device: String,
    /// Configuration line
    pub line: String,
}

#[derive(Debug, Clone)]
/// # Network struct
/// The symbol table of a session. It owns every device, the connections between them (as edges
/// of an undirected graph), and the history of generated configuration lines. Other components
/// only ever refer to devices by name.
///
/// The network checks its own invariants on every mutation (unique names, connections only
/// between existing and distinct devices, no parallel links, unique interface addresses). The
/// parser performs the same checks beforehand, in order to report them as user errors.
pub struct Network {
    topology: Topology,
    devices: HashMap<DeviceId, Device>,
    names: HashMap<String, DeviceId>,
    history: Vec<HistoryEntry>,
}

impl Default for Network {
    fn default() -> Self {
        Self::new()
    }
}

impl Network {
    /// Generate an empty Network
    pub fn new() -> Self {
        Self {
            topology: Topology::with_capacity(0, 0),
            devices: HashMap::new(),
            names: HashMap::new(),
            history: Vec::new(),
        }
    }

    /// Add a new device to the topology. The name must not be used by any other device. This
    /// function returns the ID of the new device.
    pub fn add_device<S: Into<String>>(
        &mut self,
        name: S,
        kind: DeviceKind,
    ) -> Result<DeviceId, NetworkError> {
        let name = name.into();
        if self.names.contains_key(&name) {
            return Err(NetworkError::DeviceNameExists(name));
        }
        let device_id = self.topology.add_node(());
        debug!("add {} {} as {:?}", kind, name, device_id);
        self.names.insert(name.clone(), device_id);
        self.devices.insert(device_id, Device::new(name, device_id, kind));
        Ok(device_id)
    }

    /// Connect two existing devices. A device cannot be connected to itself, and two devices can
    /// be connected at most once.
    pub fn add_link(&mut self, a: &str, b: &str, cable: CableType) -> Result<(), NetworkError> {
        let a_id = self.get_device_id(a)?;
        let b_id = self.get_device_id(b)?;
        if a_id == b_id {
            return Err(NetworkError::SelfConnection(a.to_string()));
        }
        if self.topology.find_edge(a_id, b_id).is_some() {
            return Err(NetworkError::DevicesAlreadyConnected(a.to_string(), b.to_string()));
        }
        debug!("connect {} <-> {} [{}]", a, b, cable);
        self.topology.add_edge(a_id, b_id, cable);
        Ok(())
    }

    /// Returns the ID of the device with the given name.
    pub fn get_device_id(&self, name: &str) -> Result<DeviceId, NetworkError> {
        self.names.get(name).copied().ok_or_else(|| NetworkError::DeviceNameNotFound(name.into()))
    }

    /// Returns the device with the given name.
    pub fn get_device(&self, name: &str) -> Result<&Device, NetworkError> {
        let id = self.get_device_id(name)?;
        self.devices.get(&id).ok_or(NetworkError::DeviceNotFound(id))
    }

    fn get_device_mut(&mut self, name: &str) -> Result<&mut Device, NetworkError> {
        let id = self.get_device_id(name)?;
        self.devices.get_mut(&id).ok_or(NetworkError::DeviceNotFound(id))
    }

    /// Returns true if a device with this name exists.
    pub fn contains_device(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// Iterate over all devices, in the order they were added.
    pub fn devices(&self) -> impl Iterator<Item = &Device> {
        self.topology.node_indices().filter_map(move |id| self.devices.get(&id))
    }

    /// Number of devices
    pub fn num_devices(&self) -> usize {
        self.devices.len()
    }

    /// Returns the cable of the connection between `a` and `b`, if they are connected.
    pub fn get_connection(&self, a: &str, b: &str) -> Option<CableType> {
        let a_id = self.names.get(a)?;
        let b_id = self.names.get(b)?;
        self.topology.find_edge(*a_id, *b_id).and_then(|e| self.topology.edge_weight(e)).copied()
    }

    /// All connections in the order they were created.
    pub fn connections(&self) -> Vec<Connection> {
        self.topology
            .edge_indices()
            .filter_map(|e| {
                let (a, b) = self.topology.edge_endpoints(e)?;
                let cable = *self.topology.edge_weight(e)?;
                let a = self.devices.get(&a)?.name().to_string();
                let b = self.devices.get(&b)?.name().to_string();
                Some(Connection { endpoints: [a, b], cable })
            })
            .collect()
    }

    /// Number of connections
    pub fn num_connections(&self) -> usize {
        self.topology.edge_count()
    }

    /// Look for an interface (on any device) that holds `address`. Returns the name of the device
    /// and of the interface.
    pub fn find_address(&self, address: Ipv4Addr) -> Option<(&str, &str)> {
        self.devices().find_map(|d| {
            d.interfaces().find(|(_, i)| i.address == address).map(|(iface, _)| (d.name(), iface))
        })
    }

    /// Configure the address of an interface, creating it if it does not yet exist. The address
    /// must not be assigned to any other interface. Returns the generated configuration lines.
    pub fn set_interface(
        &mut self,
        device: &str,
        iface: &str,
        address: Ipv4Addr,
        mask: Ipv4Addr,
    ) -> Result<Vec<String>, NetworkError> {
        if let Some((d, i)) = self.find_address(address) {
            if d != device || i != iface {
                return Err(NetworkError::AddressInUse(address, d.to_string(), i.to_string()));
            }
        }
        let d = self.get_device_mut(device)?;
        d.interfaces.insert(iface.to_string(), Interface { address, mask });
        let lines =
            vec![format!("interface {}", iface), format!("ip address {} {}", address, mask)];
        self.emit(device, &lines);
        Ok(lines)
    }

    /// Change the hostname of a device. Returns the generated configuration lines.
    pub fn set_hostname(
        &mut self,
        device: &str,
        hostname: &str,
    ) -> Result<Vec<String>, NetworkError> {
        self.get_device_mut(device)?.set_hostname(hostname.to_string());
        let lines = vec![format!("hostname {}", hostname)];
        self.emit(device, &lines);
        Ok(lines)
    }

    /// Add a routing statement to a device. The identical statement must not yet exist. Returns
    /// the generated configuration lines.
    pub fn add_routing_statement(
        &mut self,
        device: &str,
        statement: RoutingStatement,
    ) -> Result<Vec<String>, NetworkError> {
        let d = self.get_device_mut(device)?;
        // RIP has a single instance, so its header is only emitted once
        let lines = match statement.protocol() {
            RoutingProtocol::Rip if !d.routing.get(RoutingProtocol::Rip).is_empty() => {
                vec![statement.network_cli()]
            }
            _ => statement.cli(),
        };
        let repr = statement.to_string();
        if !d.routing.add(statement) {
            return Err(NetworkError::RoutingStatementExists(device.to_string(), repr));
        }
        self.emit(device, &lines);
        Ok(lines)
    }

    /// Append a rule to access list `number` of a device. The sequence number is chosen as the
    /// next free multiple of ten. Returns the new rule.
    pub fn add_acl_rule(
        &mut self,
        device: &str,
        number: u32,
        action: AclAction,
        entry: AclEntry,
    ) -> Result<AclRule, NetworkError> {
        let d = self.get_device_mut(device)?;
        let sequence = d.next_acl_sequence(number);
        let rule = AclRule { number, sequence, action, entry };
        d.acls.push(rule.clone());
        let line = rule.cli();
        self.emit(device, &[line]);
        Ok(rule)
    }

    /// The session-wide configuration log
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Clear the configuration log, both session-wide and on every device. The topology and the
    /// device configuration remain untouched.
    pub fn clear_cli(&mut self) {
        self.history.clear();
        self.devices.values_mut().for_each(|d| d.cli.clear());
    }

    /// Reset the network to its initial, empty state.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Returns true if the network holds no devices and no history.
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty() && self.history.is_empty()
    }

    /// Read-only summary of the topology
    pub fn snapshot(&self) -> TopologySnapshot {
        TopologySnapshot {
            devices: self
                .devices()
                .map(|d| DeviceSummary { name: d.name().to_string(), kind: d.kind() })
                .collect(),
            connections: self.connections(),
        }
    }

    /// Append generated lines to the device and to the session log. Unknown devices are ignored;
    /// all callers resolve the device before.
    fn emit(&mut self, device: &str, lines: &[String]) {
        let id = match self.names.get(device) {
            Some(id) => *id,
            None => return,
        };
        if let Some(d) = self.devices.get_mut(&id) {
            for line in lines {
                trace!("{}: {}", device, line);
                d.cli.push(line.clone());
                self.history.push(HistoryEntry { device: device.to_string(), line: line.clone() });
            }
        }
    }
}
