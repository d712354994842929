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

//! # Helper (printer) functions for the Network
//! Module containing helper functions to get formatted strings of the network state. Every
//! function returns one `String` per output line, and none of them modifies the network.

use crate::netsim::device::Device;
use crate::netsim::network::Network;

/// Interface table of a device, with a header line.
pub fn interfaces(device: &Device) -> Vec<String> {
    if device.interfaces.is_empty() {
        return vec![format!("No interfaces configured on {}", device.name())];
    }
    let mut result = vec![format!("{:<16} {:<16} {}", "Interface", "IP-Address", "Mask")];
    for (name, iface) in device.interfaces() {
        result.push(format!(
            "{:<16} {:<16} {} (/{})",
            name,
            iface.address,
            iface.mask,
            iface.prefix_len()
        ));
    }
    result
}

/// All routing statements of a device, grouped by protocol.
pub fn routing(device: &Device) -> Vec<String> {
    if device.routing().is_empty() {
        return vec![format!("No routing protocols configured on {}", device.name())];
    }
    device.routing().iter().map(|s| s.to_string()).collect()
}

/// All ACL rules of a device, in arrival order.
pub fn acl(device: &Device) -> Vec<String> {
    if device.acl_rules().is_empty() {
        return vec![format!("No access lists configured on {}", device.name())];
    }
    device.acl_rules().iter().map(|r| format!("access-list {}", r)).collect()
}

/// The configuration lines generated for a device, prefixed by the hostname.
pub fn cli(device: &Device) -> Vec<String> {
    std::iter::once(format!("! {} ({})", device.hostname(), device.kind()))
        .chain(device.cli().iter().cloned())
        .collect()
}

/// All devices and connections of the network.
pub fn topology(net: &Network) -> Vec<String> {
    let mut result = vec![format!(
        "{} devices, {} connections",
        net.num_devices(),
        net.num_connections()
    )];
    for d in net.devices() {
        if d.hostname() == d.name() {
            result.push(format!("  {} {}", d.kind(), d.name()));
        } else {
            result.push(format!("  {} {} (hostname {})", d.kind(), d.name(), d.hostname()));
        }
    }
    for c in net.connections() {
        result.push(format!("  {} <-> {} [{}]", c.endpoints[0], c.endpoints[1], c.cable));
    }
    result
}

/// The session-wide configuration log.
pub fn history(net: &Network) -> Vec<String> {
    net.history().iter().map(|e| format!("[{}] {}", e.device, e.line)).collect()
}
