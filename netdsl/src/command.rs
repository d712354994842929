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

//! Typed representation of a command, built from the arguments of a [`Token`](crate::Token)
//! once their types are checked.

use crate::error::InvariantError;
use crate::netsim::acl::{AclAction, AclEntry, AclProtocol, AclShape};
use crate::netsim::routing::RoutingStatement;
use crate::netsim::{CableType, DeviceKind};
use crate::token::{CommandKind, Value};

use std::net::Ipv4Addr;
use std::str::FromStr;

/// A command with all arguments parsed into their domain types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add a new device
    AddDevice {
        /// Kind of the device
        kind: DeviceKind,
        /// Name of the device
        name: String,
    },
    /// Connect two devices
    Connect {
        /// First endpoint
        a: String,
        /// Second endpoint
        b: String,
        /// Cable type
        cable: CableType,
    },
    /// Assign an address to an interface
    SetInterface {
        /// Device
        device: String,
        /// Interface name
        iface: String,
        /// Address
        address: Ipv4Addr,
        /// Subnet mask
        mask: Ipv4Addr,
    },
    /// Change the hostname of a device
    SetHostname {
        /// Device
        device: String,
        /// New hostname
        hostname: String,
    },
    /// Add a routing statement (OSPF, EIGRP or RIP)
    Route {
        /// Device
        device: String,
        /// The statement
        statement: RoutingStatement,
    },
    /// Append a rule to an access list
    Acl {
        /// Device
        device: String,
        /// Access list number
        number: u32,
        /// Permit or deny
        action: AclAction,
        /// Match part of the rule
        entry: AclEntry,
    },
    /// Show the interfaces of a device
    ShowInterfaces {
        /// Device
        device: String,
    },
    /// Show the routing statements of a device
    ShowRouting {
        /// Device
        device: String,
    },
    /// Show the access lists of a device
    ShowAcl {
        /// Device
        device: String,
    },
    /// Show the generated configuration of a device
    ShowCli {
        /// Device
        device: String,
    },
    /// Show all devices and connections
    ShowTopology,
    /// Show the session-wide configuration log
    ShowHistory,
    /// Save the generated configuration of a device
    Save {
        /// Device
        device: String,
    },
    /// Clear the configuration log
    ClearCli,
    /// Reset the whole network
    ClearAll,
    /// List all commands
    Help,
}

impl Command {
    /// Build the command from the typed arguments. The values must match the declared argument
    /// types of `kind`; any mismatch is an internal error.
    pub fn build(kind: CommandKind, values: Vec<Value>) -> Result<Self, InvariantError> {
        let v = Values { kind, values };
        Ok(match kind {
            CommandKind::Add => Self::AddDevice { kind: v.keyword(0)?, name: v.ident(1)? },
            CommandKind::Connect => {
                Self::Connect { a: v.ident(0)?, b: v.ident(1)?, cable: v.keyword(2)? }
            }
            CommandKind::SetInterface => Self::SetInterface {
                device: v.ident(0)?,
                iface: v.ident(1)?,
                address: v.addr(2)?,
                mask: v.addr(3)?,
            },
            CommandKind::SetHostname => {
                Self::SetHostname { device: v.ident(0)?, hostname: v.ident(1)? }
            }
            CommandKind::SetOspf => Self::Route {
                device: v.ident(0)?,
                statement: RoutingStatement::Ospf {
                    process: v.int(1)?,
                    network: v.addr(2)?,
                    wildcard: v.addr(3)?,
                    area: v.int(4)?,
                },
            },
            CommandKind::SetEigrp => Self::Route {
                device: v.ident(0)?,
                statement: RoutingStatement::Eigrp {
                    asn: v.int(1)?,
                    network: v.addr(2)?,
                    wildcard: v.addr(3)?,
                },
            },
            CommandKind::SetRip => Self::Route {
                device: v.ident(0)?,
                statement: RoutingStatement::Rip { network: v.addr(1)? },
            },
            CommandKind::SetAclStandard => Self::Acl {
                device: v.ident(0)?,
                number: v.int(1)?,
                action: v.keyword(2)?,
                entry: AclEntry::Standard { source: v.addr(3)?, wildcard: v.addr(4)? },
            },
            CommandKind::SetAclExtended => Self::Acl {
                device: v.ident(0)?,
                number: v.int(1)?,
                action: v.keyword(2)?,
                entry: AclEntry::Extended {
                    protocol: v.keyword::<AclProtocol>(3)?,
                    source: v.addr(4)?,
                    source_wildcard: v.addr(5)?,
                    destination: v.addr(6)?,
                    destination_wildcard: v.addr(7)?,
                },
            },
            CommandKind::ShowInterfaces => Self::ShowInterfaces { device: v.ident(0)? },
            CommandKind::ShowRouting => Self::ShowRouting { device: v.ident(0)? },
            CommandKind::ShowAcl => Self::ShowAcl { device: v.ident(0)? },
            CommandKind::ShowCli => Self::ShowCli { device: v.ident(0)? },
            CommandKind::ShowTopology => Self::ShowTopology,
            CommandKind::ShowHistory => Self::ShowHistory,
            CommandKind::Save => Self::Save { device: v.ident(0)? },
            CommandKind::ClearCli => Self::ClearCli,
            CommandKind::ClearAll => Self::ClearAll,
            CommandKind::Help => Self::Help,
        })
    }

    /// The kind of the command
    pub fn kind(&self) -> CommandKind {
        match self {
            Self::AddDevice { .. } => CommandKind::Add,
            Self::Connect { .. } => CommandKind::Connect,
            Self::SetInterface { .. } => CommandKind::SetInterface,
            Self::SetHostname { .. } => CommandKind::SetHostname,
            Self::Route { statement: RoutingStatement::Ospf { .. }, .. } => CommandKind::SetOspf,
            Self::Route { statement: RoutingStatement::Eigrp { .. }, .. } => CommandKind::SetEigrp,
            Self::Route { statement: RoutingStatement::Rip { .. }, .. } => CommandKind::SetRip,
            Self::Acl { entry, .. } => match entry.shape() {
                AclShape::Standard => CommandKind::SetAclStandard,
                AclShape::Extended => CommandKind::SetAclExtended,
            },
            Self::ShowInterfaces { .. } => CommandKind::ShowInterfaces,
            Self::ShowRouting { .. } => CommandKind::ShowRouting,
            Self::ShowAcl { .. } => CommandKind::ShowAcl,
            Self::ShowCli { .. } => CommandKind::ShowCli,
            Self::ShowTopology => CommandKind::ShowTopology,
            Self::ShowHistory => CommandKind::ShowHistory,
            Self::Save { .. } => CommandKind::Save,
            Self::ClearCli => CommandKind::ClearCli,
            Self::ClearAll => CommandKind::ClearAll,
            Self::Help => CommandKind::Help,
        }
    }
}

/// Positional access to typed values
struct Values {
    kind: CommandKind,
    values: Vec<Value>,
}

impl Values {
    fn mismatch(&self, i: usize) -> InvariantError {
        InvariantError::ArgumentMismatch { command: self.kind, position: i + 1 }
    }

    fn ident(&self, i: usize) -> Result<String, InvariantError> {
        match self.values.get(i) {
            Some(Value::Ident(s)) => Ok(s.clone()),
            _ => Err(self.mismatch(i)),
        }
    }

    fn addr(&self, i: usize) -> Result<Ipv4Addr, InvariantError> {
        match self.values.get(i) {
            Some(Value::Addr(a)) => Ok(*a),
            _ => Err(self.mismatch(i)),
        }
    }

    fn int(&self, i: usize) -> Result<u32, InvariantError> {
        match self.values.get(i) {
            Some(Value::Int(x)) => Ok(*x),
            _ => Err(self.mismatch(i)),
        }
    }

    fn keyword<T: FromStr>(&self, i: usize) -> Result<T, InvariantError> {
        match self.values.get(i) {
            Some(Value::Keyword(k)) => k.parse().map_err(|_| self.mismatch(i)),
            _ => Err(self.mismatch(i)),
        }
    }
}
