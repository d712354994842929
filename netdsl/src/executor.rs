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

//! # Executors
//!
//! One function per command, applying a [`ValidatedToken`] to the network. Since every token was
//! validated against the same network before, executors never fail because of the input. Any
//! error they return (except for a failing store) is an internal invariant violation.

use crate::command::Command;
use crate::error::{ExecutionError, InvariantError};
use crate::netsim::acl::AclShape;
use crate::netsim::routing::RoutingProtocol;
use crate::netsim::{printer, CableType, DeviceKind, Network};
use crate::parser::ValidatedToken;
use crate::registry::Executor;
use crate::store::ConfigStore;
use crate::token::CommandKind;

use std::fmt;

/// Result of a successfully executed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Lines to show to the user: generated configuration, or the output of `show`.
    pub output: Vec<String>,
    /// Change applied to the network
    pub effect: Effect,
}

impl ExecutionResult {
    fn new(output: Vec<String>, effect: Effect) -> Self {
        Self { output, effect }
    }

    fn read_only(output: Vec<String>) -> Self {
        Self { output, effect: Effect::None }
    }
}

/// Change applied by a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// A device was added
    DeviceAdded {
        /// Name of the device
        name: String,
        /// Kind of the device
        kind: DeviceKind,
    },
    /// Two devices were connected
    Connected {
        /// First endpoint
        a: String,
        /// Second endpoint
        b: String,
        /// Cable type
        cable: CableType,
    },
    /// An interface was created or readdressed
    InterfaceConfigured {
        /// Device
        device: String,
        /// Interface name
        interface: String,
    },
    /// The hostname of a device changed
    HostnameChanged {
        /// Device
        device: String,
        /// New hostname
        hostname: String,
    },
    /// A routing statement was added
    RoutingAdded {
        /// Device
        device: String,
        /// Routing protocol
        protocol: RoutingProtocol,
    },
    /// A rule was appended to an access list
    AclRuleAdded {
        /// Device
        device: String,
        /// Access list number
        number: u32,
        /// Sequence number of the new rule
        sequence: u32,
    },
    /// The configuration of a device was handed to the store
    Saved {
        /// Device
        device: String,
        /// Number of stored lines
        lines: usize,
    },
    /// The configuration log was cleared
    CliCleared,
    /// The network was reset
    NetworkCleared,
    /// Nothing changed
    None,
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeviceAdded { name, kind } => write!(f, "added {} {}", kind, name),
            Self::Connected { a, b, cable } => write!(f, "connected {} <-> {} [{}]", a, b, cable),
            Self::InterfaceConfigured { device, interface } => {
                write!(f, "configured {} on {}", interface, device)
            }
            Self::HostnameChanged { device, hostname } => {
                write!(f, "hostname of {} is now {}", device, hostname)
            }
            Self::RoutingAdded { device, protocol } => {
                write!(f, "added {} statement on {}", protocol, device)
            }
            Self::AclRuleAdded { device, number, sequence } => {
                write!(f, "added rule {} to access list {} on {}", sequence, number, device)
            }
            Self::Saved { device, lines } => write!(f, "saved {} lines of {}", lines, device),
            Self::CliCleared => write!(f, "configuration log cleared"),
            Self::NetworkCleared => write!(f, "network cleared"),
            Self::None => write!(f, "no change"),
        }
    }
}

/// Executors of all commands
pub(crate) const EXECUTORS: &[(CommandKind, Executor)] = &[
    (CommandKind::Add, add as Executor),
    (CommandKind::Connect, connect as Executor),
    (CommandKind::SetInterface, set_interface as Executor),
    (CommandKind::SetHostname, set_hostname as Executor),
    (CommandKind::SetOspf, set_ospf as Executor),
    (CommandKind::SetEigrp, set_eigrp as Executor),
    (CommandKind::SetRip, set_rip as Executor),
    (CommandKind::SetAclStandard, set_acl_std as Executor),
    (CommandKind::SetAclExtended, set_acl_ext as Executor),
    (CommandKind::ShowInterfaces, show_interfaces as Executor),
    (CommandKind::ShowRouting, show_routing as Executor),
    (CommandKind::ShowAcl, show_acl as Executor),
    (CommandKind::ShowCli, show_cli as Executor),
    (CommandKind::ShowTopology, show_topology as Executor),
    (CommandKind::ShowHistory, show_history as Executor),
    (CommandKind::Save, save as Executor),
    (CommandKind::ClearCli, clear_cli as Executor),
    (CommandKind::ClearAll, clear_all as Executor),
    (CommandKind::Help, help as Executor),
];

type ExecResult = Result<ExecutionResult, ExecutionError>;

fn unexpected(executor: CommandKind, token: &ValidatedToken) -> ExecutionError {
    InvariantError::UnexpectedCommand { executor, got: token.kind() }.into()
}

fn add(token: &ValidatedToken, net: &mut Network, _: &mut dyn ConfigStore) -> ExecResult {
    match token.command() {
        Command::AddDevice { kind, name } => {
            net.add_device(name.as_str(), *kind)?;
            Ok(ExecutionResult::new(
                vec![format!("Added {} {}", kind, name)],
                Effect::DeviceAdded { name: name.clone(), kind: *kind },
            ))
        }
        _ => Err(unexpected(CommandKind::Add, token)),
    }
}

fn connect(token: &ValidatedToken, net: &mut Network, _: &mut dyn ConfigStore) -> ExecResult {
    match token.command() {
        Command::Connect { a, b, cable } => {
            net.add_link(a, b, *cable)?;
            Ok(ExecutionResult::new(
                vec![format!("Connected {} <-> {} [{}]", a, b, cable)],
                Effect::Connected { a: a.clone(), b: b.clone(), cable: *cable },
            ))
        }
        _ => Err(unexpected(CommandKind::Connect, token)),
    }
}

fn set_interface(token: &ValidatedToken, net: &mut Network, _: &mut dyn ConfigStore) -> ExecResult {
    match token.command() {
        Command::SetInterface { device, iface, address, mask } => {
            let lines = net.set_interface(device, iface, *address, *mask)?;
            Ok(ExecutionResult::new(
                lines,
                Effect::InterfaceConfigured { device: device.clone(), interface: iface.clone() },
            ))
        }
        _ => Err(unexpected(CommandKind::SetInterface, token)),
    }
}

fn set_hostname(token: &ValidatedToken, net: &mut Network, _: &mut dyn ConfigStore) -> ExecResult {
    match token.command() {
        Command::SetHostname { device, hostname } => {
            let lines = net.set_hostname(device, hostname)?;
            Ok(ExecutionResult::new(
                lines,
                Effect::HostnameChanged { device: device.clone(), hostname: hostname.clone() },
            ))
        }
        _ => Err(unexpected(CommandKind::SetHostname, token)),
    }
}

fn route(executor: CommandKind, token: &ValidatedToken, net: &mut Network) -> ExecResult {
    match token.command() {
        Command::Route { device, statement } if token.kind() == executor => {
            let protocol = statement.protocol();
            let lines = net.add_routing_statement(device, statement.clone())?;
            Ok(ExecutionResult::new(
                lines,
                Effect::RoutingAdded { device: device.clone(), protocol },
            ))
        }
        _ => Err(unexpected(executor, token)),
    }
}

fn set_ospf(token: &ValidatedToken, net: &mut Network, _: &mut dyn ConfigStore) -> ExecResult {
    route(CommandKind::SetOspf, token, net)
}

fn set_eigrp(token: &ValidatedToken, net: &mut Network, _: &mut dyn ConfigStore) -> ExecResult {
    route(CommandKind::SetEigrp, token, net)
}

fn set_rip(token: &ValidatedToken, net: &mut Network, _: &mut dyn ConfigStore) -> ExecResult {
    route(CommandKind::SetRip, token, net)
}

fn acl(shape: AclShape, token: &ValidatedToken, net: &mut Network) -> ExecResult {
    let executor = match shape {
        AclShape::Standard => CommandKind::SetAclStandard,
        AclShape::Extended => CommandKind::SetAclExtended,
    };
    match token.command() {
        Command::Acl { device, number, action, entry } if entry.shape() == shape => {
            let rule = net.add_acl_rule(device, *number, *action, entry.clone())?;
            Ok(ExecutionResult::new(
                vec![rule.cli()],
                Effect::AclRuleAdded {
                    device: device.clone(),
                    number: rule.number,
                    sequence: rule.sequence,
                },
            ))
        }
        _ => Err(unexpected(executor, token)),
    }
}

fn set_acl_std(token: &ValidatedToken, net: &mut Network, _: &mut dyn ConfigStore) -> ExecResult {
    acl(AclShape::Standard, token, net)
}

fn set_acl_ext(token: &ValidatedToken, net: &mut Network, _: &mut dyn ConfigStore) -> ExecResult {
    acl(AclShape::Extended, token, net)
}

fn show_interfaces(
    token: &ValidatedToken,
    net: &mut Network,
    _: &mut dyn ConfigStore,
) -> ExecResult {
    match token.command() {
        Command::ShowInterfaces { device } => {
            Ok(ExecutionResult::read_only(printer::interfaces(net.get_device(device)?)))
        }
        _ => Err(unexpected(CommandKind::ShowInterfaces, token)),
    }
}

fn show_routing(token: &ValidatedToken, net: &mut Network, _: &mut dyn ConfigStore) -> ExecResult {
    match token.command() {
        Command::ShowRouting { device } => {
            Ok(ExecutionResult::read_only(printer::routing(net.get_device(device)?)))
        }
        _ => Err(unexpected(CommandKind::ShowRouting, token)),
    }
}

fn show_acl(token: &ValidatedToken, net: &mut Network, _: &mut dyn ConfigStore) -> ExecResult {
    match token.command() {
        Command::ShowAcl { device } => {
            Ok(ExecutionResult::read_only(printer::acl(net.get_device(device)?)))
        }
        _ => Err(unexpected(CommandKind::ShowAcl, token)),
    }
}

fn show_cli(token: &ValidatedToken, net: &mut Network, _: &mut dyn ConfigStore) -> ExecResult {
    match token.command() {
        Command::ShowCli { device } => {
            Ok(ExecutionResult::read_only(printer::cli(net.get_device(device)?)))
        }
        _ => Err(unexpected(CommandKind::ShowCli, token)),
    }
}

fn show_topology(token: &ValidatedToken, net: &mut Network, _: &mut dyn ConfigStore) -> ExecResult {
    match token.command() {
        Command::ShowTopology => Ok(ExecutionResult::read_only(printer::topology(net))),
        _ => Err(unexpected(CommandKind::ShowTopology, token)),
    }
}

fn show_history(token: &ValidatedToken, net: &mut Network, _: &mut dyn ConfigStore) -> ExecResult {
    match token.command() {
        Command::ShowHistory => Ok(ExecutionResult::read_only(printer::history(net))),
        _ => Err(unexpected(CommandKind::ShowHistory, token)),
    }
}

fn save(token: &ValidatedToken, net: &mut Network, store: &mut dyn ConfigStore) -> ExecResult {
    match token.command() {
        Command::Save { device } => {
            let lines = printer::cli(net.get_device(device)?);
            store.save(device, &lines)?;
            Ok(ExecutionResult::new(
                vec![format!("Saved configuration of {} ({} lines)", device, lines.len())],
                Effect::Saved { device: device.clone(), lines: lines.len() },
            ))
        }
        _ => Err(unexpected(CommandKind::Save, token)),
    }
}

fn clear_cli(token: &ValidatedToken, net: &mut Network, _: &mut dyn ConfigStore) -> ExecResult {
    match token.command() {
        Command::ClearCli => {
            net.clear_cli();
            Ok(ExecutionResult::new(vec!["Configuration log cleared".into()], Effect::CliCleared))
        }
        _ => Err(unexpected(CommandKind::ClearCli, token)),
    }
}

fn clear_all(token: &ValidatedToken, net: &mut Network, _: &mut dyn ConfigStore) -> ExecResult {
    match token.command() {
        Command::ClearAll => {
            net.clear();
            Ok(ExecutionResult::new(vec!["Network cleared".into()], Effect::NetworkCleared))
        }
        _ => Err(unexpected(CommandKind::ClearAll, token)),
    }
}

fn help(token: &ValidatedToken, _: &mut Network, _: &mut dyn ConfigStore) -> ExecResult {
    match token.command() {
        Command::Help => Ok(ExecutionResult::read_only(usage())),
        _ => Err(unexpected(CommandKind::Help, token)),
    }
}

/// Usage and description of every command, one per line.
pub fn usage() -> Vec<String> {
    let shapes: Vec<_> = CommandKind::ALL.iter().map(|k| k.shape()).collect();
    let width = shapes.iter().map(|s| s.usage().len()).max().unwrap_or(0);
    shapes
        .iter()
        .map(|s| format!("{:<width$}  {}", s.usage(), s.description, width = width))
        .collect()
}
