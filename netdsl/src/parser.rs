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

//! # Parser
//!
//! Validation of a [`Token`] happens in two steps, always in this order:
//!
//! 1. **Syntax**: The number of arguments must match the declared shape of the command, and every
//!    argument must parse as its declared type. This step does not look at the network. On
//!    success, the arguments are turned into a typed [`Command`].
//! 2. **Semantics**: The command is checked against the current state of the [`Network`]:
//!    referenced devices must exist, names must be unique, numbers must be in range, and so on.
//!
//! Only a command that passed both steps is wrapped into a [`ValidatedToken`], which is the only
//! input executors accept.

use crate::command::Command;
use crate::error::{Error, SemanticError, SyntaxError};
use crate::events::Stage;
use crate::netsim::acl::AclEntry;
use crate::netsim::routing::{RoutingProtocol, RoutingStatement};
use crate::netsim::{Device, Network};
use crate::token::{CommandKind, Token};

use std::net::Ipv4Addr;
use std::ops::RangeInclusive;

/// Valid range of OSPF process ids and EIGRP AS numbers
const PROCESS_ID_RANGE: RangeInclusive<u32> = 1..=65535;

/// A command that passed syntax and semantic validation against a network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedToken {
    raw: String,
    command: Command,
}

impl ValidatedToken {
    /// The original input line
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The validated command
    pub fn command(&self) -> &Command {
        &self.command
    }

    /// Kind of the validated command
    pub fn kind(&self) -> CommandKind {
        self.command.kind()
    }

    pub(crate) fn new(raw: String, command: Command) -> Self {
        Self { raw, command }
    }
}

/// Run both validation steps on the token.
pub fn validate(token: Token, net: &Network) -> Result<ValidatedToken, Error> {
    validate_stages(token, net, |_| {})
}

/// Run both validation steps, calling `passed` after each step that accepted the token.
pub(crate) fn validate_stages(
    token: Token,
    net: &Network,
    mut passed: impl FnMut(Stage),
) -> Result<ValidatedToken, Error> {
    let command = check_syntax(&token)?;
    passed(Stage::Syntax);
    check_semantics(&command, net)
        .map_err(|source| Error::Semantic { line: token.raw.clone(), source })?;
    passed(Stage::Semantic);
    Ok(ValidatedToken::new(token.raw, command))
}

/// Check the number and the types of the arguments, and build the typed command.
pub fn check_syntax(token: &Token) -> Result<Command, Error> {
    let shape = token.kind.shape();
    let syntax_error = |source| Error::Syntax { line: token.raw.clone(), source };

    if token.args.len() != shape.args.len() {
        return Err(syntax_error(SyntaxError::ArgumentCount {
            command: token.kind,
            usage: shape.usage(),
            expected: shape.args.len(),
            got: token.args.len(),
        }));
    }

    let values = shape
        .args
        .iter()
        .zip(token.args.iter())
        .enumerate()
        .map(|(i, (spec, arg))| {
            spec.ty.parse(arg).ok_or_else(|| {
                syntax_error(SyntaxError::InvalidArgument {
                    command: token.kind,
                    position: i + 1,
                    name: spec.name,
                    expected: spec.ty,
                    value: arg.clone(),
                })
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Command::build(token.kind, values)
        .map_err(|source| Error::Internal { line: token.raw.clone(), source })
}

/// Check the command against the current state of the network.
pub fn check_semantics(command: &Command, net: &Network) -> Result<(), SemanticError> {
    match command {
        Command::AddDevice { name, .. } => {
            if net.contains_device(name) {
                return Err(SemanticError::DuplicateDevice(name.clone()));
            }
        }
        Command::Connect { a, b, .. } => {
            existing(net, a)?;
            existing(net, b)?;
            if a == b {
                return Err(SemanticError::SelfConnection(a.clone()));
            }
            if net.get_connection(a, b).is_some() {
                return Err(SemanticError::DuplicateConnection(a.clone(), b.clone()));
            }
        }
        Command::SetInterface { device, iface, address, mask } => {
            existing(net, device)?;
            check_host_address(*address, *mask)?;
            if let Some((d, i)) = net.find_address(*address) {
                if d != device || i != iface {
                    return Err(SemanticError::AddressInUse {
                        address: *address,
                        device: d.to_string(),
                        interface: i.to_string(),
                    });
                }
            }
        }
        Command::SetHostname { device, .. } => {
            existing(net, device)?;
        }
        Command::Route { device, statement } => {
            let d = existing(net, device)?;
            if !d.kind().is_routing_capable() {
                return Err(SemanticError::UnsupportedDeviceKind {
                    device: device.clone(),
                    kind: d.kind(),
                    feature: "routing protocols",
                });
            }
            match statement {
                RoutingStatement::Ospf { process, .. } => {
                    check_process_id(RoutingProtocol::Ospf, *process)?
                }
                RoutingStatement::Eigrp { asn, .. } => {
                    check_process_id(RoutingProtocol::Eigrp, *asn)?
                }
                RoutingStatement::Rip { .. } => {}
            }
            if d.routing().contains(statement) {
                return Err(SemanticError::DuplicateRoutingStatement {
                    device: device.clone(),
                    statement: statement.to_string(),
                });
            }
        }
        Command::Acl { device, number, entry, .. } => {
            let d = existing(net, device)?;
            if !d.kind().is_filtering_capable() {
                return Err(SemanticError::UnsupportedDeviceKind {
                    device: device.clone(),
                    kind: d.kind(),
                    feature: "access lists",
                });
            }
            check_acl_number(entry, *number)?;
        }
        Command::ShowInterfaces { device }
        | Command::ShowRouting { device }
        | Command::ShowAcl { device }
        | Command::ShowCli { device }
        | Command::Save { device } => {
            existing(net, device)?;
        }
        Command::ShowTopology
        | Command::ShowHistory
        | Command::ClearCli
        | Command::ClearAll
        | Command::Help => {}
    }
    Ok(())
}

fn existing<'a>(net: &'a Network, name: &str) -> Result<&'a Device, SemanticError> {
    net.get_device(name).map_err(|_| SemanticError::UnknownDevice(name.to_string()))
}

/// The address must neither be the network nor the broadcast address of its subnet. Point-to-point
/// (/31) and host (/32) subnets have no such addresses.
fn check_host_address(address: Ipv4Addr, mask: Ipv4Addr) -> Result<(), SemanticError> {
    let mask_bits = u32::from(mask);
    if mask_bits.leading_ones() >= 31 {
        return Ok(());
    }
    let host_bits = !mask_bits;
    let host = u32::from(address) & host_bits;
    if host == 0 || host == host_bits {
        Err(SemanticError::InvalidHostAddress { address, mask })
    } else {
        Ok(())
    }
}

fn check_process_id(protocol: RoutingProtocol, value: u32) -> Result<(), SemanticError> {
    if PROCESS_ID_RANGE.contains(&value) {
        Ok(())
    } else {
        Err(SemanticError::ProcessIdOutOfRange { protocol, value })
    }
}

fn check_acl_number(entry: &AclEntry, number: u32) -> Result<(), SemanticError> {
    let shape = entry.shape();
    if shape.accepts(number) {
        Ok(())
    } else {
        Err(SemanticError::AclNumberOutOfRange { number, shape, ranges: shape.ranges_repr() })
    }
}
