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

//! # Token Model
//!
//! The table of all recognized command shapes. Every command is identified by a [`CommandKind`],
//! recognized by its keyword prefix, and takes a fixed list of typed arguments. Both the
//! [`Lexer`](crate::lexer::Lexer) and the [`parser`](crate::parser) consult this table, and
//! nothing else: adding a new command means adding one variant with its shape here (and
//! registering its executor).

use crate::netsim::acl::{AclAction, AclProtocol};
use crate::netsim::{CableType, DeviceKind};

use itertools::Itertools;
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Type hint of a single argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgType {
    /// Name of a device or hostname (`R1`, `core-sw.1`)
    Name,
    /// Name of an interface (`g0/0`, `Serial0/0/1:0`)
    Ident,
    /// IPv4 address literal
    Address,
    /// Contiguous IPv4 subnet mask
    Mask,
    /// IPv4 wildcard (inverse) mask
    Wildcard,
    /// Unsigned 32-bit integer
    Integer,
    /// One of the listed keywords, matched case-insensitively
    Keyword(&'static [&'static str]),
}

/// Typed value of an argument, produced by [`ArgType::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Identifier, case preserved
    Ident(String),
    /// Address, mask or wildcard
    Addr(Ipv4Addr),
    /// Integer
    Int(u32),
    /// The canonical (lowercase) spelling of the matched keyword
    Keyword(&'static str),
}

impl ArgType {
    /// Parse a raw argument. Returns `None` if the argument does not have the expected type.
    pub fn parse(&self, arg: &str) -> Option<Value> {
        match *self {
            Self::Name => {
                if is_name(arg) {
                    Some(Value::Ident(arg.to_string()))
                } else {
                    None
                }
            }
            Self::Ident => {
                if is_ident(arg) {
                    Some(Value::Ident(arg.to_string()))
                } else {
                    None
                }
            }
            Self::Address | Self::Wildcard => Ipv4Addr::from_str(arg).ok().map(Value::Addr),
            Self::Mask => {
                let mask = Ipv4Addr::from_str(arg).ok()?;
                let bits = u32::from(mask);
                if bits.leading_ones() + bits.trailing_zeros() == 32 {
                    Some(Value::Addr(mask))
                } else {
                    None
                }
            }
            Self::Integer => {
                if !arg.is_empty() && arg.bytes().all(|b| b.is_ascii_digit()) {
                    arg.parse().ok().map(Value::Int)
                } else {
                    None
                }
            }
            Self::Keyword(options) => {
                options.iter().find(|k| k.eq_ignore_ascii_case(arg)).map(|k| Value::Keyword(*k))
            }
        }
    }
}

fn starts_alphanumeric(s: &str) -> bool {
    s.chars().next().map(|c| c.is_ascii_alphanumeric()).unwrap_or(false)
}

/// Device names end up in file names, so they must not contain path separators.
fn is_name(s: &str) -> bool {
    starts_alphanumeric(s)
        && s.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

fn is_ident(s: &str) -> bool {
    starts_alphanumeric(s)
        && s.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '/' | ':'))
}

impl fmt::Display for ArgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => f.write_str("a name"),
            Self::Ident => f.write_str("an identifier"),
            Self::Address => f.write_str("an IPv4 address"),
            Self::Mask => f.write_str("a contiguous subnet mask"),
            Self::Wildcard => f.write_str("a wildcard mask"),
            Self::Integer => f.write_str("an unsigned integer"),
            Self::Keyword(options) => write!(f, "one of {}", options.join("|")),
        }
    }
}

/// Declared argument of a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgSpec {
    /// Name shown in usage strings and error messages
    pub name: &'static str,
    /// Expected type
    pub ty: ArgType,
}

const fn arg(name: &'static str, ty: ArgType) -> ArgSpec {
    ArgSpec { name, ty }
}

const DEVICE: ArgSpec = arg("device", ArgType::Name);

const ADD_ARGS: &[ArgSpec] =
    &[arg("kind", ArgType::Keyword(DeviceKind::KEYWORDS)), arg("name", ArgType::Name)];
const CONNECT_ARGS: &[ArgSpec] =
    &[DEVICE, arg("peer", ArgType::Name), arg("cable", ArgType::Keyword(CableType::KEYWORDS))];
const INTERFACE_ARGS: &[ArgSpec] = &[
    DEVICE,
    arg("interface", ArgType::Ident),
    arg("ip", ArgType::Address),
    arg("mask", ArgType::Mask),
];
const HOSTNAME_ARGS: &[ArgSpec] = &[DEVICE, arg("hostname", ArgType::Name)];
const OSPF_ARGS: &[ArgSpec] = &[
    DEVICE,
    arg("process", ArgType::Integer),
    arg("network", ArgType::Address),
    arg("wildcard", ArgType::Wildcard),
    arg("area", ArgType::Integer),
];
const EIGRP_ARGS: &[ArgSpec] = &[
    DEVICE,
    arg("asn", ArgType::Integer),
    arg("network", ArgType::Address),
    arg("wildcard", ArgType::Wildcard),
];
const RIP_ARGS: &[ArgSpec] = &[DEVICE, arg("network", ArgType::Address)];
const ACL_STD_ARGS: &[ArgSpec] = &[
    DEVICE,
    arg("number", ArgType::Integer),
    arg("action", ArgType::Keyword(AclAction::KEYWORDS)),
    arg("source", ArgType::Address),
    arg("wildcard", ArgType::Wildcard),
];
const ACL_EXT_ARGS: &[ArgSpec] = &[
    DEVICE,
    arg("number", ArgType::Integer),
    arg("action", ArgType::Keyword(AclAction::KEYWORDS)),
    arg("protocol", ArgType::Keyword(AclProtocol::KEYWORDS)),
    arg("source", ArgType::Address),
    arg("source-wildcard", ArgType::Wildcard),
    arg("destination", ArgType::Address),
    arg("destination-wildcard", ArgType::Wildcard),
];
const DEVICE_ARGS: &[ArgSpec] = &[DEVICE];
const NO_ARGS: &[ArgSpec] = &[];

/// Shape of a command: its keywords, arguments and a short description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandShape {
    /// Keyword prefix, in lowercase
    pub keywords: &'static [&'static str],
    /// Declared arguments, in order
    pub args: &'static [ArgSpec],
    /// One-line description shown by `help`
    pub description: &'static str,
}

const fn cmd(
    keywords: &'static [&'static str],
    args: &'static [ArgSpec],
    description: &'static str,
) -> CommandShape {
    CommandShape { keywords, args, description }
}

impl CommandShape {
    /// Usage string, e.g. `set rip <device> <network>`.
    pub fn usage(&self) -> String {
        self.keywords
            .iter()
            .map(|k| k.to_string())
            .chain(self.args.iter().map(|a| match a.ty {
                ArgType::Keyword(options) => format!("<{}>", options.join("|")),
                _ => format!("<{}>", a.name),
            }))
            .join(" ")
    }
}

/// Identifier of every recognized command
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CommandKind {
    /// `add <kind> <name>`
    Add,
    /// `connect <device> <peer> <cable>`
    Connect,
    /// `set interface <device> <interface> <ip> <mask>`
    SetInterface,
    /// `set hostname <device> <hostname>`
    SetHostname,
    /// `set ospf <device> <process> <network> <wildcard> <area>`
    SetOspf,
    /// `set eigrp <device> <asn> <network> <wildcard>`
    SetEigrp,
    /// `set rip <device> <network>`
    SetRip,
    /// `set acl-std <device> <number> <action> <source> <wildcard>`
    SetAclStandard,
    /// `set acl-ext <device> <number> <action> <protocol> <src> <src-wc> <dst> <dst-wc>`
    SetAclExtended,
    /// `show interfaces <device>`
    ShowInterfaces,
    /// `show routing <device>`
    ShowRouting,
    /// `show acl <device>`
    ShowAcl,
    /// `show cli <device>`
    ShowCli,
    /// `show topology`
    ShowTopology,
    /// `show history`
    ShowHistory,
    /// `save <device>`
    Save,
    /// `clear cli`
    ClearCli,
    /// `clear all`
    ClearAll,
    /// `help`
    Help,
}

impl CommandKind {
    /// All commands, in declaration order.
    pub const ALL: &'static [CommandKind] = &[
        Self::Add,
        Self::Connect,
        Self::SetInterface,
        Self::SetHostname,
        Self::SetOspf,
        Self::SetEigrp,
        Self::SetRip,
        Self::SetAclStandard,
        Self::SetAclExtended,
        Self::ShowInterfaces,
        Self::ShowRouting,
        Self::ShowAcl,
        Self::ShowCli,
        Self::ShowTopology,
        Self::ShowHistory,
        Self::Save,
        Self::ClearCli,
        Self::ClearAll,
        Self::Help,
    ];

    /// Shape of the command
    pub fn shape(&self) -> CommandShape {
        match self {
            Self::Add => cmd(&["add"], ADD_ARGS, "Add a device to the topology"),
            Self::Connect => cmd(&["connect"], CONNECT_ARGS, "Connect two devices"),
            Self::SetInterface => {
                cmd(&["set", "interface"], INTERFACE_ARGS, "Assign an address to an interface")
            }
            Self::SetHostname => cmd(&["set", "hostname"], HOSTNAME_ARGS, "Change the hostname"),
            Self::SetOspf => cmd(&["set", "ospf"], OSPF_ARGS, "Add an OSPF network statement"),
            Self::SetEigrp => cmd(&["set", "eigrp"], EIGRP_ARGS, "Add an EIGRP network statement"),
            Self::SetRip => cmd(&["set", "rip"], RIP_ARGS, "Add a RIP network statement"),
            Self::SetAclStandard => {
                cmd(&["set", "acl-std"], ACL_STD_ARGS, "Append a rule to a standard access list")
            }
            Self::SetAclExtended => {
                cmd(&["set", "acl-ext"], ACL_EXT_ARGS, "Append a rule to an extended access list")
            }
            Self::ShowInterfaces => {
                cmd(&["show", "interfaces"], DEVICE_ARGS, "Show the interfaces")
            }
            Self::ShowRouting => {
                cmd(&["show", "routing"], DEVICE_ARGS, "Show the routing statements")
            }
            Self::ShowAcl => cmd(&["show", "acl"], DEVICE_ARGS, "Show the access lists"),
            Self::ShowCli => cmd(&["show", "cli"], DEVICE_ARGS, "Show the generated configuration"),
            Self::ShowTopology => {
                cmd(&["show", "topology"], NO_ARGS, "Show devices and connections")
            }
            Self::ShowHistory => cmd(&["show", "history"], NO_ARGS, "Show the configuration log"),
            Self::Save => cmd(&["save"], DEVICE_ARGS, "Save the generated configuration"),
            Self::ClearCli => cmd(&["clear", "cli"], NO_ARGS, "Clear the configuration log"),
            Self::ClearAll => cmd(&["clear", "all"], NO_ARGS, "Reset the whole session"),
            Self::Help => cmd(&["help"], NO_ARGS, "List all commands"),
        }
    }

    /// Stable identifier of the command, e.g. `set-interface`.
    pub fn name(&self) -> String {
        self.shape().keywords.join("-")
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.shape().keywords.join(" "))
    }
}

/// Structured result of lexing one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Recognized command
    pub kind: CommandKind,
    /// Positional arguments, unvalidated
    pub args: Vec<String>,
    /// The original input line
    pub raw: String,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn argument_types() {
        assert_eq!(ArgType::Ident.parse("g0/0"), Some(Value::Ident("g0/0".into())));
        assert_eq!(ArgType::Ident.parse("-R1"), None);
        assert_eq!(ArgType::Ident.parse("R1;"), None);
        assert_eq!(ArgType::Name.parse("core-sw.1"), Some(Value::Ident("core-sw.1".into())));
        assert_eq!(ArgType::Name.parse("core/1"), None);
        assert_eq!(ArgType::Name.parse("R1:0"), None);
        assert_eq!(ArgType::Name.parse(".."), None);
        assert_eq!(ArgType::Integer.parse("10"), Some(Value::Int(10)));
        assert_eq!(ArgType::Integer.parse("-1"), None);
        assert_eq!(ArgType::Integer.parse("99999999999"), None);
        assert!(ArgType::Address.parse("192.168.1.1").is_some());
        assert!(ArgType::Address.parse("192.168.1.256").is_none());
        assert!(ArgType::Mask.parse("255.255.255.0").is_some());
        assert!(ArgType::Mask.parse("255.0.255.0").is_none());
        assert!(ArgType::Wildcard.parse("0.255.0.255").is_some());
        assert_eq!(
            ArgType::Keyword(DeviceKind::KEYWORDS).parse("Router"),
            Some(Value::Keyword("router"))
        );
        assert_eq!(ArgType::Keyword(DeviceKind::KEYWORDS).parse("firewall"), None);
    }

    #[test]
    fn usage_strings() {
        assert_eq!(
            CommandKind::SetInterface.shape().usage(),
            "set interface <device> <interface> <ip> <mask>"
        );
        assert_eq!(CommandKind::Add.shape().usage(), "add <router|switch|host|server> <name>");
        assert_eq!(CommandKind::SetAclStandard.name(), "set-acl-std");
        assert_eq!(CommandKind::ClearCli.to_string(), "clear cli");
    }

    #[test]
    fn keyword_prefixes_are_unique() {
        for (i, a) in CommandKind::ALL.iter().enumerate() {
            for b in CommandKind::ALL.iter().skip(i + 1) {
                assert_ne!(a.shape().keywords, b.shape().keywords, "{:?} and {:?}", a, b);
            }
        }
    }
}
