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

//! # Access Control Lists
//!
//! Numbered access lists, either standard (matching only on the source) or extended (matching on
//! protocol, source and destination). Rules are never evaluated against traffic.

use itertools::Itertools;
use serde::Serialize;
use std::fmt;
use std::net::Ipv4Addr;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Step between two automatically assigned sequence numbers
pub const SEQUENCE_STEP: u32 = 10;

static STANDARD_RANGES: [RangeInclusive<u32>; 2] = [1..=99, 1300..=1999];
static EXTENDED_RANGES: [RangeInclusive<u32>; 2] = [100..=199, 2000..=2699];

/// Action of an ACL rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AclAction {
    /// Permit matching traffic
    Permit,
    /// Deny matching traffic
    Deny,
}

impl AclAction {
    /// Keywords accepted on the command line.
    pub const KEYWORDS: &'static [&'static str] = &["permit", "deny"];
}

impl FromStr for AclAction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "permit" => Ok(Self::Permit),
            "deny" => Ok(Self::Deny),
            _ => Err(()),
        }
    }
}

impl fmt::Display for AclAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Permit => "permit",
            Self::Deny => "deny",
        })
    }
}

/// Protocol matched by an extended ACL rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AclProtocol {
    /// Any IP packet
    Ip,
    /// TCP segments
    Tcp,
    /// UDP datagrams
    Udp,
    /// ICMP messages
    Icmp,
}

impl AclProtocol {
    /// Keywords accepted on the command line.
    pub const KEYWORDS: &'static [&'static str] = &["ip", "tcp", "udp", "icmp"];
}

impl FromStr for AclProtocol {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ip" => Ok(Self::Ip),
            "tcp" => Ok(Self::Tcp),
            "udp" => Ok(Self::Udp),
            "icmp" => Ok(Self::Icmp),
            _ => Err(()),
        }
    }
}

impl fmt::Display for AclProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ip => "ip",
            Self::Tcp => "tcp",
            Self::Udp => "udp",
            Self::Icmp => "icmp",
        })
    }
}

/// Shape of an access list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AclShape {
    /// Source only
    Standard,
    /// Protocol, source and destination
    Extended,
}

impl AclShape {
    /// Returns true if `number` identifies an access list of this shape.
    pub fn accepts(&self, number: u32) -> bool {
        self.ranges().iter().any(|r| r.contains(&number))
    }

    /// Human readable list of the valid number ranges, e.g. `1-99 or 1300-1999`.
    pub fn ranges_repr(&self) -> String {
        self.ranges()
            .iter()
            .map(|r| format!("{}-{}", r.start(), r.end()))
            .join(" or ")
    }

    fn ranges(&self) -> &'static [RangeInclusive<u32>; 2] {
        match self {
            Self::Standard => &STANDARD_RANGES,
            Self::Extended => &EXTENDED_RANGES,
        }
    }
}

impl fmt::Display for AclShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Standard => "standard",
            Self::Extended => "extended",
        })
    }
}

/// Match part of an ACL rule
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum AclEntry {
    /// Match on the source address only
    Standard {
        /// Source address
        source: Ipv4Addr,
        /// Source wildcard
        wildcard: Ipv4Addr,
    },
    /// Match on protocol, source and destination
    Extended {
        /// Protocol
        protocol: AclProtocol,
        /// Source address
        source: Ipv4Addr,
        /// Source wildcard
        source_wildcard: Ipv4Addr,
        /// Destination address
        destination: Ipv4Addr,
        /// Destination wildcard
        destination_wildcard: Ipv4Addr,
    },
}

impl AclEntry {
    /// Shape of the entry
    pub fn shape(&self) -> AclShape {
        match self {
            Self::Standard { .. } => AclShape::Standard,
            Self::Extended { .. } => AclShape::Extended,
        }
    }
}

impl fmt::Display for AclEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard { source, wildcard } => write!(f, "{} {}", source, wildcard),
            Self::Extended {
                protocol,
                source,
                source_wildcard,
                destination,
                destination_wildcard,
            } => write!(
                f,
                "{} {} {} {} {}",
                protocol, source, source_wildcard, destination, destination_wildcard
            ),
        }
    }
}

/// A rule in a numbered access list
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AclRule {
    /// Access list number
    pub number: u32,
    /// Sequence number inside the access list
    pub sequence: u32,
    /// Permit or deny
    pub action: AclAction,
    /// What the rule matches
    pub entry: AclEntry,
}

impl AclRule {
    /// The `access-list` configuration line of this rule.
    pub fn cli(&self) -> String {
        format!("access-list {} {} {}", self.number, self.action, self.entry)
    }
}

impl fmt::Display for AclRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} seq {}: {} {}", self.number, self.sequence, self.action, self.entry)
    }
}
