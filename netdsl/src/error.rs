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

//! Module containing all error types
//!
//! Every stage of the pipeline has its own error type. The [`Interpreter`](crate::Interpreter)
//! wraps them into the top-level [`Error`], together with the line that caused them.

use crate::events::Stage;
use crate::netsim::acl::AclShape;
use crate::netsim::routing::RoutingProtocol;
use crate::netsim::{DeviceKind, NetworkError};
use crate::token::{ArgType, CommandKind};

use std::net::Ipv4Addr;
use thiserror::Error;

/// The line does not match any known command.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LexicalError {
    /// The line is empty (or contains only whitespace)
    #[error("empty command")]
    EmptyLine,
    /// No command pattern matches the line
    #[error("unrecognized command pattern")]
    Unrecognized,
}

/// The command was recognized, but its arguments do not match the declared shape.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SyntaxError {
    /// Wrong number of arguments
    #[error(
        "wrong number of arguments for `{command}`: expected {expected}, got {got} \
         (usage: {usage})"
    )]
    ArgumentCount {
        /// The command
        command: CommandKind,
        /// Usage string of the command
        usage: String,
        /// Declared number of arguments
        expected: usize,
        /// Actual number of arguments
        got: usize,
    },
    /// An argument has the wrong type
    #[error("argument {position} <{name}> of `{command}` must be {expected}, got `{value}`")]
    InvalidArgument {
        /// The command
        command: CommandKind,
        /// 1-based position of the argument
        position: usize,
        /// Declared name of the argument
        name: &'static str,
        /// Declared type of the argument
        expected: ArgType,
        /// The offending value
        value: String,
    },
}

/// The command is well-formed, but violates a constraint of the current network state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SemanticError {
    /// Referenced device does not exist
    #[error("device `{0}` does not exist")]
    UnknownDevice(String),
    /// A device with the same name exists already
    #[error("device `{0}` already exists")]
    DuplicateDevice(String),
    /// A device cannot be connected to itself
    #[error("cannot connect `{0}` to itself")]
    SelfConnection(String),
    /// The two devices are already connected
    #[error("`{0}` and `{1}` are already connected")]
    DuplicateConnection(String, String),
    /// ACL number is outside of the range of its shape
    #[error("access list number {number} is invalid for a {shape} access list (expected {ranges})")]
    AclNumberOutOfRange {
        /// The given number
        number: u32,
        /// Standard or extended
        shape: AclShape,
        /// Valid ranges
        ranges: String,
    },
    /// Process id or AS number outside of 1-65535
    #[error("{protocol} process id {value} out of range (expected 1-65535)")]
    ProcessIdOutOfRange {
        /// The routing protocol
        protocol: RoutingProtocol,
        /// The given value
        value: u32,
    },
    /// The device does not support the feature
    #[error("`{device}` is a {kind}, which does not support {feature}")]
    UnsupportedDeviceKind {
        /// Name of the device
        device: String,
        /// Kind of the device
        kind: DeviceKind,
        /// Feature that was requested
        feature: &'static str,
    },
    /// The address is the network or broadcast address of its subnet
    #[error("{address} is not a valid host address for mask {mask}")]
    InvalidHostAddress {
        /// The address
        address: Ipv4Addr,
        /// The mask
        mask: Ipv4Addr,
    },
    /// The address is assigned to a different interface
    #[error("{address} is already assigned to `{device}` {interface}")]
    AddressInUse {
        /// The address
        address: Ipv4Addr,
        /// Device holding the address
        device: String,
        /// Interface holding the address
        interface: String,
    },
    /// The identical routing statement is already configured
    #[error("`{device}` already has the statement `{statement}`")]
    DuplicateRoutingStatement {
        /// Name of the device
        device: String,
        /// The statement
        statement: String,
    },
}

/// Violation of an internal invariant: the token model, the parser and the registered executors
/// disagree. These errors are never caused by the user's input alone.
#[derive(Debug, Error, PartialEq)]
pub enum InvariantError {
    /// The command has no registered executor
    #[error("no executor registered for `{0}`")]
    NoExecutor(CommandKind),
    /// An executor was called with a command it does not handle
    #[error("executor for `{executor}` received a `{got}` command")]
    UnexpectedCommand {
        /// Command the executor is registered for
        executor: CommandKind,
        /// Command it received
        got: CommandKind,
    },
    /// The typed arguments do not match what the command builder expects
    #[error("argument {position} of `{command}` does not have the declared type")]
    ArgumentMismatch {
        /// The command
        command: CommandKind,
        /// 1-based position of the argument
        position: usize,
    },
    /// The network rejected a validated command
    #[error("network rejected a validated command: {0}")]
    NetworkError(#[from] NetworkError),
}

/// The persistence collaborator failed to store a configuration.
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO Error
    #[error("IO Error: {0}")]
    IoError(#[from] std::io::Error),
    /// The store refused the configuration
    #[error("configuration of `{0}` was rejected: {1}")]
    Rejected(String, String),
    /// The device name cannot be used as a file name
    #[error("`{0}` is not a valid configuration file name")]
    InvalidName(String),
}

/// Error raised by an executor
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// Internal invariant violation
    #[error("{0}")]
    Invariant(#[from] InvariantError),
    /// Persistence failure
    #[error("{0}")]
    Store(#[from] StoreError),
}

impl From<NetworkError> for ExecutionError {
    fn from(e: NetworkError) -> Self {
        Self::Invariant(e.into())
    }
}

/// Main error type, carrying the input line and the stage at which it was rejected.
#[derive(Debug, Error)]
pub enum Error {
    /// The line was not recognized
    #[error("Lexical Error: {source} (in `{line}`)")]
    Lexical {
        /// Input line
        line: String,
        /// Cause
        source: LexicalError,
    },
    /// Wrong number or type of arguments
    #[error("Syntax Error: {source} (in `{line}`)")]
    Syntax {
        /// Input line
        line: String,
        /// Cause
        source: SyntaxError,
    },
    /// Constraint of the network state violated
    #[error("Semantic Error: {source} (in `{line}`)")]
    Semantic {
        /// Input line
        line: String,
        /// Cause
        source: SemanticError,
    },
    /// Internal invariant violated; this is a bug, not an input error
    #[error("Internal Error: {source} (in `{line}`)")]
    Internal {
        /// Input line
        line: String,
        /// Cause
        source: InvariantError,
    },
    /// The configuration could not be persisted
    #[error("Store Error: {source} (in `{line}`)")]
    Store {
        /// Input line
        line: String,
        /// Cause
        source: StoreError,
    },
}

impl Error {
    /// Wrap an [`ExecutionError`] with the line that caused it.
    pub fn execution(line: impl Into<String>, cause: ExecutionError) -> Self {
        let line = line.into();
        match cause {
            ExecutionError::Invariant(source) => Self::Internal { line, source },
            ExecutionError::Store(source) => Self::Store { line, source },
        }
    }

    /// The input line that caused the error
    pub fn line(&self) -> &str {
        match self {
            Self::Lexical { line, .. }
            | Self::Syntax { line, .. }
            | Self::Semantic { line, .. }
            | Self::Internal { line, .. }
            | Self::Store { line, .. } => line,
        }
    }

    /// The stage at which the line was rejected
    pub fn stage(&self) -> Stage {
        match self {
            Self::Lexical { .. } => Stage::Lexer,
            Self::Syntax { .. } => Stage::Syntax,
            Self::Semantic { .. } => Stage::Semantic,
            Self::Internal { source: InvariantError::NoExecutor(_), .. } => Stage::Dispatch,
            Self::Internal { source: InvariantError::ArgumentMismatch { .. }, .. } => Stage::Syntax,
            Self::Internal { .. } | Self::Store { .. } => Stage::Execution,
        }
    }

    /// Returns true if the error points to a bug in the interpreter, rather than to a problem
    /// with the input.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Internal { .. })
    }

    /// Returns true if the error was caused by the input and can be fixed by resubmitting a
    /// corrected line.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::Lexical { .. } | Self::Syntax { .. } | Self::Semantic { .. })
    }
}
