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

#![deny(missing_docs)]

//! # NetDSL: Command Interpreter for Simulated Network Topologies
//! This is a library for building and configuring a simulated network by typing short commands.
//! Every command either changes the network (adding devices, connecting them, configuring
//! interfaces, routing protocols and access lists), or shows a part of its state. Configuration
//! commands generate Cisco-style CLI lines, which are recorded per device and can be saved.
//!
//! ## Structure
//!
//! Every input line travels through a fixed pipeline. The first stage that rejects a line stops
//! it, and the network remains unchanged.
//!
//! - **[`Token Model`](token)**: Table of all commands, with their keywords and typed arguments.
//!   Both the lexer and the parser are driven by this table.
//!
//! - **[`Lexer`](lexer::Lexer)**: Recognizes the command of a line, and splits off the arguments.
//!   Fails with a [`LexicalError`](error::LexicalError).
//!
//! - **[`Parser`](parser)**: Checks the number and the types of the arguments (raising a
//!   [`SyntaxError`](error::SyntaxError)), and then the constraints of the current network state
//!   (raising a [`SemanticError`](error::SemanticError)).
//!
//! - **[`Registry`](registry::Registry)**: Maps every command to its executor.
//!
//! - **[`Executors`](executor)**: Apply a validated command to the network and return the
//!   generated output together with the applied [`Effect`](executor::Effect).
//!
//! - **[`Interpreter`]**: Runs the pipeline and reports every stage to an
//!   [`EventSink`](events::EventSink).
//!
//! - **[`NetSim`](netsim)**: The network state of a session. See the main structure
//!   [`Network`](netsim::Network).
//!
//! ## Usage
//!
//! ```
//! use netdsl::netsim::Network;
//! use netdsl::Interpreter;
//!
//! let mut net = Network::new();
//! let mut interpreter: Interpreter = Interpreter::default();
//!
//! interpreter.handle_command("add router R1", &mut net).unwrap();
//! interpreter.handle_command("add switch SW1", &mut net).unwrap();
//! interpreter.handle_command("connect R1 SW1 ethernet", &mut net).unwrap();
//!
//! let result = interpreter
//!     .handle_command("set interface R1 g0/0 192.168.1.1 255.255.255.0", &mut net)
//!     .unwrap();
//! assert_eq!(result.output, vec!["interface g0/0", "ip address 192.168.1.1 255.255.255.0"]);
//!
//! // wrong number of arguments
//! let err = interpreter.handle_command("set interface R1 g0/0 192.168.1.1", &mut net);
//! assert!(err.unwrap_err().is_user_error());
//! ```

pub mod command;
pub mod error;
pub mod events;
pub mod executor;
pub mod interpreter;
pub mod lexer;
pub mod netsim;
pub mod parser;
pub mod registry;
pub mod store;
mod test;
pub mod token;

pub use command::Command;
pub use error::Error;
pub use events::{EventLog, EventSink, LogSink, Stage, StageEvent};
pub use executor::{Effect, ExecutionResult};
pub use interpreter::{CommandOutcome, Interpreter};
pub use lexer::Lexer;
pub use parser::ValidatedToken;
pub use registry::Registry;
pub use store::{ConfigStore, FileStore, MemoryStore};
pub use token::{CommandKind, Token};
