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

//! # Command registry
//!
//! Maps every [`CommandKind`] to the function executing it. The registry is built once, when the
//! interpreter is created, from the table in [`executor`](crate::executor).

use crate::error::{ExecutionError, InvariantError};
use crate::executor::{ExecutionResult, EXECUTORS};
use crate::netsim::Network;
use crate::parser::ValidatedToken;
use crate::store::ConfigStore;
use crate::token::CommandKind;

use std::collections::HashMap;
use std::fmt;

/// Function executing a validated command
pub type Executor = fn(
    &ValidatedToken,
    &mut Network,
    &mut dyn ConfigStore,
) -> Result<ExecutionResult, ExecutionError>;

/// Mapping from command identifier to executor
#[derive(Clone)]
pub struct Registry {
    executors: HashMap<CommandKind, Executor>,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<&CommandKind> = self.executors.keys().collect();
        kinds.sort();
        f.debug_struct("Registry").field("executors", &kinds).finish()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::standard()
    }
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self { executors: HashMap::new() }
    }

    /// Create the registry with the executors of all commands.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for (kind, executor) in EXECUTORS {
            registry.register(*kind, *executor);
        }
        registry
    }

    /// Register an executor, replacing the previous one for the same command.
    pub fn register(&mut self, kind: CommandKind, executor: Executor) -> Option<Executor> {
        self.executors.insert(kind, executor)
    }

    /// Remove the executor of a command.
    pub fn unregister(&mut self, kind: CommandKind) -> Option<Executor> {
        self.executors.remove(&kind)
    }

    /// Look up the executor of a command.
    pub fn dispatch(&self, kind: CommandKind) -> Result<Executor, InvariantError> {
        self.executors.get(&kind).copied().ok_or(InvariantError::NoExecutor(kind))
    }

    /// All commands of the token model without an executor, in declaration order.
    pub fn missing(&self) -> Vec<CommandKind> {
        CommandKind::ALL.iter().filter(|k| !self.executors.contains_key(k)).copied().collect()
    }

    /// Check that every command has an executor.
    pub fn verify(&self) -> Result<(), Vec<CommandKind>> {
        let missing = self.missing();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(missing)
        }
    }
}
