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

//! # Interpreter
//!
//! Drives a single line through all stages of the pipeline:
//!
//! ```text
//! raw line -> Lexer -> Token -> Parser (syntax, semantics) -> ValidatedToken
//!          -> Registry (dispatch) -> Executor -> ExecutionResult
//! ```
//!
//! The first stage that rejects the line stops the pipeline. Its error is returned, wrapped with
//! the input line, and the network is left untouched. Every stage reports an event to the
//! [`EventSink`]. The interpreter owns no network state; the caller passes the [`Network`] of the
//! session into every call.

use crate::error::Error;
use crate::events::{EventSink, LogSink, Stage, StageEvent};
use crate::executor::ExecutionResult;
use crate::lexer::Lexer;
use crate::netsim::Network;
use crate::parser;
use crate::registry::Registry;
use crate::store::{ConfigStore, MemoryStore};

use log::*;

/// Outcome of a single line
pub type CommandOutcome = Result<ExecutionResult, Error>;

/// Returns true for lines that a script skips: blank lines and comments starting with `!` or `#`.
pub fn is_skipped(line: &str) -> bool {
    let line = line.trim();
    line.is_empty() || line.starts_with('!') || line.starts_with('#')
}

/// The command interpreter. By default, saved configurations are kept in memory, and stage events
/// are written to the log.
#[derive(Debug)]
pub struct Interpreter<St: ConfigStore = MemoryStore, Si: EventSink = LogSink> {
    lexer: Lexer,
    registry: Registry,
    store: St,
    sink: Si,
}

impl Default for Interpreter<MemoryStore, LogSink> {
    fn default() -> Self {
        Self::new(MemoryStore::new(), LogSink)
    }
}

impl<St: ConfigStore, Si: EventSink> Interpreter<St, Si> {
    /// Create an interpreter with the executors of all commands.
    pub fn new(store: St, sink: Si) -> Self {
        Self::with_registry(Registry::standard(), store, sink)
    }

    /// Create an interpreter with a custom registry. Commands without an executor are reported,
    /// and fail with an internal error once they are submitted.
    pub fn with_registry(registry: Registry, store: St, sink: Si) -> Self {
        if let Err(missing) = registry.verify() {
            for kind in missing {
                error!("No executor registered for `{}`", kind);
            }
        }
        Self { lexer: Lexer::new(), registry, store, sink }
    }

    /// Process a single line.
    pub fn handle_command(&mut self, raw: &str, net: &mut Network) -> CommandOutcome {
        let result = self.run_stages(raw, net);
        if let Err(e) = &result {
            self.sink.report(StageEvent::failed(e));
        }
        result
    }

    /// Process every line of a script, skipping blank lines and comments. With `stop_on_error`,
    /// the first failing line is the last one processed; otherwise failing lines do not stop the
    /// script. Returns the 1-based line number and the outcome of each processed line.
    pub fn run_script(
        &mut self,
        script: &str,
        net: &mut Network,
        stop_on_error: bool,
    ) -> Vec<(usize, CommandOutcome)> {
        let mut outcomes = Vec::new();
        for (i, line) in script.lines().enumerate().filter(|(_, line)| !is_skipped(line)) {
            let outcome = self.handle_command(line, net);
            let failed = outcome.is_err();
            outcomes.push((i + 1, outcome));
            if failed && stop_on_error {
                debug!("Script stopped at line {}", i + 1);
                break;
            }
        }
        outcomes
    }

    fn run_stages(&mut self, raw: &str, net: &mut Network) -> CommandOutcome {
        let token = self
            .lexer
            .tokenize(raw)
            .map_err(|source| Error::Lexical { line: raw.to_string(), source })?;
        self.sink.report(StageEvent::passed(Stage::Lexer, raw));

        let sink = &mut self.sink;
        let validated = parser::validate_stages(token, net, |stage| {
            sink.report(StageEvent::passed(stage, raw))
        })?;
        let executor = self
            .registry
            .dispatch(validated.kind())
            .map_err(|source| Error::Internal { line: raw.to_string(), source })?;
        self.sink.report(StageEvent::passed(Stage::Dispatch, raw));

        let result = executor(&validated, net, &mut self.store)
            .map_err(|cause| Error::execution(raw, cause))?;
        self.sink.report(StageEvent::passed(Stage::Execution, raw));
        trace!("{}: {}", validated.kind().name(), result.effect);

        Ok(result)
    }

    /// The lexer
    pub fn lexer(&self) -> &Lexer {
        &self.lexer
    }

    /// The registry of executors
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The configuration store
    pub fn store(&self) -> &St {
        &self.store
    }

    /// Mutable reference to the configuration store
    pub fn store_mut(&mut self) -> &mut St {
        &mut self.store
    }

    /// The event sink
    pub fn sink(&self) -> &Si {
        &self.sink
    }

    /// Mutable reference to the event sink
    pub fn sink_mut(&mut self) -> &mut Si {
        &mut self.sink
    }
}
