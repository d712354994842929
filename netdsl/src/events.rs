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

//! # Stage events
//!
//! The interpreter reports every stage a line passes through (or fails at) to an [`EventSink`].
//! The default sink, [`LogSink`], forwards the events to the `log` facade. [`EventLog`] records
//! them, which is useful to inspect how far a line got.

use crate::error::Error;

use log::*;
use std::fmt;

/// Stages of the pipeline, in the order they run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    /// Pattern recognition of the command
    Lexer,
    /// Argument count and argument types
    Syntax,
    /// Constraints of the network state
    Semantic,
    /// Lookup of the executor
    Dispatch,
    /// Execution of the command
    Execution,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lexer => write!(f, "lexer"),
            Self::Syntax => write!(f, "syntax"),
            Self::Semantic => write!(f, "semantic"),
            Self::Dispatch => write!(f, "dispatch"),
            Self::Execution => write!(f, "execution"),
        }
    }
}

/// Result of a single stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome {
    /// The stage accepted the line
    Passed,
    /// The line was rejected because of the input
    Rejected(String),
    /// The configuration could not be persisted
    StoreFailed(String),
    /// An internal invariant was violated
    InvariantViolated(String),
}

impl StageOutcome {
    /// Outcome corresponding to an error
    pub fn from_error(error: &Error) -> Self {
        let msg = error.to_string();
        match error {
            Error::Internal { .. } => Self::InvariantViolated(msg),
            Error::Store { .. } => Self::StoreFailed(msg),
            Error::Lexical { .. } | Error::Syntax { .. } | Error::Semantic { .. } => {
                Self::Rejected(msg)
            }
        }
    }

    /// Returns true if the stage accepted the line
    pub fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }
}

/// A stage transition of a single line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageEvent {
    /// The stage
    pub stage: Stage,
    /// The line (or command) the stage processed
    pub subject: String,
    /// What happened
    pub outcome: StageOutcome,
}

impl StageEvent {
    /// The stage accepted the subject
    pub fn passed(stage: Stage, subject: impl Into<String>) -> Self {
        Self { stage, subject: subject.into(), outcome: StageOutcome::Passed }
    }

    /// The error stopped the line at its stage
    pub fn failed(error: &Error) -> Self {
        Self {
            stage: error.stage(),
            subject: error.line().to_string(),
            outcome: StageOutcome::from_error(error),
        }
    }
}

/// Receiver of stage events
pub trait EventSink {
    /// Report a single event
    fn report(&mut self, event: StageEvent);
}

/// Sink that writes every event to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn report(&mut self, event: StageEvent) {
        match event.outcome {
            StageOutcome::Passed => debug!("[{}] passed: {}", event.stage, event.subject),
            StageOutcome::Rejected(msg) => info!("[{}] {}", event.stage, msg),
            StageOutcome::StoreFailed(msg) => warn!("[{}] {}", event.stage, msg),
            StageOutcome::InvariantViolated(msg) => error!("[{}] {}", event.stage, msg),
        }
    }
}

/// Sink that keeps all events in memory.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<StageEvent>,
}

impl EventLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded events, oldest first
    pub fn events(&self) -> &[StageEvent] {
        &self.events
    }

    /// The stages that were passed, in order
    pub fn passed(&self) -> Vec<Stage> {
        self.events.iter().filter(|e| e.outcome.is_passed()).map(|e| e.stage).collect()
    }

    /// The most recent event
    pub fn last(&self) -> Option<&StageEvent> {
        self.events.last()
    }

    /// Forget all recorded events
    pub fn clear(&mut self) {
        self.events.clear()
    }
}

impl EventSink for EventLog {
    fn report(&mut self, event: StageEvent) {
        self.events.push(event)
    }
}
