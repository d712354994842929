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

//! # Lexer
//!
//! Recognizes the command of an input line and splits off its arguments. Each command of the
//! [token model](crate::token) is compiled into a regular expression matching its keyword prefix
//! (case-insensitively), followed by the rest of the line. The patterns are tried in a fixed
//! priority order: commands with more keywords first, and commands with the same number of
//! keywords in declaration order. Since every keyword must be followed by whitespace or the end of
//! the line, `set interfaces` never matches `set interface`.
//!
//! The lexer never validates the arguments, and never looks at the network.

use crate::error::LexicalError;
use crate::token::{CommandKind, Token};

use itertools::Itertools;
use log::*;
use regex::Regex;

/// Compiled command patterns, in priority order.
#[derive(Debug, Clone)]
pub struct Lexer {
    patterns: Vec<(CommandKind, Regex)>,
}

impl Default for Lexer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lexer {
    /// Compile the patterns of all commands.
    pub fn new() -> Self {
        let mut kinds: Vec<CommandKind> = CommandKind::ALL.to_vec();
        // stable sort, keeps the declaration order for ties
        kinds.sort_by_key(|k| std::cmp::Reverse(k.shape().keywords.len()));
        let patterns = kinds.into_iter().map(|k| (k, pattern(k))).collect();
        Self { patterns }
    }

    /// The commands in the order in which they are tried.
    pub fn priority(&self) -> impl Iterator<Item = CommandKind> + '_ {
        self.patterns.iter().map(|(k, _)| *k)
    }

    /// Match the line against all patterns and return the first match. Whitespace is normalized
    /// before matching; the raw line is kept in the token.
    pub fn tokenize(&self, raw: &str) -> Result<Token, LexicalError> {
        let line = raw.split_whitespace().join(" ");
        if line.is_empty() {
            return Err(LexicalError::EmptyLine);
        }
        for (kind, re) in self.patterns.iter() {
            if let Some(caps) = re.captures(&line) {
                let args: Vec<String> = caps
                    .get(1)
                    .map(|m| m.as_str().split(' ').map(String::from).collect())
                    .unwrap_or_default();
                trace!("`{}` matches {}", line, kind.name());
                return Ok(Token { kind: *kind, args, raw: raw.to_string() });
            }
        }
        Err(LexicalError::Unrecognized)
    }
}

/// Build the pattern for a command, e.g. `^(?i:set interface)(?: (.+))?$`.
fn pattern(kind: CommandKind) -> Regex {
    let prefix = kind.shape().keywords.iter().map(|k| regex::escape(k)).join(" ");
    Regex::new(&format!("^(?i:{})(?: (.+))?$", prefix))
        .expect("escaped keywords always form a valid pattern")
}
