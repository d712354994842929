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

use netdsl::interpreter::is_skipped;
use netdsl::netsim::Network;
use netdsl::{ConfigStore, EventSink, FileStore, Interpreter, LogSink};

use clap::Parser;
use log::*;
use std::error::Error;
use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Interpreter for building and configuring a simulated network, one command per line. Without a
/// script, commands are read interactively from stdin.
#[derive(Parser, Debug)]
#[clap(name = "NetDSL", author = "Tibor Schneider")]
struct CommandLineArguments {
    /// Script to execute. Blank lines and lines starting with `!` or `#` are skipped.
    script: Option<PathBuf>,
    /// Directory into which `save` writes the configuration files
    #[clap(short = 'o', long, default_value = ".")]
    output_dir: PathBuf,
    /// Write a JSON snapshot of the topology to this file when done
    #[clap(short = 's', long)]
    snapshot: Option<PathBuf>,
    /// Abort the script at the first failing line
    #[clap(long)]
    stop_on_error: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    // initialize the env logger
    pretty_env_logger::init();
    // run clap
    let args = CommandLineArguments::parse();

    let mut interpreter = Interpreter::new(FileStore::new(&args.output_dir), LogSink);
    let mut net = Network::new();

    let failed = match &args.script {
        Some(path) => run_file(&mut interpreter, &mut net, path, args.stop_on_error)?,
        None => interactive(&mut interpreter, &mut net)?,
    };

    if let Some(path) = &args.snapshot {
        serde_json::to_writer_pretty(File::create(path)?, &net.snapshot())?;
        info!("Wrote the topology snapshot to {}", path.display());
    }

    if failed > 0 {
        Err(ScriptFailed { failed }.into())
    } else {
        Ok(())
    }
}

/// Execute every line of the script and print the results. Returns the number of failed lines.
fn run_file<St: ConfigStore, Si: EventSink>(
    interpreter: &mut Interpreter<St, Si>,
    net: &mut Network,
    path: &Path,
    stop_on_error: bool,
) -> Result<usize, Box<dyn Error>> {
    let script = fs::read_to_string(path)?;
    info!("Executing {}", path.display());
    let mut failed = 0;
    for (line, outcome) in interpreter.run_script(&script, net, stop_on_error) {
        match outcome {
            Ok(result) => result.output.iter().for_each(|l| println!("{}", l)),
            Err(e) => {
                eprintln!("{}:{}: {}", path.display(), line, e);
                failed += 1;
            }
        }
    }
    Ok(failed)
}

/// Read commands from stdin until `exit`, `quit` or the end of the input. Errors are printed, and
/// never end the session.
fn interactive<St: ConfigStore, Si: EventSink>(
    interpreter: &mut Interpreter<St, Si>,
    net: &mut Network,
) -> Result<usize, Box<dyn Error>> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("netdsl> ");
        io::stdout().flush()?;
        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        match line.trim() {
            "exit" | "quit" => break,
            l if is_skipped(l) => continue,
            l => match interpreter.handle_command(l, net) {
                Ok(result) => result.output.iter().for_each(|l| println!("{}", l)),
                Err(e) => println!("{}", e),
            },
        }
    }
    println!();
    Ok(0)
}

#[derive(Debug)]
struct ScriptFailed {
    failed: usize,
}

impl fmt::Display for ScriptFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} lines of the script failed", self.failed)
    }
}

impl Error for ScriptFailed {}
