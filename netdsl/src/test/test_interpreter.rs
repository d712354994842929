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

use crate::error::{Error, InvariantError, LexicalError, StoreError, SyntaxError};
use crate::events::{EventLog, Stage, StageOutcome};
use crate::executor::Effect;
use crate::interpreter::{is_skipped, Interpreter};
use crate::netsim::{CableType, Connection, Network};
use crate::registry::Registry;
use crate::store::{ConfigStore, MemoryStore};
use crate::token::CommandKind;
use lazy_static::lazy_static;

lazy_static! {
    static ref SETUP: Vec<&'static str> = vec![
        "add router R1",
        "add router R2",
        "add switch SW1",
        "add host PC1",
        "connect R1 SW1 ethernet",
        "connect R1 R2 serial",
        "connect SW1 PC1 ethernet",
        "set interface R1 g0/0 192.168.1.1 255.255.255.0",
        "set interface R1 s0/0 10.0.0.1 255.255.255.252",
        "set interface R2 s0/0 10.0.0.2 255.255.255.252",
    ];
}

/// Store that refuses every configuration
#[derive(Debug, Default)]
struct ReadOnlyStore;

impl ConfigStore for ReadOnlyStore {
    fn save(&mut self, device: &str, _lines: &[String]) -> Result<(), StoreError> {
        Err(StoreError::Rejected(device.to_string(), "read-only store".into()))
    }
}

fn get_interpreter() -> Interpreter<MemoryStore, EventLog> {
    Interpreter::new(MemoryStore::new(), EventLog::new())
}

fn get_test_net(interpreter: &mut Interpreter<MemoryStore, EventLog>) -> Network {
    let mut net = Network::new();
    for line in SETUP.iter() {
        interpreter.handle_command(line, &mut net).unwrap();
    }
    interpreter.sink_mut().clear();
    net
}

/// Everything observable about the network
fn state(net: &Network) -> (String, usize) {
    (format!("{:?}", net.snapshot()), net.history().len())
}

#[test]
fn test_unrecognized_input() {
    let mut interpreter = get_interpreter();
    let mut net = get_test_net(&mut interpreter);
    let before = state(&net);

    match interpreter.handle_command("frobnicate R1", &mut net) {
        Err(Error::Lexical { line, source }) => {
            assert_eq!(line, "frobnicate R1");
            assert_eq!(source, LexicalError::Unrecognized);
        }
        r => panic!("unexpected result {:?}", r),
    }
    assert_eq!(state(&net), before);
}

#[test]
fn test_wrong_argument_count() {
    let mut interpreter = get_interpreter();
    let mut net = get_test_net(&mut interpreter);
    let before = state(&net);

    let err =
        interpreter.handle_command("set interface R1 g0/0 192.168.1.1", &mut net).unwrap_err();
    match &err {
        Error::Syntax { source: SyntaxError::ArgumentCount { expected, got, .. }, .. } => {
            assert_eq!(*expected, 4);
            assert_eq!(*got, 3);
        }
        e => panic!("unexpected error {:?}", e),
    }
    assert!(err.to_string().contains("expected 4, got 3"));
    assert_eq!(err.stage(), Stage::Syntax);
    assert!(err.is_user_error());
    assert_eq!(state(&net), before);
}

#[test]
fn test_set_interface() {
    let mut interpreter = get_interpreter();
    let mut net = get_test_net(&mut interpreter);
    let history = net.history().len();

    let result =
        interpreter.handle_command("set interface R2 g0/1 192.168.2.1 255.255.255.0", &mut net);
    assert_eq!(
        result.unwrap().output,
        vec!["interface g0/1", "ip address 192.168.2.1 255.255.255.0"]
    );
    let iface = net.get_device("R2").unwrap().get_interface("g0/1").unwrap();
    assert_eq!(iface.address, "192.168.2.1".parse::<std::net::Ipv4Addr>().unwrap());
    assert_eq!(iface.mask, "255.255.255.0".parse::<std::net::Ipv4Addr>().unwrap());
    assert_eq!(net.history().len(), history + 2);
}

#[test]
fn test_duplicate_add() {
    let mut interpreter = get_interpreter();
    let mut net = Network::new();
    assert!(interpreter.handle_command("add router R1", &mut net).is_ok());
    let err = interpreter.handle_command("add router R1", &mut net).unwrap_err();
    assert_eq!(err.stage(), Stage::Semantic);
    assert_eq!(net.devices().filter(|d| d.name() == "R1").count(), 1);
    assert_eq!(net.num_devices(), 1);
}

#[test]
fn test_connect_before_devices_exist() {
    let mut interpreter = get_interpreter();
    let mut net = Network::new();
    let err = interpreter.handle_command("connect R1 SW1 ethernet", &mut net).unwrap_err();
    assert_eq!(err.stage(), Stage::Semantic);
    assert_eq!(net.num_connections(), 0);

    interpreter.handle_command("add router R1", &mut net).unwrap();
    interpreter.handle_command("add switch SW1", &mut net).unwrap();
    interpreter.handle_command("connect R1 SW1 ethernet", &mut net).unwrap();
    assert_eq!(
        net.connections(),
        vec![Connection { endpoints: ["SW1".into(), "R1".into()], cable: CableType::Ethernet }]
    );

    // a second connection between the same pair is rejected
    let err = interpreter.handle_command("connect SW1 R1 fiber", &mut net).unwrap_err();
    assert_eq!(err.stage(), Stage::Semantic);
    assert_eq!(net.num_connections(), 1);
}

#[test]
fn test_show_is_idempotent() {
    let mut interpreter = get_interpreter();
    let mut net = get_test_net(&mut interpreter);
    let before = state(&net);

    let a = interpreter.handle_command("show interfaces R1", &mut net).unwrap();
    let b = interpreter.handle_command("show interfaces R1", &mut net).unwrap();
    assert_eq!(a.output, b.output);
    assert_eq!(a.output.len(), 3);
    assert_eq!(state(&net), before);
}

#[test]
fn test_clear_cli_and_all() {
    let mut interpreter = get_interpreter();
    let mut net = get_test_net(&mut interpreter);
    let snapshot = net.snapshot();
    assert!(!net.history().is_empty());

    let result = interpreter.handle_command("clear cli", &mut net).unwrap();
    assert_eq!(result.effect, Effect::CliCleared);
    assert!(net.history().is_empty());
    assert!(net.devices().all(|d| d.cli().is_empty()));
    assert_eq!(net.snapshot(), snapshot);
    assert_eq!(net.get_device("R1").unwrap().interfaces().count(), 2);

    let result = interpreter.handle_command("clear all", &mut net).unwrap();
    assert_eq!(result.effect, Effect::NetworkCleared);
    assert!(net.is_empty());
    assert_eq!(net.snapshot(), Network::new().snapshot());

    // the session continues on the empty network
    assert!(interpreter.handle_command("add router R1", &mut net).is_ok());
}

#[test]
fn test_keywords_case_insensitive() {
    let mut interpreter = get_interpreter();
    let mut net = Network::new();
    interpreter.handle_command("ADD Router R1", &mut net).unwrap();
    interpreter.handle_command("Add SWITCH r1", &mut net).unwrap();
    assert_eq!(net.num_devices(), 2);
    interpreter.handle_command("CONNECT R1 r1 Serial", &mut net).unwrap();
    assert_eq!(net.get_connection("R1", "r1"), Some(CableType::Serial));
}

#[test]
fn test_stage_events() {
    let mut interpreter = get_interpreter();
    let mut net = get_test_net(&mut interpreter);

    interpreter.handle_command("show topology", &mut net).unwrap();
    assert_eq!(
        interpreter.sink().passed(),
        vec![Stage::Lexer, Stage::Syntax, Stage::Semantic, Stage::Dispatch, Stage::Execution]
    );
    interpreter.sink_mut().clear();

    interpreter.handle_command("show interfaces R9", &mut net).unwrap_err();
    assert_eq!(interpreter.sink().passed(), vec![Stage::Lexer, Stage::Syntax]);
    let last = interpreter.sink().last().unwrap();
    assert_eq!(last.stage, Stage::Semantic);
    assert_eq!(last.subject, "show interfaces R9");
    assert!(matches!(last.outcome, StageOutcome::Rejected(_)));
    interpreter.sink_mut().clear();

    interpreter.handle_command("   ", &mut net).unwrap_err();
    assert!(interpreter.sink().passed().is_empty());
    assert_eq!(interpreter.sink().last().unwrap().stage, Stage::Lexer);
}

#[test]
fn test_missing_executor() {
    let mut registry = Registry::standard();
    registry.unregister(CommandKind::ShowTopology);
    let mut interpreter = Interpreter::with_registry(registry, MemoryStore::new(), EventLog::new());
    let mut net = Network::new();

    let err = interpreter.handle_command("show topology", &mut net).unwrap_err();
    assert!(err.is_internal());
    assert!(!err.is_user_error());
    assert_eq!(err.stage(), Stage::Dispatch);
    match &err {
        Error::Internal { source, .. } => {
            assert_eq!(*source, InvariantError::NoExecutor(CommandKind::ShowTopology))
        }
        e => panic!("unexpected error {:?}", e),
    }
    let last = interpreter.sink().last().unwrap();
    assert!(matches!(last.outcome, StageOutcome::InvariantViolated(_)));

    // the session continues
    assert!(interpreter.handle_command("add router R1", &mut net).is_ok());
}

#[test]
fn test_store_failure() {
    let mut interpreter = Interpreter::new(ReadOnlyStore, EventLog::new());
    let mut net = Network::new();
    interpreter.handle_command("add router R1", &mut net).unwrap();

    let err = interpreter.handle_command("save R1", &mut net).unwrap_err();
    assert!(matches!(err, Error::Store { source: StoreError::Rejected(_, _), .. }));
    assert_eq!(err.stage(), Stage::Execution);
    assert!(!err.is_internal());
    assert!(!err.is_user_error());
    let last = interpreter.sink().last().unwrap();
    assert!(matches!(last.outcome, StageOutcome::StoreFailed(_)));
}

#[test]
fn test_save_to_memory() {
    let mut interpreter = get_interpreter();
    let mut net = get_test_net(&mut interpreter);
    interpreter.handle_command("save R2", &mut net).unwrap();
    assert_eq!(
        interpreter.store().get("R2").unwrap(),
        &["! R2 (router)", "interface s0/0", "ip address 10.0.0.2 255.255.255.252"]
    );
    assert!(interpreter.store().get("R1").is_none());
}

#[test]
fn test_run_script() {
    let mut interpreter = get_interpreter();
    let mut net = Network::new();
    let script = "! topology\nadd router R1\n\n# duplicate\nadd router R1\n  add switch SW1\n\
                  connect R1 SW1 ethernet\n";
    let outcomes = interpreter.run_script(script, &mut net, false);
    let lines: Vec<usize> = outcomes.iter().map(|(l, _)| *l).collect();
    assert_eq!(lines, vec![2, 5, 6, 7]);
    assert!(outcomes[0].1.is_ok());
    assert!(outcomes[1].1.is_err());
    assert!(outcomes[2].1.is_ok());
    assert!(outcomes[3].1.is_ok());
    assert_eq!(net.num_devices(), 2);
    assert_eq!(net.num_connections(), 1);
}

#[test]
fn test_run_script_stop_on_error() {
    let mut interpreter = get_interpreter();
    let mut net = Network::new();
    let script = "add router R1\n! comment\nadd router R1\nadd switch SW1\n";
    let outcomes = interpreter.run_script(script, &mut net, true);
    let lines: Vec<usize> = outcomes.iter().map(|(l, _)| *l).collect();
    assert_eq!(lines, vec![1, 3]);
    assert!(outcomes[1].1.is_err());
    assert_eq!(net.num_devices(), 1);
    assert!(net.get_device("SW1").is_err());
}

#[test]
fn test_skipped_lines() {
    assert!(is_skipped(""));
    assert!(is_skipped("   "));
    assert!(is_skipped("! comment"));
    assert!(is_skipped("  # comment"));
    assert!(!is_skipped("add router R1"));
}
