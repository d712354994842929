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

use crate::command::Command;
use crate::error::{Error, InvariantError, SemanticError, SyntaxError};
use crate::lexer::Lexer;
use crate::netsim::acl::{AclAction, AclEntry, AclShape};
use crate::netsim::routing::{RoutingProtocol, RoutingStatement};
use crate::netsim::{CableType, DeviceKind, Network};
use crate::parser::{self, ValidatedToken};
use crate::token::{ArgType, CommandKind, Value};
use lazy_static::lazy_static;

lazy_static! {
    static ref LEXER: Lexer = Lexer::new();
}

fn get_test_net() -> Network {
    let mut net = Network::new();
    net.add_device("R1", DeviceKind::Router).unwrap();
    net.add_device("R2", DeviceKind::Router).unwrap();
    net.add_device("SW1", DeviceKind::Switch).unwrap();
    net.add_device("PC1", DeviceKind::Host).unwrap();
    net.add_link("R1", "SW1", CableType::Ethernet).unwrap();
    net.set_interface(
        "R1",
        "g0/0",
        "192.168.1.1".parse().unwrap(),
        "255.255.255.0".parse().unwrap(),
    )
    .unwrap();
    net
}

fn validate(line: &str, net: &Network) -> Result<ValidatedToken, Error> {
    parser::validate(LEXER.tokenize(line).unwrap(), net)
}

fn semantic_error(line: &str, net: &Network) -> SemanticError {
    match validate(line, net) {
        Err(Error::Semantic { source, .. }) => source,
        other => panic!("expected a semantic error for `{}`, got {:?}", line, other),
    }
}

fn syntax_error(line: &str) -> SyntaxError {
    match parser::check_syntax(&LEXER.tokenize(line).unwrap()) {
        Err(Error::Syntax { source, .. }) => source,
        other => panic!("expected a syntax error for `{}`, got {:?}", line, other),
    }
}

#[test]
fn test_argument_count() {
    let err = syntax_error("set interface R1 g0/0 192.168.1.1");
    assert_eq!(
        err,
        SyntaxError::ArgumentCount {
            command: CommandKind::SetInterface,
            usage: "set interface <device> <interface> <ip> <mask>".into(),
            expected: 4,
            got: 3,
        }
    );
    assert!(err.to_string().contains("expected 4, got 3"));

    match syntax_error("show topology R1") {
        SyntaxError::ArgumentCount { expected, got, .. } => {
            assert_eq!(expected, 0);
            assert_eq!(got, 1);
        }
        e => panic!("unexpected error {:?}", e),
    }
}

#[test]
fn test_argument_types() {
    assert_eq!(
        syntax_error("set interface R1 g0/0 192.168.1.300 255.255.255.0"),
        SyntaxError::InvalidArgument {
            command: CommandKind::SetInterface,
            position: 3,
            name: "ip",
            expected: ArgType::Address,
            value: "192.168.1.300".into(),
        }
    );

    match syntax_error("set interface R1 g0/0 192.168.1.1 255.0.255.0") {
        SyntaxError::InvalidArgument { position, expected, .. } => {
            assert_eq!(position, 4);
            assert_eq!(expected, ArgType::Mask);
        }
        e => panic!("unexpected error {:?}", e),
    }

    match syntax_error("add firewall FW1") {
        SyntaxError::InvalidArgument { position, name, .. } => {
            assert_eq!(position, 1);
            assert_eq!(name, "kind");
        }
        e => panic!("unexpected error {:?}", e),
    }

    match syntax_error("set ospf R1 one 10.0.0.0 0.0.0.255 0") {
        SyntaxError::InvalidArgument { position, expected, .. } => {
            assert_eq!(position, 2);
            assert_eq!(expected, ArgType::Integer);
        }
        e => panic!("unexpected error {:?}", e),
    }
}

#[test]
fn test_syntax_does_not_need_devices() {
    let net = Network::new();
    let token = LEXER.tokenize("connect R1 SW1 ethernet").unwrap();
    assert_eq!(
        parser::check_syntax(&token).unwrap(),
        Command::Connect { a: "R1".into(), b: "SW1".into(), cable: CableType::Ethernet }
    );
    // but the semantic check does
    assert_eq!(
        semantic_error("connect R1 SW1 ethernet", &net),
        SemanticError::UnknownDevice("R1".into())
    );
}

#[test]
fn test_typed_command() {
    let net = get_test_net();
    let line = "SET ACL-EXT R1 110 Deny TCP 10.0.0.0 0.0.0.255 0.0.0.0 255.255.255.255";
    let token = validate(line, &net).unwrap();
    assert_eq!(token.kind(), CommandKind::SetAclExtended);
    match token.command() {
        Command::Acl { device, number, action, entry } => {
            assert_eq!(device, "R1");
            assert_eq!(*number, 110);
            assert_eq!(*action, AclAction::Deny);
            assert_eq!(entry.shape(), AclShape::Extended);
        }
        c => panic!("unexpected command {:?}", c),
    }

    let token = validate("set ospf R1 1 10.0.0.0 0.0.0.255 0", &net).unwrap();
    assert_eq!(
        token.command(),
        &Command::Route {
            device: "R1".into(),
            statement: RoutingStatement::Ospf {
                process: 1,
                network: "10.0.0.0".parse().unwrap(),
                wildcard: "0.0.0.255".parse().unwrap(),
                area: 0,
            },
        }
    );
}

#[test]
fn test_argument_mismatch_is_internal() {
    assert_eq!(
        Command::build(
            CommandKind::Add,
            vec![Value::Ident("router".into()), Value::Ident("R1".into())]
        ),
        Err(InvariantError::ArgumentMismatch { command: CommandKind::Add, position: 1 })
    );
    assert_eq!(
        Command::build(CommandKind::SetRip, vec![Value::Ident("R1".into())]),
        Err(InvariantError::ArgumentMismatch { command: CommandKind::SetRip, position: 2 })
    );
}

#[test]
fn test_duplicate_device() {
    let net = get_test_net();
    assert_eq!(semantic_error("add router R1", &net), SemanticError::DuplicateDevice("R1".into()));
    assert_eq!(semantic_error("add switch R1", &net), SemanticError::DuplicateDevice("R1".into()));
    // names are case sensitive
    assert!(validate("add router r1", &net).is_ok());
}

#[test]
fn test_connections() {
    let net = get_test_net();
    assert!(validate("connect R1 R2 serial", &net).is_ok());
    assert_eq!(
        semantic_error("connect R1 R3 serial", &net),
        SemanticError::UnknownDevice("R3".into())
    );
    assert_eq!(
        semantic_error("connect R1 R1 serial", &net),
        SemanticError::SelfConnection("R1".into())
    );
    assert_eq!(
        semantic_error("connect R1 SW1 fiber", &net),
        SemanticError::DuplicateConnection("R1".into(), "SW1".into())
    );
    assert_eq!(
        semantic_error("connect SW1 R1 ethernet", &net),
        SemanticError::DuplicateConnection("SW1".into(), "R1".into())
    );
}

#[test]
fn test_interface_address() {
    let net = get_test_net();
    assert!(validate("set interface R2 g0/0 192.168.1.2 255.255.255.0", &net).is_ok());
    // readdressing the same interface with its own address is fine
    assert!(validate("set interface R1 g0/0 192.168.1.1 255.255.255.128", &net).is_ok());
    assert_eq!(
        semantic_error("set interface R2 g0/1 192.168.1.1 255.255.255.0", &net),
        SemanticError::AddressInUse {
            address: "192.168.1.1".parse().unwrap(),
            device: "R1".into(),
            interface: "g0/0".into(),
        }
    );
    assert_eq!(
        semantic_error("set interface R1 g0/1 192.168.1.1 255.255.255.0", &net),
        SemanticError::AddressInUse {
            address: "192.168.1.1".parse().unwrap(),
            device: "R1".into(),
            interface: "g0/0".into(),
        }
    );
    assert_eq!(
        semantic_error("set interface R2 g0/0 10.0.0.0 255.255.255.0", &net),
        SemanticError::InvalidHostAddress {
            address: "10.0.0.0".parse().unwrap(),
            mask: "255.255.255.0".parse().unwrap(),
        }
    );
    assert!(matches!(
        semantic_error("set interface R2 g0/0 10.0.0.255 255.255.255.0", &net),
        SemanticError::InvalidHostAddress { .. }
    ));
    // point-to-point and host subnets
    assert!(validate("set interface R2 s0/0 10.0.0.0 255.255.255.254", &net).is_ok());
    assert!(validate("set interface R2 lo0 10.1.1.1 255.255.255.255", &net).is_ok());
    assert_eq!(
        semantic_error("set interface R9 g0/0 10.0.0.1 255.255.255.0", &net),
        SemanticError::UnknownDevice("R9".into())
    );
}

#[test]
fn test_routing() {
    let mut net = get_test_net();
    assert!(validate("set ospf R1 1 10.0.0.0 0.0.0.255 0", &net).is_ok());
    assert!(validate("set eigrp R1 65535 10.0.0.0 0.0.0.255", &net).is_ok());
    assert!(validate("set rip R1 10.0.0.0", &net).is_ok());

    assert_eq!(
        semantic_error("set ospf SW1 1 10.0.0.0 0.0.0.255 0", &net),
        SemanticError::UnsupportedDeviceKind {
            device: "SW1".into(),
            kind: DeviceKind::Switch,
            feature: "routing protocols",
        }
    );
    assert!(matches!(
        semantic_error("set rip PC1 10.0.0.0", &net),
        SemanticError::UnsupportedDeviceKind { kind: DeviceKind::Host, .. }
    ));
    assert_eq!(
        semantic_error("set ospf R1 0 10.0.0.0 0.0.0.255 0", &net),
        SemanticError::ProcessIdOutOfRange { protocol: RoutingProtocol::Ospf, value: 0 }
    );
    assert_eq!(
        semantic_error("set eigrp R1 65536 10.0.0.0 0.0.0.255", &net),
        SemanticError::ProcessIdOutOfRange { protocol: RoutingProtocol::Eigrp, value: 65536 }
    );

    net.add_routing_statement("R1", RoutingStatement::Rip { network: "10.0.0.0".parse().unwrap() })
        .unwrap();
    assert!(matches!(
        semantic_error("set rip R1 10.0.0.0", &net),
        SemanticError::DuplicateRoutingStatement { .. }
    ));
    assert!(validate("set rip R1 172.16.0.0", &net).is_ok());
}

#[test]
fn test_acl() {
    let net = get_test_net();
    assert!(validate("set acl-std R1 1 permit 10.0.0.0 0.0.0.255", &net).is_ok());
    assert!(validate("set acl-std SW1 1999 deny 10.0.0.0 0.0.0.255", &net).is_ok());
    assert!(validate(
        "set acl-ext R1 2699 permit ip 0.0.0.0 255.255.255.255 10.0.0.0 0.0.0.255",
        &net
    )
    .is_ok());

    assert_eq!(
        semantic_error("set acl-std R1 100 permit 10.0.0.0 0.0.0.255", &net),
        SemanticError::AclNumberOutOfRange {
            number: 100,
            shape: AclShape::Standard,
            ranges: "1-99 or 1300-1999".into(),
        }
    );
    assert!(matches!(
        semantic_error(
            "set acl-ext R1 99 permit ip 0.0.0.0 255.255.255.255 10.0.0.0 0.0.0.255",
            &net
        ),
        SemanticError::AclNumberOutOfRange { shape: AclShape::Extended, .. }
    ));
    assert_eq!(
        semantic_error("set acl-std PC1 10 permit 10.0.0.0 0.0.0.255", &net),
        SemanticError::UnsupportedDeviceKind {
            device: "PC1".into(),
            kind: DeviceKind::Host,
            feature: "access lists",
        }
    );
}

#[test]
fn test_show_and_save_need_device() {
    let net = get_test_net();
    let lines = ["show interfaces R9", "show routing R9", "show acl R9", "show cli R9", "save R9"];
    for line in &lines {
        assert_eq!(semantic_error(line, &net), SemanticError::UnknownDevice("R9".into()));
    }
    for line in &["show topology", "show history", "clear cli", "clear all", "help"] {
        assert!(validate(line, &Network::new()).is_ok());
    }
}

#[test]
fn test_entry_shape() {
    let entry = AclEntry::Standard {
        source: "10.0.0.0".parse().unwrap(),
        wildcard: "0.0.0.255".parse().unwrap(),
    };
    let cmd = Command::Acl { device: "R1".into(), number: 5, action: AclAction::Permit, entry };
    assert_eq!(cmd.kind(), CommandKind::SetAclStandard);
}
