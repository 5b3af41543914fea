// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Operator sessions over the simulated serial link.

mod common;

use common::Rig;
use servolifter::config::CHANNELS;

#[test]
fn putting_the_same_arm_twice() {
    let rig = Rig::new();
    let mut s = rig.session();

    assert_eq!(s.type_line("puton a"), "puton a\r\nOK\r\n");
    assert_eq!(s.type_line("PUTON A"), "PUTON A\r\nAlready put.\r\nOK\r\n");
    assert_eq!(s.dispatcher.stack().len(), 1);
    assert_eq!(rig.position(b'A'), CHANNELS[0].put);
}

#[test]
fn take_off_with_nothing_down() {
    let rig = Rig::new();
    let mut s = rig.session();

    assert_eq!(s.type_line("TAKEOFF"), "TAKEOFF\r\nBeam empty.\r\nOK\r\n");
    assert_eq!(rig.take_moves(), "");
}

#[test]
fn take_off_follows_placement_order() {
    let rig = Rig::new();
    let mut s = rig.session();
    s.home();

    for arm in ["B", "D", "A"] {
        s.type_line(&format!("PUTON {arm}"));
    }
    rig.take_moves();

    for _ in 0..3 {
        assert!(s.type_line("T").ends_with("\r\nOK\r\n"));
    }
    assert_eq!(rig.take_moves(), "ADB");
    assert_eq!(s.type_line("T"), "T\r\nBeam empty.\r\nOK\r\n");
}

#[test]
fn clear_retracts_highest_position_first() {
    let rig = Rig::new();
    let mut s = rig.session();
    s.home();

    s.type_line("PUTON A");
    s.type_line("PUTON B");
    s.type_line("PUTON C");
    rig.take_moves();

    assert!(rig.position(b'C') > rig.position(b'B'));
    assert!(rig.position(b'B') > rig.position(b'A'));

    assert_eq!(s.type_line("CLEAR"), "CLEAR\r\nOK\r\n");
    assert_eq!(rig.take_moves(), "CBA");
    assert!(s.dispatcher.stack().is_empty());
    for (letter, cfg) in [(b'A', 0), (b'B', 1), (b'C', 2)] {
        assert_eq!(rig.position(letter), CHANNELS[cfg].take);
    }
}

#[test]
fn abbreviated_and_unknown_verbs() {
    let rig = Rig::new();
    let mut s = rig.session();

    assert_eq!(s.type_line("p b"), "p b\r\nOK\r\n");
    assert_eq!(rig.take_moves(), "B");

    assert_eq!(s.type_line("PUTONX B"), "PUTONX B\r\nSYNTAX ERROR\r\nOK\r\n");
    assert_eq!(s.type_line("FLY"), "FLY\r\nSYNTAX ERROR\r\nOK\r\n");
    assert_eq!(s.type_line("V"), "V\r\nServoLifter version 0.1\r\nOK\r\n");
}

#[test]
fn argument_errors() {
    let rig = Rig::new();
    let mut s = rig.session();

    assert_eq!(s.type_line("PUTON"), "PUTON\r\nEmpty argument.\r\nOK\r\n");
    assert_eq!(s.type_line("PUTON Q"), "PUTON Q\r\nInvalid parameter.\r\nOK\r\n");
    assert_eq!(s.type_line("DEBUG yes"), "DEBUG yes\r\nInvalid parameter.\r\nOK\r\n");
    assert_eq!(rig.take_moves(), "");
}

#[test]
fn reader_goes_down_first() {
    let rig = Rig::new();
    let mut s = rig.session();
    s.home();

    assert_eq!(s.type_line("PUTON R"), "PUTON R\r\nOK\r\n");
    s.type_line("PUTON A");
    s.type_line("TAKEOFF");
    s.type_line("TAKEOFF");

    s.type_line("PUTON A");
    assert_eq!(s.type_line("PUTON R"), "PUTON R\r\nNot cleared.\r\nOK\r\n");
}

#[test]
fn lock_only_once() {
    let rig = Rig::new();
    let mut s = rig.session();

    assert_eq!(s.type_line("LOCK"), "LOCK\r\nOK\r\n");
    assert_eq!(s.dispatcher.stack().len(), 4);
    assert_eq!(s.type_line("LOCK"), "LOCK\r\nAlready locked.\r\nOK\r\n");
}

#[test]
fn clear_after_lock_lifts_arms_at_equal_width_in_reverse() {
    let rig = Rig::new();
    let mut s = rig.session();

    s.type_line("LOCK");
    rig.take_moves();
    for letter in [b'A', b'B', b'C', b'D'] {
        assert_eq!(rig.position(letter), CHANNELS[0].put);
    }

    assert_eq!(s.type_line("CLEAR"), "CLEAR\r\nOK\r\n");
    assert_eq!(rig.take_moves(), "DCBA");
    assert!(s.dispatcher.stack().is_empty());
}

#[test]
fn neutral_parks_all_arms() {
    let rig = Rig::new();
    let mut s = rig.session();
    s.home();
    s.type_line("PUTON C");

    assert_eq!(s.type_line("NEUTRAL"), "NEUTRAL\r\nOK\r\n");
    for cfg in CHANNELS.iter() {
        assert_eq!(rig.position(cfg.name), cfg.neutral);
    }
    assert!(s.dispatcher.stack().is_empty());
}

#[test]
fn debug_echoes_pulse_widths() {
    let rig = Rig::new();
    let mut s = rig.session();

    assert_eq!(s.type_line("DEBUG 1"), "DEBUG 1\r\nOK\r\n");
    assert_eq!(
        s.type_line("PUTON B"),
        "PUTON B\r\nB:0577>0513\r\nB:0513\r\nOK\r\n"
    );

    s.type_line("DEBUG 0");
    assert_eq!(s.type_line("TAKEOFF"), "TAKEOFF\r\nOK\r\n");
}

#[test]
fn line_editing() {
    let rig = Rig::new();
    let mut s = rig.session();

    assert_eq!(
        s.type_line("  VERZ\x08SION"),
        "VERZ\x08 \x08SION\r\nServoLifter version 0.1\r\nOK\r\n"
    );
    assert_eq!(s.type_line(""), "\r\n");
}

#[test]
fn help_lists_every_command() {
    let rig = Rig::new();
    let mut s = rig.session();

    let out = s.type_line("HELP");
    let lines: Vec<&str> = out.split("\r\n").collect();
    assert_eq!(lines[0], "HELP");
    for verb in ["PUTON", "TAKEOFF", "CLEAR", "NEUTRAL", "LOCK", "DEBUG", "HELP", "VERSION"] {
        assert!(lines[1..].iter().any(|l| l.starts_with(verb)), "{verb} missing");
    }
    assert!(out.ends_with("OK\r\n"));
}
