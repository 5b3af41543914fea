// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Command vocabulary of the ServoLifter protocol.
//!
//! Verbs are matched case-insensitively (the line assembler folds input to upper case) and may be
//! abbreviated to any unambiguous prefix, see [`crate::protocol::resolver`].

/// Operator commands. The dispatcher maps each variant to its handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    PutOn,
    TakeOff,
    Clear,
    Neutral,
    Lock,
    Debug,
    Help,
    Version,
}

/// One row of a command table: the full verb and what it resolves to.
#[derive(Debug, Clone, Copy)]
pub struct CommandEntry<T> {
    pub name: &'static str,
    pub action: T,
}

impl<T> CommandEntry<T> {
    pub const fn new(name: &'static str, action: T) -> Self {
        Self { name, action }
    }
}

/// The device command table.
pub const COMMANDS: [CommandEntry<Command>; 8] = [
    CommandEntry::new("PUTON", Command::PutOn),
    CommandEntry::new("TAKEOFF", Command::TakeOff),
    CommandEntry::new("CLEAR", Command::Clear),
    CommandEntry::new("NEUTRAL", Command::Neutral),
    CommandEntry::new("LOCK", Command::Lock),
    CommandEntry::new("DEBUG", Command::Debug),
    CommandEntry::new("HELP", Command::Help),
    CommandEntry::new("VERSION", Command::Version),
];

impl Command {
    /// Full verb as typed on the terminal.
    pub fn name(self) -> &'static str {
        match self {
            Command::PutOn => "PUTON",
            Command::TakeOff => "TAKEOFF",
            Command::Clear => "CLEAR",
            Command::Neutral => "NEUTRAL",
            Command::Lock => "LOCK",
            Command::Debug => "DEBUG",
            Command::Help => "HELP",
            Command::Version => "VERSION",
        }
    }

    /// One-line usage text for `HELP`.
    pub fn usage(self) -> &'static str {
        match self {
            Command::PutOn => "PUTON <A-D|R>  Put an arm down on the antenna",
            Command::TakeOff => "TAKEOFF        Lift the most recently put arm",
            Command::Clear => "CLEAR          Lift every arm, topmost first",
            Command::Neutral => "NEUTRAL        CLEAR, then park every arm",
            Command::Lock => "LOCK           CLEAR, then put every card arm down",
            Command::Debug => "DEBUG <0|1>    Echo raw pulse widths around moves",
            Command::Help => "HELP           Show this help",
            Command::Version => "VERSION        Show firmware version",
        }
    }
}
