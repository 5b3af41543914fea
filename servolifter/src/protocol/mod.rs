// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Text command protocol spoken over the serial link.
//!
//! ## Modules
//!
//! - [`commands`] - Command vocabulary and the static command table.
//! - [`line`] - Command line buffer and the character-level line assembler.
//! - [`resolver`] - Verb/argument split and unambiguous-prefix resolution.

pub mod commands;
pub mod line;
pub mod resolver;

pub use commands::{Command, CommandEntry, COMMANDS};
pub use line::{CommandLine, Echo, LineAssembler};
pub use resolver::{resolve, resolve_line};
