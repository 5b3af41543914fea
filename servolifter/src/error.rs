// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Error types.
//!
//! The `Display` text of [`CommandError`] and [`ResolveError`] is exactly what the operator sees on
//! the terminal (without the trailing CRLF). None of these errors is fatal.

use thiserror::Error;

/// Rejection of a resolved command by its handler. State is left unchanged.
#[derive(Error, Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    #[error("Empty argument.")]
    EmptyArgument,

    #[error("Invalid parameter.")]
    InvalidParameter,

    #[error("Already put.")]
    AlreadyPut,

    #[error("Beam empty.")]
    BeamEmpty,

    /// The reader arm was requested while cards are still down.
    #[error("Not cleared.")]
    NotCleared,

    #[error("Already locked.")]
    AlreadyLocked,

    #[error("Beam overflow.")]
    Overflow,
}

/// The verb did not resolve to exactly one command.
#[derive(Error, Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResolveError {
    #[error("SYNTAX ERROR")]
    Syntax,
}

/// Beam stack push failure.
#[derive(Error, Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StackError {
    #[error("beam stack is full")]
    Overflow,

    #[error("channel is already on the beam stack")]
    Duplicate,
}

impl From<StackError> for CommandError {
    fn from(e: StackError) -> Self {
        match e {
            StackError::Overflow => CommandError::Overflow,
            StackError::Duplicate => CommandError::AlreadyPut,
        }
    }
}
