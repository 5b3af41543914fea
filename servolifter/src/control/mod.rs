// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Command Execution
//!
//! This module turns resolved command lines into arm motion.
//!
//! ## Modules
//!
//! - [`beam_stack`] - Bounded LIFO of the arms currently resting on the antenna.
//! - [`dispatcher`] - Single consumer of the ready-command queue; runs one command at a time.

pub mod beam_stack;
pub mod dispatcher;

pub use beam_stack::BeamStack;
pub use dispatcher::Dispatcher;
