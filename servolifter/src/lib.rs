// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # ServoLifter Core
//!
//! This crate contains the command core of the ServoLifter card-positioning rig: a handful of
//! servo arms that put cards on (and take them off) an RF reader antenna, driven by a line-based
//! text protocol over a serial link.
//!
//! The crate is hardware-agnostic and `no_std`. The firmware crate (`servolifter_fw`) binds it to
//! the STM32 timers, USART and user button.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`protocol`] | Line assembly, command table and prefix resolution |
//! | [`motion`] | Per-arm servo state and the interrupt-driven motion engine |
//! | [`control`] | Beam stack and the command dispatcher |
//! | [`glue`] | Hand-off queues, transmit ring, line task and button trigger |
//! | [`config`] | Calibration table and protocol constants |
//!
//! ## Data Flow
//!
//! ```text
//! RX interrupt -> ByteQueue -> LineTask (assemble + resolve) -> CommandQueue -> Dispatcher
//!                                                                               |
//!             pulse-completion interrupt <- MotionEngine (goal) <---------------+
//! ```
//!
//! ## Getting Started
//!
//! Run the host tests:
//!
//! ```bash
//! cargo test
//! ```
//!
//! Flash the board (from `servolifter_fw/`):
//!
//! ```bash
//! cargo run --release
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod config;
pub mod control;
pub mod error;
pub mod glue;
pub mod motion;
pub mod protocol;

pub use error::{CommandError, ResolveError, StackError};
