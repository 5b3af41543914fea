// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Servo Motion
//!
//! Per-arm pulse-width state and the engine that moves each arm toward its goal from inside the
//! pulse-completion interrupt.
//!
//! ## Modules
//!
//! - [`channel`] - Channel identity and the interrupt-shared `start`/`goal`/`position` state.
//! - [`profile`] - Integer ease-in/ease-out step profile.
//! - [`engine`] - Motion engine: arming a move, per-tick update, blocking completion wait.

pub mod channel;
pub mod engine;
pub mod profile;

pub use channel::{ChannelId, PulseUpdate, ServoChannel};
pub use engine::{MotionEngine, ServoOutputs};
