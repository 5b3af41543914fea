// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Interrupt/Task Glue
//!
//! Everything that crosses an execution-context boundary without a lock.
//!
//! | Path | Carrier |
//! | ---- | ------- |
//! | receive interrupt -> line task | [`ByteQueue`] |
//! | line task, button interrupt -> dispatcher | [`CommandQueue`] |
//! | any writer -> transmit interrupt | [`TxRing`] via [`Console`] |
//! | dispatcher <-> pulse-completion interrupt | atomics in [`crate::motion::ServoChannel`] |
//!
//! ## Modules
//!
//! - [`queues`] - Lock-free hand-off queue types.
//! - [`console`] - Round-robin transmit ring with bounded retry.
//! - [`line_task`] - Byte queue consumer: line assembly and resolution.
//! - [`trigger`] - Single-shot LOCK trigger for the safety button.

pub mod console;
pub mod line_task;
pub mod queues;
pub mod trigger;

pub use console::{Console, Frame, TxRing};
pub use line_task::LineTask;
pub use queues::{ByteQueue, CommandQueue};
pub use trigger::LockTrigger;
