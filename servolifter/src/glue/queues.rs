// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Hand-off queues.
//!
//! Both are `heapless` multi-producer/multi-consumer queues: `enqueue`/`dequeue` take `&self`, never
//! block and are safe from interrupt context, so the queues can live in plain `static`s.

use heapless::mpmc::{Q16, Q4};

use crate::protocol::CommandLine;

/// Raw received bytes, receive interrupt -> line task.
pub type ByteQueue = Q16<u8>;

/// Resolved command lines waiting for the dispatcher. The queue's slots double as the ring of
/// line buffers: a line can be assembled while earlier ones are still queued.
pub type CommandQueue = Q4<CommandLine>;
