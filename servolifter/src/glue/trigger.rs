// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Single-shot LOCK trigger for the safety button.

use core::sync::atomic::{AtomicBool, Ordering};

use crate::glue::CommandQueue;
use crate::protocol::{Command, CommandLine};

/// Queues one synthetic `LOCK` command per power cycle, bypassing the serial path.
pub struct LockTrigger {
    fired: AtomicBool,
}

impl LockTrigger {
    pub const fn new() -> Self {
        Self {
            fired: AtomicBool::new(false),
        }
    }

    /// Queue `LOCK` unless it was queued before. Returns `true` only on the call that queued it;
    /// the caller then disables its interrupt source. If the queue is full nothing is consumed.
    pub fn fire(&self, commands: &CommandQueue) -> bool {
        if self.fired.swap(true, Ordering::AcqRel) {
            return false;
        }
        if commands.enqueue(CommandLine::synthetic(Command::Lock)).is_err() {
            warn!("command queue full, button LOCK deferred");
            self.fired.store(false, Ordering::Release);
            return false;
        }
        info!("button: LOCK queued");
        true
    }

    #[inline]
    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::Acquire)
    }
}

impl Default for LockTrigger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_exactly_once() {
        let commands = CommandQueue::new();
        let trigger = LockTrigger::new();

        assert!(trigger.fire(&commands));
        assert!(!trigger.fire(&commands));
        assert!(trigger.has_fired());

        assert_eq!(commands.dequeue().and_then(|l| l.action()), Some(Command::Lock));
        assert!(commands.dequeue().is_none());
    }

    #[test]
    fn full_queue_leaves_trigger_armed() {
        let commands = CommandQueue::new();
        while commands.enqueue(CommandLine::synthetic(Command::Help)).is_ok() {}
        let trigger = LockTrigger::new();

        assert!(!trigger.fire(&commands));
        assert!(!trigger.has_fired());

        commands.dequeue();
        assert!(trigger.fire(&commands));
    }
}
