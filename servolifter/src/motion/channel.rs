// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Servo channel state shared between the dispatcher and the pulse-completion interrupt.
//!
//! Ownership of the fields is split by writer, so no lock is needed:
//!
//! - `position` is written only by the pulse-completion interrupt ([`ServoChannel::tick`]);
//! - `start` and `goal` are written only by [`ServoChannel::arm`], which runs on the dispatcher
//!   while the channel's interrupt is halted.

use core::sync::atomic::{AtomicU16, Ordering};

use crate::config::{ChannelConfig, INDICATOR_SAMPLE_MASK};
use crate::motion::profile;

/// Index of a channel in the motion engine's table.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelId(pub u8);

impl ChannelId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Result of one pulse-completion tick.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PulseUpdate {
    /// Compare value for the next pulse.
    pub width: u16,
    /// Flip the busy indicator on this tick.
    pub toggle_indicator: bool,
}

/// One servo arm.
pub struct ServoChannel {
    config: ChannelConfig,
    start: AtomicU16,
    goal: AtomicU16,
    position: AtomicU16,
    /// Ticks spent moving; only touched by the interrupt.
    ticks: AtomicU16,
}

impl ServoChannel {
    /// Channel parked at its neutral width.
    pub const fn new(config: ChannelConfig) -> Self {
        Self {
            start: AtomicU16::new(config.neutral),
            goal: AtomicU16::new(config.neutral),
            position: AtomicU16::new(config.neutral),
            ticks: AtomicU16::new(0),
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &ChannelConfig {
        &self.config
    }

    #[inline]
    pub fn name(&self) -> u8 {
        self.config.name
    }

    /// Live pulse width.
    #[inline]
    pub fn position(&self) -> u16 {
        self.position.load(Ordering::Acquire)
    }

    #[inline]
    pub fn goal(&self) -> u16 {
        self.goal.load(Ordering::Acquire)
    }

    #[inline]
    pub fn start(&self) -> u16 {
        self.start.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn is_settled(&self) -> bool {
        self.position() == self.goal()
    }

    /// Begin a move from the current position to `target`. The caller must keep this channel's
    /// pulse-completion interrupt halted for the duration of the call.
    pub(crate) fn arm(&self, target: u16) {
        self.start.store(self.position(), Ordering::Relaxed);
        self.goal.store(target, Ordering::Release);
    }

    /// Advance `position` one step toward `goal`. Interrupt context only.
    pub(crate) fn tick(&self) -> PulseUpdate {
        let goal = self.goal.load(Ordering::Acquire);
        let start = self.start.load(Ordering::Relaxed);
        let position = self.position.load(Ordering::Relaxed);

        if position == goal {
            return PulseUpdate {
                width: position,
                toggle_indicator: false,
            };
        }

        let next = profile::advance(start, position, goal);
        self.position.store(next, Ordering::Release);

        let ticks = self.ticks.load(Ordering::Relaxed).wrapping_add(1);
        self.ticks.store(ticks, Ordering::Relaxed);

        PulseUpdate {
            width: next,
            toggle_indicator: ticks & INDICATOR_SAMPLE_MASK == 0,
        }
    }
}
