// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Servo motion engine.
//!
//! The engine owns the channel table (injected at construction) and has two entry points:
//!
//! - [`MotionEngine::on_pulse_complete`], called from the timer interrupt after each servo pulse,
//!   advances that channel one step and returns the next compare value;
//! - [`MotionEngine::move_to`], called from the dispatcher, arms a move and blocks until the
//!   interrupt has carried the channel to its goal.
//!
//! Typical usage pattern:
//!
//! ```ignore
//! // timer interrupt
//! if let Some(update) = ENGINE.on_pulse_complete(id) {
//!     set_compare(id, update.width);
//! }
//!
//! // dispatcher
//! ENGINE.move_to(id, width, &mut outputs, &mut delay);
//! ```

use embedded_hal::blocking::delay::DelayMs;

use crate::config::{ChannelConfig, PULSE_MAX, PULSE_MIN, TICK_PERIOD_MS};
use crate::motion::{ChannelId, PulseUpdate, ServoChannel};

/// Hardware side of the servo outputs, as seen from the dispatcher.
pub trait ServoOutputs {
    /// Stop raising pulse-completion interrupts for `id`. The PWM output keeps running.
    fn halt_updates(&mut self, id: ChannelId);

    /// Re-enable pulse-completion interrupts for `id`.
    fn resume_updates(&mut self, id: ChannelId);

    /// Switch the motion indicator off.
    fn clear_indicator(&mut self);
}

pub struct MotionEngine<const N: usize> {
    channels: [ServoChannel; N],
}

impl<const N: usize> MotionEngine<N> {
    pub const fn new(channels: [ServoChannel; N]) -> Self {
        Self { channels }
    }

    pub fn from_configs(configs: [ChannelConfig; N]) -> Self {
        Self::new(configs.map(ServoChannel::new))
    }

    #[inline]
    pub fn len(&self) -> usize {
        N
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        N == 0
    }

    /// Channel by id. Panics on an id not produced by this engine.
    #[inline]
    pub fn channel(&self, id: ChannelId) -> &ServoChannel {
        &self.channels[id.index()]
    }

    pub fn channels(&self) -> impl Iterator<Item = (ChannelId, &ServoChannel)> {
        self.channels
            .iter()
            .enumerate()
            .map(|(i, ch)| (ChannelId(i as u8), ch))
    }

    /// Look up a channel by its command-line letter.
    pub fn find(&self, name: u8) -> Option<ChannelId> {
        self.channels()
            .find(|(_, ch)| ch.name() == name)
            .map(|(id, _)| id)
    }

    /// Pulse-completion handler. Returns `None` for an unknown channel.
    pub fn on_pulse_complete(&self, id: ChannelId) -> Option<PulseUpdate> {
        self.channels.get(id.index()).map(ServoChannel::tick)
    }

    /// Move channel `id` to `target` (clamped into the valid pulse window) and wait until it gets
    /// there, polling once per servo tick. Returns the final position.
    ///
    /// A move that is already at its target returns after the first check.
    pub fn move_to<O, D>(&self, id: ChannelId, target: u16, outputs: &mut O, delay: &mut D) -> u16
    where
        O: ServoOutputs,
        D: DelayMs<u32>,
    {
        let ch = self.channel(id);
        let target = target.clamp(PULSE_MIN, PULSE_MAX);

        outputs.halt_updates(id);
        ch.arm(target);
        outputs.resume_updates(id);
        trace!("move {}: {} -> {}", id.0, ch.start(), target);

        while !ch.is_settled() {
            delay.delay_ms(TICK_PERIOD_MS);
        }
        outputs.clear_indicator();

        ch.position()
    }
}
