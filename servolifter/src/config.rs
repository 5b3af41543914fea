// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Protocol constants and arm calibration.
//!
//! Pulse widths are timer-compare values of a 1 MHz servo timer (one unit = 1 µs). Calibration
//! points are given in degrees of arm travel and converted with [`degrees_to_pulse`].

use crate::motion::ChannelId;

//-----------------------------------------------------------------------------

pub const VERSION_STR: &str = "ServoLifter version 0.1";

/// Longest command line accepted; the buffer holds one more byte for the terminator.
pub const MAX_COMMAND_LENGTH: usize = 127;

/// Output frames are split into chunks of at most this many bytes.
pub const TX_FRAME_LEN: usize = 32;

/// Attempts to queue an output frame before it is abandoned.
pub const TX_RETRY_LIMIT: u16 = 1000;

/// Sleep between two transmit attempts.
pub const TX_RETRY_DELAY_MS: u32 = 1;

/// Bounded wait of the line task for the next received byte.
pub const RX_EVENT_TIMEOUT_MS: u32 = 100;

//-----------------------------------------------------------------------------

/// Servo frame period; the pulse-completion interrupt fires once per channel per tick.
pub const TICK_PERIOD_MS: u32 = 20;

/// Largest step the motion profile takes in one tick.
pub const MAX_STEP: u16 = 32;

/// Distances are clipped to this value before the bit scan (highest usable bit = 64).
pub const STEP_CEILING: u16 = 0x7F;

/// The busy indicator toggles on ticks where `tick & INDICATOR_SAMPLE_MASK == 0`.
pub const INDICATOR_SAMPLE_MASK: u16 = 0x07;

/// Valid pulse-width window; every target is clamped into it.
pub const PULSE_MIN: u16 = 500 - 1;
pub const PULSE_MAX: u16 = 2500 - 1;

/// Pulse width at 0°.
pub const PULSE_CENTER: u16 = 1500 - 1;

/// Additional travel per card already on the antenna, so a new arm stops on top of the pile.
pub const LAYER_OFFSET: u16 = 20;

/// Convert degrees of arm travel into a pulse width (100 units per 9°).
pub const fn degrees_to_pulse(degrees: i16) -> u16 {
    (PULSE_CENTER as i32 + degrees as i32 * 100 / 9) as u16
}

pub const PWM_ARM_UP: u16 = degrees_to_pulse(0);
pub const PWM_ARM_DOWN: u16 = degrees_to_pulse(-18);

//-----------------------------------------------------------------------------

/// Physical output driving one servo.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PwmBinding {
    /// Timer peripheral number; servos run on TIM2 and TIM3 only.
    pub timer: u8,
    /// Compare channel, 1..=4.
    pub channel: u8,
}

/// Static descriptor of one arm.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelConfig {
    /// Upper-case letter used on the command line.
    pub name: u8,
    pub output: PwmBinding,
    /// Arm resting on the antenna.
    pub put: u16,
    /// Arm lifted clear of the antenna.
    pub take: u16,
    pub neutral: u16,
    /// The reader arm must be the first one placed.
    pub is_reader: bool,
}

impl ChannelConfig {
    /// Placement width when `depth` arms are already down, shifted toward `take` and never past it.
    pub fn put_width(&self, depth: usize) -> u16 {
        let offset = (depth as u32 * LAYER_OFFSET as u32).min(u16::MAX as u32) as u16;
        if self.take >= self.put {
            self.put.saturating_add(offset).min(self.take)
        } else {
            self.put.saturating_sub(offset).max(self.take)
        }
    }
}

const fn card_arm(name: u8, channel: u8) -> ChannelConfig {
    ChannelConfig {
        name,
        output: PwmBinding { timer: 3, channel },
        put: PWM_ARM_DOWN,
        take: PWM_ARM_UP,
        neutral: degrees_to_pulse(-9),
        is_reader: false,
    }
}

pub const CHANNEL_COUNT: usize = 5;

/// Index of the reader arm in [`CHANNELS`].
pub const READER: ChannelId = ChannelId(4);

/// Rig calibration: four card arms on TIM3 CH1..CH4 and the reader on TIM2 CH4.
pub const CHANNELS: [ChannelConfig; CHANNEL_COUNT] = [
    card_arm(b'A', 1),
    card_arm(b'B', 2),
    card_arm(b'C', 3),
    card_arm(b'D', 4),
    ChannelConfig {
        name: b'R',
        output: PwmBinding {
            timer: 2,
            channel: 4,
        },
        put: degrees_to_pulse(-20),
        take: degrees_to_pulse(10),
        neutral: degrees_to_pulse(-5),
        is_reader: true,
    },
];
