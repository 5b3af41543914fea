// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Busy indicator LED.
//!
//! Toggled from the servo timer interrupt and switched off from thread mode, so it is driven
//! through single BSRR writes (atomic on the port) instead of an owned HAL pin.

use stm32f7xx_hal::pac;

/// LED on a GPIOB pin.
#[derive(Copy, Clone, Debug)]
pub struct Indicator {
    pin: u8,
    /// The LED lights when the pin is driven low.
    active_low: bool,
}

impl Indicator {
    pub const fn new(pin: u8, active_low: bool) -> Self {
        Self { pin, active_low }
    }

    fn port() -> &'static pac::gpiob::RegisterBlock {
        unsafe { &*pac::GPIOB::ptr() }
    }

    /// Drive the LED logically ON (true) or OFF (false).
    pub fn set(&self, on: bool) {
        let high = on != self.active_low;
        let bit = if high { self.pin } else { self.pin + 16 };
        Self::port().bsrr.write(|w| unsafe { w.bits(1 << bit) });
    }

    #[inline]
    pub fn off(&self) {
        self.set(false);
    }

    pub fn is_on(&self) -> bool {
        let high = Self::port().odr.read().bits() & (1 << self.pin) != 0;
        high != self.active_low
    }

    pub fn toggle(&self) {
        self.set(!self.is_on());
    }
}
