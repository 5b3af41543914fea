// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Busy-wait delay for contexts that cannot own SysTick.
//!
//! SysTick belongs to the dispatcher's motion delay. Console retries (from the dispatcher and from
//! the line-task interrupt) spin on the cycle counter instead.

use core::sync::atomic::{AtomicU32, Ordering};

use embedded_hal::blocking::delay::DelayMs;

static SYSCLK_HZ: AtomicU32 = AtomicU32::new(16_000_000);

#[derive(Copy, Clone, Debug, Default)]
pub struct CycleDelay;

impl CycleDelay {
    /// Record the core clock once the clock tree is frozen.
    pub fn calibrate(sysclk_hz: u32) {
        SYSCLK_HZ.store(sysclk_hz, Ordering::Relaxed);
    }
}

impl DelayMs<u32> for CycleDelay {
    fn delay_ms(&mut self, ms: u32) {
        let per_ms = SYSCLK_HZ.load(Ordering::Relaxed) / 1_000;
        for _ in 0..ms {
            cortex_m::asm::delay(per_ms);
        }
    }
}
