// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Servo PWM on TIM2/TIM3 using direct PAC register access.
//!
//! Both timers count at 1 MHz with a 20 ms period, every used channel in PWM mode 1 with compare
//! preload, so a new width written during a frame takes effect on the next one. The compare-match
//! interrupt of a channel fires when its pulse ends; that is the pulse-completion interrupt that
//! drives the motion engine. Halting a channel's updates clears its CCxIE bit, the PWM output
//! itself keeps running.

use servolifter::config::PwmBinding;
use servolifter::motion::{ChannelId, MotionEngine, ServoOutputs};
use stm32f7xx_hal::{pac, rcc::Clocks};

use crate::config::{SERVO_PERIOD_TICKS, SERVO_TIMER_HZ};
use crate::hw::Indicator;

/// Run `$body` with `$tim` bound to the register block of timer number `$timer`. TIM2 and TIM3
/// have distinct register block types with identically named registers. No other timer drives
/// servos.
macro_rules! with_timer {
    ($timer:expr, |$tim:ident| $body:expr) => {
        match $timer {
            2 => {
                let $tim = unsafe { &*pac::TIM2::ptr() };
                $body
            }
            3 => {
                let $tim = unsafe { &*pac::TIM3::ptr() };
                $body
            }
            other => unreachable!("TIM{} drives no servo", other),
        }
    };
}

/// PWM mode 1 with preload, for both channels of one CCMR register.
const CCMR_PWM1_PRELOAD: u32 = 0x6868;

#[inline]
fn channel_mask(channel: u8) -> u32 {
    1 << channel
}

/// Owner of the servo timers.
pub struct ServoTimers {
    _tim2: pac::TIM2,
    _tim3: pac::TIM3,
}

impl ServoTimers {
    /// Configure both timers for the channels of `engine` and start them, each output at its
    /// current position with its compare interrupt enabled.
    pub fn new<const N: usize>(
        tim2: pac::TIM2,
        tim3: pac::TIM3,
        clocks: &Clocks,
        engine: &MotionEngine<N>,
    ) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb1enr.modify(|_, w| w.tim2en().set_bit().tim3en().set_bit());

        let psc = clocks.timclk1().raw() / SERVO_TIMER_HZ - 1;

        for timer in [2u8, 3] {
            with_timer!(timer, |tim| {
                // Disable counter while configuring
                tim.cr1.modify(|_, w| w.cen().clear_bit());

                tim.psc.write(|w| unsafe { w.bits(psc) });
                tim.arr.write(|w| unsafe { w.bits(SERVO_PERIOD_TICKS - 1) });

                // All four channels as PWM outputs; only the used ones get CCxE
                tim.ccmr1_output().write(|w| unsafe { w.bits(CCMR_PWM1_PRELOAD) });
                tim.ccmr2_output().write(|w| unsafe { w.bits(CCMR_PWM1_PRELOAD) });
                tim.ccer.write(|w| unsafe { w.bits(0) });
                tim.dier.write(|w| unsafe { w.bits(0) });
                tim.cnt.write(|w| unsafe { w.bits(0) });
            });
        }

        for (_, ch) in engine.channels() {
            let out = ch.config().output;
            set_width(out, ch.position());
            with_timer!(out.timer, |tim| {
                let ccer = 1u32 << (4 * (out.channel - 1));
                tim.ccer.modify(|r, w| unsafe { w.bits(r.bits() | ccer) });
            });
            set_compare_irq(out, true);
        }

        for timer in [2u8, 3] {
            with_timer!(timer, |tim| {
                // Load prescaler and compare values before the first frame.
                tim.egr.write(|w| w.ug().set_bit());
                tim.sr.write(|w| unsafe { w.bits(0) });
                tim.cr1.modify(|_, w| w.arpe().set_bit().cen().set_bit());
            });
        }

        Self {
            _tim2: tim2,
            _tim3: tim3,
        }
    }
}

/// Write the compare value of `out`; effective from the next frame.
pub fn set_width(out: PwmBinding, width: u16) {
    let width = width as u32;
    with_timer!(out.timer, |tim| match out.channel {
        1 => tim.ccr1().write(|w| unsafe { w.bits(width) }),
        2 => tim.ccr2().write(|w| unsafe { w.bits(width) }),
        3 => tim.ccr3().write(|w| unsafe { w.bits(width) }),
        _ => tim.ccr4().write(|w| unsafe { w.bits(width) }),
    });
}

/// Enable or disable the pulse-completion interrupt of `out`.
pub fn set_compare_irq(out: PwmBinding, enable: bool) {
    let mask = channel_mask(out.channel);
    with_timer!(out.timer, |tim| {
        tim.dier.modify(|r, w| unsafe {
            if enable {
                w.bits(r.bits() | mask)
            } else {
                w.bits(r.bits() & !mask)
            }
        })
    });
}

/// Timer interrupt body: for every channel on `timer` whose pulse just completed, advance it one
/// step and load the next width.
pub fn service_timer<const N: usize>(timer: u8, engine: &MotionEngine<N>, indicator: Indicator) {
    let (status, enabled) = with_timer!(timer, |tim| (tim.sr.read().bits(), tim.dier.read().bits()));

    for (id, ch) in engine.channels() {
        let out = ch.config().output;
        let mask = channel_mask(out.channel);
        if out.timer != timer || status & enabled & mask == 0 {
            continue;
        }

        // CCxIF is rc_w0: writing one to the other flags leaves them alone.
        with_timer!(timer, |tim| tim.sr.write(|w| unsafe { w.bits(!mask) }));

        if let Some(update) = engine.on_pulse_complete(id) {
            set_width(out, update.width);
            if update.toggle_indicator {
                indicator.toggle();
            }
        }
    }
}

/// [`ServoOutputs`] backed by the timer registers.
pub struct PwmOutputs<'e, const N: usize> {
    engine: &'e MotionEngine<N>,
    indicator: Indicator,
}

impl<'e, const N: usize> PwmOutputs<'e, N> {
    pub fn new(engine: &'e MotionEngine<N>, indicator: Indicator) -> Self {
        Self { engine, indicator }
    }

    fn binding(&self, id: ChannelId) -> PwmBinding {
        self.engine.channel(id).config().output
    }
}

impl<const N: usize> ServoOutputs for PwmOutputs<'_, N> {
    fn halt_updates(&mut self, id: ChannelId) {
        set_compare_irq(self.binding(id), false);
    }

    fn resume_updates(&mut self, id: ChannelId) {
        set_compare_irq(self.binding(id), true);
    }

    fn clear_indicator(&mut self) {
        self.indicator.off();
    }
}
