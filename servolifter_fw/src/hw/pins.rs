// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pin definitions for the ServoLifter rig on the STM32F767ZI devboard.

use stm32f7xx_hal::{
    gpio::{gpioa, gpiob, gpioc, Alternate, Floating, Input, Output, PushPull},
    pac,
    prelude::*,
};

/// All board pins. Construct this once at startup using:
///
/// ```ignore
/// let pins = BoardPins::new(dp.GPIOA, dp.GPIOB, dp.GPIOC);
/// ```
pub struct BoardPins {
    pub indicator: gpiob::PB7<Output<PushPull>>,
    pub button: gpioc::PC13<Input<Floating>>,
    pub usart1: Usart1Pins,
    pub servos: ServoPins,
}

pub struct Usart1Pins {
    pub tx: gpioa::PA9<Alternate<7>>,
    pub rx: gpioa::PA10<Alternate<7>>,
}

/// Servo signal outputs. Card arms A..D on TIM3, the reader arm on TIM2.
pub struct ServoPins {
    pub arm_a: gpioa::PA6<Alternate<2>>, // TIM3_CH1
    pub arm_b: gpioa::PA7<Alternate<2>>, // TIM3_CH2
    pub arm_c: gpiob::PB0<Alternate<2>>, // TIM3_CH3
    pub arm_d: gpiob::PB1<Alternate<2>>, // TIM3_CH4
    pub reader: gpioa::PA3<Alternate<1>>, // TIM2_CH4
}

impl BoardPins {
    /// Create all named pins from raw GPIO peripherals.
    pub fn new(gpioa: pac::GPIOA, gpiob: pac::GPIOB, gpioc: pac::GPIOC) -> Self {
        let gpioa = gpioa.split();
        let gpiob = gpiob.split();
        let gpioc = gpioc.split();

        Self {
            indicator: gpiob.pb7.into_push_pull_output(),
            button: gpioc.pc13.into_floating_input(),

            usart1: Usart1Pins {
                tx: gpioa.pa9.into_alternate::<7>(),
                rx: gpioa.pa10.into_alternate::<7>(),
            },

            servos: ServoPins {
                arm_a: gpioa.pa6.into_alternate::<2>(),
                arm_b: gpioa.pa7.into_alternate::<2>(),
                arm_c: gpiob.pb0.into_alternate::<2>(),
                arm_d: gpiob.pb1.into_alternate::<2>(),
                reader: gpioa.pa3.into_alternate::<1>(),
            },
        }
    }
}
