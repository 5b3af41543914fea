// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Safety button on PC13, rising edge on EXTI line 13.

use servolifter::glue::{CommandQueue, LockTrigger};
use stm32f7xx_hal::pac;

use crate::config::BUTTON_PIN;

/// SYSCFG_EXTICR port code for GPIOC.
const PORT_C: u32 = 0b0010;

pub struct SafetyButton;

impl SafetyButton {
    /// Route PC13 to EXTI13 and unmask its rising edge.
    pub fn init() {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb2enr.modify(|_, w| w.syscfgen().set_bit());

        let syscfg = unsafe { &*pac::SYSCFG::ptr() };
        let shift = 4 * (BUTTON_PIN as u32 % 4);
        syscfg.exticr4.modify(|r, w| unsafe {
            w.bits((r.bits() & !(0xF << shift)) | (PORT_C << shift))
        });

        let exti = Self::exti();
        let mask = 1u32 << BUTTON_PIN;
        exti.rtsr.modify(|r, w| unsafe { w.bits(r.bits() | mask) });
        exti.ftsr.modify(|r, w| unsafe { w.bits(r.bits() & !mask) });
        exti.pr.write(|w| unsafe { w.bits(mask) });
        exti.imr.modify(|r, w| unsafe { w.bits(r.bits() | mask) });
    }

    fn exti() -> &'static pac::exti::RegisterBlock {
        unsafe { &*pac::EXTI::ptr() }
    }

    /// EXTI15_10 interrupt body. Queues the one LOCK and masks the line for good.
    pub fn service(trigger: &LockTrigger, commands: &CommandQueue) {
        let exti = Self::exti();
        let mask = 1u32 << BUTTON_PIN;
        if exti.pr.read().bits() & mask == 0 {
            return;
        }
        exti.pr.write(|w| unsafe { w.bits(mask) });

        if trigger.fire(commands) || trigger.has_fired() {
            exti.imr.modify(|r, w| unsafe { w.bits(r.bits() & !mask) });
        }
    }
}
