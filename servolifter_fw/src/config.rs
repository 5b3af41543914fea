// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Board constants: serial link, servo timer base and interrupt priorities.
//!
//! NVIC priorities use the upper four bits; a lower value preempts a higher one.

use stm32f7xx_hal::pac::Interrupt;

pub const BAUD_RATE: u32 = 115_200;

/// Servo timer counter frequency; one count is one microsecond of pulse width.
pub const SERVO_TIMER_HZ: u32 = 1_000_000;

/// Counts per servo frame (20 ms).
pub const SERVO_PERIOD_TICKS: u32 = 20_000;

/// Pin number of the busy indicator on GPIOB (LD2, blue).
pub const INDICATOR_PIN: u8 = 7;

/// LD2 lights when PB7 is driven high.
pub const INDICATOR_ACTIVE_LOW: bool = false;

/// Pin number of the safety button on GPIOC (B1, USER).
pub const BUTTON_PIN: u8 = 13;

/// Vector borrowed as a software interrupt for the line task.
pub const LINE_TASK_IRQ: Interrupt = Interrupt::SPI1;

pub const PRIO_SERVO_TIMERS: u8 = 0x20;
pub const PRIO_USART: u8 = 0x40;
pub const PRIO_BUTTON: u8 = 0x60;
pub const PRIO_LINE_TASK: u8 = 0x80;
