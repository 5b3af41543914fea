// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! USART1 operator link.
//!
//! [`BannerPort`] is the blocking writer used for the boot banner. Once the banner is out, the link
//! switches to interrupt mode through [`SerialLink`]: received bytes go to the byte queue and
//! wake the line task, queued console frames are drained while TXE is set.
//!
//! To access the terminal on the host machine, use
//! ```text
//! $ screen /dev/tty.usbmodem* 115200
//! ```
//!
//! To close the terminal, press `Ctrl+A` then `Ctrl+\` then `y`.

use nb::block;

use cortex_m::peripheral::NVIC;
use servolifter::glue::{ByteQueue, Frame, TxRing};
use stm32f7xx_hal::{
    pac,
    prelude::*,
    serial::{Instance, Pins, Serial, Tx},
};

use crate::config::LINE_TASK_IRQ;

/// Blocking writer for the boot banner, used before the USART interrupt is enabled.
pub struct BannerPort<U: Instance> {
    tx: Tx<U>,
}

impl<U: Instance> BannerPort<U> {
    pub fn new<PINS: Pins<U>>(serial: Serial<U, PINS>) -> Self {
        let (tx, _rx) = serial.split();
        Self { tx }
    }

    /// Send each line with CRLF, then wait for the last byte to leave the shift register. The
    /// port is consumed; from here on the link belongs to [`SerialLink`].
    pub fn announce(mut self, lines: &[&str]) {
        for line in lines {
            for &b in line.as_bytes().iter().chain(b"\r\n") {
                let _ = block!(self.tx.write(b));
            }
        }
        let _ = block!(self.tx.flush());
    }
}

/// Interrupt-driven side of USART1.
pub struct SerialLink {
    /// Frame being shifted out and the index of its next byte.
    current: Option<(Frame, usize)>,
}

const ISR_ORE: u32 = 1 << 3;

impl SerialLink {
    pub const fn new() -> Self {
        Self { current: None }
    }

    fn regs() -> &'static pac::usart1::RegisterBlock {
        unsafe { &*pac::USART1::ptr() }
    }

    /// Enable the receive interrupt. Call after the blocking writer has flushed.
    pub fn listen() {
        Self::regs().cr1.modify(|_, w| w.rxneie().set_bit());
    }

    /// Wake the transmitter; the interrupt then drains the transmit ring.
    pub fn kick() {
        Self::regs().cr1.modify(|_, w| w.txeie().set_bit());
    }

    /// USART1 interrupt body.
    pub fn service(&mut self, rx: &ByteQueue, ring: &TxRing) {
        let usart = Self::regs();
        let isr = usart.isr.read();

        if isr.bits() & ISR_ORE != 0 {
            usart.icr.write(|w| unsafe { w.bits(ISR_ORE) });
        }

        if isr.rxne().bit_is_set() {
            let byte = usart.rdr.read().bits() as u8;
            if rx.enqueue(byte).is_err() {
                defmt::warn!("rx queue full, byte dropped");
            }
            NVIC::pend(LINE_TASK_IRQ);
        }

        if isr.txe().bit_is_set() && usart.cr1.read().txeie().bit_is_set() {
            match self.next_byte(ring) {
                Some(b) => usart.tdr.write(|w| unsafe { w.bits(b as u32) }),
                None => usart.cr1.modify(|_, w| w.txeie().clear_bit()),
            }
        }
    }

    fn next_byte(&mut self, ring: &TxRing) -> Option<u8> {
        loop {
            if let Some((frame, index)) = self.current.as_mut() {
                if let Some(&b) = frame.get(*index) {
                    *index += 1;
                    return Some(b);
                }
            }
            self.current = Some((ring.dequeue()?, 0));
        }
    }
}

impl Default for SerialLink {
    fn default() -> Self {
        Self::new()
    }
}
