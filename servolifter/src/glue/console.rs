// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Operator console output.
//!
//! Text is cut into frames of at most [`TX_FRAME_LEN`] bytes and pushed into a shared transmit
//! ring that the USART transmit interrupt drains. A full ring means the transport is busy: the
//! writer sleeps [`TX_RETRY_DELAY_MS`] and retries up to [`TX_RETRY_LIMIT`] times, then abandons
//! the frame with only a log warning. Neither the caller nor the operator learns of the drop.
//!
//! Implements `core::fmt::Write`, so `write!` works; include `\r` in line endings.

use core::fmt;

use embedded_hal::blocking::delay::DelayMs;
use heapless::mpmc::Q32;

use crate::config::{TX_FRAME_LEN, TX_RETRY_DELAY_MS, TX_RETRY_LIMIT};
use crate::protocol::Echo;

/// One transmit buffer.
pub type Frame = heapless::Vec<u8, TX_FRAME_LEN>;

/// Frames in flight, any writer -> transmit interrupt.
pub type TxRing = Q32<Frame>;

/// Writer end of the transmit ring. Each execution context owns its own `Console`.
pub struct Console<'r, D> {
    ring: &'r TxRing,
    /// Wakes the transmitter after a frame was queued.
    kick: fn(),
    delay: D,
}

impl<'r, D: DelayMs<u32>> Console<'r, D> {
    pub fn new(ring: &'r TxRing, kick: fn(), delay: D) -> Self {
        Self {
            ring,
            kick,
            delay,
        }
    }

    /// Queue `bytes` for transmission.
    pub fn put_bytes(&mut self, bytes: &[u8]) {
        for chunk in bytes.chunks(TX_FRAME_LEN) {
            self.send(chunk);
        }
    }

    #[inline]
    pub fn put_str(&mut self, s: &str) {
        self.put_bytes(s.as_bytes());
    }

    /// Write string and CRLF terminator.
    pub fn put_line(&mut self, s: &str) {
        self.put_str(s);
        self.put_bytes(b"\r\n");
    }

    fn send(&mut self, chunk: &[u8]) {
        let mut frame = Frame::new();
        // `chunk` never exceeds the frame capacity.
        let _ = frame.extend_from_slice(chunk);

        for _ in 0..TX_RETRY_LIMIT {
            match self.ring.enqueue(frame) {
                Ok(()) => {
                    (self.kick)();
                    return;
                }
                Err(back) => {
                    frame = back;
                    (self.kick)();
                    self.delay.delay_ms(TX_RETRY_DELAY_MS);
                }
            }
        }

        warn!("tx ring busy, {} byte frame dropped", frame.len());
    }
}

impl<D: DelayMs<u32>> fmt::Write for Console<'_, D> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.put_str(s);
        Ok(())
    }
}

impl<D: DelayMs<u32>> Echo for Console<'_, D> {
    fn echo(&mut self, bytes: &[u8]) {
        self.put_bytes(bytes);
    }
}
