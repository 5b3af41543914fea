// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Line task: consumer of the byte queue.
//!
//! Feeds received bytes through the [`LineAssembler`], resolves each finished line and hands it
//! to the dispatcher through the [`CommandQueue`]. Resolution runs here, on the same context as
//! the echo, so `SYNTAX ERROR` lands right after the echoed newline. The unresolved line is still
//! queued, without a command, so the dispatcher acknowledges it like any other. A line that finds
//! the command queue full is dropped.

use core::fmt::Write;

use embedded_hal::blocking::delay::DelayMs;

use crate::glue::{ByteQueue, CommandQueue, Console};
use crate::protocol::{resolve_line, LineAssembler};

pub struct LineTask<'q, D> {
    assembler: LineAssembler,
    console: Console<'q, D>,
    bytes: &'q ByteQueue,
    commands: &'q CommandQueue,
}

impl<'q, D: DelayMs<u32>> LineTask<'q, D> {
    pub fn new(bytes: &'q ByteQueue, commands: &'q CommandQueue, console: Console<'q, D>) -> Self {
        Self {
            assembler: LineAssembler::new(),
            console,
            bytes,
            commands,
        }
    }

    /// Process every byte already queued. Returns the number of bytes consumed.
    pub fn service(&mut self) -> usize {
        let mut count = 0;
        while let Some(byte) = self.bytes.dequeue() {
            self.handle(byte);
            count += 1;
        }
        count
    }

    /// Process bytes until none has arrived for `timeout_ms`, polling every millisecond.
    pub fn service_for<W: DelayMs<u32>>(&mut self, wait: &mut W, timeout_ms: u32) -> usize {
        let mut count = 0;
        let mut idle = 0;
        while idle < timeout_ms {
            match self.bytes.dequeue() {
                Some(byte) => {
                    self.handle(byte);
                    count += 1;
                    idle = 0;
                }
                None => {
                    wait.delay_ms(1);
                    idle += 1;
                }
            }
        }
        count
    }

    /// Feed a single byte.
    pub fn handle(&mut self, byte: u8) {
        let Some(mut line) = self.assembler.feed(byte, &mut self.console) else {
            return;
        };

        let resolved = resolve_line(&mut line);
        if let Err(e) = resolved {
            let _ = write!(self.console, "{}\r\n", e);
        }

        // Unresolved lines are queued unbound; the dispatcher only acknowledges them.
        match (self.commands.enqueue(line), resolved) {
            (Ok(()), Ok(command)) => debug!("queued {}", command.name()),
            (Ok(()), Err(_)) => {}
            (Err(_), _) => warn!("command queue full, line dropped"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glue::TxRing;
    use crate::protocol::Command;

    struct NoDelay;

    impl DelayMs<u32> for NoDelay {
        fn delay_ms(&mut self, _ms: u32) {}
    }

    struct Counting(u32);

    impl DelayMs<u32> for Counting {
        fn delay_ms(&mut self, ms: u32) {
            self.0 += ms;
        }
    }

    fn transcript(ring: &TxRing) -> String {
        let mut out = Vec::new();
        while let Some(frame) = ring.dequeue() {
            out.extend_from_slice(&frame);
        }
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn resolved_line_is_queued_with_argument() {
        let (bytes, commands, ring) = (ByteQueue::new(), CommandQueue::new(), TxRing::new());
        let mut task = LineTask::new(&bytes, &commands, Console::new(&ring, || {}, NoDelay));

        for &b in b"pu b\r" {
            bytes.enqueue(b).unwrap();
        }
        assert_eq!(task.service(), 5);

        let line = commands.dequeue().unwrap();
        assert_eq!(line.action(), Some(Command::PutOn));
        assert_eq!(line.arg(), Some(&b"B"[..]));
        assert_eq!(transcript(&ring), "pu b\r\n");
    }

    #[test]
    fn syntax_error_follows_echo_and_queues_unbound_line() {
        let (bytes, commands, ring) = (ByteQueue::new(), CommandQueue::new(), TxRing::new());
        let mut task = LineTask::new(&bytes, &commands, Console::new(&ring, || {}, NoDelay));

        for &b in b"xyzzy\r" {
            task.handle(b);
        }
        assert_eq!(transcript(&ring), "xyzzy\r\nSYNTAX ERROR\r\n");

        let line = commands.dequeue().unwrap();
        assert_eq!(line.action(), None);
        assert_eq!(line.as_bytes(), b"XYZZY");
        assert!(commands.dequeue().is_none());
    }

    #[test]
    fn full_command_queue_drops_line() {
        let (bytes, commands, ring) = (ByteQueue::new(), CommandQueue::new(), TxRing::new());
        let mut task = LineTask::new(&bytes, &commands, Console::new(&ring, || {}, NoDelay));

        let mut queued = 0;
        for _ in 0..8 {
            for &b in b"V\r" {
                task.handle(b);
            }
            let _ = transcript(&ring);
        }
        while commands.dequeue().is_some() {
            queued += 1;
        }
        assert!(queued < 8);
    }

    #[test]
    fn service_for_waits_out_the_idle_timeout() {
        let (bytes, commands, ring) = (ByteQueue::new(), CommandQueue::new(), TxRing::new());
        let mut task = LineTask::new(&bytes, &commands, Console::new(&ring, || {}, NoDelay));
        let mut wait = Counting(0);

        for &b in b"HELP\r" {
            bytes.enqueue(b).unwrap();
        }
        assert_eq!(task.service_for(&mut wait, 100), 5);
        assert_eq!(wait.0, 100);
        assert_eq!(commands.dequeue().and_then(|l| l.action()), Some(Command::Help));
    }
}
