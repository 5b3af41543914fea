// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Command dispatcher.
//!
//! The dispatcher is the only consumer of the ready-command queue and the only caller of
//! [`MotionEngine::move_to`]. It runs one command to completion (including all arm motion) before
//! it takes the next one, so handlers never interleave. Every dispatched line is acknowledged with
//! `OK`, whether the handler succeeded or printed an error.
//!
//! Typical usage pattern:
//!
//! ```ignore
//! let mut dispatcher = Dispatcher::new(&ENGINE, outputs, delay, console);
//!
//! loop {
//!     if !dispatcher.poll(&CMD_QUEUE) {
//!         cortex_m::asm::wfi();
//!     }
//! }
//! ```

use core::fmt::Write;

use embedded_hal::blocking::delay::DelayMs;
use heapless::{String, Vec};

use crate::config::VERSION_STR;
use crate::control::BeamStack;
use crate::error::CommandError;
use crate::glue::{CommandQueue, Console};
use crate::motion::{ChannelId, MotionEngine, ServoOutputs};
use crate::protocol::{Command, CommandLine, COMMANDS};

/// Room for one `"X:HHHH>HHHH\r\n"` debug line.
type DebugLine = String<16>;

pub struct Dispatcher<'a, O, D, C, const N: usize> {
    engine: &'a MotionEngine<N>,
    outputs: O,
    delay: D,
    console: Console<'a, C>,
    stack: BeamStack<N>,

    /// Set by the first successful LOCK; never cleared.
    locked: bool,
    debug: bool,
}

impl<'a, O, D, C, const N: usize> Dispatcher<'a, O, D, C, N>
where
    O: ServoOutputs,
    D: DelayMs<u32>,
    C: DelayMs<u32>,
{
    pub fn new(engine: &'a MotionEngine<N>, outputs: O, delay: D, console: Console<'a, C>) -> Self {
        Self {
            engine,
            outputs,
            delay,
            console,
            stack: BeamStack::new(),
            locked: false,
            debug: false,
        }
    }

    #[inline]
    pub fn stack(&self) -> &BeamStack<N> {
        &self.stack
    }

    #[inline]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    #[inline]
    pub fn debug_enabled(&self) -> bool {
        self.debug
    }

    #[inline]
    pub fn engine(&self) -> &MotionEngine<N> {
        self.engine
    }

    /// Take one line from `queue` and dispatch it. Returns `false` if the queue was empty.
    pub fn poll(&mut self, queue: &CommandQueue) -> bool {
        match queue.dequeue() {
            Some(line) => {
                self.dispatch(&line);
                true
            }
            None => false,
        }
    }

    /// Run the command bound to `line`, print its error (if any) and acknowledge.
    pub fn dispatch(&mut self, line: &CommandLine) {
        if let Some(command) = line.action() {
            info!("dispatch {}", command.name());
            if let Err(e) = self.execute(command, line.arg()) {
                debug!("{} rejected: {}", command.name(), e);
                let _ = write!(self.console, "{}\r\n", e);
            }
        }
        self.console.put_str("OK\r\n");
    }

    /// Run a single handler.
    pub fn execute(&mut self, command: Command, arg: Option<&[u8]>) -> Result<(), CommandError> {
        match command {
            Command::PutOn => self.put_on(arg),
            Command::TakeOff => self.take_off(arg),
            Command::Clear => {
                self.clear();
                Ok(())
            }
            Command::Neutral => {
                self.neutral();
                Ok(())
            }
            Command::Lock => self.lock(),
            Command::Debug => self.set_debug(arg),
            Command::Help => {
                self.help();
                Ok(())
            }
            Command::Version => {
                self.console.put_line(VERSION_STR);
                Ok(())
            }
        }
    }

    fn put_on(&mut self, arg: Option<&[u8]>) -> Result<(), CommandError> {
        let id = match arg {
            None => return Err(CommandError::EmptyArgument),
            Some(&[letter]) => self.engine.find(letter).ok_or(CommandError::InvalidParameter)?,
            Some(_) => return Err(CommandError::InvalidParameter),
        };

        if self.stack.is_present(id) {
            return Err(CommandError::AlreadyPut);
        }
        let config = *self.engine.channel(id).config();
        if config.is_reader && !self.stack.is_empty() {
            return Err(CommandError::NotCleared);
        }

        let width = config.put_width(self.stack.len());
        self.stack.push(id).map_err(|e| {
            warn!("beam stack push failed: {}", e);
            CommandError::from(e)
        })?;
        self.move_channel(id, width);
        Ok(())
    }

    fn take_off(&mut self, arg: Option<&[u8]>) -> Result<(), CommandError> {
        if arg.is_some() {
            return Err(CommandError::InvalidParameter);
        }
        let id = self.stack.pop().ok_or(CommandError::BeamEmpty)?;
        let take = self.engine.channel(id).config().take;
        self.move_channel(id, take);
        Ok(())
    }

    /// Rebuild the stack from the live pulse widths and retract everything, highest position
    /// first. The previous stack contents are ignored.
    fn clear(&mut self) {
        let mut present: Vec<(u16, ChannelId), N> = Vec::new();
        for (id, ch) in self.engine.channels() {
            let position = ch.position();
            if position != ch.config().take {
                // At most N channels exist.
                let _ = present.push((position, id));
            }
        }
        // Equal widths (after LOCK) fall back to table order, so the later arm comes off first.
        present.sort_unstable();

        self.stack.clear();
        for &(_, id) in present.iter() {
            let _ = self.stack.push(id);
        }

        while let Some(id) = self.stack.pop() {
            let take = self.engine.channel(id).config().take;
            self.move_channel(id, take);
        }
    }

    fn neutral(&mut self) {
        self.clear();
        for i in 0..N {
            let id = ChannelId(i as u8);
            let neutral = self.engine.channel(id).config().neutral;
            self.move_channel(id, neutral);
        }
    }

    fn lock(&mut self) -> Result<(), CommandError> {
        if self.locked {
            return Err(CommandError::AlreadyLocked);
        }
        self.locked = true;
        self.clear();

        for i in 0..N {
            let id = ChannelId(i as u8);
            let config = *self.engine.channel(id).config();
            if config.is_reader {
                continue;
            }
            self.move_channel(id, config.put);
            if let Err(e) = self.stack.push(id) {
                warn!("beam stack push failed: {}", e);
            }
        }
        Ok(())
    }

    fn set_debug(&mut self, arg: Option<&[u8]>) -> Result<(), CommandError> {
        self.debug = match arg {
            None => return Err(CommandError::EmptyArgument),
            Some(b"0") => false,
            Some(b"1") => true,
            Some(_) => return Err(CommandError::InvalidParameter),
        };
        Ok(())
    }

    fn help(&mut self) {
        for entry in COMMANDS.iter() {
            self.console.put_line(entry.action.usage());
        }
    }

    fn move_channel(&mut self, id: ChannelId, width: u16) {
        let engine = self.engine;
        let ch = engine.channel(id);
        let name = ch.name() as char;

        if self.debug {
            let mut text = DebugLine::new();
            let _ = write!(text, "{}:{:04X}>{:04X}\r\n", name, ch.position(), width);
            self.console.put_str(&text);
        }

        let end = engine.move_to(id, width, &mut self.outputs, &mut self.delay);

        if self.debug {
            let mut text = DebugLine::new();
            let _ = write!(text, "{}:{:04X}\r\n", name, end);
            self.console.put_str(&text);
        }
    }
}
