// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Simulated rig: the timer interrupt, the UART transmitter and the operator terminal, all played
//! from the delays the core calls while it waits.

#![allow(dead_code)]

use std::cell::RefCell;

use embedded_hal::blocking::delay::DelayMs;
use servolifter::config::{CHANNELS, CHANNEL_COUNT, RX_EVENT_TIMEOUT_MS};
use servolifter::control::Dispatcher;
use servolifter::glue::{ByteQueue, CommandQueue, Console, LineTask, LockTrigger, TxRing};
use servolifter::motion::{ChannelId, MotionEngine, ServoOutputs};

pub struct Rig {
    pub engine: MotionEngine<CHANNEL_COUNT>,
    pub bytes: ByteQueue,
    pub commands: CommandQueue,
    pub ring: TxRing,
    pub trigger: LockTrigger,
    transcript: RefCell<Vec<u8>>,
    halted: RefCell<Vec<ChannelId>>,
    /// Channel of every move, in the order the moves were armed.
    moves: RefCell<Vec<u8>>,
}

/// Transmitter: moves queued frames into the transcript.
pub struct Uart<'r>(&'r Rig);

/// Timer interrupt: one pulse-completion tick for every running channel.
pub struct Timers<'r>(&'r Rig);

pub struct Outputs<'r>(&'r Rig);

pub type RigDispatcher<'r> = Dispatcher<'r, Outputs<'r>, Timers<'r>, Uart<'r>, CHANNEL_COUNT>;

pub struct Session<'r> {
    rig: &'r Rig,
    pub line_task: LineTask<'r, Uart<'r>>,
    pub dispatcher: RigDispatcher<'r>,
}

impl Rig {
    pub fn new() -> Self {
        Self {
            engine: MotionEngine::from_configs(CHANNELS),
            bytes: ByteQueue::new(),
            commands: CommandQueue::new(),
            ring: TxRing::new(),
            trigger: LockTrigger::new(),
            transcript: RefCell::new(Vec::new()),
            halted: RefCell::new(Vec::new()),
            moves: RefCell::new(Vec::new()),
        }
    }

    pub fn session(&self) -> Session<'_> {
        Session {
            rig: self,
            line_task: LineTask::new(
                &self.bytes,
                &self.commands,
                Console::new(&self.ring, || {}, Uart(self)),
            ),
            dispatcher: Dispatcher::new(
                &self.engine,
                Outputs(self),
                Timers(self),
                Console::new(&self.ring, || {}, Uart(self)),
            ),
        }
    }

    pub fn position(&self, name: u8) -> u16 {
        let id = self.engine.find(name).unwrap();
        self.engine.channel(id).position()
    }

    /// Letters of the channels moved since the last call.
    pub fn take_moves(&self) -> String {
        String::from_utf8(self.moves.take()).unwrap()
    }

    fn drain(&self) {
        while let Some(frame) = self.ring.dequeue() {
            self.transcript.borrow_mut().extend_from_slice(&frame);
        }
    }
}

impl DelayMs<u32> for Uart<'_> {
    fn delay_ms(&mut self, _ms: u32) {
        self.0.drain();
    }
}

impl DelayMs<u32> for Timers<'_> {
    fn delay_ms(&mut self, _ms: u32) {
        let rig = self.0;
        for (id, _) in rig.engine.channels() {
            if !rig.halted.borrow().contains(&id) {
                rig.engine.on_pulse_complete(id);
            }
        }
    }
}

impl ServoOutputs for Outputs<'_> {
    fn halt_updates(&mut self, id: ChannelId) {
        let rig = self.0;
        rig.halted.borrow_mut().push(id);
        rig.moves.borrow_mut().push(rig.engine.channel(id).name());
    }

    fn resume_updates(&mut self, id: ChannelId) {
        self.0.halted.borrow_mut().retain(|h| *h != id);
    }

    fn clear_indicator(&mut self) {}
}

impl Session<'_> {
    /// Type `text` followed by CR and run everything that becomes ready. Returns the terminal
    /// output produced meanwhile.
    pub fn type_line(&mut self, text: &str) -> String {
        for &b in text.as_bytes().iter().chain(b"\r") {
            while self.rig.bytes.enqueue(b).is_err() {
                self.line_task.service();
            }
        }
        self.line_task
            .service_for(&mut Uart(self.rig), RX_EVENT_TIMEOUT_MS);
        self.run()
    }

    /// Let the dispatcher drain the ready-command queue.
    pub fn run(&mut self) -> String {
        while self.dispatcher.poll(&self.rig.commands) {}
        self.rig.drain();
        String::from_utf8(self.rig.transcript.take()).unwrap()
    }

    /// Home every arm and forget the moves it took.
    pub fn home(&mut self) {
        assert_eq!(self.type_line("CLEAR"), "CLEAR\r\nOK\r\n");
        self.rig.take_moves();
    }
}
