// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Command line buffer and the character-level line assembler.
//!
//! The assembler consumes one received byte at a time, echoes it back to the terminal and builds
//! up a [`CommandLine`]. Edit keys are handled locally:
//!
//! | Byte | Effect |
//! | ---- | ------ |
//! | `CR`, `LF` | Complete the line (an `LF` right after a `CR` is swallowed); always echoes CRLF |
//! | `BS`, `DEL` | Erase the last character (`"\b \b"`); no-op on an empty line |
//! | space, tab | Ignored at the start of a line, stored otherwise |
//! | anything else | Echoed verbatim, stored upper-cased |
//!
//! Once the line holds [`MAX_COMMAND_LENGTH`] characters, further characters are dropped without
//! echo until the line is completed or shortened.

use crate::config::MAX_COMMAND_LENGTH;
use crate::protocol::Command;

const CR: u8 = b'\r';
const LF: u8 = b'\n';
const BS: u8 = 0x08;
const DEL: u8 = 0x7F;

const NEWLINE: &[u8] = b"\r\n";
const ERASE: &[u8] = b"\x08 \x08";

#[inline]
fn is_blank(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

/// Sink for terminal echo.
pub trait Echo {
    fn echo(&mut self, bytes: &[u8]);
}

/// A single command line: fixed buffer, verb/argument split and the bound command.
#[derive(Clone)]
pub struct CommandLine {
    buf: [u8; MAX_COMMAND_LENGTH + 1],
    len: usize,
    verb_len: usize,
    /// Offset of the first argument byte in `buf`.
    arg: Option<usize>,
    action: Option<Command>,
}

impl CommandLine {
    pub const fn new() -> Self {
        Self {
            buf: [0; MAX_COMMAND_LENGTH + 1],
            len: 0,
            verb_len: 0,
            arg: None,
            action: None,
        }
    }

    /// Build a complete line from text, as if it had been typed. Input beyond the buffer is cut.
    pub fn from_bytes(text: &[u8]) -> Self {
        let mut line = Self::new();
        for &b in text {
            if !line.push(b.to_ascii_uppercase()) {
                break;
            }
        }
        line.terminate();
        line
    }

    /// Line already bound to `action`, used for commands that do not come from the terminal.
    pub fn synthetic(action: Command) -> Self {
        let mut line = Self::from_bytes(action.name().as_bytes());
        line.split();
        line.bind(action);
        line
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len >= MAX_COMMAND_LENGTH
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Verb token; valid after [`CommandLine::split`].
    #[inline]
    pub fn verb(&self) -> &[u8] {
        &self.buf[..self.verb_len]
    }

    /// Argument text with trailing blanks removed, or `None` when nothing follows the verb.
    pub fn arg(&self) -> Option<&[u8]> {
        let start = self.arg?;
        let mut end = self.len;
        while end > start && is_blank(self.buf[end - 1]) {
            end -= 1;
        }
        Some(&self.buf[start..end])
    }

    #[inline]
    pub fn action(&self) -> Option<Command> {
        self.action
    }

    pub(crate) fn bind(&mut self, action: Command) {
        self.action = Some(action);
    }

    /// Separate the verb (run of non-blank bytes from offset 0) from the argument (first
    /// non-blank byte after the verb).
    pub fn split(&mut self) {
        let bytes = self.as_bytes();
        let verb_len = bytes.iter().position(|&b| is_blank(b)).unwrap_or(bytes.len());
        let arg = bytes[verb_len..]
            .iter()
            .position(|&b| !is_blank(b))
            .map(|offset| verb_len + offset);
        self.verb_len = verb_len;
        self.arg = arg;
    }

    fn push(&mut self, b: u8) -> bool {
        if self.is_full() {
            return false;
        }
        self.buf[self.len] = b;
        self.len += 1;
        true
    }

    fn pop(&mut self) -> bool {
        if self.len == 0 {
            return false;
        }
        self.len -= 1;
        true
    }

    fn terminate(&mut self) {
        self.buf[self.len] = 0;
    }
}

impl Default for CommandLine {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for CommandLine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CommandLine")
            .field("text", &core::str::from_utf8(self.as_bytes()).unwrap_or("<bin>"))
            .field("action", &self.action)
            .finish()
    }
}

/// Character-at-a-time line editor.
pub struct LineAssembler {
    line: CommandLine,
    after_cr: bool,
}

impl LineAssembler {
    pub const fn new() -> Self {
        Self {
            line: CommandLine::new(),
            after_cr: false,
        }
    }

    /// Line under construction.
    #[inline]
    pub fn pending(&self) -> &CommandLine {
        &self.line
    }

    /// Process one received byte. Returns the finished line when `byte` completes a non-empty one.
    pub fn feed<E: Echo>(&mut self, byte: u8, echo: &mut E) -> Option<CommandLine> {
        let after_cr = core::mem::replace(&mut self.after_cr, byte == CR);

        match byte {
            LF if after_cr => None,
            CR | LF => {
                echo.echo(NEWLINE);
                if self.line.is_empty() {
                    return None;
                }
                self.line.terminate();
                Some(core::mem::take(&mut self.line))
            }
            BS | DEL => {
                if self.line.pop() {
                    echo.echo(ERASE);
                }
                None
            }
            b if is_blank(b) && self.line.is_empty() => None,
            b => {
                if !self.line.is_full() {
                    echo.echo(&[b]);
                    self.line.push(b.to_ascii_uppercase());
                }
                None
            }
        }
    }
}

impl Default for LineAssembler {
    fn default() -> Self {
        Self::new()
    }
}
