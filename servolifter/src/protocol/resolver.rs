// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Unambiguous-prefix command resolution.
//!
//! For prefix lengths `L = 1, 2, ...` up to the length of the typed verb, the whole table is
//! scanned for entries whose name starts with the first `L` typed characters:
//!
//! - more than one candidate: try the next `L`;
//! - exactly one candidate: accepted if the typed verb is no longer than the candidate's name and
//!   matches it character by character, rejected otherwise;
//! - no candidate: rejected.
//!
//! A verb that never narrows down to a single candidate is rejected as well.

use crate::error::ResolveError;
use crate::protocol::{Command, CommandEntry, CommandLine, COMMANDS};

/// Resolve `verb` against `table`.
pub fn resolve<T: Copy>(verb: &[u8], table: &[CommandEntry<T>]) -> Result<T, ResolveError> {
    for len in 1..=verb.len() {
        let prefix = &verb[..len];
        let mut candidates = table
            .iter()
            .filter(|entry| entry.name.as_bytes().starts_with(prefix));

        let Some(first) = candidates.next() else {
            return Err(ResolveError::Syntax);
        };
        if candidates.next().is_some() {
            continue;
        }

        let name = first.name.as_bytes();
        return if verb.len() <= name.len() && name[..verb.len()] == *verb {
            Ok(first.action)
        } else {
            Err(ResolveError::Syntax)
        };
    }
    Err(ResolveError::Syntax)
}

/// Split `line` into verb and argument, resolve the verb against [`COMMANDS`] and bind the
/// result to the line.
pub fn resolve_line(line: &mut CommandLine) -> Result<Command, ResolveError> {
    line.split();
    let command = resolve(line.verb(), &COMMANDS)?;
    line.bind(command);
    Ok(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PUT_TABLE: [CommandEntry<u8>; 3] = [
        CommandEntry::new("PUTON", 1),
        CommandEntry::new("PUTOFF", 2),
        CommandEntry::new("HELP", 3),
    ];

    #[test]
    fn every_prefix_of_a_lone_command_resolves() {
        let table = [CommandEntry::new("PUTON", 1u8)];
        for len in 1..="PUTON".len() {
            assert_eq!(resolve(&b"PUTON"[..len], &table), Ok(1));
        }
    }

    #[test]
    fn shared_prefix_needs_disambiguation() {
        for verb in [&b"P"[..], &b"PU"[..], &b"PUT"[..]] {
            assert_eq!(resolve(verb, &PUT_TABLE), Err(ResolveError::Syntax));
        }
        assert_eq!(resolve(b"PUTO", &PUT_TABLE), Err(ResolveError::Syntax));
        assert_eq!(resolve(b"PUTON", &PUT_TABLE), Ok(1));
        assert_eq!(resolve(b"PUTOF", &PUT_TABLE), Ok(2));
        assert_eq!(resolve(b"H", &PUT_TABLE), Ok(3));
    }

    #[test]
    fn typed_text_may_not_exceed_or_contradict_name() {
        assert_eq!(resolve(b"HELPME", &PUT_TABLE), Err(ResolveError::Syntax));
        assert_eq!(resolve(b"HALP", &PUT_TABLE), Err(ResolveError::Syntax));
        assert_eq!(resolve(b"PUTONX", &PUT_TABLE), Err(ResolveError::Syntax));
        assert_eq!(resolve(b"X", &PUT_TABLE), Err(ResolveError::Syntax));
        assert_eq!(resolve(b"", &PUT_TABLE), Err(ResolveError::Syntax));
    }

    #[test]
    fn device_table_accepts_single_letters() {
        let cases = [
            (&b"P"[..], Command::PutOn),
            (&b"T"[..], Command::TakeOff),
            (&b"CL"[..], Command::Clear),
            (&b"NEUTRAL"[..], Command::Neutral),
            (&b"LOC"[..], Command::Lock),
            (&b"D"[..], Command::Debug),
            (&b"HE"[..], Command::Help),
            (&b"V"[..], Command::Version),
        ];
        for (verb, expected) in cases {
            assert_eq!(resolve(verb, &COMMANDS), Ok(expected));
        }
    }

    #[test]
    fn resolve_line_binds_command_and_argument() {
        let mut line = CommandLine::from_bytes(b"put c");
        assert_eq!(resolve_line(&mut line), Ok(Command::PutOn));
        assert_eq!(line.action(), Some(Command::PutOn));
        assert_eq!(line.arg(), Some(&b"C"[..]));

        let mut bad = CommandLine::from_bytes(b"PUTS C");
        assert_eq!(resolve_line(&mut bad), Err(ResolveError::Syntax));
        assert_eq!(bad.action(), None);
    }
}
