// src/line.rs
//! On-disk line format of a `.todo` file.
//!
//! Every record is one line: a status byte, a colon, the free text and a
//! newline, e.g. `X:buy milk\n`. `X` marks an open item, `O` a completed one.

#![deny(missing_docs)]

use std::io::{self, BufRead};

/// Status byte of an open item.
pub const STATUS_INCOMPLETE: u8 = b'X';
/// Status byte of a completed item.
pub const STATUS_COMPLETE: u8 = b'O';
/// Separator between status and text.
pub const SEPARATOR: u8 = b':';
/// Width of the `<status>:` prefix.
pub const PREFIX_LEN: usize = 2;
/// Upper bound of bytes returned by a single [`read_line`] call, newline included.
///
/// Longer physical lines are split; the remainder comes back on the next call.
pub const MAX_LINE_BYTES: usize = 4095;

/// A decoded todo item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    /// Whether the item has been completed.
    pub completed: bool,
    /// Item text without the status prefix or line terminator.
    pub text: String,
}

/// Encode a new, open item as a full line.
///
/// CR and LF inside `text` become spaces so the record stays on one line.
pub fn encode_new(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() + PREFIX_LEN + 1);
    out.push(STATUS_INCOMPLETE);
    out.push(SEPARATOR);
    out.extend(
        text.bytes()
            .map(|b| if b == b'\n' || b == b'\r' { b' ' } else { b }),
    );
    out.push(b'\n');
    out
}

/// Decode a raw line. Lines shorter than the prefix are malformed and yield `None`.
pub fn decode(raw: &[u8]) -> Option<TodoItem> {
    if raw.len() < PREFIX_LEN {
        return None;
    }
    let mut body = &raw[PREFIX_LEN..];
    while let [rest @ .., b'\n' | b'\r'] = body {
        body = rest;
    }
    Some(TodoItem {
        completed: raw[0] != STATUS_INCOMPLETE,
        text: String::from_utf8_lossy(body).into_owned(),
    })
}

/// Read one raw line, newline included, capped at [`MAX_LINE_BYTES`].
///
/// Returns `Ok(None)` at end of input.
pub fn read_line<R: BufRead>(reader: &mut R) -> io::Result<Option<Vec<u8>>> {
    let mut line = Vec::new();
    while line.len() < MAX_LINE_BYTES {
        let buf = reader.fill_buf()?;
        if buf.is_empty() {
            break;
        }
        let room = MAX_LINE_BYTES - line.len();
        let window = &buf[..buf.len().min(room)];
        match window.iter().position(|&b| b == b'\n') {
            Some(pos) => {
                line.extend_from_slice(&window[..=pos]);
                reader.consume(pos + 1);
                return Ok(Some(line));
            }
            None => {
                let n = window.len();
                line.extend_from_slice(window);
                reader.consume(n);
            }
        }
    }
    Ok(if line.is_empty() { None } else { Some(line) })
}
