//! Whitespace/quote tokenizer for CUE sheets.
//!
//! Tokens are read one byte at a time straight from the stream, so the
//! reader is left positioned just past the terminator of the last token.

use std::borrow::Cow;
use std::io::{ErrorKind, Read};

use disc_sniff_core::DiscError;

/// Largest token the tokenizer will accumulate.
pub const MAX_TOKEN_LEN: usize = 255;

/// A reusable, fixed-capacity token buffer.
#[derive(Debug, Clone)]
pub struct Token {
    buf: [u8; MAX_TOKEN_LEN],
    len: usize,
}

impl Default for Token {
    fn default() -> Self {
        Self::new()
    }
}

impl Token {
    pub fn new() -> Self {
        Self {
            buf: [0u8; MAX_TOKEN_LEN],
            len: 0,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    pub fn to_str_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.as_bytes())
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl PartialEq<str> for Token {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<&str> for Token {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

fn is_space(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\r' | b'\n')
}

/// Read the next token into `token`, keeping at most `max_len` bytes.
///
/// Leading whitespace is skipped. A `"` before anything is accumulated
/// starts a quoted token in which whitespace is kept; a later `"`, or
/// whitespace outside quotes, ends the token and is consumed. A token that
/// reaches `max_len` (clamped to `1..=MAX_TOKEN_LEN`) is cut there and the
/// rest of it is left in the stream.
///
/// Returns the token length; `Ok(0)` means the stream ended before any
/// byte was accumulated. Interrupted and would-block reads are retried.
pub fn read_token<R: Read + ?Sized>(
    reader: &mut R,
    token: &mut Token,
    max_len: usize,
) -> Result<usize, DiscError> {
    let max_len = max_len.clamp(1, MAX_TOKEN_LEN);
    let mut in_string = false;
    let mut byte = [0u8; 1];
    token.len = 0;

    loop {
        match reader.read(&mut byte) {
            Ok(0) => return Ok(token.len),
            Ok(_) => {}
            Err(e) if matches!(e.kind(), ErrorKind::Interrupted | ErrorKind::WouldBlock) => {
                continue;
            }
            Err(e) => return Err(e.into()),
        }

        let c = byte[0];
        if is_space(c) {
            if token.len == 0 {
                continue;
            }
            if !in_string {
                return Ok(token.len);
            }
        } else if c == b'"' {
            if token.len == 0 {
                in_string = true;
                continue;
            }
            return Ok(token.len);
        }

        token.buf[token.len] = c;
        token.len += 1;
        if token.len == max_len {
            return Ok(token.len);
        }
    }
}

/// Skip tokens until one equal to `target` has been consumed.
///
/// Tokens are read `target.len()` bytes at a time, so a longer token such
/// as `INDEXES` matches on its leading `INDEX`. Running out of input is
/// `DiscError::NotFound`.
pub fn find_token<R: Read + ?Sized>(reader: &mut R, target: &str) -> Result<(), DiscError> {
    if target.is_empty() {
        return Ok(());
    }
    let mut token = Token::new();
    loop {
        if read_token(reader, &mut token, target.len())? == 0 {
            return Err(DiscError::not_found(format!("token '{target}'")));
        }
        if token == target {
            return Ok(());
        }
    }
}

#[cfg(test)]
#[path = "tests/tokenizer_tests.rs"]
mod tests;
