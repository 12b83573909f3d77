//! Generic ASCII serial scanning (Wii and similar discs).
//!
//! These discs open with a short game code such as `RMCE01` in plain text.
//! A position qualifies when the run of serial characters starting there is
//! longer than 3 and shorter than 9.

use disc_sniff_core::util::read_at;
use disc_sniff_core::{DiscError, GameId, ReadSeek};

/// Bytes examined at each position.
const PROBE_LEN: usize = 15;

const MIN_RUN_EXCLUSIVE: usize = 3;
const MAX_RUN_EXCLUSIVE: usize = 9;

fn is_serial_char(b: u8) -> bool {
    b == b'-' || b.is_ascii_digit() || b.is_ascii_uppercase()
}

/// Length of the leading run of `-`, `0-9` and `A-Z` in `buf`.
pub fn serial_run_len(buf: &[u8]) -> usize {
    buf.iter().take_while(|&&b| is_serial_char(b)).count()
}

/// Whether a run of `len` serial characters is accepted as a serial.
pub fn is_serial_run(len: usize) -> bool {
    len > MIN_RUN_EXCLUSIVE && len < MAX_RUN_EXCLUSIVE
}

/// Scan offsets `0..window` for an ASCII serial.
///
/// Positions are tried one byte apart, so a run that is too long at its
/// start can still qualify further in.
pub fn detect_ascii_serial(reader: &mut dyn ReadSeek, window: u64) -> Result<GameId, DiscError> {
    let mut probe = [0u8; PROBE_LEN];
    for pos in 0..window {
        let n = read_at(reader, pos, &mut probe)?;
        if n == 0 {
            break;
        }
        let run = serial_run_len(&probe[..n]);
        if is_serial_run(run) {
            log::debug!("ASCII serial candidate at offset {pos:#x}");
            return GameId::from_ascii(&probe[..run])
                .ok_or_else(|| DiscError::not_found("ASCII serial"));
        }
    }

    Err(DiscError::not_found(format!(
        "ASCII serial in first {window} bytes"
    )))
}

#[cfg(test)]
#[path = "tests/ascii_tests.rs"]
mod tests;
