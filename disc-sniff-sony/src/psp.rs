//! PlayStation Portable serial scanning.
//!
//! UMD images carry their serial (e.g. `ULUS-10041`) as plain text in
//! `UMD_DATA.BIN` and `PARAM.SFO`, both near the start of the image. Rather
//! than walk the filesystem, every offset in a window is probed for one of
//! the known publisher/region prefixes.

use disc_sniff_core::util::read_at;
use disc_sniff_core::{DiscError, GameId, ReadSeek, Region};

/// Known PSP serial prefixes, dash included.
const PSP_SERIAL_PREFIXES: &[&[u8; PREFIX_LEN]] = &[
    b"ULES-", b"ULUS-", b"ULJS-", // third-party UMD
    b"ULEM-", b"ULUM-", b"ULJM-", // third-party UMD (Japan-made)
    b"UCES-", b"UCUS-", b"UCJS-", b"UCAS-", // first-party UMD
    b"NPEH-", b"NPUH-", b"NPJH-", // PSN
    b"NPEG-", b"NPUG-", b"NPJG-", b"NPHG-", // PSN
    b"NPEZ-", b"NPUZ-", b"NPJZ-", // PSN minis
];

const PREFIX_LEN: usize = 5;

/// `XXXX-NNNNN`
const SERIAL_LEN: usize = 10;

/// Scan offsets `0..window` for a PSP serial.
///
/// The first offset holding a known prefix wins and the ten bytes there are
/// returned. Reaching the end of the stream first, or a match with fewer
/// than ten bytes behind it, is `DiscError::NotFound`.
pub fn detect_psp_serial(reader: &mut dyn ReadSeek, window: u64) -> Result<GameId, DiscError> {
    let mut prefix = [0u8; PREFIX_LEN];
    for pos in 0..window {
        if read_at(reader, pos, &mut prefix)? < PREFIX_LEN {
            break;
        }
        if !PSP_SERIAL_PREFIXES.contains(&&prefix) {
            continue;
        }

        let mut serial = [0u8; SERIAL_LEN];
        if read_at(reader, pos, &mut serial)? < SERIAL_LEN {
            return Err(DiscError::not_found("PSP serial truncated by end of image"));
        }
        log::debug!(
            "PSP serial prefix {} at offset {pos:#x}",
            String::from_utf8_lossy(&prefix)
        );
        return GameId::from_ascii(&serial)
            .ok_or_else(|| DiscError::not_found("PSP serial is not ASCII"));
    }

    Err(DiscError::not_found(format!(
        "PSP serial in first {window} bytes"
    )))
}

/// Map a PSP serial to a region using its third letter.
pub fn serial_to_region(serial: &str) -> Option<Region> {
    let bytes = serial.as_bytes();
    if !matches!(bytes.first()?.to_ascii_uppercase(), b'U' | b'N') {
        return None;
    }
    match bytes.get(2)?.to_ascii_uppercase() {
        b'U' => Some(Region::Usa),
        b'E' => Some(Region::Europe),
        b'J' => Some(Region::Japan),
        b'K' => Some(Region::Korea),
        b'A' | b'H' => Some(Region::Asia),
        _ => None,
    }
}

#[cfg(test)]
#[path = "tests/psp_tests.rs"]
mod tests;
