//! System detection by fixed-offset magic numbers.

use disc_sniff_core::util::{read_at, read_exact_at};
use disc_sniff_core::{DiscError, ReadSeek, System};

/// Length of every table signature.
pub const MAGIC_LEN: usize = 17;

/// A raw byte signature expected at a fixed offset.
#[derive(Debug, Clone, Copy)]
pub struct MagicEntry {
    pub offset: u64,
    pub system: System,
    pub signature: [u8; MAGIC_LEN],
}

/// Known signatures, checked in order; the first match wins.
pub const MAGIC_NUMBERS: &[MagicEntry] = &[
    // Raw sync pattern, MSF 00:02:00, mode 2
    MagicEntry {
        offset: 0,
        system: System::Ps1,
        signature: [
            0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x02,
            0x00, 0x02, 0x00,
        ],
    },
    // Shift-JIS text from the PC Engine CD system card boot sector
    MagicEntry {
        offset: 0x838840,
        system: System::PcEngineCd,
        signature: [
            0x82, 0xB1, 0x82, 0xCC, 0x83, 0x76, 0x83, 0x8D, 0x83, 0x4F, 0x83, 0x89, 0x83, 0x80,
            0x82, 0xCC, 0x92,
        ],
    },
    // Raw sync pattern, MSF 00:02:00, mode 1, then "S" of SEGADISCSYSTEM
    MagicEntry {
        offset: 0,
        system: System::SegaCd,
        signature: [
            0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x02,
            0x00, 0x01, 0x53,
        ],
    },
];

/// Offset of the PSP volume's system identifier (ISO sector 16, byte 8).
const PSP_PROBE_OFFSET: u64 = 0x8008;
const PSP_PROBE: &[u8; 8] = b"PSP GAME";

/// Identify the system an image belongs to.
///
/// Every table entry must be readable in full: an image too short to hold
/// a signature offset is an I/O error (`UnexpectedEof`), not a mismatch.
/// The PSP identifier is probed last and only matches when all eight bytes
/// are present.
pub fn detect_system(reader: &mut dyn ReadSeek) -> Result<System, DiscError> {
    log::debug!("Comparing with known magic numbers");

    let mut magic = [0u8; MAGIC_LEN];
    for entry in MAGIC_NUMBERS {
        read_exact_at(reader, entry.offset, &mut magic).inspect_err(|e| {
            log::warn!("Could not read data at offset {:#x}: {e}", entry.offset);
        })?;
        if magic == entry.signature {
            return Ok(entry.system);
        }
    }

    let mut probe = [0u8; 8];
    if read_at(reader, PSP_PROBE_OFFSET, &mut probe)? == probe.len() && probe == *PSP_PROBE {
        return Ok(System::Psp);
    }

    log::debug!("Could not find compatible system");
    Err(DiscError::NotRecognized)
}

#[cfg(test)]
#[path = "tests/magic_tests.rs"]
mod tests;
