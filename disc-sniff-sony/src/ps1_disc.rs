//! PS1 serial extraction.
//!
//! Reads the ISO 9660 root directory straight off the image, finds
//! `SYSTEM.CNF`, and turns its `BOOT` executable name into a serial such as
//! `SLUS-01234`. The sector framing is not known up front, so two layouts
//! are tried: plain (2048-byte ISO or 2352-byte raw BIN) and raw with
//! interleaved sub-channel data (2448 bytes, as stored in CHD hunks).

use disc_sniff_core::util::{read_at, stream_len, u24_le_at};
use disc_sniff_core::{DiscError, GameId, ReadSeek, Region};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// First four bytes of the CD sync pattern that opens every raw sector.
const CD_SYNC_PREFIX: [u8; 4] = [0x00, 0xFF, 0xFF, 0xFF];

/// Standard ISO 9660 sector size (user data only).
const ISO_SECTOR_SIZE: u64 = 2048;

/// Raw CD sector size (sync + header + subheader + data + EDC + ECC).
const RAW_SECTOR_SIZE: u64 = 2352;

/// Raw sector plus 96 bytes of sub-channel data.
const SUBCHANNEL_SECTOR_SIZE: u64 = 2448;

/// Offset to user data within a Mode 2 Form 1 raw sector.
/// 12 (sync) + 4 (header) + 8 (subheader) = 24.
const MODE2_FORM1_DATA_OFFSET: u64 = 24;

/// ISO 9660 Primary Volume Descriptor is always at sector 16.
const PVD_SECTOR: u64 = 16;

/// Root directory record within the PVD.
const ROOT_RECORD_OFFSET: u64 = 156;

/// Bytes of the root directory record needed to reach its extent.
const ROOT_RECORD_READ_LEN: usize = 6;

/// Two sectors of root directory records are searched.
const DIRECTORY_READ_LEN: usize = 2 * ISO_SECTOR_SIZE as usize;

/// Extent (LBA) field within a directory record, little-endian.
const RECORD_EXTENT_OFFSET: usize = 2;

/// File identifier field within a directory record.
const RECORD_NAME_OFFSET: usize = 33;

const SYSTEM_CNF_NAME: &[u8] = b"SYSTEM.CNF;1";

/// Only the head of SYSTEM.CNF is read; the BOOT line is always near the top.
const SYSTEM_CNF_READ_LEN: usize = 256;

// ---------------------------------------------------------------------------
// Sector geometry
// ---------------------------------------------------------------------------

/// Where user data lives in the image for one framing hypothesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameGeometry {
    /// Bytes before user data in each frame (0 or 24).
    pub skip: u64,
    /// Bytes per frame (2048, 2352 or 2448).
    pub frame_size: u64,
}

impl FrameGeometry {
    /// Work out the framing of `reader`.
    ///
    /// Without sub-channel data, an image whose length is a whole number of
    /// 2048-byte sectors and that does not open with the raw sync pattern is
    /// taken to be a plain mode 1 ISO.
    pub fn detect(
        reader: &mut dyn ReadSeek,
        sub_channel_mixed: bool,
    ) -> Result<Self, DiscError> {
        let len = stream_len(reader)?;

        let mut is_mode1 = false;
        if !sub_channel_mixed && len.is_multiple_of(ISO_SECTOR_SIZE) {
            let mut mode_test = [0u8; 4];
            let n = read_at(reader, 0, &mut mode_test)?;
            is_mode1 = n < mode_test.len() || mode_test != CD_SYNC_PREFIX;
        }

        let skip = if is_mode1 { 0 } else { MODE2_FORM1_DATA_OFFSET };
        let frame_size = if sub_channel_mixed {
            SUBCHANNEL_SECTOR_SIZE
        } else if is_mode1 {
            ISO_SECTOR_SIZE
        } else {
            RAW_SECTOR_SIZE
        };
        Ok(Self { skip, frame_size })
    }

    /// Byte offset of the user data of `sector`.
    pub fn sector_offset(&self, sector: u64) -> u64 {
        self.skip + sector * self.frame_size
    }
}

// ---------------------------------------------------------------------------
// Serial detection
// ---------------------------------------------------------------------------

/// Extract the PS1 serial from a disc image.
///
/// I/O errors abort immediately; a layout that doesn't pan out under one
/// framing is retried under the next.
pub fn detect_ps1_serial(reader: &mut dyn ReadSeek) -> Result<GameId, DiscError> {
    match detect_ps1_serial_framed(reader, false) {
        Ok(serial) => Ok(serial),
        Err(e) if e.is_io() => Err(e),
        Err(e) => {
            log::debug!("PS1 serial not found without sub-channel data: {e}");
            detect_ps1_serial_framed(reader, true)
        }
    }
}

fn detect_ps1_serial_framed(
    reader: &mut dyn ReadSeek,
    sub_channel_mixed: bool,
) -> Result<GameId, DiscError> {
    let geometry = FrameGeometry::detect(reader, sub_channel_mixed)?;
    log::debug!("Trying PS1 layout {geometry:?}");

    let root_sector = read_root_directory_sector(reader, geometry)?;
    let cnf_sector = find_system_cnf(reader, geometry, root_sector)?;
    let cnf = read_system_cnf(reader, geometry, cnf_sector)?;

    let boot_file =
        boot_file_name(&cnf).ok_or_else(|| DiscError::not_found("BOOT line in SYSTEM.CNF"))?;
    serial_from_boot_file(boot_file).ok_or_else(|| {
        DiscError::not_found(format!(
            "serial in boot file '{}'",
            String::from_utf8_lossy(boot_file).trim_end()
        ))
    })
}

/// Read the root directory's starting sector out of the PVD.
fn read_root_directory_sector(
    reader: &mut dyn ReadSeek,
    geometry: FrameGeometry,
) -> Result<u64, DiscError> {
    let offset = ROOT_RECORD_OFFSET + geometry.sector_offset(PVD_SECTOR);
    let mut record = [0u8; ROOT_RECORD_READ_LEN];
    if read_at(reader, offset, &mut record)? < record.len() {
        return Err(DiscError::not_found("root directory record"));
    }
    u24_le_at(&record, RECORD_EXTENT_OFFSET)
        .map(u64::from)
        .ok_or_else(|| DiscError::not_found("root directory record"))
}

/// Walk the root directory records and return the sector of SYSTEM.CNF.
fn find_system_cnf(
    reader: &mut dyn ReadSeek,
    geometry: FrameGeometry,
    root_sector: u64,
) -> Result<u64, DiscError> {
    let mut dir = vec![0u8; DIRECTORY_READ_LEN];
    read_at(reader, geometry.sector_offset(root_sector), &mut dir)?;
    find_record_extent(&dir, SYSTEM_CNF_NAME)
        .map(u64::from)
        .ok_or_else(|| DiscError::not_found("SYSTEM.CNF in root directory"))
}

/// Find the extent of the record named `name` (case-insensitive).
///
/// A zero-length record ends the walk, as does a record whose name field
/// would run past the end of `dir`.
fn find_record_extent(dir: &[u8], name: &[u8]) -> Option<u32> {
    let mut pos = 0;
    while pos < dir.len() {
        let record_len = usize::from(dir[pos]);
        if record_len == 0 {
            return None;
        }
        let name_start = pos + RECORD_NAME_OFFSET;
        let record_name = dir.get(name_start..name_start + name.len())?;
        if record_name.eq_ignore_ascii_case(name) {
            return u24_le_at(dir, pos + RECORD_EXTENT_OFFSET);
        }
        pos += record_len;
    }
    None
}

/// Read the head of SYSTEM.CNF, cut at the first NUL.
fn read_system_cnf(
    reader: &mut dyn ReadSeek,
    geometry: FrameGeometry,
    sector: u64,
) -> Result<Vec<u8>, DiscError> {
    let mut cnf = vec![0u8; SYSTEM_CNF_READ_LEN];
    let n = read_at(reader, geometry.sector_offset(sector), &mut cnf)?;
    let end = cnf[..n].iter().position(|&b| b == 0).unwrap_or(n);
    cnf.truncate(end);
    Ok(cnf)
}

// ---------------------------------------------------------------------------
// SYSTEM.CNF parsing
// ---------------------------------------------------------------------------

/// Locate the boot executable name in SYSTEM.CNF text.
///
/// Finds the first `boot` (any case), then takes whatever follows the last
/// `\` or `:` on that line. The returned slice runs to the end of `cnf`.
pub fn boot_file_name(cnf: &[u8]) -> Option<&[u8]> {
    let start = cnf
        .windows(4)
        .position(|w| w.eq_ignore_ascii_case(b"boot"))?;

    let mut boot_file = start;
    let mut pos = start;
    while pos < cnf.len() && cnf[pos] != b'\n' {
        if cnf[pos] == b'\\' || cnf[pos] == b':' {
            boot_file = pos + 1;
        }
        pos += 1;
    }
    Some(&cnf[boot_file..])
}

/// Build a serial from a boot executable name.
///
/// `SCES_123.45;1` becomes `SCES-12345`: the first four characters
/// (upper-cased), a dash, then the alphanumeric run that follows, with one
/// separator before it and `.` inside it dropped.
pub fn serial_from_boot_file(name: &[u8]) -> Option<GameId> {
    let prefix = name.get(..4)?;
    if !prefix.iter().all(u8::is_ascii_graphic) {
        return None;
    }

    let mut serial = GameId::new();
    for &b in prefix {
        serial.push(b.to_ascii_uppercase());
    }
    serial.push(b'-');

    let mut pos = prefix.len();
    if name.get(pos).is_some_and(|b| !b.is_ascii_alphanumeric()) {
        pos += 1;
    }

    let mut digits = 0;
    while let Some(&b) = name.get(pos) {
        if !b.is_ascii_alphanumeric() {
            break;
        }
        serial.push(b);
        digits += 1;
        pos += 1;
        if name.get(pos) == Some(&b'.') {
            pos += 1;
        }
    }

    (digits > 0).then_some(serial)
}

/// Map a PS1 serial prefix to a region.
pub fn serial_to_region(serial: &str) -> Option<Region> {
    let prefix = serial.get(..4)?.to_ascii_uppercase();
    match prefix.as_str() {
        "SLUS" | "SCUS" => Some(Region::Usa),
        "SLPS" | "SCPS" | "SLPM" | "SIPS" => Some(Region::Japan),
        "SLES" | "SCES" | "SCED" => Some(Region::Europe),
        "SLKA" | "SCKA" => Some(Region::Korea),
        "PAPX" | "PCPX" => Some(Region::Japan), // dev/promo discs, usually Japanese
        _ => None,
    }
}

#[cfg(test)]
#[path = "tests/ps1_disc_tests.rs"]
mod tests;
