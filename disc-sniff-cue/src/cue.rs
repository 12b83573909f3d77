//! Locate the first data track of a CUE sheet.
//!
//! Only the keywords needed for that are understood: `FILE` sets the
//! current backing file, `TRACK` names a track and its type, and the first
//! `INDEX` after a non-audio `TRACK` gives its start time. Everything else
//! is skipped token by token.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use disc_sniff_core::DiscError;

use crate::tokenizer::{MAX_TOKEN_LEN, Token, find_token, read_token};

/// CD frames per second of audio.
const FRAMES_PER_SECOND: i32 = 75;

/// An `MM:SS:FF` CUE timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Msf {
    pub minutes: i32,
    pub seconds: i32,
    pub frames: i32,
}

impl Msf {
    /// Parse `MM:SS:FF`, each field one or two decimal digits.
    ///
    /// Anything after the frames field is ignored.
    pub fn parse(text: &[u8]) -> Option<Self> {
        let mut fields = [0i32; 3];
        let mut pos = 0;
        for (i, field) in fields.iter_mut().enumerate() {
            if i > 0 {
                if text.get(pos) != Some(&b':') {
                    return None;
                }
                pos += 1;
            }
            let digits = text[pos..]
                .iter()
                .take(2)
                .take_while(|b| b.is_ascii_digit())
                .count();
            if digits == 0 {
                return None;
            }
            *field = text[pos..pos + digits]
                .iter()
                .fold(0, |acc, &b| acc * 10 + i32::from(b - b'0'));
            pos += digits;
        }
        Some(Self {
            minutes: fields[0],
            seconds: fields[1],
            frames: fields[2],
        })
    }

    /// Offset reported for this timestamp: `((m * 60) * (s * 75) * f) * 25`.
    ///
    /// Not the CD sector address (see [`Msf::sector`]). Overflow wraps.
    pub fn offset(&self) -> i32 {
        self.minutes
            .wrapping_mul(60)
            .wrapping_mul(self.seconds.wrapping_mul(FRAMES_PER_SECOND))
            .wrapping_mul(self.frames)
            .wrapping_mul(25)
    }

    /// Conventional sector number: `(m * 60 + s) * 75 + f`.
    pub fn sector(&self) -> i32 {
        (self.minutes * 60 + self.seconds) * FRAMES_PER_SECOND + self.frames
    }
}

/// The first data track of a CUE sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataTrack {
    /// Backing file, joined onto the CUE sheet's directory.
    pub path: PathBuf,
    /// Start offset as computed by [`Msf::offset`].
    pub offset: i32,
    /// The raw `INDEX` timestamp the offset was computed from.
    pub index: Msf,
}

/// Open `cue_path` and find its first non-audio track.
///
/// `FILE` paths are resolved against the directory containing `cue_path`.
pub fn find_first_data_track(cue_path: &Path) -> Result<DataTrack, DiscError> {
    let file = File::open(cue_path).inspect_err(|e| {
        log::warn!("Could not open CUE file '{}': {e}", cue_path.display());
    })?;
    log::debug!("Parsing CUE file '{}'", cue_path.display());

    let cue_dir = cue_path.parent().unwrap_or_else(|| Path::new(""));
    find_first_data_track_in(&mut BufReader::new(file), cue_dir)
}

/// A `FILE` name as written in the sheet.
///
/// Unix paths keep the raw bytes so Shift-JIS names still resolve.
#[cfg(unix)]
fn file_name(token: &Token) -> PathBuf {
    use std::os::unix::ffi::OsStrExt;
    PathBuf::from(std::ffi::OsStr::from_bytes(token.as_bytes()))
}

#[cfg(not(unix))]
fn file_name(token: &Token) -> PathBuf {
    PathBuf::from(token.to_str_lossy().into_owned())
}

/// Find the first non-audio track in an already-open CUE sheet.
///
/// `FILE` paths are resolved against `cue_dir`.
pub fn find_first_data_track_in<R: Read + ?Sized>(
    reader: &mut R,
    cue_dir: &Path,
) -> Result<DataTrack, DiscError> {
    let mut token = Token::new();
    let mut track_path: Option<PathBuf> = None;

    while read_token(reader, &mut token, MAX_TOKEN_LEN)? > 0 {
        if token == "FILE" {
            if read_token(reader, &mut token, MAX_TOKEN_LEN)? == 0 {
                break;
            }
            let path = cue_dir.join(file_name(&token));
            log::debug!("CUE FILE entry: {}", path.display());
            track_path = Some(path);
        } else if token == "TRACK" {
            // Track number, then track type
            read_token(reader, &mut token, MAX_TOKEN_LEN)?;
            read_token(reader, &mut token, MAX_TOKEN_LEN)?;
            if token == "AUDIO" {
                continue;
            }

            find_token(reader, "INDEX")?;
            // Index number, then timestamp
            read_token(reader, &mut token, MAX_TOKEN_LEN)?;
            read_token(reader, &mut token, MAX_TOKEN_LEN)?;

            let index = Msf::parse(token.as_bytes()).ok_or_else(|| {
                log::warn!("Error parsing time stamp '{}'", token.to_str_lossy());
                DiscError::invalid_format(format!(
                    "bad INDEX timestamp '{}'",
                    token.to_str_lossy()
                ))
            })?;
            let path = track_path
                .ok_or_else(|| DiscError::invalid_format("TRACK before any FILE entry"))?;

            return Ok(DataTrack {
                path,
                offset: index.offset(),
                index,
            });
        }
    }

    Err(DiscError::NoDataTrack)
}

#[cfg(test)]
#[path = "tests/cue_tests.rs"]
mod tests;
