//! Disc image identification.
//!
//! Entry points:
//!
//! - [`detect_system`]: classify an image by its magic numbers
//! - [`detect_ps1_serial`], [`detect_psp_serial`], [`detect_ascii_serial`]:
//!   per-format serial extraction
//! - [`identify`]: both of the above in one call
//! - [`find_first_data_track`]: resolve a CUE sheet to its data track
//!
//! All of them take a stream the caller owns and uses exclusively for the
//! duration of the call.

pub mod ascii;
pub mod identify;
pub mod magic;

pub use ascii::detect_ascii_serial;
pub use identify::{Identification, identify};
pub use magic::{MAGIC_NUMBERS, MagicEntry, detect_system};

pub use disc_sniff_core::{
    DiscError, GAME_ID_CAPACITY, GameId, ReadSeek, Region, ScanLimits, System,
};
pub use disc_sniff_cue::{DataTrack, Msf, find_first_data_track, find_first_data_track_in};
pub use disc_sniff_sony::{FrameGeometry, detect_ps1_serial, detect_psp_serial};
