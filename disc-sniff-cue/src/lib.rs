//! CUE sheet support.
//!
//! A small tokenizer and a locator that resolves the first data track of a
//! sheet to its backing file and start offset. Full CUE semantics (gaps,
//! multi-session layouts, CD-TEXT) are not modelled.

pub mod cue;
pub mod tokenizer;

pub use cue::{DataTrack, Msf, find_first_data_track, find_first_data_track_in};
pub use tokenizer::{MAX_TOKEN_LEN, Token, find_token, read_token};
