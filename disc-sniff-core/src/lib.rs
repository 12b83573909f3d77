use std::io::{Read, Seek};

pub mod error;
pub mod region;
pub mod settings;
pub mod system;
pub mod util;

pub use error::DiscError;
pub use region::Region;
pub use settings::ScanLimits;
pub use system::{System, SystemParseError};

/// A reader that implements both Read and Seek.
///
/// Every detector takes `&mut dyn ReadSeek` and has exclusive use of the
/// stream for the duration of the call. Where the stream is left
/// positioned afterwards is unspecified.
pub trait ReadSeek: Read + Seek {}
impl<T: Read + Seek> ReadSeek for T {}

/// Size of a game id buffer in the C convention, terminator included.
pub const GAME_ID_CAPACITY: usize = 16;

/// A game serial such as `SCES-12345` or `ULUS-10041`.
///
/// Holds at most `GAME_ID_CAPACITY - 1` ASCII characters; pushing past that
/// truncates silently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct GameId(String);

impl GameId {
    pub fn new() -> Self {
        Self(String::with_capacity(GAME_ID_CAPACITY - 1))
    }

    /// Build an id from raw bytes, truncating at capacity.
    ///
    /// Returns `None` if any kept byte is not ASCII.
    pub fn from_ascii(bytes: &[u8]) -> Option<Self> {
        let mut id = Self::new();
        for &b in bytes.iter().take(GAME_ID_CAPACITY - 1) {
            if !id.push(b) {
                return None;
            }
        }
        Some(id)
    }

    /// Append one ASCII byte.
    ///
    /// Returns `false` (leaving the id unchanged) for non-ASCII input. A full
    /// id drops the byte and still returns `true`.
    pub fn push(&mut self, b: u8) -> bool {
        if !b.is_ascii() {
            return false;
        }
        if self.0.len() < GAME_ID_CAPACITY - 1 {
            self.0.push(b as char);
        }
        true
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for GameId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for GameId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for GameId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_id_truncates_at_capacity() {
        let id = GameId::from_ascii(b"ABCDEFGHIJKLMNOPQRSTUVWXYZ").unwrap();
        assert_eq!(id.len(), GAME_ID_CAPACITY - 1);
        assert_eq!(id, "ABCDEFGHIJKLMNO");
    }

    #[test]
    fn test_game_id_rejects_non_ascii() {
        assert!(GameId::from_ascii(b"SLUS\xC3").is_none());
        let mut id = GameId::new();
        assert!(!id.push(0x82));
        assert!(id.is_empty());
    }

    #[test]
    fn test_game_id_display() {
        let id = GameId::from_ascii(b"SCES-12345").unwrap();
        assert_eq!(id.to_string(), "SCES-12345");
        assert_eq!(id.into_string(), "SCES-12345");
    }
}
