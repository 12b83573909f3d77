use super::*;
use std::io::{self, Cursor};

/// Collect every token until end of stream.
fn tokens(input: &[u8], max_len: usize) -> Vec<String> {
    let mut cursor = Cursor::new(input.to_vec());
    let mut token = Token::new();
    let mut out = Vec::new();
    while read_token(&mut cursor, &mut token, max_len).unwrap() > 0 {
        out.push(token.to_str_lossy().into_owned());
    }
    out
}

/// Reader that fails with `kind` on the first `failures` calls, then
/// serves `data`.
struct FlakyReader {
    data: Cursor<Vec<u8>>,
    failures: usize,
    kind: io::ErrorKind,
}

impl Read for FlakyReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.failures > 0 {
            self.failures -= 1;
            return Err(io::Error::new(self.kind, "flaky"));
        }
        self.data.read(buf)
    }
}

#[test]
fn test_splits_on_all_whitespace() {
    assert_eq!(
        tokens(b"FILE\tgame.bin\r\nBINARY  \n", MAX_TOKEN_LEN),
        vec!["FILE", "game.bin", "BINARY"]
    );
}

#[test]
fn test_quoted_token_keeps_spaces() {
    assert_eq!(
        tokens(b"FILE \"My Game (Track 1).bin\" BINARY", MAX_TOKEN_LEN),
        vec!["FILE", "My Game (Track 1).bin", "BINARY"]
    );
}

#[test]
fn test_quote_ends_unquoted_token() {
    assert_eq!(tokens(b"abc\"def", MAX_TOKEN_LEN), vec!["abc", "def"]);
}

#[test]
fn test_empty_quotes_are_skipped() {
    assert_eq!(tokens(b"\"\" BINARY", MAX_TOKEN_LEN), vec!["BINARY"]);
}

#[test]
fn test_final_token_without_terminator() {
    assert_eq!(tokens(b"INDEX 01 00:02:00", MAX_TOKEN_LEN), vec!["INDEX", "01", "00:02:00"]);
}

#[test]
fn test_end_of_stream_returns_zero() {
    let mut cursor = Cursor::new(b"   \r\n\t".to_vec());
    let mut token = Token::new();
    assert_eq!(read_token(&mut cursor, &mut token, MAX_TOKEN_LEN).unwrap(), 0);
    assert!(token.is_empty());
}

#[test]
fn test_truncates_and_leaves_remainder() {
    assert_eq!(tokens(b"INDEXES 01", 5), vec!["INDEX", "ES", "01"]);
}

#[test]
fn test_long_token_truncated_at_capacity() {
    let long = vec![b'A'; MAX_TOKEN_LEN + 10];
    let mut cursor = Cursor::new(long);
    let mut token = Token::new();
    assert_eq!(
        read_token(&mut cursor, &mut token, usize::MAX).unwrap(),
        MAX_TOKEN_LEN
    );
    assert_eq!(read_token(&mut cursor, &mut token, MAX_TOKEN_LEN).unwrap(), 10);
}

#[test]
fn test_retries_interrupted_reads() {
    for kind in [io::ErrorKind::Interrupted, io::ErrorKind::WouldBlock] {
        let mut reader = FlakyReader {
            data: Cursor::new(b"TRACK".to_vec()),
            failures: 3,
            kind,
        };
        let mut token = Token::new();
        assert_eq!(read_token(&mut reader, &mut token, MAX_TOKEN_LEN).unwrap(), 5);
        assert_eq!(token, "TRACK");
    }
}

#[test]
fn test_other_read_errors_propagate() {
    let mut reader = FlakyReader {
        data: Cursor::new(b"TRACK".to_vec()),
        failures: 1,
        kind: io::ErrorKind::PermissionDenied,
    };
    let mut token = Token::new();
    let err = read_token(&mut reader, &mut token, MAX_TOKEN_LEN).unwrap_err();
    assert!(err.is_io());
}

#[test]
fn test_find_token_skips_unrelated_tokens() {
    let mut cursor = Cursor::new(b"PREGAP 00:02:00 INDEX 01 00:00:00".to_vec());
    find_token(&mut cursor, "INDEX").unwrap();
    let mut token = Token::new();
    read_token(&mut cursor, &mut token, MAX_TOKEN_LEN).unwrap();
    assert_eq!(token, "01");
}

#[test]
fn test_find_token_matches_prefix_of_longer_token() {
    let mut cursor = Cursor::new(b"FLAGS INDEXED 01".to_vec());
    find_token(&mut cursor, "INDEX").unwrap();
    let mut token = Token::new();
    read_token(&mut cursor, &mut token, MAX_TOKEN_LEN).unwrap();
    assert_eq!(token, "ED");
}

#[test]
fn test_find_token_not_found() {
    let mut cursor = Cursor::new(b"TRACK 01 MODE1/2352".to_vec());
    let err = find_token(&mut cursor, "INDEX").unwrap_err();
    assert!(matches!(err, DiscError::NotFound(_)));
}
