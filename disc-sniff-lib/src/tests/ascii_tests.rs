use super::*;
use std::io::Cursor;

fn scan(data: &[u8]) -> Result<GameId, DiscError> {
    let mut cursor = Cursor::new(data.to_vec());
    detect_ascii_serial(&mut cursor, 10_000)
}

#[test]
fn test_run_length_bounds() {
    assert!(!is_serial_run(3));
    assert!(is_serial_run(4));
    assert!(is_serial_run(8));
    assert!(!is_serial_run(9));
}

#[test]
fn test_serial_run_len() {
    assert_eq!(serial_run_len(b"RMCE01\0\0"), 6);
    assert_eq!(serial_run_len(b"ABC-123 x"), 7);
    assert_eq!(serial_run_len(b"abcd"), 0);
    assert_eq!(serial_run_len(b""), 0);
}

#[test]
fn test_wii_game_code() {
    let mut data = b"RMCE01".to_vec();
    data.resize(0x100, 0);
    assert_eq!(scan(&data).unwrap(), "RMCE01");
}

#[test]
fn test_run_of_four_accepted() {
    assert_eq!(scan(b"ABCD\0\0\0\0").unwrap(), "ABCD");
}

#[test]
fn test_run_of_eight_accepted() {
    assert_eq!(scan(b"ABCDEFGH\0\0").unwrap(), "ABCDEFGH");
}

#[test]
fn test_run_of_three_rejected() {
    assert!(matches!(scan(b"ABC\0\0\0\0\0"), Err(DiscError::NotFound(_))));
}

#[test]
fn test_run_of_nine_rejected_at_its_start() {
    // Offset 0 sees nine characters; offset 1 sees the last eight
    assert_eq!(scan(b"ABCDEFGHI\0\0").unwrap(), "BCDEFGHI");
}

#[test]
fn test_leading_garbage_skipped() {
    assert_eq!(scan(b"\x01\x02abc GALE01\0").unwrap(), "GALE01");
}

#[test]
fn test_run_at_end_of_stream() {
    assert_eq!(scan(b"\0\0\0\0SLUS").unwrap(), "SLUS");
}

#[test]
fn test_lowercase_rejected() {
    assert!(scan(b"rmce01\0\0").is_err());
}

#[test]
fn test_window_bounds_scan() {
    let mut data = vec![0u8; 64];
    data[32..38].copy_from_slice(b"RMCE01");
    let mut cursor = Cursor::new(data);
    assert!(detect_ascii_serial(&mut cursor, 32).is_err());
    assert_eq!(detect_ascii_serial(&mut cursor, 33).unwrap(), "RMCE01");
}

#[test]
fn test_empty_stream() {
    assert!(matches!(scan(b""), Err(DiscError::NotFound(_))));
}
