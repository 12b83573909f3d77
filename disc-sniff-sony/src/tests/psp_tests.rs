use super::*;
use std::io::Cursor;

/// Zero-filled image with `text` written at `offset`.
fn image_with(len: usize, offset: usize, text: &[u8]) -> Cursor<Vec<u8>> {
    let mut data = vec![0u8; len];
    data[offset..offset + text.len()].copy_from_slice(text);
    Cursor::new(data)
}

#[test]
fn test_finds_umd_serial() {
    let mut cursor = image_with(0x10000, 0x8373, b"ULUS-10041|0001");
    let serial = detect_psp_serial(&mut cursor, 100_000).unwrap();
    assert_eq!(serial, "ULUS-10041");
}

#[test]
fn test_finds_psn_serial_at_offset_zero() {
    let mut cursor = image_with(64, 0, b"NPJH-50001");
    assert_eq!(detect_psp_serial(&mut cursor, 100_000).unwrap(), "NPJH-50001");
}

#[test]
fn test_first_match_wins() {
    let mut data = vec![0u8; 4096];
    data[100..110].copy_from_slice(b"UCES-00001");
    data[200..210].copy_from_slice(b"ULES-00002");
    let mut cursor = Cursor::new(data);
    assert_eq!(detect_psp_serial(&mut cursor, 100_000).unwrap(), "UCES-00001");
}

#[test]
fn test_unknown_prefix_ignored() {
    let mut cursor = image_with(4096, 16, b"ULXS-12345");
    let err = detect_psp_serial(&mut cursor, 100_000).unwrap_err();
    assert!(matches!(err, DiscError::NotFound(_)));
}

#[test]
fn test_prefix_without_dash_ignored() {
    let mut cursor = image_with(4096, 16, b"ULUS10041");
    assert!(detect_psp_serial(&mut cursor, 100_000).is_err());
}

#[test]
fn test_window_bounds_scan() {
    let mut cursor = image_with(0x10000, 0x8000, b"ULJM-05001");
    assert!(detect_psp_serial(&mut cursor, 0x8000).is_err());
    assert_eq!(detect_psp_serial(&mut cursor, 0x8001).unwrap(), "ULJM-05001");
}

#[test]
fn test_truncated_serial_fails() {
    let mut cursor = image_with(24, 16, b"ULES-123");
    let err = detect_psp_serial(&mut cursor, 100_000).unwrap_err();
    assert!(matches!(err, DiscError::NotFound(_)));
}

#[test]
fn test_empty_stream() {
    let mut cursor = Cursor::new(Vec::new());
    assert!(matches!(
        detect_psp_serial(&mut cursor, 100_000),
        Err(DiscError::NotFound(_))
    ));
}

#[test]
fn test_repeat_scan_is_stable() {
    let mut cursor = image_with(0x1000, 0x123, b"NPUZ-00123");
    let first = detect_psp_serial(&mut cursor, 100_000).unwrap();
    let second = detect_psp_serial(&mut cursor, 100_000).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_serial_to_region() {
    assert_eq!(serial_to_region("ULUS-10041"), Some(Region::Usa));
    assert_eq!(serial_to_region("ULES-00151"), Some(Region::Europe));
    assert_eq!(serial_to_region("ULJM-05001"), Some(Region::Japan));
    assert_eq!(serial_to_region("UCAS-40001"), Some(Region::Asia));
    assert_eq!(serial_to_region("NPHG-00001"), Some(Region::Asia));
    assert_eq!(serial_to_region("SLUS-00001"), None);
    assert_eq!(serial_to_region("U"), None);
}
