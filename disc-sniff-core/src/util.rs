use std::io::{self, ErrorKind, SeekFrom};

use crate::ReadSeek;

/// Total length of a stream, found by seeking to its end.
///
/// Leaves the stream positioned at the end.
pub fn stream_len(reader: &mut dyn ReadSeek) -> io::Result<u64> {
    reader.seek(SeekFrom::End(0))
}

/// Seek to `offset` and read as many bytes as are available, up to `buf.len()`.
///
/// Returns the number of bytes read; fewer than requested means the stream
/// ended. Interrupted reads are retried.
pub fn read_at(reader: &mut dyn ReadSeek, offset: u64, buf: &mut [u8]) -> io::Result<usize> {
    reader.seek(SeekFrom::Start(offset))?;
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Seek to `offset` and fill `buf` completely.
///
/// A short stream is an `UnexpectedEof` error.
pub fn read_exact_at(reader: &mut dyn ReadSeek, offset: u64, buf: &mut [u8]) -> io::Result<()> {
    reader.seek(SeekFrom::Start(offset))?;
    reader.read_exact(buf)
}

/// Little-endian 24-bit value at `buf[at..at + 3]`, or `None` if out of bounds.
pub fn u24_le_at(buf: &[u8], at: usize) -> Option<u32> {
    let bytes = buf.get(at..at.checked_add(3)?)?;
    Some(u32::from(bytes[0]) | (u32::from(bytes[1]) << 8) | (u32::from(bytes[2]) << 16))
}
