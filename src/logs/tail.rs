//! Bounded reverse-scan tail reader.
//!
//! Reads backwards in fixed-size chunks until enough line starts have been
//! seen, so memory use is bounded by the returned tail plus one chunk.

use std::io::{self, Read, Seek, SeekFrom};

const CHUNK_SIZE: u64 = 8 * 1024;

/// Return the last `lines` lines of `reader`, terminators included.
///
/// A final line without a trailing newline still counts as a line.
pub fn tail_lines<R: Read + Seek>(reader: &mut R, lines: usize) -> io::Result<Vec<u8>> {
    let len = reader.seek(SeekFrom::End(0))?;
    if lines == 0 || len == 0 {
        return Ok(Vec::new());
    }

    let start = tail_start(reader, len, lines)?;

    reader.seek(SeekFrom::Start(start))?;
    let mut out = Vec::with_capacity((len - start) as usize);
    reader.take(len - start).read_to_end(&mut out)?;
    Ok(out)
}

/// Offset of the first byte of the `lines`-th line counted from the end.
fn tail_start<R: Read + Seek>(reader: &mut R, len: u64, lines: usize) -> io::Result<u64> {
    // A trailing newline terminates the last line rather than starting a new one.
    let mut end = len;
    if last_byte(reader, len)? == b'\n' {
        end -= 1;
    }

    let mut seen = 0usize;
    let mut buf = vec![0u8; CHUNK_SIZE as usize];

    while end > 0 {
        let chunk_start = end.saturating_sub(CHUNK_SIZE);
        let chunk = &mut buf[..(end - chunk_start) as usize];
        reader.seek(SeekFrom::Start(chunk_start))?;
        reader.read_exact(chunk)?;

        for (i, byte) in chunk.iter().enumerate().rev() {
            if *byte == b'\n' {
                seen += 1;
                if seen == lines {
                    return Ok(chunk_start + i as u64 + 1);
                }
            }
        }
        end = chunk_start;
    }

    Ok(0)
}

fn last_byte<R: Read + Seek>(reader: &mut R, len: u64) -> io::Result<u8> {
    let mut byte = [0u8; 1];
    reader.seek(SeekFrom::Start(len - 1))?;
    reader.read_exact(&mut byte)?;
    Ok(byte[0])
}
