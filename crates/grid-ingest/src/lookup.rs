//! Locates where the identifier rows of the dictionary block begin.

use std::io::BufRead;

use tracing::debug;

/// Byte position the lookup cursor rewinds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupStart {
    /// Offset of the line following the first target block header, or the
    /// end of input when no header exists.
    pub offset: u64,
    pub found: bool,
}

/// Scans from the beginning of `reader` for the first line starting with
/// `block_name` and returns the offset just past that line.
///
/// Unlike dictionary discovery, the leading comment header is not skipped.
///
/// # Errors
///
/// Returns an error if reading fails.
pub fn locate_lookup_start<R: BufRead>(
    mut reader: R,
    block_name: &str,
) -> std::io::Result<LookupStart> {
    let mut offset = 0u64;
    let mut line = String::new();
    loop {
        line.clear();
        let read = reader.read_line(&mut line)?;
        if read == 0 {
            debug!(block = %block_name, offset, "lookup block not found, lookups will read end of input");
            return Ok(LookupStart {
                offset,
                found: false,
            });
        }
        offset += read as u64;
        if line.starts_with(block_name) {
            debug!(block = %block_name, offset, "lookup start located");
            return Ok(LookupStart {
                offset,
                found: true,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_points_past_header_line() {
        let text = "-- header\nSATNUM\n1 2\n/\n";
        let start = locate_lookup_start(text.as_bytes(), "SATNUM").expect("locate");
        assert!(start.found);
        assert_eq!(&text[start.offset as usize..], "1 2\n/\n");
    }

    #[test]
    fn header_comments_are_scanned() {
        let text = "SATNUM in header\n-- more\nSATNUM\n1\n";
        let start = locate_lookup_start(text.as_bytes(), "SATNUM").expect("locate");
        assert_eq!(start.offset, "SATNUM in header\n".len() as u64);
    }

    #[test]
    fn missing_block_points_at_end() {
        let text = "-- header\nPORO\n0.1\n/\n";
        let start = locate_lookup_start(text.as_bytes(), "SATNUM").expect("locate");
        assert!(!start.found);
        assert_eq!(start.offset, text.len() as u64);
    }
}
