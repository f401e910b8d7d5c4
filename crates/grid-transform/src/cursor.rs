//! Secondary read cursor over the grid file.

use std::io::{BufRead, Seek, SeekFrom};

/// Independent reader positioned on the identifier rows of the dictionary
/// block. It is rewound to a recorded byte offset rather than re-scanned.
#[derive(Debug)]
pub struct LookupCursor<R> {
    reader: R,
    start: u64,
    line: String,
}

impl<R: BufRead + Seek> LookupCursor<R> {
    /// Creates a cursor and positions it at `start`.
    ///
    /// # Errors
    ///
    /// Returns an error if seeking fails.
    pub fn new(reader: R, start: u64) -> std::io::Result<Self> {
        let mut cursor = Self {
            reader,
            start,
            line: String::new(),
        };
        cursor.rewind()?;
        Ok(cursor)
    }

    pub fn rewind(&mut self) -> std::io::Result<()> {
        self.reader.seek(SeekFrom::Start(self.start))?;
        Ok(())
    }

    /// Reads the next identifier row. Returns an empty string at end of input.
    pub fn next_line(&mut self) -> std::io::Result<&str> {
        self.line.clear();
        self.reader.read_line(&mut self.line)?;
        Ok(&self.line)
    }
}
