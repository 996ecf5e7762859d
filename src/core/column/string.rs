// String column: each row is a uvarint length followed by raw bytes.
use std::io::Read;

use tracing::trace;

use super::{Column, ColumnType};
use crate::core::buffer::Buffer;
use crate::core::error::Error;
use crate::core::reader::Reader;

/// Rows share one backing allocation; `ends[i]` is the exclusive end of row `i`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ColStr {
    buf: Vec<u8>,
    ends: Vec<usize>,
}

impl ColStr {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, v: impl AsRef<[u8]>) {
        self.buf.extend_from_slice(v.as_ref());
        self.ends.push(self.buf.len());
    }

    /// Bytes of row `i`, or `None` past the last row.
    pub fn row(&self, i: usize) -> Option<&[u8]> {
        let end = *self.ends.get(i)?;
        let start = if i == 0 { 0 } else { self.ends[i - 1] };
        Some(&self.buf[start..end])
    }

    /// Row `i` decoded as UTF-8, if present and well-formed.
    pub fn row_str(&self, i: usize) -> Option<&str> {
        self.row(i).and_then(|bytes| std::str::from_utf8(bytes).ok())
    }

    pub fn iter(&self) -> impl Iterator<Item = &[u8]> + '_ {
        (0..self.ends.len()).filter_map(move |i| self.row(i))
    }
}

impl<S: AsRef<[u8]>> FromIterator<S> for ColStr {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut col = ColStr::new();
        for v in iter {
            col.push(v);
        }
        col
    }
}

impl Column for ColStr {
    fn column_type(&self) -> ColumnType {
        ColumnType::String
    }

    fn rows(&self) -> usize {
        self.ends.len()
    }

    fn reset(&mut self) {
        self.buf.clear();
        self.ends.clear();
    }

    fn encode_column(&self, b: &mut Buffer) {
        for row in self.iter() {
            b.put_bytes(row);
        }
    }

    fn decode_column<R: Read>(&mut self, r: &mut Reader<R>, rows: usize) -> Result<(), Error> {
        self.reset();
        for row in 0..rows {
            r.str_append(&mut self.buf)
                .map_err(|err| err.with_context(format!("row {row}")))?;
            self.ends.push(self.buf.len());
        }
        trace!(column = %ColumnType::String, rows, bytes = self.buf.len(), "decoded column");
        Ok(())
    }
}
