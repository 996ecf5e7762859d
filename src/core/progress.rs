// Query progress packet whose trailing counters depend on the negotiated protocol version.
use std::io::Read;

use crate::core::buffer::{Buffer, EncodeAware};
use crate::core::error::{Error, ResultExt};
use crate::core::feature::Feature;
use crate::core::reader::{DecodeAware, Reader};

/// Counters reported by the server while a query runs.
///
/// `total_rows`, `wrote_rows` and `wrote_bytes` stay zero when the negotiated
/// version predates [`Feature::ClientWriteInfo`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Progress {
    pub rows: u64,
    pub bytes: u64,
    pub total_rows: u64,
    pub wrote_rows: u64,
    pub wrote_bytes: u64,
}

impl Progress {
    pub fn decode<R: Read>(r: &mut Reader<R>, version: u32) -> Result<Self, Error> {
        let mut p = Progress::default();
        p.decode_aware(r, version)?;
        Ok(p)
    }
}

impl DecodeAware for Progress {
    fn decode_aware<R: Read>(&mut self, r: &mut Reader<R>, version: u32) -> Result<(), Error> {
        self.rows = r.uvarint().context("rows")?;
        self.bytes = r.uvarint().context("bytes")?;
        if Feature::ClientWriteInfo.is_in(version) {
            self.total_rows = r.uvarint().context("total rows")?;
        }
        if Feature::ClientWriteInfo.is_in(version) {
            self.wrote_rows = r.uvarint().context("wrote rows")?;
            self.wrote_bytes = r.uvarint().context("wrote bytes")?;
        }
        Ok(())
    }
}

impl EncodeAware for Progress {
    fn encode_aware(&self, b: &mut Buffer, version: u32) {
        b.put_uvarint(self.rows);
        b.put_uvarint(self.bytes);
        if Feature::ClientWriteInfo.is_in(version) {
            b.put_uvarint(self.total_rows);
        }
        if Feature::ClientWriteInfo.is_in(version) {
            b.put_uvarint(self.wrote_rows);
            b.put_uvarint(self.wrote_bytes);
        }
    }
}
