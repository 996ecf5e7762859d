//! Purpose: Growable byte sink for encoding and reusable scratch space for decoding.
//! Exports: `Buffer`, `Encode`, `EncodeAware`.
//! Role: Every `put_*` mirrors a `Reader` primitive byte-for-byte.
//! Invariants: `ensure(n)` leaves exactly `n` bytes and discards prior contents.
//! Invariants: `reset()` truncates to zero but keeps the allocation for reuse.
use bytes::Bytes;

pub(crate) const BOOL_FALSE: u8 = 0;
pub(crate) const BOOL_TRUE: u8 = 1;

/// Value that can be written to a [`Buffer`] independently of protocol version.
pub trait Encode {
    fn encode(&self, b: &mut Buffer);
}

/// Value whose wire shape depends on the negotiated protocol version.
pub trait EncodeAware {
    fn encode_aware(&self, b: &mut Buffer, version: u32);
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Buffer {
    buf: Vec<u8>,
}

impl Buffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Resizes to exactly `n` zeroed bytes, reusing capacity when possible.
    pub fn ensure(&mut self, n: usize) {
        self.buf.clear();
        self.buf.resize(n, 0);
    }

    pub fn reset(&mut self) {
        self.buf.clear();
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn reserve(&mut self, additional: usize) {
        self.buf.reserve(additional);
    }

    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.buf
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.buf
    }

    pub fn encode(&mut self, v: &impl Encode) {
        v.encode(self);
    }

    pub fn encode_aware(&mut self, v: &impl EncodeAware, version: u32) {
        v.encode_aware(self, version);
    }

    pub fn put_raw(&mut self, v: &[u8]) {
        self.buf.extend_from_slice(v);
    }

    pub fn put_uvarint(&mut self, v: u64) {
        leb128::write::unsigned(&mut self.buf, v).expect("Vec write");
    }

    /// Lengths are stored as uvarint; negative values never reach the wire.
    pub fn put_int(&mut self, v: usize) {
        self.put_uvarint(v as u64);
    }

    pub fn put_bool(&mut self, v: bool) {
        self.buf.push(if v { BOOL_TRUE } else { BOOL_FALSE });
    }

    pub fn put_uint8(&mut self, v: u8) {
        self.buf.push(v);
    }

    pub fn put_uint16(&mut self, v: u16) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn put_uint32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn put_uint64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn put_int8(&mut self, v: i8) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn put_int16(&mut self, v: i16) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn put_int32(&mut self, v: i32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn put_int64(&mut self, v: i64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn put_bytes(&mut self, v: &[u8]) {
        self.put_int(v.len());
        self.put_raw(v);
    }

    pub fn put_str(&mut self, v: &str) {
        self.put_bytes(v.as_bytes());
    }
}

impl AsRef<[u8]> for Buffer {
    fn as_ref(&self) -> &[u8] {
        &self.buf
    }
}

impl From<Buffer> for Bytes {
    fn from(b: Buffer) -> Self {
        Bytes::from(b.buf)
    }
}

impl From<Vec<u8>> for Buffer {
    fn from(buf: Vec<u8>) -> Self {
        Self { buf }
    }
}
