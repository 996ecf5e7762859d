//! Purpose: Bounds-checked decode primitives over a buffered byte source.
//! Exports: `Reader`, `ReaderOptions`, `Decode`, `DecodeAware`, `MAX_STR_SIZE`.
//! Role: The only place raw inbound bytes are interpreted; columns and packets build on it.
//! Invariants: Lengths above `MAX_STR_SIZE` are rejected before any allocation.
//! Invariants: Short reads surface as `ErrorKind::UnexpectedEof` through every context wrap.
//! Invariants: Slices borrowed from the scratch buffer cannot outlive the next `&mut self` call.
use std::io::{BufReader, Read};

use tracing::debug;

use crate::core::buffer::{BOOL_FALSE, BOOL_TRUE, Buffer};
use crate::core::error::{Error, ErrorKind, ResultExt};

/// Largest accepted length prefix for strings and byte runs (10 MiB).
pub const MAX_STR_SIZE: usize = 10 * 1024 * 1024;

const DEFAULT_READER_SIZE: usize = 1024;

/// Longest uvarint that can carry a 64-bit value.
const MAX_VARINT_LEN: u64 = 10;

/// Value that can be read from a [`Reader`] independently of protocol version.
pub trait Decode {
    fn decode<R: Read>(&mut self, r: &mut Reader<R>) -> Result<(), Error>;
}

/// Value whose wire shape depends on the negotiated protocol version.
pub trait DecodeAware {
    fn decode_aware<R: Read>(&mut self, r: &mut Reader<R>, version: u32) -> Result<(), Error>;
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ReaderOptions {
    pub buffer_size: usize,
}

impl ReaderOptions {
    pub fn new() -> Self {
        Self {
            buffer_size: DEFAULT_READER_SIZE,
        }
    }

    pub fn buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size.max(1);
        self
    }
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct Reader<R> {
    s: BufReader<R>,
    b: Buffer,
}

impl<R: Read> Reader<R> {
    pub fn new(source: R) -> Self {
        Self::with_options(source, ReaderOptions::new())
    }

    pub fn with_options(source: R, options: ReaderOptions) -> Self {
        Self {
            s: BufReader::with_capacity(options.buffer_size, source),
            b: Buffer::new(),
        }
    }

    /// Returns the underlying source; bytes already read ahead are dropped.
    pub fn into_inner(self) -> R {
        self.s.into_inner()
    }

    pub fn decode(&mut self, v: &mut impl Decode) -> Result<(), Error> {
        v.decode(self)
    }

    pub fn decode_aware(&mut self, v: &mut impl DecodeAware, version: u32) -> Result<(), Error> {
        v.decode_aware(self, version)
    }

    /// Fills `dst` completely or fails.
    pub fn read_full(&mut self, dst: &mut [u8]) -> Result<(), Error> {
        self.s.read_exact(dst)?;
        Ok(())
    }

    /// Reads exactly `n` bytes into a fresh, owned vector.
    pub fn read_raw(&mut self, n: usize) -> Result<Vec<u8>, Error> {
        let mut out = vec![0u8; n];
        self.read_full(&mut out).context("read full")?;
        Ok(out)
    }

    /// Reads exactly `n` bytes into the scratch buffer and lends them out.
    pub fn read_scratch(&mut self, n: usize) -> Result<&[u8], Error> {
        self.b.ensure(n);
        self.s.read_exact(self.b.as_mut_slice())?;
        Ok(self.b.as_slice())
    }

    /// Invalidates scratch contents while keeping the allocation.
    pub fn release_scratch(&mut self) {
        self.b.reset();
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], Error> {
        let buf = self.read_scratch(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(buf);
        Ok(out)
    }

    /// Decodes a LEB128 uvarint, consuming at most `MAX_VARINT_LEN` bytes.
    pub fn uvarint(&mut self) -> Result<u64, Error> {
        let mut src = (&mut self.s).take(MAX_VARINT_LEN);
        let res = leb128::read::unsigned(&mut src);
        // Running out of the window means the value needs an 11th byte.
        let exhausted = src.limit() == 0;
        res.map_err(|err| match err {
            leb128::read::Error::IoError(err) if !exhausted => {
                Error::from(err).with_context("read")
            }
            _ => {
                debug!(max = MAX_VARINT_LEN, "rejecting overlong uvarint");
                Error::new(ErrorKind::Malformed).with_message("varint overflows a 64-bit integer")
            }
        })
    }

    /// Decodes a uvarint reinterpreted as two's-complement `i64`.
    ///
    /// Values above `i64::MAX` come back negative; length consumers must reject them.
    pub fn int(&mut self) -> Result<i64, Error> {
        let n = self.uvarint().context("uvarint")?;
        Ok(n as i64)
    }

    pub fn int8(&mut self) -> Result<i8, Error> {
        Ok(i8::from_le_bytes(self.array().context("read")?))
    }

    pub fn int16(&mut self) -> Result<i16, Error> {
        Ok(i16::from_le_bytes(self.array().context("read")?))
    }

    pub fn int32(&mut self) -> Result<i32, Error> {
        Ok(i32::from_le_bytes(self.array().context("read")?))
    }

    pub fn int64(&mut self) -> Result<i64, Error> {
        Ok(i64::from_le_bytes(self.array().context("read")?))
    }

    pub fn uint8(&mut self) -> Result<u8, Error> {
        let [v] = self.array::<1>().context("read")?;
        Ok(v)
    }

    pub fn uint16(&mut self) -> Result<u16, Error> {
        Ok(u16::from_le_bytes(self.array().context("read")?))
    }

    pub fn uint32(&mut self) -> Result<u32, Error> {
        Ok(u32::from_le_bytes(self.array().context("read")?))
    }

    pub fn uint64(&mut self) -> Result<u64, Error> {
        Ok(u64::from_le_bytes(self.array().context("read")?))
    }

    pub fn bool(&mut self) -> Result<bool, Error> {
        let v = self.uint8().context("uint8")?;
        match v {
            BOOL_TRUE => Ok(true),
            BOOL_FALSE => Ok(false),
            _ => {
                debug!(value = v, "rejected boolean byte");
                Err(Error::new(ErrorKind::Malformed)
                    .with_message(format!("unexpected value {v} for boolean")))
            }
        }
    }

    /// Decodes a length-prefixed byte run into the scratch buffer.
    pub fn str_raw(&mut self) -> Result<&[u8], Error> {
        let n = self.int().context("read length")?;
        if n < 0 {
            debug!(size = n, "rejected negative length");
            return Err(Error::new(ErrorKind::Malformed).with_message(format!("size {n} is invalid")));
        }
        if n > MAX_STR_SIZE as i64 {
            debug!(size = n, max = MAX_STR_SIZE, "rejected oversized length");
            return Err(Error::new(ErrorKind::LimitExceeded)
                .with_message(format!("size {n} too big ({MAX_STR_SIZE} is maximum)")));
        }
        self.read_scratch(n as usize).context("read str")
    }

    /// Appends a decoded byte run to `dst`; scratch is released on every exit path.
    pub fn str_append(&mut self, dst: &mut Vec<u8>) -> Result<(), Error> {
        let result = match self.str_raw() {
            Ok(raw) => {
                dst.extend_from_slice(raw);
                Ok(())
            }
            Err(err) => Err(err.with_context("raw")),
        };
        self.release_scratch();
        result
    }

    pub fn str_bytes(&mut self) -> Result<Vec<u8>, Error> {
        let mut out = Vec::new();
        self.str_append(&mut out)?;
        Ok(out)
    }

    pub fn str(&mut self) -> Result<String, Error> {
        let bytes = self.str_bytes().context("bytes")?;
        String::from_utf8(bytes).map_err(|err| {
            Error::new(ErrorKind::Malformed)
                .with_message("invalid utf8")
                .with_source(err)
        })
    }
}
