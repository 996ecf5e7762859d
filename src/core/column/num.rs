// Fixed-width numeric columns: one generic codec instantiated per scalar type.
use std::fmt::Debug;
use std::io::Read;
use std::mem::size_of;

use tracing::trace;

use super::{Column, ColumnType};
use crate::core::buffer::Buffer;
use crate::core::error::{Error, ResultExt};
use crate::core::reader::Reader;

// Upper bound on a single bulk read; keeps scratch growth tied to bytes actually received.
const DECODE_CHUNK_BYTES: usize = 64 * 1024;

/// Scalar stored in a column as exactly `SIZE` little-endian bytes.
pub trait FixedWidth: Copy + Debug + Default + PartialEq {
    const SIZE: usize;
    const TYPE: ColumnType;

    fn put_le(self, b: &mut Buffer);

    /// `bytes` is exactly `SIZE` long.
    fn from_le(bytes: &[u8]) -> Self;
}

macro_rules! fixed_width {
    ($($t:ty => $tag:ident),* $(,)?) => {
        $(
            impl FixedWidth for $t {
                const SIZE: usize = size_of::<$t>();
                const TYPE: ColumnType = ColumnType::$tag;

                #[inline]
                fn put_le(self, b: &mut Buffer) {
                    b.put_raw(&self.to_le_bytes());
                }

                #[inline]
                fn from_le(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; size_of::<$t>()];
                    raw.copy_from_slice(bytes);
                    <$t>::from_le_bytes(raw)
                }
            }
        )*
    };
}

fixed_width! {
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
    f32 => Float32,
    f64 => Float64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColNum<T> {
    values: Vec<T>,
}

pub type ColInt8 = ColNum<i8>;
pub type ColInt16 = ColNum<i16>;
pub type ColInt32 = ColNum<i32>;
pub type ColInt64 = ColNum<i64>;
pub type ColUInt8 = ColNum<u8>;
pub type ColUInt16 = ColNum<u16>;
pub type ColUInt32 = ColNum<u32>;
pub type ColUInt64 = ColNum<u64>;
pub type ColFloat32 = ColNum<f32>;
pub type ColFloat64 = ColNum<f64>;

impl<T: FixedWidth> ColNum<T> {
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    pub fn push(&mut self, v: T) {
        self.values.push(v);
    }

    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.values.iter().copied()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.values
    }
}

impl<T: FixedWidth> From<Vec<T>> for ColNum<T> {
    fn from(values: Vec<T>) -> Self {
        Self { values }
    }
}

impl<T: FixedWidth> FromIterator<T> for ColNum<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl<T: FixedWidth> Extend<T> for ColNum<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.values.extend(iter);
    }
}

impl<T: FixedWidth> Column for ColNum<T> {
    fn column_type(&self) -> ColumnType {
        T::TYPE
    }

    fn rows(&self) -> usize {
        self.values.len()
    }

    fn reset(&mut self) {
        self.values.clear();
    }

    fn encode_column(&self, b: &mut Buffer) {
        b.reserve(self.values.len() * T::SIZE);
        for v in &self.values {
            v.put_le(b);
        }
    }

    fn decode_column<R: Read>(&mut self, r: &mut Reader<R>, rows: usize) -> Result<(), Error> {
        let chunk_rows = (DECODE_CHUNK_BYTES / T::SIZE).max(1);
        self.values.clear();
        self.values.reserve(rows.min(chunk_rows));

        let mut remaining = rows;
        while remaining > 0 {
            let n = remaining.min(chunk_rows);
            let data = r.read_scratch(n * T::SIZE).context("read full")?;
            self.values
                .extend(data.chunks_exact(T::SIZE).map(T::from_le));
            remaining -= n;
        }
        r.release_scratch();

        trace!(column = %T::TYPE, rows, "decoded column");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ColFloat32, ColFloat64, ColInt8, ColInt64, ColUInt16, DECODE_CHUNK_BYTES};
    use crate::core::buffer::Buffer;
    use crate::core::column::{Column, ColumnType};
    use crate::core::error::ErrorKind;
    use crate::core::reader::Reader;
    use std::io::Cursor;

    fn encoded(col: &impl Column) -> Vec<u8> {
        let mut b = Buffer::new();
        col.encode_column(&mut b);
        b.into_vec()
    }

    #[test]
    fn int64_column_layout_is_packed_little_endian() {
        let col = ColInt64::from(vec![1, -1]);
        assert_eq!(
            encoded(&col),
            [1, 0, 0, 0, 0, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]
        );
    }

    #[test]
    fn encode_appends_after_existing_bytes() {
        let mut b = Buffer::new();
        b.put_uint8(0xAB);
        ColUInt16::from(vec![0x0102]).encode_column(&mut b);
        assert_eq!(b.as_slice(), &[0xAB, 0x02, 0x01]);
    }

    #[test]
    fn decode_replaces_previous_contents() {
        let bytes = encoded(&ColInt8::from(vec![-3, 4]));
        let mut col = ColInt8::from(vec![9, 9, 9]);
        let mut r = Reader::new(Cursor::new(bytes));
        col.decode_column(&mut r, 2).expect("decode");
        assert_eq!(col.as_slice(), &[-3, 4]);
    }

    #[test]
    fn float_special_values_round_trip_bit_exact() {
        let values = vec![
            f32::NAN,
            f32::from_bits(0x7FC0_0001),
            f32::from_bits(0xFF80_0001),
            f32::INFINITY,
            f32::NEG_INFINITY,
            -0.0,
            f32::MIN_POSITIVE,
        ];
        let bytes = encoded(&ColFloat32::from(values.clone()));

        let mut dec = ColFloat32::new();
        let mut r = Reader::new(Cursor::new(bytes));
        dec.decode_column(&mut r, values.len()).expect("decode");

        let want: Vec<u32> = values.iter().map(|v| v.to_bits()).collect();
        let got: Vec<u32> = dec.iter().map(|v| v.to_bits()).collect();
        assert_eq!(got, want);
    }

    #[test]
    fn float64_nan_payload_survives() {
        let nan = f64::from_bits(0x7FF8_DEAD_BEEF_0001);
        let bytes = encoded(&ColFloat64::from(vec![nan]));
        let mut dec = ColFloat64::new();
        dec.decode_column(&mut Reader::new(Cursor::new(bytes)), 1)
            .expect("decode");
        assert_eq!(dec.as_slice()[0].to_bits(), nan.to_bits());
    }

    #[test]
    fn decode_spanning_several_chunks() {
        let rows = DECODE_CHUNK_BYTES / 8 * 3 + 5;
        let col: ColInt64 = (0..rows as i64).collect();
        let bytes = encoded(&col);

        let mut dec = ColInt64::new();
        dec.decode_column(&mut Reader::new(Cursor::new(bytes)), rows)
            .expect("decode");
        assert_eq!(dec, col);
    }

    #[test]
    fn zero_rows_reads_nothing() {
        let mut dec = ColInt64::from(vec![1]);
        let mut r = Reader::new(Cursor::new(vec![7u8]));
        dec.decode_column(&mut r, 0).expect("decode");
        assert_eq!(dec.rows(), 0);
        assert_eq!(r.uint8().expect("untouched"), 7);
    }

    #[test]
    fn truncated_body_is_eof_for_every_width() {
        fn check<C: Column + Default>(width: usize) {
            for rows in [1usize, 2, 17] {
                let short = vec![0u8; rows * width - 1];
                let mut dec = C::default();
                let err = dec
                    .decode_column(&mut Reader::new(Cursor::new(short)), rows)
                    .expect_err("short");
                assert_eq!(err.kind(), ErrorKind::UnexpectedEof);
                assert_eq!(err.context().collect::<Vec<_>>(), ["read full"]);
            }
        }
        check::<ColInt8>(1);
        check::<ColUInt16>(2);
        check::<ColFloat32>(4);
        check::<ColInt64>(8);
        check::<ColFloat64>(8);
    }

    #[test]
    fn reset_is_idempotent_and_keeps_type() {
        let mut col: ColInt64 = (0..1000).collect();
        col.reset();
        assert_eq!(col.rows(), 0);
        col.reset();
        assert_eq!(col.rows(), 0);
        assert_eq!(col.column_type(), ColumnType::Int64);
        assert_eq!(ColFloat32::new().column_type(), ColumnType::Float32);
    }
}
