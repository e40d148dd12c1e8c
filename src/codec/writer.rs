use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};

use super::CodecError;

/// Forward-only writer of big-endian primitives, the exact inverse of
/// [`ByteReader`](super::ByteReader)
#[derive(Debug)]
pub struct ByteWriter<W> {
    inner: W,
    position: u64,
}

impl<W: Write> ByteWriter<W> {
    /// Wrap a byte sink
    pub fn new(inner: W) -> Self {
        Self { inner, position: 0 }
    }

    /// Number of bytes written so far
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Unwrap the underlying sink
    pub fn into_inner(self) -> W {
        self.inner
    }

    /// Write a 2-byte signed integer
    pub fn write_i16(&mut self, value: i16) -> Result<(), CodecError> {
        self.inner.write_i16::<BigEndian>(value)?;
        self.position += 2;
        Ok(())
    }

    /// Write a 4-byte signed integer
    pub fn write_i32(&mut self, value: i32) -> Result<(), CodecError> {
        self.inner.write_i32::<BigEndian>(value)?;
        self.position += 4;
        Ok(())
    }

    /// Write an 8-byte signed integer
    pub fn write_i64(&mut self, value: i64) -> Result<(), CodecError> {
        self.inner.write_i64::<BigEndian>(value)?;
        self.position += 8;
        Ok(())
    }

    /// Write a 4-byte IEEE-754 float
    pub fn write_f32(&mut self, value: f32) -> Result<(), CodecError> {
        self.inner.write_f32::<BigEndian>(value)?;
        self.position += 4;
        Ok(())
    }

    /// Write an 8-byte IEEE-754 double
    pub fn write_f64(&mut self, value: f64) -> Result<(), CodecError> {
        self.inner.write_f64::<BigEndian>(value)?;
        self.position += 8;
        Ok(())
    }

    /// Write a one-byte boolean
    pub fn write_bool(&mut self, value: bool) -> Result<(), CodecError> {
        self.inner.write_u8(u8::from(value))?;
        self.position += 1;
        Ok(())
    }

    /// Write a 4-byte count prefix
    pub fn write_count(&mut self, count: usize) -> Result<(), CodecError> {
        let count = i32::try_from(count).map_err(|_| CodecError::LengthOverflow(count))?;
        self.write_i32(count)
    }

    /// Write a length-prefixed UTF-8 string
    pub fn write_string(&mut self, value: &str) -> Result<(), CodecError> {
        let bytes = value.as_bytes();
        self.write_count(bytes.len())?;
        self.inner.write_all(bytes)?;
        self.position += bytes.len() as u64;
        Ok(())
    }

    /// Write a count prefix followed by every record
    pub fn write_list<'a, T: 'a, I, F>(
        &mut self,
        records: I,
        mut write_record: F,
    ) -> Result<(), CodecError>
    where
        I: IntoIterator<Item = &'a T>,
        I::IntoIter: ExactSizeIterator,
        F: FnMut(&mut Self, &'a T) -> Result<(), CodecError>,
    {
        let records = records.into_iter();
        self.write_count(records.len())?;
        for record in records {
            write_record(self, record)?;
        }
        Ok(())
    }
}
