use std::io::{ErrorKind, Read};

use byteorder::{BigEndian, ByteOrder};

use super::CodecError;

/// Upper bound for pre-allocating collections from an untrusted count prefix
const MAX_CAPACITY_HINT: usize = 4096;

/// Forward-only reader of big-endian primitives
///
/// Every read consumes exactly the number of bytes its type requires and
/// fails with [`CodecError::Truncated`] when the source ends early.
#[derive(Debug)]
pub struct ByteReader<R> {
    inner: R,
    position: u64,
}

impl<R: Read> ByteReader<R> {
    /// Wrap a byte source
    pub fn new(inner: R) -> Self {
        Self { inner, position: 0 }
    }

    /// Number of bytes consumed so far
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Unwrap the underlying source
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Shared access to the underlying source
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    fn fill(&mut self, buf: &mut [u8]) -> Result<(), CodecError> {
        match self.inner.read_exact(buf) {
            Ok(()) => {
                self.position += buf.len() as u64;
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => Err(CodecError::Truncated {
                position: self.position,
                wanted: buf.len(),
            }),
            Err(e) => Err(CodecError::Io(e)),
        }
    }

    /// Read a 2-byte signed integer
    pub fn read_i16(&mut self) -> Result<i16, CodecError> {
        let mut buf = [0u8; 2];
        self.fill(&mut buf)?;
        Ok(BigEndian::read_i16(&buf))
    }

    /// Read a 4-byte signed integer
    pub fn read_i32(&mut self) -> Result<i32, CodecError> {
        let mut buf = [0u8; 4];
        self.fill(&mut buf)?;
        Ok(BigEndian::read_i32(&buf))
    }

    /// Read an 8-byte signed integer
    pub fn read_i64(&mut self) -> Result<i64, CodecError> {
        let mut buf = [0u8; 8];
        self.fill(&mut buf)?;
        Ok(BigEndian::read_i64(&buf))
    }

    /// Read a 4-byte IEEE-754 float
    pub fn read_f32(&mut self) -> Result<f32, CodecError> {
        let mut buf = [0u8; 4];
        self.fill(&mut buf)?;
        Ok(BigEndian::read_f32(&buf))
    }

    /// Read an 8-byte IEEE-754 double
    pub fn read_f64(&mut self) -> Result<f64, CodecError> {
        let mut buf = [0u8; 8];
        self.fill(&mut buf)?;
        Ok(BigEndian::read_f64(&buf))
    }

    /// Read a one-byte boolean (any nonzero byte is `true`)
    pub fn read_bool(&mut self) -> Result<bool, CodecError> {
        let mut buf = [0u8; 1];
        self.fill(&mut buf)?;
        Ok(buf[0] != 0)
    }

    /// Read a 4-byte count prefix
    pub fn read_count(&mut self) -> Result<usize, CodecError> {
        let count = self.read_i32()?;
        if count < 0 {
            return Err(CodecError::NegativeLength(count));
        }
        Ok(count as usize)
    }

    /// Read a length-prefixed UTF-8 string
    pub fn read_string(&mut self) -> Result<String, CodecError> {
        let length = self.read_count()?;
        let start = self.position;

        // `take` keeps a corrupted length from driving a huge allocation
        let mut bytes = Vec::with_capacity(length.min(MAX_CAPACITY_HINT));
        (&mut self.inner)
            .take(length as u64)
            .read_to_end(&mut bytes)?;
        self.position += bytes.len() as u64;

        if bytes.len() < length {
            return Err(CodecError::Truncated {
                position: start,
                wanted: length - bytes.len(),
            });
        }
        Ok(String::from_utf8(bytes)?)
    }

    /// Read a count prefix followed by that many records
    pub fn read_list<T, F>(&mut self, mut read_record: F) -> Result<Vec<T>, CodecError>
    where
        F: FnMut(&mut Self) -> Result<T, CodecError>,
    {
        let count = self.read_count()?;
        let mut records = Vec::with_capacity(count.min(MAX_CAPACITY_HINT));
        for _ in 0..count {
            records.push(read_record(self)?);
        }
        Ok(records)
    }

    /// Report whether the source has been fully consumed
    pub fn is_exhausted(&mut self) -> Result<bool, CodecError> {
        let mut probe = [0u8; 1];
        loop {
            match self.inner.read(&mut probe) {
                Ok(0) => return Ok(true),
                Ok(_) => return Ok(false),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(CodecError::Io(e)),
            }
        }
    }
}
