//! Direct access to stored ZIP entries
//!
//! A [`StoredEntry`] records where an uncompressed entry's bytes live inside
//! the archive file. Each [`StoredEntry::open_at`] call opens its own file
//! handle, so any number of readers can be positioned inside the same entry
//! concurrently.

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use zip::result::ZipError;
use zip::ZipArchive;

use crate::reader::DecodeError;

/// Location of an uncompressed entry inside an archive file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredEntry {
    path: PathBuf,
    data_start: u64,
    size: u64,
}

impl StoredEntry {
    /// Locate `entry_name` in the archive at `path`
    ///
    /// # Errors
    /// - [`DecodeError::Io`] if the file cannot be opened
    /// - [`DecodeError::NotAContainer`] if it is not a ZIP archive
    /// - [`DecodeError::MissingStream`] if the entry does not exist
    /// - [`DecodeError::CorruptStream`] if the entry is compressed
    pub fn locate<P: AsRef<Path>>(path: P, entry_name: &str) -> Result<Self, DecodeError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mut archive =
            ZipArchive::new(BufReader::new(file)).map_err(DecodeError::NotAContainer)?;

        let entry = match archive.by_name(entry_name) {
            Ok(entry) => entry,
            Err(ZipError::FileNotFound) => {
                return Err(DecodeError::MissingStream(entry_name.to_string()))
            }
            Err(e) => return Err(DecodeError::corrupt(entry_name, e.to_string())),
        };

        if entry.compression() != zip::CompressionMethod::Stored {
            return Err(DecodeError::corrupt(
                entry_name,
                format!(
                    "entry must be Stored for direct access, found {:?}",
                    entry.compression()
                ),
            ));
        }

        Ok(Self {
            path: path.to_path_buf(),
            data_start: entry.data_start(),
            size: entry.size(),
        })
    }

    /// Archive file the entry lives in
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Absolute byte offset of the entry data in the archive file
    pub fn data_start(&self) -> u64 {
        self.data_start
    }

    /// Entry size in bytes
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Open an independent reader positioned `offset` bytes into the entry
    ///
    /// Reads stop at the end of the entry.
    pub fn open_at(&self, offset: u64) -> Result<EntrySlice, DecodeError> {
        if offset > self.size {
            return Err(DecodeError::CorruptStream {
                stream: self.path.display().to_string(),
                reason: format!("offset {} is beyond the entry size {}", offset, self.size),
            });
        }
        let mut file = File::open(&self.path)?;
        file.seek(SeekFrom::Start(self.data_start + offset))?;
        Ok(EntrySlice {
            inner: BufReader::new(file),
            remaining: self.size - offset,
        })
    }
}

/// Reader over the tail of a stored entry
#[derive(Debug)]
pub struct EntrySlice {
    inner: BufReader<File>,
    remaining: u64,
}

impl Read for EntrySlice {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        if self.remaining == 0 {
            return Ok(0);
        }
        let to_read = std::cmp::min(buf.len() as u64, self.remaining) as usize;
        let n = self.inner.read(&mut buf[..to_read])?;
        self.remaining -= n as u64;
        Ok(n)
    }
}
