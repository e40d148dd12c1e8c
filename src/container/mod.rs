//! # Container Index
//!
//! A chromatogram container is a ZIP archive whose entries are named binary
//! streams. [`Container`] owns the archive handle for one read and hands out
//! each stream as an independent [`StreamReader`] over the entry's bytes, so
//! no cursor is shared between streams.
//!
//! The version marker gates everything else: [`Container::stream`] refuses to
//! open any stream until [`Container::read_version_marker`] has succeeded.
//!
//! ```rust,no_run
//! use chromstore::container::{names, Container};
//!
//! let mut container = Container::open("run.chrom")?;
//! let version = container.read_version_marker()?;
//! let mut method = container.stream(names::METHOD)?;
//! let instrument = method.decode(|r| r.read_string())?;
//! method.finish()?;
//! println!("{} recorded on {}", version, instrument);
//! # Ok::<(), chromstore::reader::DecodeError>(())
//! ```

mod entry;
pub mod names;

use std::fs::File;
use std::io::{self, BufReader, Cursor, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use zip::result::ZipError;
use zip::ZipArchive;

use crate::codec::{ByteReader, CodecError};
use crate::reader::DecodeError;

pub use entry::{EntrySlice, StoredEntry};
pub use names::EntryStorage;

/// Byte source behind an archive
#[derive(Debug)]
enum ContainerSource {
    File(BufReader<File>),
    Memory(Cursor<Vec<u8>>),
}

impl Read for ContainerSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            ContainerSource::File(f) => f.read(buf),
            ContainerSource::Memory(c) => c.read(buf),
        }
    }
}

impl Seek for ContainerSource {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        match self {
            ContainerSource::File(f) => f.seek(pos),
            ContainerSource::Memory(c) => c.seek(pos),
        }
    }
}

/// An opened chromatogram container
#[derive(Debug)]
pub struct Container {
    archive: ZipArchive<ContainerSource>,
    path: Option<PathBuf>,
    version: Option<String>,
}

impl Container {
    /// Open the container at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DecodeError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let archive = ZipArchive::new(ContainerSource::File(BufReader::new(file)))
            .map_err(DecodeError::NotAContainer)?;
        Ok(Self {
            archive,
            path: Some(path.to_path_buf()),
            version: None,
        })
    }

    /// Open a container held in memory
    ///
    /// In-memory containers have no backing file, so scan proxies cannot be
    /// created for them.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, DecodeError> {
        let archive = ZipArchive::new(ContainerSource::Memory(Cursor::new(bytes)))
            .map_err(DecodeError::NotAContainer)?;
        Ok(Self {
            archive,
            path: None,
            version: None,
        })
    }

    /// File the container was opened from
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Version marker, once it has been read
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Entry names in archive order
    pub fn entry_names(&self) -> Vec<String> {
        (0..self.archive.len())
            .filter_map(|i| self.archive.name_for_index(i).map(str::to_string))
            .collect()
    }

    /// True if the archive has an entry called `name`
    pub fn contains(&self, name: &str) -> bool {
        self.archive.index_for_name(name).is_some()
    }

    /// Storage method of the entry called `name`
    pub fn entry_storage(&mut self, name: &str) -> Result<EntryStorage, DecodeError> {
        let entry = self.archive.by_name(name).map_err(|e| entry_error(name, e))?;
        Ok(match entry.compression() {
            zip::CompressionMethod::Stored => EntryStorage::Stored,
            _ => EntryStorage::Deflated,
        })
    }

    /// Uncompressed size of the entry called `name`
    pub fn entry_size(&mut self, name: &str) -> Result<u64, DecodeError> {
        let entry = self.archive.by_name(name).map_err(|e| entry_error(name, e))?;
        Ok(entry.size())
    }

    /// Read and remember the version marker
    ///
    /// Must precede every other stream read.
    pub fn read_version_marker(&mut self) -> Result<String, DecodeError> {
        let mut stream = self.open_entry(names::VERSION)?;
        let version = stream.decode(|r| r.read_string())?;
        stream.finish()?;
        log::debug!("Container version marker: {}", version);
        self.version = Some(version.clone());
        Ok(version)
    }

    /// Open the stream called `name`
    pub fn stream(&mut self, name: &str) -> Result<StreamReader, DecodeError> {
        if self.version.is_none() {
            return Err(DecodeError::VersionNotValidated);
        }
        self.open_entry(name)
    }

    /// Release the archive handle
    pub fn close(self) {}

    fn open_entry(&mut self, name: &str) -> Result<StreamReader, DecodeError> {
        let mut entry = self.archive.by_name(name).map_err(|e| entry_error(name, e))?;
        let mut bytes = Vec::with_capacity(entry.size().min(1 << 20) as usize);
        entry
            .read_to_end(&mut bytes)
            .map_err(|e| DecodeError::corrupt(name, e.to_string()))?;
        Ok(StreamReader::new(name, bytes))
    }
}

fn entry_error(name: &str, error: ZipError) -> DecodeError {
    match error {
        ZipError::FileNotFound => DecodeError::MissingStream(name.to_string()),
        other => DecodeError::corrupt(name, other.to_string()),
    }
}

/// Owned reader over one stream's bytes
#[derive(Debug)]
pub struct StreamReader {
    name: String,
    reader: ByteReader<Cursor<Vec<u8>>>,
}

impl StreamReader {
    /// Reader over `bytes`, attributing failures to the stream `name`
    pub fn new(name: &str, bytes: Vec<u8>) -> Self {
        Self {
            name: name.to_string(),
            reader: ByteReader::new(Cursor::new(bytes)),
        }
    }

    /// Entry name of the stream
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Total stream length in bytes
    pub fn len(&self) -> u64 {
        self.reader.get_ref().get_ref().len() as u64
    }

    /// True if the stream holds no bytes
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current position in the stream
    pub fn position(&self) -> u64 {
        self.reader.position()
    }

    /// Run a record decoder, attributing any failure to this stream
    pub fn decode<T, F>(&mut self, read: F) -> Result<T, DecodeError>
    where
        F: FnOnce(&mut ByteReader<Cursor<Vec<u8>>>) -> Result<T, CodecError>,
    {
        read(&mut self.reader).map_err(|e| DecodeError::in_stream(&self.name, e))
    }

    /// Fail unless every byte of the stream has been consumed
    pub fn finish(mut self) -> Result<(), DecodeError> {
        let exhausted = self
            .reader
            .is_exhausted()
            .map_err(|e| DecodeError::in_stream(&self.name, e))?;
        if !exhausted {
            return Err(DecodeError::corrupt(
                &self.name,
                format!(
                    "{} trailing bytes after the last record",
                    self.len().saturating_sub(self.reader.position())
                ),
            ));
        }
        Ok(())
    }
}
