use flate2::bufread::GzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tar::{Archive, Entries, Entry};
use tracing::debug;

use crate::error::SnapshotError;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
const DOCUMENT_EXTENSION: &str = "json";

type Stream<R> = GzDecoder<BufReader<R>>;

/// One structured-data entry of a snapshot archive.
#[derive(Debug, Clone)]
pub struct Document {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Reader over a gzip-compressed tar archive.
///
/// The file handle, the gzip stream and the tar cursor are owned by the
/// reader and released when it is dropped.
pub struct ArchiveReader<R: Read> {
    archive: Archive<Stream<R>>,
}

impl ArchiveReader<File> {
    pub fn open(path: &Path) -> Result<Self, SnapshotError> {
        let file = File::open(path).map_err(|source| SnapshotError::ArchiveOpen {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }
}

impl<R: Read> ArchiveReader<R> {
    /// Wraps `reader`, rejecting it up front unless it starts with a gzip header.
    pub fn from_reader(reader: R) -> Result<Self, SnapshotError> {
        let mut reader = BufReader::new(reader);
        let head = reader
            .fill_buf()
            .map_err(|source| SnapshotError::Decompression { source })?;
        if !head.starts_with(&GZIP_MAGIC) {
            return Err(SnapshotError::Decompression {
                source: std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    "missing gzip header",
                ),
            });
        }

        Ok(Self {
            archive: Archive::new(GzDecoder::new(reader)),
        })
    }

    /// Lazily yields every regular `.json` entry. Iteration stops after the
    /// first error.
    pub fn documents(&mut self) -> Result<Documents<'_, R>, SnapshotError> {
        let entries = self
            .archive
            .entries()
            .map_err(|source| SnapshotError::ContainerFormat { source })?;
        Ok(Documents {
            entries,
            done: false,
        })
    }
}

pub struct Documents<'a, R: Read> {
    entries: Entries<'a, Stream<R>>,
    done: bool,
}

impl<R: Read> Iterator for Documents<'_, R> {
    type Item = Result<Document, SnapshotError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            let result = match self.entries.next() {
                None => {
                    self.done = true;
                    return None;
                }
                Some(entry) => entry
                    .map_err(SnapshotError::from_stream)
                    .and_then(read_document),
            };

            match result {
                Ok(Some(doc)) => return Some(Ok(doc)),
                Ok(None) => continue,
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            }
        }
        None
    }
}

fn read_document<R: Read>(mut entry: Entry<'_, R>) -> Result<Option<Document>, SnapshotError> {
    let path = entry
        .path()
        .map_err(|source| SnapshotError::ContainerFormat { source })?;
    let name = path.to_string_lossy().to_string();

    let is_document = entry.header().entry_type().is_file()
        && path.extension().is_some_and(|e| e == DOCUMENT_EXTENSION);
    if !is_document {
        debug!(entry = %name, "skipping archive entry");
        return Ok(None);
    }

    let mut bytes = Vec::with_capacity(usize::try_from(entry.size()).unwrap_or(0));
    entry
        .read_to_end(&mut bytes)
        .map_err(SnapshotError::from_stream)?;
    if bytes.len() as u64 != entry.size() {
        return Err(SnapshotError::ContainerFormat {
            source: std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                format!(
                    "entry {name} truncated: {} of {} bytes",
                    bytes.len(),
                    entry.size()
                ),
            ),
        });
    }
    debug!(entry = %name, bytes = bytes.len(), "read archive entry");

    Ok(Some(Document { name, bytes }))
}
