use std::io;
use std::path::PathBuf;

/// Errors raised while loading or querying a configuration snapshot.
///
/// Load-time variants (`ArchiveOpen`, `Decompression`, `ContainerFormat`,
/// `DocumentParse`) abort the whole load. `TemplateNotFound` is produced per
/// node and swallowed by the walker. The lookup variants come from queries.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Failed to open snapshot archive {path}: {source}")]
    ArchiveOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid gzip stream: {source}")]
    Decompression {
        #[source]
        source: io::Error,
    },

    #[error("Corrupt tar container: {source}")]
    ContainerFormat {
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse JSON document {entry}: {source}")]
    DocumentParse {
        entry: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("rn template not found for {class}")]
    TemplateNotFound { class: String },

    #[error("{dn} not found")]
    DnNotFound { dn: String },

    #[error("class {class} not found")]
    ClassNotFound { class: String },
}

impl SnapshotError {
    /// Splits an I/O error raised while streaming the archive into the gzip
    /// layer or the tar layer. tar reports its own failures as `Other`.
    pub(crate) fn from_stream(source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::InvalidInput
            | io::ErrorKind::InvalidData
            | io::ErrorKind::UnexpectedEof => Self::Decompression { source },
            _ => Self::ContainerFormat { source },
        }
    }
}
