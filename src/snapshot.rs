use serde::Serialize;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::archive::ArchiveReader;
use crate::error::SnapshotError;
use crate::index::IndexStore;
use crate::mo::ManagedObject;
use crate::templates::RnTemplates;
use crate::walker::{WalkStats, Walker};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadStats {
    pub documents: usize,
    pub visited: usize,
    pub indexed: usize,
    pub skipped: usize,
    pub duration_ms: u64,
}

/// A frozen, read-only index over one configuration export.
///
/// Built completely by [`Snapshot::load`]; there is no partial snapshot.
/// Shareable across threads without locking once built.
#[derive(Debug)]
pub struct Snapshot {
    store: IndexStore,
    stats: LoadStats,
}

impl Snapshot {
    pub fn load<T: RnTemplates + ?Sized>(
        path: &Path,
        templates: &T,
    ) -> Result<Self, SnapshotError> {
        let reader = ArchiveReader::open(path)?;
        let snapshot = Self::build(reader, templates)?;
        info!(
            path = %path.display(),
            documents = snapshot.stats.documents,
            indexed = snapshot.stats.indexed,
            skipped = snapshot.stats.skipped,
            "loaded snapshot"
        );
        Ok(snapshot)
    }

    /// Loads from any stream carrying a gzip-compressed tar archive.
    pub fn from_reader<R: Read, T: RnTemplates + ?Sized>(
        reader: R,
        templates: &T,
    ) -> Result<Self, SnapshotError> {
        Self::build(ArchiveReader::from_reader(reader)?, templates)
    }

    fn build<R: Read, T: RnTemplates + ?Sized>(
        mut reader: ArchiveReader<R>,
        templates: &T,
    ) -> Result<Self, SnapshotError> {
        let start = Instant::now();
        let mut store = IndexStore::new();
        let mut walked = WalkStats::default();
        let mut documents = 0usize;

        for doc in reader.documents()? {
            let doc = doc?;
            let root = serde_json::from_slice(&doc.bytes).map_err(|source| {
                SnapshotError::DocumentParse {
                    entry: doc.name.clone(),
                    source,
                }
            })?;
            walked += Walker::new(templates, &mut store).index(root);
            documents += 1;
        }

        Ok(Self {
            store,
            stats: LoadStats {
                documents,
                visited: walked.visited,
                indexed: walked.indexed,
                skipped: walked.skipped,
                duration_ms: start.elapsed().as_millis() as u64,
            },
        })
    }

    pub fn get_by_dn(&self, dn: &str) -> Result<&Arc<ManagedObject>, SnapshotError> {
        self.store
            .lookup_by_dn(dn)
            .ok_or_else(|| SnapshotError::DnNotFound { dn: dn.to_string() })
    }

    /// Objects of `class` in indexing order; empty when the class never occurs.
    pub fn get_by_class(&self, class: &str) -> Result<&[Arc<ManagedObject>], SnapshotError> {
        Ok(self.store.lookup_by_class(class))
    }

    /// Like [`Snapshot::get_by_class`], but an unseen class is an error.
    pub fn require_class(&self, class: &str) -> Result<&[Arc<ManagedObject>], SnapshotError> {
        match self.store.lookup_by_class(class) {
            [] => Err(SnapshotError::ClassNotFound {
                class: class.to_string(),
            }),
            mos => Ok(mos),
        }
    }

    pub fn classes(&self) -> impl Iterator<Item = (&str, usize)> {
        self.store.classes()
    }

    pub fn stats(&self) -> LoadStats {
        self.stats
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
