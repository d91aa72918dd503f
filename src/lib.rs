//! # aci-snapshot
//!
//! Offline access to the managed-object tree of an exported ACI configuration.
//!
//! ## Architecture
//!
//! - **archive**: gzip + tar reader yielding the `.json` documents of an export
//! - **rn**: relative-name template rendering
//! - **templates**: per-class RN template table
//! - **dn**: distinguished-name resolution from attributes and parent path
//! - **mo**: wrapper-node decoding and the indexed managed-object copy
//! - **walker**: iterative tree walk feeding the indices
//! - **index**: DN and class indices
//! - **snapshot**: loading an archive and querying the frozen indices

pub mod archive;
pub mod cli;
pub mod config;
pub mod dn;
pub mod error;
pub mod index;
pub mod mo;
pub mod rn;
pub mod snapshot;
pub mod templates;
pub mod walker;

pub use error::SnapshotError;
pub use mo::ManagedObject;
pub use snapshot::{LoadStats, Snapshot};
pub use templates::{RnTemplates, TemplateTable};
