use std::collections::HashMap;
use std::sync::Arc;

use crate::mo::ManagedObject;

/// DN and class indices over the managed objects of one snapshot.
///
/// Both indices share the same `Arc` per object. Class lists keep the order
/// objects were indexed in.
#[derive(Debug, Default)]
pub struct IndexStore {
    by_dn: HashMap<String, Arc<ManagedObject>>,
    by_class: HashMap<String, Vec<Arc<ManagedObject>>>,
}

impl IndexStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `mo` under its DN and its class. A repeated DN replaces the
    /// earlier DN entry; the class list keeps both.
    pub fn insert(&mut self, mo: ManagedObject) {
        let mo = Arc::new(mo);
        self.by_dn.insert(mo.dn().to_string(), Arc::clone(&mo));
        self.by_class
            .entry(mo.class().to_string())
            .or_default()
            .push(mo);
    }

    pub fn lookup_by_dn(&self, dn: &str) -> Option<&Arc<ManagedObject>> {
        self.by_dn.get(dn)
    }

    pub fn lookup_by_class(&self, class: &str) -> &[Arc<ManagedObject>] {
        self.by_class.get(class).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn classes(&self) -> impl Iterator<Item = (&str, usize)> {
        self.by_class
            .iter()
            .map(|(class, mos)| (class.as_str(), mos.len()))
    }

    pub fn len(&self) -> usize {
        self.by_dn.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_dn.is_empty()
    }
}
