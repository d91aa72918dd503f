//! Iterative indexing of one parsed snapshot document.
//!
//! Nodes are processed from an explicit stack, so depth is bounded by heap
//! rather than by the call stack. Children are pushed in document order and
//! popped last-first: within a class, later siblings are indexed before
//! earlier ones.

use serde_json::Value;
use tracing::debug;

use crate::dn;
use crate::index::IndexStore;
use crate::mo::{ManagedObject, MoNode};
use crate::templates::RnTemplates;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    pub visited: usize,
    pub indexed: usize,
    pub skipped: usize,
}

impl std::ops::AddAssign for WalkStats {
    fn add_assign(&mut self, other: Self) {
        self.visited += other.visited;
        self.indexed += other.indexed;
        self.skipped += other.skipped;
    }
}

struct Pending {
    node: Value,
    parent: Vec<String>,
}

pub struct Walker<'a, T: RnTemplates + ?Sized> {
    templates: &'a T,
    store: &'a mut IndexStore,
}

impl<'a, T: RnTemplates + ?Sized> Walker<'a, T> {
    pub fn new(templates: &'a T, store: &'a mut IndexStore) -> Self {
        Self { templates, store }
    }

    /// Indexes every resolvable node under `root` into the store.
    pub fn index(&mut self, root: Value) -> WalkStats {
        let mut stats = WalkStats::default();
        let mut stack = vec![Pending {
            node: root,
            parent: Vec::new(),
        }];

        while let Some(Pending { node, parent }) = stack.pop() {
            stats.visited += 1;

            let Some(MoNode {
                class,
                attributes,
                children,
            }) = MoNode::decode(node)
            else {
                debug!("skipping node that is not a class wrapper");
                stats.skipped += 1;
                continue;
            };

            let path = match dn::resolve(&attributes, &parent, &class, self.templates) {
                Ok(path) => {
                    let dn = dn::join(&path);
                    self.store.insert(ManagedObject::new(class, attributes, dn));
                    stats.indexed += 1;
                    path
                }
                Err(err) => {
                    debug!(%class, error = %err, "skipping node without dn");
                    stats.skipped += 1;
                    parent
                }
            };

            stack.extend(children.into_iter().map(|child| Pending {
                node: child,
                parent: path.clone(),
            }));
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::TemplateTable;
    use serde_json::json;

    fn dns_of(store: &IndexStore, class: &str) -> Vec<String> {
        store
            .lookup_by_class(class)
            .iter()
            .map(|m| m.dn().to_string())
            .collect()
    }

    #[test]
    fn derives_dns_from_parent_chain() {
        let doc = json!({
            "polUni": {
                "attributes": { "dn": "uni" },
                "children": [
                    { "fvTenant": {
                        "attributes": { "name": "a" },
                        "children": [
                            { "fvBD": { "attributes": { "name": "bd1" } } },
                            { "fvAp": {
                                "attributes": { "name": "app" },
                                "children": [
                                    { "fvAEPg": { "attributes": { "name": "web" } } }
                                ]
                            } }
                        ]
                    } }
                ]
            }
        });

        let table = TemplateTable::builtin();
        let mut store = IndexStore::new();
        let stats = Walker::new(&table, &mut store).index(doc);

        assert_eq!(stats, WalkStats { visited: 5, indexed: 5, skipped: 0 });
        assert!(store.lookup_by_dn("uni").is_some());
        assert!(store.lookup_by_dn("uni/tn-a/BD-bd1").is_some());
        assert_eq!(
            store.lookup_by_dn("uni/tn-a/ap-app/epg-web").unwrap().class(),
            "fvAEPg"
        );
    }

    #[test]
    fn stored_copy_has_no_children_and_fresh_dn() {
        let doc = json!({
            "fvTenant": {
                "attributes": { "name": "a", "dn": "uni/tn-a" },
                "children": [
                    { "fvCtx": { "attributes": { "name": "vrf", "dn": "" } } }
                ]
            }
        });

        let table = TemplateTable::builtin();
        let mut store = IndexStore::new();
        Walker::new(&table, &mut store).index(doc);

        let tenant = store.lookup_by_dn("uni/tn-a").unwrap();
        assert_eq!(
            serde_json::to_value(&**tenant).unwrap(),
            json!({ "fvTenant": { "attributes": { "name": "a", "dn": "uni/tn-a" } } })
        );
        assert_eq!(store.lookup_by_dn("uni/tn-a/ctx-vrf").unwrap().dn(), "uni/tn-a/ctx-vrf");
    }

    #[test]
    fn unknown_class_is_skipped_but_children_keep_parent_path() {
        let doc = json!({
            "polUni": {
                "attributes": {},
                "children": [
                    { "mysteryCont": {
                        "attributes": { "name": "x" },
                        "children": [
                            { "fvTenant": { "attributes": { "name": "deep" } } }
                        ]
                    } }
                ]
            }
        });

        let table = TemplateTable::builtin();
        let mut store = IndexStore::new();
        let stats = Walker::new(&table, &mut store).index(doc);

        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.indexed, 2);
        assert!(store.lookup_by_class("mysteryCont").is_empty());
        assert!(store.lookup_by_dn("uni/tn-deep").is_some());
    }

    #[test]
    fn siblings_are_indexed_last_pushed_first() {
        let doc = json!({
            "polUni": {
                "attributes": { "dn": "uni" },
                "children": [
                    { "fvTenant": { "attributes": { "name": "a" } } },
                    { "fvTenant": { "attributes": { "name": "b" } } },
                    { "fvTenant": { "attributes": { "name": "c" } } }
                ]
            }
        });

        let table = TemplateTable::builtin();
        let mut store = IndexStore::new();
        Walker::new(&table, &mut store).index(doc);

        assert_eq!(
            dns_of(&store, "fvTenant"),
            vec!["uni/tn-c", "uni/tn-b", "uni/tn-a"]
        );
    }

    #[test]
    fn depth_first_follows_most_recent_subtree() {
        let doc = json!({
            "polUni": {
                "attributes": { "dn": "uni" },
                "children": [
                    { "fvTenant": {
                        "attributes": { "name": "a" },
                        "children": [ { "fvCtx": { "attributes": { "name": "x" } } } ]
                    } },
                    { "fvTenant": {
                        "attributes": { "name": "b" },
                        "children": [ { "fvCtx": { "attributes": { "name": "y" } } } ]
                    } }
                ]
            }
        });

        let table = TemplateTable::builtin();
        let mut store = IndexStore::new();
        Walker::new(&table, &mut store).index(doc);

        assert_eq!(dns_of(&store, "fvCtx"), vec!["uni/tn-b/ctx-y", "uni/tn-a/ctx-x"]);
    }

    #[test]
    fn deep_chain_is_fully_indexed() {
        let mut doc = json!({ "fvTenant": { "attributes": { "name": "leaf" } } });
        for i in 0..1_000 {
            doc = json!({
                "fvAp": { "attributes": { "name": i.to_string() }, "children": [doc] }
            });
        }

        let table = TemplateTable::builtin();
        let mut store = IndexStore::new();
        let stats = Walker::new(&table, &mut store).index(doc);

        assert_eq!(stats.indexed, 1_001);
        assert_eq!(store.lookup_by_class("fvTenant").len(), 1);
    }

    #[test]
    fn non_wrapper_nodes_are_counted_as_skipped() {
        let doc = json!({
            "polUni": {
                "attributes": { "dn": "uni" },
                "children": [ "garbage", { "fvTenant": { "attributes": { "name": "a" } } } ]
            }
        });

        let table = TemplateTable::builtin();
        let mut store = IndexStore::new();
        let stats = Walker::new(&table, &mut store).index(doc);

        assert_eq!(stats, WalkStats { visited: 3, indexed: 2, skipped: 1 });
    }
}
