//! Store boundary traits for testability
//!
//! The flat group relation lives behind [`GroupStore`], so services can
//! be tested against an in-memory store and the CLI can run against a
//! TOML file.

use std::collections::{HashMap, HashSet};

use crate::domain::{GroupKind, GroupRecord, GroupRef};

/// Read access to the flat group/parent relation.
pub trait GroupStore: Send + Sync {
    /// All records of a kind, in stable store order.
    fn records(&self, kind: GroupKind) -> Vec<GroupRecord>;

    /// The record named `name` of the given kind.
    fn get(&self, name: &str, kind: GroupKind) -> Option<GroupRecord>;

    /// All descendants of the group named `name`, depth-first in store
    /// order. Empty when the group is unknown or a leaf.
    fn descendants(&self, name: &str, kind: GroupKind) -> Vec<GroupRef>;
}

/// Group store backed by a plain vector of records.
#[derive(Debug, Default)]
pub struct InMemoryGroupStore {
    records: Vec<GroupRecord>,
}

impl InMemoryGroupStore {
    pub fn new(records: Vec<GroupRecord>) -> Self {
        Self { records }
    }
}

impl GroupStore for InMemoryGroupStore {
    fn records(&self, kind: GroupKind) -> Vec<GroupRecord> {
        self.records
            .iter()
            .filter(|r| r.kind == kind)
            .cloned()
            .collect()
    }

    fn get(&self, name: &str, kind: GroupKind) -> Option<GroupRecord> {
        self.records
            .iter()
            .find(|r| r.kind == kind && r.name == name)
            .cloned()
    }

    fn descendants(&self, name: &str, kind: GroupKind) -> Vec<GroupRef> {
        let mut children_by_parent: HashMap<&str, Vec<&GroupRecord>> = HashMap::new();
        for record in self.records.iter().filter(|r| r.kind == kind) {
            if let Some(parent) = &record.parent {
                children_by_parent
                    .entry(parent.as_str())
                    .or_default()
                    .push(record);
            }
        }

        fn collect<'a>(
            name: &'a str,
            children_by_parent: &HashMap<&'a str, Vec<&'a GroupRecord>>,
            seen: &mut HashSet<&'a str>,
            out: &mut Vec<GroupRef>,
        ) {
            if let Some(children) = children_by_parent.get(name) {
                for child in children {
                    // seen guards against malformed cyclic relations
                    if seen.insert(child.name.as_str()) {
                        out.push(GroupRef {
                            id: child.id.clone(),
                            name: child.name.clone(),
                        });
                        collect(&child.name, children_by_parent, seen, out);
                    }
                }
            }
        }

        let mut seen = HashSet::new();
        seen.insert(name);
        let mut result = Vec::new();
        collect(name, &children_by_parent, &mut seen, &mut result);
        result
    }
}
