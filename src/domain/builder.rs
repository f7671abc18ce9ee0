//! Tree builder: constructs group forests from the flat parent/child relation.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::domain::entities::{GroupKind, GroupNode, GroupRecord};
use crate::domain::error::{DomainError, DomainResult};

/// Constructs hierarchical forests from flat group records.
///
/// Sibling and root order preserves record order, so a freshly built
/// forest traverses in the same pre-order as the input.
pub struct TreeBuilder {
    kind: GroupKind,
    children_by_parent: HashMap<String, Vec<String>>,
    records_by_name: HashMap<String, GroupRecord>,
    root_names: Vec<String>,
}

impl TreeBuilder {
    /// Index the records of one kind for tree construction.
    ///
    /// A record whose `parent` names no known record of the kind is
    /// treated as a root; the store is authoritative for what exists.
    /// Duplicate names are rejected.
    pub fn from_records(records: &[GroupRecord], kind: GroupKind) -> DomainResult<Self> {
        let mut records_by_name = HashMap::new();
        let mut ordered_names = Vec::new();

        for record in records.iter().filter(|r| r.kind == kind) {
            if records_by_name
                .insert(record.name.clone(), record.clone())
                .is_some()
            {
                return Err(DomainError::DuplicateName {
                    name: record.name.clone(),
                    kind,
                });
            }
            ordered_names.push(record.name.clone());
        }

        let mut children_by_parent: HashMap<String, Vec<String>> = HashMap::new();
        let mut root_names = Vec::new();

        for name in &ordered_names {
            let parent = records_by_name[name]
                .parent
                .as_ref()
                .filter(|p| records_by_name.contains_key(*p));
            match parent {
                Some(parent) => children_by_parent
                    .entry(parent.clone())
                    .or_default()
                    .push(name.clone()),
                None => root_names.push(name.clone()),
            }
        }

        debug!(
            roots = root_names.len(),
            records = ordered_names.len(),
            %kind,
            "indexed group records"
        );

        // A parent relation with records but no roots can only be cyclic.
        if root_names.is_empty() && !records_by_name.is_empty() {
            let on_cycle = ordered_names[0].clone();
            return Err(DomainError::CycleDetected(on_cycle));
        }

        Ok(Self {
            kind,
            children_by_parent,
            records_by_name,
            root_names,
        })
    }

    /// Build the full forest, roots in record order.
    pub fn build_forest(&self) -> DomainResult<Vec<GroupNode>> {
        let mut visited = HashSet::new();
        let mut forest = Vec::with_capacity(self.root_names.len());
        for root in &self.root_names {
            forest.push(self.build_subtree(root, &mut visited)?);
        }

        // Records reachable from no root sit on a cycle.
        if visited.len() != self.records_by_name.len() {
            let on_cycle = self
                .records_by_name
                .keys()
                .find(|name| !visited.contains(*name))
                .cloned()
                .unwrap_or_default();
            return Err(DomainError::CycleDetected(on_cycle));
        }

        Ok(forest)
    }

    /// Build the subtree rooted at `name`.
    pub fn build_subtree(
        &self,
        name: &str,
        visited: &mut HashSet<String>,
    ) -> DomainResult<GroupNode> {
        let record = self
            .records_by_name
            .get(name)
            .ok_or_else(|| DomainError::GroupNotFound {
                name: name.to_string(),
                kind: self.kind,
            })?;

        if !visited.insert(name.to_string()) {
            return Err(DomainError::CycleDetected(name.to_string()));
        }

        let mut node = GroupNode::new(&record.name, &record.title);
        if let Some(children) = self.children_by_parent.get(name) {
            for child in children {
                node.children.push(self.build_subtree(child, visited)?);
            }
        }
        Ok(node)
    }

    /// Names of the root groups, in record order.
    pub fn root_names(&self) -> &[String] {
        &self.root_names
    }

    /// The record indexed under `name`, if any.
    pub fn record(&self, name: &str) -> Option<&GroupRecord> {
        self.records_by_name.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, parent: Option<&str>) -> GroupRecord {
        GroupRecord {
            id: format!("id-{name}"),
            name: name.to_string(),
            title: name.to_uppercase(),
            longname: None,
            kind: GroupKind::Organization,
            parent: parent.map(str::to_string),
        }
    }

    // root
    // ├── child1
    // │   └── grandchild1
    // └── child2
    #[test]
    fn test_build_forest_nests_children_under_parents() {
        let records = vec![
            record("root", None),
            record("child1", Some("root")),
            record("child2", Some("root")),
            record("grandchild1", Some("child1")),
        ];

        let builder = TreeBuilder::from_records(&records, GroupKind::Organization).unwrap();
        let forest = builder.build_forest().unwrap();

        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].name, "root");
        assert_eq!(forest[0].children.len(), 2);
        assert_eq!(forest[0].children[0].name, "child1");
        assert_eq!(forest[0].children[0].children[0].name, "grandchild1");
        assert_eq!(forest[0].children[1].name, "child2");
        assert!(forest[0].children[1].children.is_empty());
    }

    #[test]
    fn test_unresolvable_parent_becomes_root() {
        let records = vec![record("orphan", Some("missing"))];

        let builder = TreeBuilder::from_records(&records, GroupKind::Organization).unwrap();
        let forest = builder.build_forest().unwrap();

        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].name, "orphan");
    }

    #[test]
    fn test_cycle_is_rejected() {
        let records = vec![record("a", Some("b")), record("b", Some("a"))];

        let result = TreeBuilder::from_records(&records, GroupKind::Organization);

        assert!(matches!(result, Err(DomainError::CycleDetected(_))));
    }

    #[test]
    fn test_duplicate_name_is_rejected() {
        let records = vec![record("a", None), record("a", None)];

        let result = TreeBuilder::from_records(&records, GroupKind::Organization);

        assert!(matches!(result, Err(DomainError::DuplicateName { .. })));
    }
}
