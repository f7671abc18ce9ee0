//! Hierarchy service
//!
//! Builds group forests from the store and exposes the tree operations
//! (filtering, sections, ancestor chains) over them. Trees are built
//! fresh per call and never cached across calls.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{
    filter_forest, tree_section, GroupKind, GroupNode, GroupRecord, Selection, TreeBuilder,
};
use crate::infrastructure::traits::GroupStore;

/// Service for building and querying group hierarchies.
pub struct HierarchyService {
    store: Arc<dyn GroupStore>,
}

impl HierarchyService {
    pub fn new(store: Arc<dyn GroupStore>) -> Self {
        Self { store }
    }

    /// The full forest of a kind; a non-empty selection filters it down
    /// to the matching branches (full subtrees kept, marks preserved).
    pub fn group_tree(&self, kind: GroupKind, selection: &Selection) -> ApplicationResult<Vec<GroupNode>> {
        let forest = self.build_forest(kind)?;
        if selection.is_empty() {
            return Ok(forest);
        }
        Ok(filter_forest(forest, selection, true))
    }

    /// The tree section around the group named `name`, with the group
    /// highlighted.
    pub fn group_tree_section(
        &self,
        name: &str,
        kind: GroupKind,
        include_parents: bool,
        include_siblings: bool,
    ) -> ApplicationResult<GroupNode> {
        let forest = self.build_forest(kind)?;
        tree_section(&forest, name, include_parents, include_siblings).ok_or_else(|| {
            ApplicationError::UnknownGroup {
                name: name.to_string(),
                kind,
            }
        })
    }

    /// Ancestor chain of the group named `name`, root first, the group
    /// itself excluded. A group without parents has an empty chain.
    pub fn group_tree_parents(
        &self,
        name: &str,
        kind: GroupKind,
    ) -> ApplicationResult<Vec<GroupRecord>> {
        let mut current = self.get(name, kind)?;
        let mut chain = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        seen.insert(current.name.clone());

        while let Some(parent_name) = current.parent.clone() {
            // a broken parent link ends the chain, same as an absent one
            let Some(parent) = self.store.get(&parent_name, kind) else {
                break;
            };
            if !seen.insert(parent.name.clone()) {
                debug!(group = name, "parent chain loops, truncating");
                break;
            }
            chain.push(parent.clone());
            current = parent;
        }

        chain.reverse();
        Ok(chain)
    }

    /// Extended display name of a group, or `default` when the group has
    /// none (or an empty one).
    pub fn longname(
        &self,
        name: &str,
        default: &str,
        kind: GroupKind,
    ) -> ApplicationResult<String> {
        let record = self.get(name, kind)?;
        Ok(record
            .longname
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| default.to_string()))
    }

    /// Groups allowed to become the parent of the group named `name`:
    /// every group of the kind except the group itself and its
    /// descendants. Without a name, every group of the kind.
    pub fn allowable_parent_groups(
        &self,
        name: Option<&str>,
        kind: GroupKind,
    ) -> ApplicationResult<Vec<GroupRecord>> {
        let records = self.store.records(kind);
        let Some(name) = name else {
            return Ok(records);
        };

        // descendants may not adopt their own ancestor
        let mut excluded: HashSet<String> = self
            .store
            .descendants(name, kind)
            .into_iter()
            .map(|r| r.name)
            .collect();
        excluded.insert(name.to_string());

        Ok(records
            .into_iter()
            .filter(|r| !excluded.contains(&r.name))
            .collect())
    }

    /// Section trees for a set of member groups, grouped by root.
    ///
    /// Each member's node is highlighted inside its root's section; a
    /// member whose root was already collected only gains its highlight.
    /// Members unknown to the store are skipped.
    pub fn themes_list(&self, members: &[String]) -> ApplicationResult<Vec<GroupNode>> {
        let mut sections: Vec<GroupNode> = Vec::new();
        let mut seen_members: HashSet<&str> = HashSet::new();

        for member in members {
            if !seen_members.insert(member.as_str()) {
                continue;
            }
            if self.store.get(member, GroupKind::Group).is_none() {
                debug!(group = %member, "unknown theme member, skipping");
                continue;
            }

            let section = self.group_tree_section(member, GroupKind::Group, true, true)?;
            match sections.iter_mut().find(|s| s.name == section.name) {
                Some(existing) => {
                    mark_member(existing, member);
                }
                None => sections.push(section),
            }
        }

        Ok(sections)
    }

    fn build_forest(&self, kind: GroupKind) -> ApplicationResult<Vec<GroupNode>> {
        let records = self.store.records(kind);
        let builder = TreeBuilder::from_records(&records, kind)?;
        let forest = builder.build_forest()?;
        debug!(%kind, roots = forest.len(), "built forest");
        Ok(forest)
    }

    fn get(&self, name: &str, kind: GroupKind) -> ApplicationResult<GroupRecord> {
        self.store
            .get(name, kind)
            .ok_or_else(|| ApplicationError::UnknownGroup {
                name: name.to_string(),
                kind,
            })
    }
}

fn mark_member(node: &mut GroupNode, name: &str) -> bool {
    if node.name == name {
        node.highlighted = true;
        return true;
    }
    node.children.iter_mut().any(|c| mark_member(c, name))
}
