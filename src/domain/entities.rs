//! Domain entities: core data structures

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of a group in the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupKind {
    Organization,
    Group,
}

impl Default for GroupKind {
    fn default() -> Self {
        Self::Organization
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKind::Organization => write!(f, "organization"),
            GroupKind::Group => write!(f, "group"),
        }
    }
}

/// Flat persistent record describing one group and its parent link.
///
/// The hierarchy is stored as a flat parent/child relation; trees are
/// built fresh per call by [`crate::domain::TreeBuilder`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRecord {
    /// Stable identifier (e.g., "dept-a1b2c3d4")
    pub id: String,
    /// Unique name within a kind, used in URLs and tree lookups
    pub name: String,
    /// Display label
    pub title: String,
    /// Optional extended display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longname: Option<String>,
    /// Organization or generic group
    #[serde(rename = "type", default)]
    pub kind: GroupKind,
    /// Name of the parent group, None for roots
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

/// Tree node built from flat records.
///
/// `highlighted` is computed per call by the highlighter and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupNode {
    pub name: String,
    pub title: String,
    pub highlighted: bool,
    pub children: Vec<GroupNode>,
}

impl GroupNode {
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            highlighted: false,
            children: Vec::new(),
        }
    }

    /// Total node count of this subtree, including self.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(GroupNode::count).sum::<usize>()
    }

    /// Depth of this subtree (a leaf has depth 1).
    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(GroupNode::depth)
            .max()
            .unwrap_or(0)
    }
}

/// Lightweight (id, name) reference to a group, as returned by
/// descendant lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRef {
    pub id: String,
    pub name: String,
}

/// Set of group names used to mark tree matches.
///
/// Derived from any sequence of name-bearing records; lookups are O(1).
#[derive(Debug, Clone, Default)]
pub struct Selection {
    names: HashSet<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Selection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl Selection {
    /// Derive a selection from group records (their `name` fields).
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a GroupRecord>) -> Self {
        records.into_iter().map(|r| r.name.as_str()).collect()
    }
}
