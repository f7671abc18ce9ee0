//! TOML-backed group store.
//!
//! The store file holds the flat relation as `[[groups]]` tables:
//!
//! ```toml
//! [[groups]]
//! id = "dept-root"
//! name = "root"
//! title = "Root Department"
//! type = "organization"
//!
//! [[groups]]
//! id = "dept-child"
//! name = "child"
//! title = "Child Department"
//! type = "organization"
//! parent = "root"
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::domain::{GroupKind, GroupRecord, GroupRef};
use crate::infrastructure::error::{InfraError, InfraResult};
use crate::infrastructure::traits::{GroupStore, InMemoryGroupStore};

#[derive(Debug, Deserialize)]
struct StoreFile {
    #[serde(default)]
    groups: Vec<GroupRecord>,
}

/// Group store loaded from a `[[groups]]` TOML file.
///
/// The whole file is parsed up front, so a malformed record surfaces as
/// a typed load error instead of a deferred lookup failure.
pub struct TomlGroupStore {
    inner: InMemoryGroupStore,
}

impl TomlGroupStore {
    pub fn load(path: &Path) -> InfraResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| InfraError::io(format!("reading store file {}", path.display()), e))?;
        Self::parse(&content, path)
    }

    fn parse(content: &str, path: &Path) -> InfraResult<Self> {
        let file: StoreFile = toml::from_str(content).map_err(|e| InfraError::Store {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        debug!(groups = file.groups.len(), path = %path.display(), "loaded group store");
        Ok(Self {
            inner: InMemoryGroupStore::new(file.groups),
        })
    }
}

impl GroupStore for TomlGroupStore {
    fn records(&self, kind: GroupKind) -> Vec<GroupRecord> {
        self.inner.records(kind)
    }

    fn get(&self, name: &str, kind: GroupKind) -> Option<GroupRecord> {
        self.inner.get(name, kind)
    }

    fn descendants(&self, name: &str, kind: GroupKind) -> Vec<GroupRef> {
        self.inner.descendants(name, kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_minimal_store() {
        let content = r#"
            [[groups]]
            id = "g1"
            name = "root"
            title = "Root"

            [[groups]]
            id = "g2"
            name = "child"
            title = "Child"
            parent = "root"
        "#;

        let store = TomlGroupStore::parse(content, &PathBuf::from("test.toml")).unwrap();

        let records = store.records(GroupKind::Organization);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].parent.as_deref(), Some("root"));
    }

    #[test]
    fn test_missing_required_field_is_typed_error() {
        // no title
        let content = r#"
            [[groups]]
            id = "g1"
            name = "root"
        "#;

        let result = TomlGroupStore::parse(content, &PathBuf::from("test.toml"));

        assert!(matches!(result, Err(InfraError::Store { .. })));
    }
}
