//! Service container for dependency injection
//!
//! Wires up the store-backed services with their dependencies.

use std::path::Path;
use std::sync::Arc;

use crate::application::services::{HierarchyService, SearchService};
use crate::config::Settings;
use crate::infrastructure::error::InfraResult;
use crate::infrastructure::store::TomlGroupStore;
use crate::infrastructure::traits::GroupStore;

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Flat group relation
    pub store: Arc<dyn GroupStore>,

    /// Tree building, filtering and section extraction
    pub hierarchy: HierarchyService,

    /// Search query augmentation
    pub search: SearchService,
}

impl ServiceContainer {
    /// Create a container backed by the TOML store at `store_path`.
    pub fn new(settings: Settings, store_path: &Path) -> InfraResult<Self> {
        let store = Arc::new(TomlGroupStore::load(store_path)?);
        Ok(Self::with_deps(settings, store))
    }

    /// Create a container with a custom store (for testing).
    pub fn with_deps(settings: Settings, store: Arc<dyn GroupStore>) -> Self {
        let settings = Arc::new(settings);
        let hierarchy = HierarchyService::new(Arc::clone(&store));
        let search = SearchService::new(Arc::clone(&store));

        Self {
            settings,
            store,
            hierarchy,
            search,
        }
    }
}
