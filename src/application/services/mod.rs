//! Application services

pub mod hierarchy;
pub mod search;

pub use hierarchy::HierarchyService;
pub use search::{SearchContext, SearchParams, SearchService, INCLUDE_CHILDREN_FLAG};
