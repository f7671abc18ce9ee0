//! Domain layer: entities and business logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod builder;
pub mod entities;
pub mod error;
pub mod render;
pub mod tree;

pub use builder::TreeBuilder;
pub use entities::{GroupKind, GroupNode, GroupRecord, GroupRef, Selection};
pub use error::{DomainError, DomainResult};
pub use render::{render_tree, render_tree_list};
pub use tree::{count_highlighted, filter_forest, highlight_forest, tree_section};
