//! Hierarchical group/organization trees.
//!
//! Builds forests of group nodes from a flat parent/child relation,
//! highlights and filters branches by membership, extracts tree
//! sections, renders trees as nested HTML, and expands search queries
//! over an organization to cover its descendants.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
