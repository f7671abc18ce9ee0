//! Search query augmentation
//!
//! When a search within an organization carries the include-children
//! flag, the query is rewritten so it covers the organization and every
//! descendant organization. The request context is passed explicitly;
//! an absent or flagless context means nothing to do and the params
//! pass through unchanged.

use std::collections::BTreeMap;
use std::sync::Arc;

use itertools::Itertools;
use regex::Regex;
use tracing::debug;

use crate::domain::{GroupKind, GroupRef};
use crate::infrastructure::traits::GroupStore;

/// Flag token callers put into the filter query to request descendant
/// expansion. A message for this service, never forwarded to the index.
pub const INCLUDE_CHILDREN_FLAG: &str = "include_children:\"True\"";

const INCLUDE_CHILDREN_FIELD: &str = "include_children";

/// Query and filter-query strings headed for the search index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub q: String,
    pub fq: String,
}

/// Request-scoped search state.
///
/// `fields` mirrors the submitted form fields; `fields_grouped` is the
/// field → values mapping the UI renders facets from. Both are mutated
/// in place during augmentation.
#[derive(Debug, Clone, Default)]
pub struct SearchContext {
    /// Organization the search is scoped to, if any
    pub group: Option<GroupRef>,
    pub fields: Vec<(String, String)>,
    pub fields_grouped: BTreeMap<String, Vec<String>>,
}

/// Service rewriting search params for descendant-inclusive searches.
pub struct SearchService {
    store: Arc<dyn GroupStore>,
    whitespace: Regex,
}

impl SearchService {
    pub fn new(store: Arc<dyn GroupStore>) -> Self {
        Self {
            store,
            whitespace: Regex::new(r"\s+").unwrap(),
        }
    }

    /// Rewrite search params before they go to the index.
    ///
    /// Without a context, a scoped group, or the include-children flag
    /// the params come back unchanged.
    pub fn before_search(
        &self,
        context: Option<&mut SearchContext>,
        params: SearchParams,
    ) -> SearchParams {
        let Some(context) = context else {
            return params;
        };

        dedupe_fields(&mut context.fields);

        let include_children =
            params.q.contains(INCLUDE_CHILDREN_FLAG) || params.fq.contains(INCLUDE_CHILDREN_FLAG);
        if !include_children {
            return params;
        }
        let Some(group) = context.group.clone() else {
            return params;
        };

        debug!(group = %group.name, "expanding search to descendant organizations");

        // The flag is a message for this service, not for the index.
        let mut q = params.q.replace(INCLUDE_CHILDREN_FLAG, "");
        let mut fq = params.fq.replace(INCLUDE_CHILDREN_FLAG, "");

        let descendants = self.store.descendants(&group.name, GroupKind::Organization);
        if !descendants.is_empty() {
            // The single-organization clause gets replaced by the
            // disjunction over the whole subtree.
            let owner_clause = format!("owner_org:\"{}\"", group.id);
            q = q.replace(&owner_clause, "");
            fq = fq.replace(&owner_clause, "");

            let disjunction = std::iter::once(group.name.as_str())
                .chain(descendants.iter().map(|d| d.name.as_str()))
                .map(|name| format!("organization:{name}"))
                .join(" OR ");

            q = self.collapse(&q);
            if !q.is_empty() {
                q.push_str(" AND ");
            }
            q.push('(');
            q.push_str(&disjunction);
            q.push(')');
        }

        context.fields_grouped.remove(INCLUDE_CHILDREN_FIELD);

        SearchParams {
            q: self.collapse(&q),
            fq: self.collapse(&fq),
        }
    }

    fn collapse(&self, s: &str) -> String {
        self.whitespace.replace_all(s.trim(), " ").into_owned()
    }
}

/// Drop repeated field pairs (first occurrence wins) and any
/// include-children entries; the flag is handled here, not by the form.
fn dedupe_fields(fields: &mut Vec<(String, String)>) {
    let mut seen = std::collections::HashSet::new();
    fields.retain(|pair| pair.0 != INCLUDE_CHILDREN_FIELD && seen.insert(pair.clone()));
}
