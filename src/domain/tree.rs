//! Forest traversal: highlighting, filtering and section extraction.
//!
//! All operations work on forests freshly built by
//! [`crate::domain::TreeBuilder`] and either mutate them in place
//! (highlighting) or consume them (filtering). Nothing here does I/O.

use crate::domain::entities::{GroupNode, Selection};

/// Mark every node whose name is in the selection, unmark all others.
///
/// Visits every node of the forest exactly once, at any depth.
/// Idempotent: re-running with the same selection is a no-op.
pub fn highlight_forest(forest: &mut [GroupNode], selection: &Selection) {
    for node in forest {
        highlight_node(node, selection);
    }
}

fn highlight_node(node: &mut GroupNode, selection: &Selection) {
    node.highlighted = selection.contains(&node.name);
    for child in &mut node.children {
        highlight_node(child, selection);
    }
}

/// Keep only the branches of the forest that match the selection.
///
/// Each matched node is returned with its full original subtree, matched
/// or not. A non-matching node is never returned itself; its children are
/// checked with the same rule, so a non-matching chain disappears unless
/// a descendant matches. Result order is the original pre-order among
/// matches.
///
/// With `highlight = true` the returned nodes keep the marks computed
/// against the selection; with `highlight = false` every node of a
/// matched subtree is marked highlighted, descendants included.
pub fn filter_forest(
    mut forest: Vec<GroupNode>,
    selection: &Selection,
    highlight: bool,
) -> Vec<GroupNode> {
    highlight_forest(&mut forest, selection);

    let mut matched = Vec::new();
    for node in forest {
        collect_highlighted(node, highlight, &mut matched);
    }
    matched
}

fn collect_highlighted(mut node: GroupNode, highlight: bool, matched: &mut Vec<GroupNode>) {
    if node.highlighted {
        if !highlight {
            mark_subtree(&mut node);
        }
        matched.push(node);
    } else {
        for child in node.children {
            collect_highlighted(child, highlight, matched);
        }
    }
}

fn mark_subtree(node: &mut GroupNode) {
    node.highlighted = true;
    for child in &mut node.children {
        mark_subtree(child);
    }
}

/// Extract the tree section around the node named `name`.
///
/// The target node comes back highlighted. `include_parents` keeps the
/// root subtree containing the node (otherwise the node's own subtree is
/// the result); `include_siblings` keeps off-path children of ancestors
/// (otherwise each ancestor retains only the on-path child).
///
/// Returns `None` when no node of the forest carries the name.
pub fn tree_section(
    forest: &[GroupNode],
    name: &str,
    include_parents: bool,
    include_siblings: bool,
) -> Option<GroupNode> {
    for root in forest {
        if let Some(path) = path_to(root, name) {
            return Some(build_section(root, &path, include_parents, include_siblings));
        }
    }
    None
}

/// Pre-order path of child indices from `root` down to the node named
/// `name`; empty when the root itself is the target.
fn path_to(root: &GroupNode, name: &str) -> Option<Vec<usize>> {
    if root.name == name {
        return Some(Vec::new());
    }
    for (i, child) in root.children.iter().enumerate() {
        if let Some(mut path) = path_to(child, name) {
            path.insert(0, i);
            return Some(path);
        }
    }
    None
}

fn build_section(
    root: &GroupNode,
    path: &[usize],
    include_parents: bool,
    include_siblings: bool,
) -> GroupNode {
    if !include_parents || path.is_empty() {
        let mut target = node_at(root, path).clone();
        target.highlighted = true;
        return target;
    }

    let mut section = root.clone();
    // highlight before pruning: the path indices refer to the unpruned tree
    if let Some(target) = node_at_mut(&mut section, path) {
        target.highlighted = true;
    }
    if !include_siblings {
        prune_off_path(&mut section, path);
    }
    section
}

fn node_at<'a>(root: &'a GroupNode, path: &[usize]) -> &'a GroupNode {
    let mut node = root;
    for &i in path {
        node = &node.children[i];
    }
    node
}

fn node_at_mut<'a>(root: &'a mut GroupNode, path: &[usize]) -> Option<&'a mut GroupNode> {
    let mut node = root;
    for &i in path {
        node = node.children.get_mut(i)?;
    }
    Some(node)
}

/// Drop every off-path child of the ancestors; the target keeps its
/// full subtree.
fn prune_off_path(node: &mut GroupNode, path: &[usize]) {
    if let Some((&next, rest)) = path.split_first() {
        node.children.swap(0, next);
        node.children.truncate(1);
        prune_off_path(&mut node.children[0], rest);
    }
}

/// Count of highlighted nodes in the forest.
pub fn count_highlighted(forest: &[GroupNode]) -> usize {
    fn count(node: &GroupNode) -> usize {
        usize::from(node.highlighted) + node.children.iter().map(count).sum::<usize>()
    }
    forest.iter().map(count).sum()
}
