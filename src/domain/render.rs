//! HTML tree renderer.
//!
//! Renders a group forest as nested `<ul>`/`<li>` markup, an order of
//! magnitude faster than going through a template engine. Output is
//! consumed as raw HTML; no escaping is applied, so callers must trust
//! node names and titles.

use std::fmt::Write;

use crate::domain::entities::{GroupKind, GroupNode};

/// Render a forest as a nested HTML list.
///
/// An empty forest yields the bare wrapper
/// `<ul class="hierarchy-tree-top"></ul>`.
pub fn render_tree(top_nodes: &[GroupNode], kind: GroupKind) -> String {
    let mut html = String::from("<ul class=\"hierarchy-tree-top\">");
    for node in top_nodes {
        render_node(&mut html, node, kind);
    }
    html.push_str("</ul>");
    html
}

/// Like [`render_tree`], but an empty forest yields the empty string.
pub fn render_tree_list(top_nodes: &[GroupNode], kind: GroupKind) -> String {
    if top_nodes.is_empty() {
        return String::new();
    }
    render_tree(top_nodes, kind)
}

fn render_node(html: &mut String, node: &GroupNode, kind: GroupKind) {
    if node.highlighted {
        let _ = write!(html, "<li class=\"highlighted\" id=\"node_{}\">", node.name);
    } else {
        let _ = write!(html, "<li id=\"node_{}\">", node.name);
    }

    let _ = write!(
        html,
        "<a href=\"/{}/{}\">{}</a>",
        kind, node.name, node.title
    );

    if !node.children.is_empty() {
        html.push_str("<ul class=\"hierarchy-tree\">");
        for child in &node.children {
            render_node(html, child, kind);
        }
        html.push_str("</ul>");
    }
    html.push_str("</li>");
}
