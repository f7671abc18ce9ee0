//! Tests for forest highlighting, filtering and section extraction

use orgtree::domain::{
    count_highlighted, filter_forest, highlight_forest, tree_section, GroupNode, Selection,
};

fn node(name: &str, children: Vec<GroupNode>) -> GroupNode {
    GroupNode {
        name: name.to_string(),
        title: name.to_uppercase(),
        highlighted: false,
        children,
    }
}

// r1                  r2
// ├── a               └── d
// │   ├── aa
// │   └── ab
// └── b
fn forest() -> Vec<GroupNode> {
    vec![
        node(
            "r1",
            vec![
                node("a", vec![node("aa", vec![]), node("ab", vec![])]),
                node("b", vec![]),
            ],
        ),
        node("r2", vec![node("d", vec![])]),
    ]
}

#[test]
fn given_selection_when_highlighting_then_exactly_matching_names_are_marked() {
    // Arrange
    let mut forest = forest();
    let selection: Selection = ["aa", "r2"].into_iter().collect();

    // Act
    highlight_forest(&mut forest, &selection);

    // Assert
    assert_eq!(count_highlighted(&forest), 2);
    assert!(forest[0].children[0].children[0].highlighted); // aa
    assert!(forest[1].highlighted); // r2
    assert!(!forest[0].highlighted);
    assert!(!forest[0].children[0].highlighted);
}

#[test]
fn given_highlighted_forest_when_highlighting_again_then_result_is_unchanged() {
    // Arrange
    let selection: Selection = ["a", "d"].into_iter().collect();
    let mut once = forest();
    highlight_forest(&mut once, &selection);

    // Act
    let mut twice = once.clone();
    highlight_forest(&mut twice, &selection);

    // Assert
    assert_eq!(once, twice);
}

#[test]
fn given_matching_node_when_filtering_then_subtree_is_kept_intact() {
    // Arrange
    let selection: Selection = ["a"].into_iter().collect();

    // Act
    let matched = filter_forest(forest(), &selection, true);

    // Assert
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].name, "a");
    assert!(matched[0].highlighted);
    // non-matching children survive with their marks cleared
    assert_eq!(matched[0].children.len(), 2);
    assert!(!matched[0].children[0].highlighted);
}

#[test]
fn given_deep_match_when_filtering_then_nearest_highlighted_descendant_surfaces() {
    // Arrange: aa matches but neither r1 nor a does
    let selection: Selection = ["aa"].into_iter().collect();

    // Act
    let matched = filter_forest(forest(), &selection, true);

    // Assert: the non-highlighted ancestors disappear entirely
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].name, "aa");
}

#[test]
fn given_matches_across_roots_when_filtering_then_preorder_is_preserved() {
    // Arrange
    let selection: Selection = ["b", "aa", "d"].into_iter().collect();

    // Act
    let matched = filter_forest(forest(), &selection, true);

    // Assert: aa before b (pre-order within r1), d last
    let names: Vec<&str> = matched.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, ["aa", "b", "d"]);
}

#[test]
fn given_highlight_false_when_filtering_then_whole_matched_subtree_is_marked() {
    // Arrange
    let selection: Selection = ["a"].into_iter().collect();

    // Act
    let matched = filter_forest(forest(), &selection, false);

    // Assert: descendants not in the selection are marked too
    assert!(matched[0].highlighted);
    assert!(matched[0].children.iter().all(|c| c.highlighted));
}

#[test]
fn given_any_selection_when_filtering_then_result_is_bounded_by_highlight_count() {
    // Arrange
    let selection: Selection = ["r1", "a", "aa", "d"].into_iter().collect();
    let mut marked = forest();
    highlight_forest(&mut marked, &selection);
    let highlighted = count_highlighted(&marked);

    // Act
    let matched = filter_forest(forest(), &selection, true);

    // Assert
    assert!(matched.len() <= highlighted);
}

#[test]
fn given_full_section_request_then_root_subtree_with_target_highlighted() {
    // Act
    let section = tree_section(&forest(), "ab", true, true).unwrap();

    // Assert
    assert_eq!(section.name, "r1");
    assert_eq!(section.children.len(), 2);
    let ab = &section.children[0].children[1];
    assert_eq!(ab.name, "ab");
    assert!(ab.highlighted);
}

#[test]
fn given_no_siblings_then_section_is_pruned_to_the_path() {
    // Act
    let section = tree_section(&forest(), "aa", true, false).unwrap();

    // Assert: r1 keeps only a, a keeps only aa
    assert_eq!(section.name, "r1");
    assert_eq!(section.children.len(), 1);
    assert_eq!(section.children[0].name, "a");
    assert_eq!(section.children[0].children.len(), 1);
    assert_eq!(section.children[0].children[0].name, "aa");
}

#[test]
fn given_no_siblings_and_later_child_target_then_target_is_still_highlighted() {
    // ab is the second child of a, b the second child of r1: their paths
    // contain non-zero indices, so pruning must not lose the highlight
    let section = tree_section(&forest(), "ab", true, false).unwrap();

    assert_eq!(section.name, "r1");
    assert_eq!(section.children.len(), 1);
    assert_eq!(section.children[0].name, "a");
    assert_eq!(section.children[0].children.len(), 1);
    let ab = &section.children[0].children[0];
    assert_eq!(ab.name, "ab");
    assert!(ab.highlighted);

    let section = tree_section(&forest(), "b", true, false).unwrap();

    assert_eq!(section.children.len(), 1);
    assert_eq!(section.children[0].name, "b");
    assert!(section.children[0].highlighted);
}

#[test]
fn given_no_parents_then_section_is_own_subtree() {
    // Act
    let section = tree_section(&forest(), "a", false, true).unwrap();

    // Assert
    assert_eq!(section.name, "a");
    assert!(section.highlighted);
    assert_eq!(section.children.len(), 2);
}
