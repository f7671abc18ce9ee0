//! Tests for the search query augmenter

use std::collections::BTreeMap;
use std::sync::Arc;

use orgtree::application::services::{SearchContext, SearchParams, SearchService};
use orgtree::domain::{GroupKind, GroupRecord, GroupRef};
use orgtree::infrastructure::InMemoryGroupStore;

fn org(id: &str, name: &str, parent: Option<&str>) -> GroupRecord {
    GroupRecord {
        id: id.to_string(),
        name: name.to_string(),
        title: name.to_uppercase(),
        longname: None,
        kind: GroupKind::Organization,
        parent: parent.map(str::to_string),
    }
}

/// a ── b ── c
fn service() -> SearchService {
    let store = InMemoryGroupStore::new(vec![
        org("id-a", "a", None),
        org("id-b", "b", Some("a")),
        org("id-c", "c", Some("b")),
    ]);
    SearchService::new(Arc::new(store))
}

fn context_for(id: &str, name: &str) -> SearchContext {
    SearchContext {
        group: Some(GroupRef {
            id: id.to_string(),
            name: name.to_string(),
        }),
        fields: Vec::new(),
        fields_grouped: BTreeMap::new(),
    }
}

#[test]
fn given_no_context_when_searching_then_params_pass_through() {
    // Arrange
    let service = service();
    let params = SearchParams {
        q: "owner_org:\"id-a\" include_children:\"True\"".to_string(),
        fq: String::new(),
    };

    // Act
    let result = service.before_search(None, params.clone());

    // Assert
    assert_eq!(result, params);
}

#[test]
fn given_no_flag_when_searching_then_params_pass_through() {
    // Arrange
    let service = service();
    let mut context = context_for("id-a", "a");
    let params = SearchParams {
        q: "owner_org:\"id-a\"".to_string(),
        fq: "tags:stats".to_string(),
    };

    // Act
    let result = service.before_search(Some(&mut context), params.clone());

    // Assert
    assert_eq!(result, params);
}

#[test]
fn given_flag_and_descendants_when_searching_then_query_gets_disjunction() {
    // Arrange
    let service = service();
    let mut context = context_for("id-a", "a");
    let params = SearchParams {
        q: "owner_org:\"id-a\" include_children:\"True\"".to_string(),
        fq: "include_children:\"True\"".to_string(),
    };

    // Act
    let result = service.before_search(Some(&mut context), params);

    // Assert: disjunction over the organization plus descendants b and c
    assert_eq!(result.q, "(organization:a OR organization:b OR organization:c)");
    // flag token is gone from both strings
    assert!(!result.q.contains("include_children"));
    assert!(!result.fq.contains("include_children"));
}

#[test]
fn given_remaining_query_when_expanding_then_disjunction_is_and_joined() {
    // Arrange
    let service = service();
    let mut context = context_for("id-a", "a");
    let params = SearchParams {
        q: "tags:stats owner_org:\"id-a\" include_children:\"True\"".to_string(),
        fq: "include_children:\"True\"".to_string(),
    };

    // Act
    let result = service.before_search(Some(&mut context), params);

    // Assert
    assert_eq!(
        result.q,
        "tags:stats AND (organization:a OR organization:b OR organization:c)"
    );
}

#[test]
fn given_flag_but_no_descendants_when_searching_then_only_flag_is_stripped() {
    // Arrange: c is a leaf organization
    let service = service();
    let mut context = context_for("id-c", "c");
    let params = SearchParams {
        q: "owner_org:\"id-c\" include_children:\"True\"".to_string(),
        fq: "include_children:\"True\"".to_string(),
    };

    // Act
    let result = service.before_search(Some(&mut context), params);

    // Assert: the owner_org clause stays, no disjunction is added
    assert_eq!(result.q, "owner_org:\"id-c\"");
    assert_eq!(result.fq, "");
}

#[test]
fn given_flag_when_searching_then_grouped_fields_lose_include_children() {
    // Arrange
    let service = service();
    let mut context = context_for("id-a", "a");
    context
        .fields_grouped
        .insert("include_children".to_string(), vec!["True".to_string()]);
    context
        .fields_grouped
        .insert("tags".to_string(), vec!["stats".to_string()]);
    let params = SearchParams {
        q: "include_children:\"True\"".to_string(),
        fq: "include_children:\"True\"".to_string(),
    };

    // Act
    service.before_search(Some(&mut context), params);

    // Assert
    assert!(!context.fields_grouped.contains_key("include_children"));
    assert!(context.fields_grouped.contains_key("tags"));
}

#[test]
fn given_repeated_fields_when_searching_then_fields_are_deduped_in_order() {
    // Arrange
    let service = service();
    let mut context = context_for("id-a", "a");
    context.fields = vec![
        ("tags".to_string(), "stats".to_string()),
        ("include_children".to_string(), "True".to_string()),
        ("tags".to_string(), "stats".to_string()),
        ("license".to_string(), "cc".to_string()),
    ];
    let params = SearchParams {
        q: "anything".to_string(),
        fq: String::new(),
    };

    // Act
    service.before_search(Some(&mut context), params);

    // Assert: first occurrence wins, include_children is dropped
    assert_eq!(
        context.fields,
        vec![
            ("tags".to_string(), "stats".to_string()),
            ("license".to_string(), "cc".to_string()),
        ]
    );
}

#[test]
fn given_context_without_group_when_searching_then_params_pass_through() {
    // Arrange
    let service = service();
    let mut context = SearchContext::default();
    let params = SearchParams {
        q: "include_children:\"True\"".to_string(),
        fq: "include_children:\"True\"".to_string(),
    };

    // Act
    let result = service.before_search(Some(&mut context), params.clone());

    // Assert
    assert_eq!(result, params);
}
