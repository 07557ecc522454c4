//! Category hierarchy resolution tests.

use wayfinder::models::Category;
use wayfinder::services::hierarchy::build_tree;

fn category(id: i64, name: &str, top_level: bool) -> Category {
    Category {
        id,
        name: name.to_string(),
        top_level,
        featured: false,
    }
}

#[test]
fn roots_are_exactly_the_top_level_rows() {
    let categories = vec![
        category(1, "Food", true),
        category(2, "Groceries", false),
        // No parent, but not flagged top-level: never a root.
        category(3, "Orphaned", false),
    ];
    let edges = vec![(1, 2)];

    let tree = build_tree(&categories, &edges);

    let root_ids: Vec<i64> = tree.iter().map(|n| n.id).collect();
    assert_eq!(root_ids, vec![1]);
    assert_eq!(tree[0].children.len(), 1);
    assert_eq!(tree[0].children[0].id, 2);
}

#[test]
fn duplicate_relationship_rows_yield_one_child() {
    let categories = vec![category(1, "Housing", true), category(2, "Shelter", false)];
    let edges = vec![(1, 2), (1, 2), (1, 2)];

    let tree = build_tree(&categories, &edges);

    assert_eq!(tree[0].children.len(), 1);
}

#[test]
fn resolution_is_one_level_deep() {
    let categories = vec![
        category(1, "Health", true),
        category(2, "Clinics", true),
        category(3, "Dental", false),
    ];
    // Health -> Clinics -> Dental; Dental must not appear under Health.
    let edges = vec![(1, 2), (2, 3)];

    let tree = build_tree(&categories, &edges);

    let health = tree.iter().find(|n| n.id == 1).unwrap();
    assert_eq!(health.children.len(), 1);
    assert_eq!(health.children[0].id, 2);

    let clinics = tree.iter().find(|n| n.id == 2).unwrap();
    assert_eq!(clinics.children.len(), 1);
    assert_eq!(clinics.children[0].id, 3);
}

#[test]
fn cyclic_edges_do_not_recurse() {
    let categories = vec![category(1, "A", true), category(2, "B", true)];
    let edges = vec![(1, 2), (2, 1)];

    let tree = build_tree(&categories, &edges);

    assert_eq!(tree.len(), 2);
    assert_eq!(tree[0].children.len(), 1);
    assert_eq!(tree[1].children.len(), 1);
}

#[test]
fn edges_to_unknown_categories_are_ignored() {
    let categories = vec![category(1, "Legal", true)];
    let edges = vec![(1, 99)];

    let tree = build_tree(&categories, &edges);

    assert!(tree[0].children.is_empty());
}
