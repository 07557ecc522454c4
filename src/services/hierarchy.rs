//! Category hierarchy resolver
//!
//! Categories live in an indexed collection and parent/child links are plain
//! id-pair edges, so there is no object graph to cycle through. Resolution is
//! a single level deep: top-level roots annotated with their direct children.

use crate::models::{Category, CategoryNode};
use std::collections::{HashMap, HashSet};

/// Resolve the one-level category tree.
///
/// Roots are exactly the rows with `top_level = true`; having no parent does
/// not make a category a root. Duplicate relationship rows yield a single
/// child (deduped by child id, first occurrence wins). Edges referencing
/// unknown ids are ignored.
pub fn build_tree(categories: &[Category], edges: &[(i64, i64)]) -> Vec<CategoryNode> {
    let by_id: HashMap<i64, &Category> = categories.iter().map(|c| (c.id, c)).collect();

    let mut children: HashMap<i64, Vec<Category>> = HashMap::new();
    let mut seen: HashSet<(i64, i64)> = HashSet::new();
    for &(parent_id, child_id) in edges {
        if !seen.insert((parent_id, child_id)) {
            continue;
        }
        if let Some(child) = by_id.get(&child_id) {
            children
                .entry(parent_id)
                .or_default()
                .push((*child).clone());
        }
    }

    categories
        .iter()
        .filter(|c| c.top_level)
        .map(|c| CategoryNode {
            id: c.id,
            name: c.name.clone(),
            top_level: c.top_level,
            featured: c.featured,
            children: children.remove(&c.id).unwrap_or_default(),
        })
        .collect()
}
