//! Tag-relevance ranking
//!
//! Services are matched against a requested set of tag ids (categories or
//! eligibilities) and ordered by how many of those tags they carry. Match
//! counting happens in SQL (see `db::services`); the ordering itself lives
//! here so it stays deterministic and testable.

use crate::{models::RankedService, Error, Result};

/// Which tag relation a search runs against. The table and column names are
/// selected from this closed enum, never from user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Category,
    Eligibility,
}

impl TagKind {
    pub fn join_table(&self) -> &'static str {
        match self {
            TagKind::Category => "categories_services",
            TagKind::Eligibility => "eligibilities_services",
        }
    }

    pub fn tag_column(&self) -> &'static str {
        match self {
            TagKind::Category => "category_id",
            TagKind::Eligibility => "eligibility_id",
        }
    }
}

/// Parse a comma-separated tag-id list into an ordered-unique id set.
///
/// Any non-numeric token fails the whole parse. An empty or all-whitespace
/// input yields an empty set, which callers must treat as "no results", not
/// "all services". Duplicate ids collapse to one occurrence.
pub fn parse_tag_ids(raw: &str) -> Result<Vec<i64>> {
    let mut ids = Vec::new();
    for token in raw.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let id: i64 = token
            .parse()
            .map_err(|_| Error::InvalidInput(format!("invalid tag id: {token:?}")))?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    Ok(ids)
}

/// Sort ranked hits by descending match count, then ascending service name.
///
/// The secondary key makes the ordering total for equal counts, so results
/// never swap across runs. Name comparison is plain lexicographic.
pub fn order_by_relevance(hits: &mut [RankedService]) {
    hits.sort_by(|a, b| {
        b.matching_tags
            .cmp(&a.matching_tags)
            .then_with(|| a.detail.service.name.cmp(&b.detail.service.name))
            .then_with(|| a.detail.service.id.cmp(&b.detail.service.id))
    });
}
