//! Tag parsing and relevance ordering tests.

use wayfinder::models::{RankedService, Service, ServiceDetail, ServiceStatus};
use wayfinder::services::ranking::{order_by_relevance, parse_tag_ids, TagKind};
use wayfinder::Error;

fn hit(id: i64, name: &str, matching_tags: i64) -> RankedService {
    RankedService {
        detail: ServiceDetail {
            service: Service {
                id,
                resource_id: 1,
                name: name.to_string(),
                status: ServiceStatus::Approved,
                certified: false,
                certified_at: None,
                alternate_name: None,
                long_description: None,
                eligibility: None,
                fee: None,
                wait_time: None,
                application_process: None,
                required_documents: None,
                url: None,
                email: None,
                interpretation_services: None,
            },
            schedule: None,
            notes: Vec::new(),
            addresses: Vec::new(),
            categories: Vec::new(),
            eligibilities: Vec::new(),
            resource: None,
        },
        matching_tags,
    }
}

#[test]
fn parses_comma_separated_ids_in_order() {
    assert_eq!(parse_tag_ids("3,1,2").unwrap(), vec![3, 1, 2]);
    assert_eq!(parse_tag_ids(" 4 , 5 ").unwrap(), vec![4, 5]);
}

#[test]
fn duplicate_ids_collapse_to_one() {
    assert_eq!(parse_tag_ids("7,7,7,2,7").unwrap(), vec![7, 2]);
}

#[test]
fn empty_input_yields_empty_set() {
    assert_eq!(parse_tag_ids("").unwrap(), Vec::<i64>::new());
    assert_eq!(parse_tag_ids(" , ,").unwrap(), Vec::<i64>::new());
}

#[test]
fn non_numeric_token_fails_the_whole_parse() {
    assert!(matches!(parse_tag_ids("1,food,3"), Err(Error::InvalidInput(_))));
    assert!(matches!(parse_tag_ids("1.5"), Err(Error::InvalidInput(_))));
}

#[test]
fn orders_by_match_count_descending_then_name_ascending() {
    let mut hits = vec![
        hit(1, "Bread Line", 1),
        hit(2, "Aid Center", 3),
        hit(3, "Care Clinic", 3),
    ];

    order_by_relevance(&mut hits);

    let names: Vec<&str> = hits.iter().map(|h| h.detail.service.name.as_str()).collect();
    assert_eq!(names, vec!["Aid Center", "Care Clinic", "Bread Line"]);
}

#[test]
fn equal_counts_tie_break_by_name_and_never_swap() {
    // Two services matching the same single tag: ordered by name ascending,
    // stable across repeated runs.
    let build = || vec![hit(9, "Zeta House", 1), hit(4, "Alpha House", 1)];

    let mut first = build();
    order_by_relevance(&mut first);
    for _ in 0..10 {
        let mut again = build();
        order_by_relevance(&mut again);
        let ids: Vec<i64> = again.iter().map(|h| h.detail.service.id).collect();
        assert_eq!(ids, vec![4, 9]);
        assert_eq!(
            ids,
            first.iter().map(|h| h.detail.service.id).collect::<Vec<_>>()
        );
    }
}

#[test]
fn tag_kind_selects_fixed_identifiers() {
    assert_eq!(TagKind::Category.join_table(), "categories_services");
    assert_eq!(TagKind::Category.tag_column(), "category_id");
    assert_eq!(TagKind::Eligibility.join_table(), "eligibilities_services");
    assert_eq!(TagKind::Eligibility.tag_column(), "eligibility_id");
}
