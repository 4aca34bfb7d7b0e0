//! Every case's text form must parse to exactly the structure its builder
//! form produces. This is what makes running both paths a differential test
//! of the server rather than of two different queries.

use shiny_query::parse_query;
use shiny_verify::suite;

#[test]
fn every_case_text_parses_to_its_builder_query() {
    for case in suite::cases() {
        let parsed = match parse_query(case.text) {
            Ok(q) => q,
            Err(e) => panic!("case {}: text does not parse: {e}", case.id),
        };
        assert_eq!(
            parsed, case.query,
            "case {}: text and builder queries diverge",
            case.id
        );
    }
}

#[test]
fn case_ids_are_unique() {
    let cases = suite::cases();
    let mut ids: Vec<&str> = cases.iter().map(|c| c.id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), cases.len());
}
