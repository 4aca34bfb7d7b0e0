use shiny_client::Execute;
use shiny_wire::{
    FieldValue, aggregate_field, count_frames, group_count, nested_field, nth_frame,
    nth_frame_field, scalar_count,
};

use crate::case::{Case, Expectation, Expected};
use crate::compare::FieldOrdering;
use crate::compare::compare_fields;

/// Which construction path produced the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Path {
    Builder,
    Text,
}

impl Path {
    pub fn label(self) -> &'static str {
        match self {
            Path::Builder => "builder",
            Path::Text => "text",
        }
    }
}

/// Result of one case on one path.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub pass: bool,
    pub detail: Option<String>,
}

impl Outcome {
    fn ok() -> Self {
        Outcome {
            pass: true,
            detail: None,
        }
    }

    fn fail(detail: String) -> Self {
        Outcome {
            pass: false,
            detail: Some(detail),
        }
    }
}

/// Pass/fail counters, split by construction path.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    pub builder_pass: u32,
    pub builder_fail: u32,
    pub text_pass: u32,
    pub text_fail: u32,
}

impl Report {
    pub fn record(&mut self, path: Path, pass: bool) {
        match (path, pass) {
            (Path::Builder, true) => self.builder_pass += 1,
            (Path::Builder, false) => self.builder_fail += 1,
            (Path::Text, true) => self.text_pass += 1,
            (Path::Text, false) => self.text_fail += 1,
        }
    }

    pub fn passed(&self) -> u32 {
        self.builder_pass + self.text_pass
    }

    pub fn failed(&self) -> u32 {
        self.builder_fail + self.text_fail
    }

    pub fn any_failed(&self) -> bool {
        self.failed() > 0
    }

    pub fn print_summary(&self) {
        println!();
        println!("── Summary ─────────────────────────────────");
        println!(
            "builder path: {} passed, {} failed",
            self.builder_pass, self.builder_fail
        );
        println!(
            "text path:    {} passed, {} failed",
            self.text_pass, self.text_fail
        );
        println!(
            "total:        {} passed, {} failed",
            self.passed(),
            self.failed()
        );
    }
}

/// Run every case through both construction paths, in order, printing one
/// PASS/FAIL line per execution. One case's failure never aborts the run.
pub fn run_suite(exec: &mut dyn Execute, cases: &[Case]) -> Report {
    let mut report = Report::default();
    for case in cases {
        for path in [Path::Builder, Path::Text] {
            let outcome = run_case(exec, case, path);
            report.record(path, outcome.pass);
            if outcome.pass {
                println!("PASS [{}/{}] {}", case.id, path.label(), case.description);
            } else {
                println!(
                    "FAIL [{}/{}] {}: {}",
                    case.id,
                    path.label(),
                    case.description,
                    outcome.detail.as_deref().unwrap_or("no detail")
                );
            }
        }
    }
    report
}

/// Execute one case on one path and assert its expectation.
pub fn run_case(exec: &mut dyn Execute, case: &Case, path: Path) -> Outcome {
    let response = match path {
        Path::Builder => exec.run(&case.query),
        Path::Text => exec.run_text(case.text),
    };
    let response = match response {
        Ok(r) => r,
        Err(e) => return Outcome::fail(format!("query execution failed: {e}")),
    };
    check(&case.expect, response.body.as_deref())
}

/// Assert an expectation against a decoded response body.
pub fn check(expect: &Expectation, body: Option<&[u8]>) -> Outcome {
    match expect {
        Expectation::Count(expected) => check_count(*expected, body),
        Expectation::DocCount(expected) => check_doc_count(*expected, body),
        Expectation::Aggregates(checks) => check_aggregates(checks, body),
        Expectation::GroupCount(expected) => check_group_count(*expected, body),
        Expectation::Order { path, values } => check_order(path, values, body),
        Expectation::SortedBy(keys) => check_sorted(keys, body),
        Expectation::Projection { present, absent } => check_projection(present, absent, body),
    }
}

fn check_count(expected: i64, body: Option<&[u8]>) -> Outcome {
    let Some(buf) = body else {
        // Empty result sets arrive with no body at all; that only ever
        // means a count of zero.
        return if expected == 0 {
            Outcome::ok()
        } else {
            Outcome::fail(format!("expected count {expected}, got empty response body"))
        };
    };
    match scalar_count(buf) {
        Some(actual) if actual == expected => Outcome::ok(),
        Some(actual) => Outcome::fail(format!("expected count {expected}, got {actual}")),
        None => Outcome::fail(format!(
            "expected count {expected}, response has no numeric count field (got {})",
            scalar_describe(buf, "count")
        )),
    }
}

fn check_doc_count(expected: usize, body: Option<&[u8]>) -> Outcome {
    let actual = body.map_or(0, count_frames);
    if actual == expected {
        Outcome::ok()
    } else {
        Outcome::fail(format!("expected {expected} documents, got {actual}"))
    }
}

fn check_aggregates(checks: &[(&'static str, f64)], body: Option<&[u8]>) -> Outcome {
    let Some(buf) = body else {
        return Outcome::fail("expected aggregate response, got empty body".to_string());
    };
    for (alias, expected) in checks {
        let actual = aggregate_field(buf, alias);
        match actual.as_f64() {
            Some(value) if crate::compare::floats_equal(value, *expected) => {}
            Some(value) => {
                return Outcome::fail(format!("{alias}: expected {expected}, got {value}"));
            }
            None => {
                return Outcome::fail(format!(
                    "{alias}: expected {expected}, got {} ({})",
                    actual,
                    actual.type_name()
                ));
            }
        }
    }
    Outcome::ok()
}

fn check_group_count(expected: i64, body: Option<&[u8]>) -> Outcome {
    let Some(buf) = body else {
        return Outcome::fail(format!(
            "expected {expected} groups, got empty response body"
        ));
    };
    match group_count(buf) {
        Ok(actual) if actual == expected => Outcome::ok(),
        Ok(actual) => Outcome::fail(format!("expected {expected} groups, got {actual}")),
        Err(e) => Outcome::fail(format!("expected {expected} groups: {e}")),
    }
}

fn check_order(path: &str, values: &[Expected], body: Option<&[u8]>) -> Outcome {
    let buf = body.unwrap_or(&[]);
    for (i, expected) in values.iter().enumerate() {
        let actual = nth_frame_field(buf, i, path);
        if !expected.matches(&actual) {
            return Outcome::fail(format!(
                "{path} at position {i}: expected {expected}, got {actual} ({})",
                actual.type_name()
            ));
        }
    }
    Outcome::ok()
}

fn check_sorted(keys: &[shiny_query::Sort], body: Option<&[u8]>) -> Outcome {
    use shiny_query::SortDirection;

    let buf = body.unwrap_or(&[]);
    let frames = count_frames(buf);
    for i in 1..frames {
        // Walk the key list in priority order; the first unequal key
        // decides the pair, ties defer to the next key.
        for key in keys {
            let prev = nth_frame_field(buf, i - 1, &key.field);
            let next = nth_frame_field(buf, i, &key.field);
            match compare_fields(&prev, &next) {
                FieldOrdering::Equal => continue,
                FieldOrdering::Less => {
                    if key.direction == SortDirection::Asc {
                        break;
                    }
                    return Outcome::fail(format!(
                        "documents {} and {i} out of order on {} (descending): {prev} before {next}",
                        i - 1,
                        key.field
                    ));
                }
                FieldOrdering::Greater => {
                    if key.direction == SortDirection::Desc {
                        break;
                    }
                    return Outcome::fail(format!(
                        "documents {} and {i} out of order on {} (ascending): {prev} before {next}",
                        i - 1,
                        key.field
                    ));
                }
                FieldOrdering::Incomparable(why) => {
                    return Outcome::fail(format!(
                        "documents {} and {i} on {}: {why}",
                        i - 1,
                        key.field
                    ));
                }
            }
        }
    }
    Outcome::ok()
}

fn check_projection(present: &[&str], absent: &[&str], body: Option<&[u8]>) -> Outcome {
    let first = body.and_then(|buf| nth_frame(buf, 0));
    let Some(doc) = first else {
        return Outcome::fail("expected at least one document, got none".to_string());
    };

    // Check both lists to completion so one case reports every rule the
    // first document violates.
    let mut violations = Vec::new();
    for path in present {
        if !nested_field(doc, path).is_found() {
            violations.push(format!("missing projected field: {path}"));
        }
    }
    for path in absent {
        if nested_field(doc, path).is_found() {
            violations.push(format!("field should be absent: {path}"));
        }
    }

    if violations.is_empty() {
        Outcome::ok()
    } else {
        Outcome::fail(violations.join("; "))
    }
}

fn scalar_describe(buf: &[u8], name: &str) -> String {
    let value = nested_field(buf, name);
    match value {
        FieldValue::NotFound => "no such field".to_string(),
        other => format!("{} {other}", other.type_name()),
    }
}
