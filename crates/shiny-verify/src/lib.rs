//! Differential verification harness for ShinyDB queries.
//!
//! Every case describes one logical query two equivalent ways — a structured
//! [`shiny_query::Query`] and a text query — plus a literal expected result
//! authored independently of the system under test. The runner executes both
//! construction paths, decodes the raw response with `shiny-wire`, and
//! asserts the expectation, tracking pass/fail counters per path.

pub mod case;
pub mod compare;
pub mod runner;
pub mod suite;

pub use case::{Case, Expectation, Expected};
pub use runner::{Outcome, Path, Report, run_case, run_suite};
