use std::process::ExitCode;

use shiny_client::Client;
use shiny_verify::{run_suite, suite};

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let addr = std::env::var("SHINY_ADDR").unwrap_or_else(|_| "127.0.0.1:9700".into());

    let mut client = Client::connect(&addr).unwrap_or_else(|e| {
        eprintln!("failed to connect to shiny-server at {addr}: {e}");
        std::process::exit(1);
    });

    let cases = suite::cases();
    tracing::info!(
        "running {} cases against {addr} (two paths each)",
        cases.len()
    );

    let report = run_suite(&mut client, &cases);
    report.print_summary();

    if report.any_failed() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
