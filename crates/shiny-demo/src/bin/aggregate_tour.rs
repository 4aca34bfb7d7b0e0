//! A guided walk through aggregation: scalar aggregates, group-by and the
//! group envelope. Expects a server loaded with the `adventure` fixtures.

use shiny_client::{Client, ClientError};
use shiny_query::{AggregateOp, Query};
use shiny_wire::{aggregate_field, group_count, nested_field, sub_document};

fn main() {
    tracing_subscriber::fmt::init();

    let addr = std::env::var("SHINY_ADDR").unwrap_or_else(|_| "127.0.0.1:9700".into());
    let mut client = Client::connect(&addr).unwrap_or_else(|e| {
        eprintln!("failed to connect to shiny-server at {addr}: {e}");
        std::process::exit(1);
    });
    tracing::info!("connected to shiny-server at {addr}");

    if let Err(e) = tour(&mut client) {
        eprintln!("tour aborted: {e}");
        std::process::exit(1);
    }
}

fn tour(client: &mut Client) -> Result<(), ClientError> {
    println!("── Scalar aggregates ───────────────────────────────");
    let query = Query::from("adventure", "orders")
        .aggregate(AggregateOp::Sum, Some("TotalDue"), "total")
        .aggregate(AggregateOp::Avg, Some("TotalDue"), "avg")
        .aggregate(AggregateOp::Max, Some("TotalDue"), "max")
        .build();
    let response = client.run(&query)?;
    let body = response.body.as_deref().unwrap_or(&[]);
    // Without a GROUP BY the envelope holds a single group whose values
    // carry every alias.
    println!("revenue total: {}", aggregate_field(body, "total"));
    println!("order average: {}", aggregate_field(body, "avg"));
    println!("largest order: {}", aggregate_field(body, "max"));

    println!();
    println!("── Group by ────────────────────────────────────────");
    let text = "FROM adventure.employees GROUP BY Gender AGGREGATE COUNT AS n";
    let response = client.run_text(text)?;
    let body = response.body.as_deref().unwrap_or(&[]);
    println!("{text}");
    match group_count(body) {
        Ok(n) => println!("  -> {n} groups"),
        Err(e) => println!("  -> {e}"),
    }

    // Walk the group envelope by hand: groups is an array document keyed
    // "0", "1", ..., each element carrying its key and aggregate values.
    if let Some(groups) = sub_document(body, "groups") {
        let mut i = 0;
        while let Some(group) = sub_document(groups, &i.to_string()) {
            let gender = nested_field(group, "key.Gender");
            let n = nested_field(group, "values.n");
            println!("  {gender}: {n} employees");
            i += 1;
        }
    }

    println!();
    println!("── Filter before grouping ──────────────────────────");
    let query = Query::from("adventure", "orders")
        .filter("EmployeeID", shiny_query::Operator::Eq, 289_i64)
        .group_by("CustomerID")
        .aggregate(AggregateOp::Count, None, "n")
        .aggregate(AggregateOp::Sum, Some("TotalDue"), "total")
        .build();
    let response = client.run(&query)?;
    let body = response.body.as_deref().unwrap_or(&[]);
    match group_count(body) {
        Ok(n) => println!("employee 289 sold to {n} distinct customers"),
        Err(e) => println!("group count unavailable: {e}"),
    }
    println!(
        "first group: customer {} with {} orders totalling {}",
        aggregate_group_key(body, "CustomerID"),
        aggregate_field(body, "n"),
        aggregate_field(body, "total")
    );

    Ok(())
}

/// Key field of the first group in the envelope.
fn aggregate_group_key(body: &[u8], field: &str) -> shiny_wire::FieldValue {
    nested_field(body, &format!("groups.0.key.{field}"))
}
