//! A guided walk through filtering, ordering and paging. Expects a server
//! already loaded with the `adventure` fixtures (see `shiny-loader`).

use shiny_client::{Client, ClientError};
use shiny_query::{Operator, Query};
use shiny_wire::{count_frames, nth_frame_field, scalar_count};

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
    println!("── Counting ────────────────────────────────────────");
    let query = Query::from("adventure", "orders").count().build();
    let response = client.run(&query)?;
    let count = response.body.as_deref().and_then(scalar_count).unwrap_or(0);
    println!("orders in the store: {count}");

    println!();
    println!("── Filtering ───────────────────────────────────────");
    // The same query, both ways. The text form is what an interactive
    // shell would send; the builder form is what application code writes.
    let text = "FROM adventure.orders WHERE TotalDue > 100000 COUNT";
    let response = client.run_text(text)?;
    let count = response.body.as_deref().and_then(scalar_count).unwrap_or(0);
    println!("{text}");
    println!("  -> {count}");

    let query = Query::from("adventure", "orders")
        .filter("TotalDue", Operator::Gt, 100000_i64)
        .count()
        .build();
    let response = client.run(&query)?;
    let count = response.body.as_deref().and_then(scalar_count).unwrap_or(0);
    println!("builder equivalent -> {count}");

    println!();
    println!("── Ordering and paging ─────────────────────────────");
    let query = Query::from("adventure", "products")
        .sort_desc("ListPrice")
        .take(5)
        .build();
    let response = client.run(&query)?;
    let body = response.body.as_deref().unwrap_or(&[]);
    println!("top {} products by list price:", count_frames(body));
    for i in 0..count_frames(body) {
        let name = nth_frame_field(body, i, "Name");
        let price = nth_frame_field(body, i, "ListPrice");
        println!("  {name} at {price}");
    }

    println!();
    println!("── Nested fields ───────────────────────────────────");
    let query = Query::from("adventure", "customers").take(3).build();
    let response = client.run(&query)?;
    let body = response.body.as_deref().unwrap_or(&[]);
    for i in 0..count_frames(body) {
        let name = nth_frame_field(body, i, "Name");
        let city = nth_frame_field(body, i, "Address.City");
        println!("  {name} in {city}");
    }

    Ok(())
}
