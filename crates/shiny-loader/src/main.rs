use std::path::PathBuf;

use shiny_client::Client;
use shiny_loader::{BATCH_SIZE, FIXTURES, read_fixture};

const SPACE: &str = "adventure";

fn main() {
    tracing_subscriber::fmt::init();

    let addr = std::env::var("SHINY_ADDR").unwrap_or_else(|_| "127.0.0.1:9700".into());
    let fixture_dir: PathBuf = std::env::var("FIXTURE_DIR")
        .unwrap_or_else(|_| "fixtures".into())
        .into();

    let mut client = Client::connect(&addr).unwrap_or_else(|e| {
        eprintln!("failed to connect to shiny-server at {addr}: {e}");
        std::process::exit(1);
    });

    if let Err(e) = client.create_space(SPACE) {
        eprintln!("failed to create space {SPACE}: {e}");
        std::process::exit(1);
    }

    let mut total = 0u64;
    for (file, store) in FIXTURES {
        let path = fixture_dir.join(file);
        let docs = match read_fixture(&path) {
            Ok(docs) => docs,
            Err(e) => {
                eprintln!("failed to read {}: {e}", path.display());
                std::process::exit(1);
            }
        };

        if let Err(e) = client.create_store(SPACE, store) {
            eprintln!("failed to create store {SPACE}.{store}: {e}");
            std::process::exit(1);
        }

        let expected = docs.len();
        let mut inserted = 0u64;
        for batch in docs.chunks(BATCH_SIZE) {
            match client.insert_many(SPACE, store, batch.to_vec()) {
                Ok(n) => inserted += n,
                Err(e) => {
                    eprintln!("insert into {SPACE}.{store} failed: {e}");
                    std::process::exit(1);
                }
            }
        }

        tracing::info!("{SPACE}.{store}: inserted {inserted} of {expected} documents");
        total += inserted;
    }

    tracing::info!("done: {total} documents across {} stores", FIXTURES.len());
}
