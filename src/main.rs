use std::io::Read;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shelfgenius::callnumber_service;
use shelfgenius::models::BibRecord;
use shelfgenius::ClassificationConfig;

/// Batch indexer: reads a JSON array of bibliographic records from a file
/// argument (or stdin) and writes the derived index documents to stdout.
fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shelfgenius=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match std::env::var("SHELFGENIUS_CONFIG") {
        Ok(path) => match ClassificationConfig::from_json_file(&path) {
            Ok(config) => {
                tracing::info!("Loaded configuration overrides from {}", path);
                config
            }
            Err(e) => {
                tracing::error!("Failed to load {}: {}", path, e);
                std::process::exit(1);
            }
        },
        Err(_) => ClassificationConfig::default(),
    };

    let input = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path).unwrap_or_else(|e| {
            tracing::error!("Failed to read {}: {}", path, e);
            std::process::exit(1);
        }),
        None => {
            let mut buffer = String::new();
            if let Err(e) = std::io::stdin().read_to_string(&mut buffer) {
                tracing::error!("Failed to read stdin: {}", e);
                std::process::exit(1);
            }
            buffer
        }
    };

    let records: Vec<BibRecord> = match serde_json::from_str(&input) {
        Ok(records) => records,
        Err(e) => {
            tracing::error!("Invalid record JSON: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Indexing {} records", records.len());
    let docs = callnumber_service::index_records(&config, &records);

    match serde_json::to_string_pretty(&docs) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            tracing::error!("Failed to serialize output: {}", e);
            std::process::exit(1);
        }
    }
}
