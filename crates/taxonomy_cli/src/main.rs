//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `taxonomy_core` linkage.
//! - Ingest one raw taxonomy file through the repository stack and print the
//!   resulting taxonomy as JSON.
//!
//! Usage: `taxonomy_cli [RAW_TAXONOMY_JSON [NAME]]`. When
//! `TAXONOMY_LOG_DIR` is set, logs are written there.

use log::info;
use std::process::ExitCode;
use taxonomy_core::{
    core_version, default_log_level, init_logging, CachingTaxonomyRepository,
    FactoryRawTaxonomyFetcher, FetchingTaxonomyRepository, LoggingConfig, RawTaxonomy,
    TaxonomyJson, TaxonomyKey, TaxonomyRepository,
};

const FILE_TAXONOMY_ID: &str = "file";

#[tokio::main]
async fn main() -> ExitCode {
    println!("taxonomy_core version={}", core_version());

    if let Ok(log_dir) = std::env::var("TAXONOMY_LOG_DIR") {
        if let Err(err) = init_logging(&LoggingConfig::new(default_log_level(), log_dir)) {
            eprintln!("logging disabled: {err}");
        }
    }

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        return ExitCode::SUCCESS;
    };

    match run(&path, args.next()).await {
        Ok(rendered) => {
            println!("{rendered}");
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

async fn run(path: &str, name: Option<String>) -> Result<String, String> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|err| format!("cannot read `{path}`: {err}"))?;
    let raw = RawTaxonomy::from_json_str(&text).map_err(|err| err.to_string())?;
    let key = TaxonomyKey::new(FILE_TAXONOMY_ID, name.unwrap_or_else(|| raw.name.clone()));

    let fetcher = FactoryRawTaxonomyFetcher::new().with_raw(FILE_TAXONOMY_ID, raw);
    let repository = CachingTaxonomyRepository::new(FetchingTaxonomyRepository::new(fetcher));
    let taxonomy = repository
        .get_by_key(&key)
        .await
        .map_err(|err| err.to_string())?;

    info!(
        "event=cli_ingest module=cli status=ok path={} taxonomy={}",
        path, key.name
    );
    serde_json::to_string_pretty(&TaxonomyJson::from(taxonomy.as_ref()))
        .map_err(|err| err.to_string())
}
