//! mdsearch: a bounded-memory web search client
//!
//! This is the command-line entry point.

use anyhow::Result;
use mdsearch::{
    config::Settings, credential::CredentialStore, format::ReportBuffer, search::SearchClient,
};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();

    let use_proxy = if let Some(pos) = args.iter().position(|a| a == "--proxy") {
        args.remove(pos);
        true
    } else {
        false
    };

    match args.split_first() {
        Some((cmd, rest)) if cmd == "search" && !rest.is_empty() => {
            let mut settings = load_settings()?;
            if use_proxy {
                settings.use_proxy = true;
            }
            run_search(settings, &rest.join(" ")).await
        }
        Some((cmd, [key])) if cmd == "set-key" => {
            let settings = load_settings()?;
            let mut client = SearchClient::new(settings, CredentialStore::load());
            client.set_credential(key)?;
            Ok(())
        }
        _ => {
            print_usage();
            std::process::exit(2);
        }
    }
}

async fn run_search(settings: Settings, query: &str) -> Result<()> {
    let report_capacity = settings.report_capacity;
    let client = SearchClient::new(settings, CredentialStore::load());

    let input = serde_json::json!({ "query": query }).to_string();
    let mut report = ReportBuffer::new(report_capacity);

    let result = client.execute(&input, &mut report).await;
    println!("{report}");

    result.map_err(|e| anyhow::anyhow!(e))
}

/// Load settings from file or use defaults
fn load_settings() -> Result<Settings> {
    let paths = [
        PathBuf::from("mdsearch.yml"),
        PathBuf::from("config/mdsearch.yml"),
        dirs::config_dir()
            .map(|p| p.join("mdsearch/settings.yml"))
            .unwrap_or_default(),
    ];

    // Check environment variable first
    if let Ok(path) = std::env::var("MDSEARCH_SETTINGS_PATH") {
        let path = PathBuf::from(path);
        if path.exists() {
            info!("Loading settings from: {}", path.display());
            let mut settings = Settings::from_file(&path)?;
            settings.merge_env();
            return Ok(settings);
        }
    }

    for path in paths.iter() {
        if path.exists() {
            info!("Loading settings from: {}", path.display());
            let mut settings = Settings::from_file(path)?;
            settings.merge_env();
            return Ok(settings);
        }
    }

    let mut settings = Settings::default();
    settings.merge_env();
    Ok(settings)
}

/// Print usage information
fn print_usage() {
    println!(
        r#"mdsearch v{}
A bounded-memory web search client

USAGE:
    mdsearch search <QUERY>... [--proxy]
    mdsearch set-key <KEY>

OPTIONS:
    --proxy    Route the exchange through the tunnel provider

ENVIRONMENT VARIABLES:
    MDSEARCH_SETTINGS_PATH  Path to settings.yml
    MDSEARCH_HOST           Search API host
    MDSEARCH_PORT           Search API port (proxied path)
    MDSEARCH_USE_PROXY      Use the proxied transport (true/false)
    MDSEARCH_TIMEOUT        Request timeout in seconds
    MDSEARCH_BASE_URL       Override the direct-path base URL
"#,
        mdsearch::VERSION
    );
}
