use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, bail};
use dotenv::dotenv;
use regragui_api::config::parse_log_level;
use regragui_core::import::ImportKind;
use regragui_db::{connect_store, services::import::import_records};
use tracing_subscriber::FmtSubscriber;

/// Loads fields, flat slots or weekly slots from a JSON file into the store
/// named by DATABASE_URL.
#[derive(Parser)]
#[command(name = "regragui-import")]
#[command(version)]
#[command(about, long_about = None)]
struct Cli {
    /// Record kind: fields, slots or weekly-slots
    kind: ImportKind,

    /// JSON file holding an array of records
    file: PathBuf,

    /// Exit with an error status if any record is rejected
    #[arg(long)]
    strict: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenv().ok();
    let cli = Cli::parse();

    let level = parse_log_level(&std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let text = fs::read_to_string(&cli.file)
        .wrap_err_with(|| format!("Could not read {}", cli.file.display()))?;
    let data: serde_json::Value = serde_json::from_str(&text)
        .wrap_err_with(|| format!("{} is not valid JSON", cli.file.display()))?;

    let database_url = std::env::var("DATABASE_URL").wrap_err("DATABASE_URL environment variable must be set")?;
    let store = connect_store(&database_url).await?;

    let report = import_records(store.as_ref(), cli.kind, &data, Utc::now()).await?;

    println!("{} {} record(s) imported", report.success, cli.kind);
    for error in &report.errors {
        eprintln!("  - {}", error);
    }

    if cli.strict && !report.errors.is_empty() {
        bail!("{} record(s) rejected", report.errors.len());
    }
    Ok(())
}
