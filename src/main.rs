use color_eyre::eyre::Result;
use dotenv::dotenv;
use regragui_api::config::ApiConfig;
use regragui_db::connect_store;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenv().ok();

    let config = ApiConfig::from_env()?;

    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Creates the schema on first run against PostgreSQL
    let store = connect_store(&config.database_url).await?;
    info!("Document store ready");

    regragui_api::start_server(config, store).await?;

    Ok(())
}
