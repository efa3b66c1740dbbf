//! Binary entrypoint for the CarRepair API server.
use carrepair_api::run;
use carrepair_core::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    // CARREPAIR_CONFIG points at a YAML file; CARREPAIR_ADDR overrides the address
    let config = AppConfig::from_env()?;
    run(config).await
}
