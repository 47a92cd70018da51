use anyhow::Result;
use hr_agent::config::{EnvironmentConfig, Secrets};
use hr_agent::start_web_server;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_PORT: u16 = 8000;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("hr_agent=info,rocket=warn")),
        )
        .init();

    let port = match std::env::var("ROCKET_PORT") {
        Ok(raw) => raw
            .parse::<u16>()
            .map_err(|_| anyhow::anyhow!("ROCKET_PORT must be a valid port number"))?,
        Err(_) => DEFAULT_PORT,
    };

    let environment = EnvironmentConfig::load()?;
    let secrets = Secrets::from_env()?;

    info!("Anti-Ghosting HR Agent API");
    info!("Server: http://0.0.0.0:{}", port);

    start_web_server(environment, secrets, port).await
}
