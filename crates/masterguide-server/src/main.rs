//! Master Account Guides server binary.

use std::path::PathBuf;

use masterguide_server::{start_server, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let mut config = ServerConfig::default();
    if let Ok(port) = std::env::var("PORT") {
        config.port = port.parse()?;
    }
    if let Ok(data_dir) = std::env::var("MASTERGUIDE_DATA_DIR") {
        config.data_dir = PathBuf::from(data_dir);
    }

    start_server(config).await
}
