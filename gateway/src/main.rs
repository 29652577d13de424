//! # Gateway Service
//!
//! Thin entry point that delegates to lib-web for server setup.
//!
//! Configuration is read once here, from the environment (and `.env` if
//! present), and handed to the server; nothing reads the environment after
//! startup.

use lib_core::Config;
use lib_web::{start_server, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env().map_err(anyhow::Error::msg)?;
    let server = ServerConfig::from_env();

    start_server(server, config).await
}
