use anyhow::Result;
use car_cost_advisor::{config, init_tracing, server};
use colored::Colorize;
use std::path::Path;
use tracing::info;

/// Execute the serve command
///
/// This will:
/// 1. Load configuration
/// 2. Initialize tracing from the server settings
/// 3. Start the server (blocks until shutdown)
pub async fn execute(config_path: &Path) -> Result<()> {
    let cfg = config::load_config(config_path)?;

    init_tracing(&cfg.server.log_level, &cfg.server.log_format);

    println!("{}", "Starting car cost advisor...".green());
    info!(
        config = %config_path.display(),
        log_format = %cfg.server.log_format,
        "Starting car cost advisor in foreground mode"
    );

    server::start_server(cfg, config_path.to_path_buf()).await?;

    Ok(())
}
