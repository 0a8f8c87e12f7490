use anyhow::Result;
use car_cost_advisor::config::{self, Config};
use colored::Colorize;
use std::path::Path;
use tracing::info;

/// Execute the config show command
///
/// Displays the current configuration with secrets masked
pub fn show(path: &Path) -> Result<()> {
    println!("{}", "Loading configuration...".yellow());
    info!("Loading configuration for display");

    let cfg = config::load_config(path)?;
    let sanitized = sanitize_secrets(&cfg);

    println!("{}", "Current Configuration:".green().bold());
    println!();

    let toml_string = toml::to_string_pretty(&sanitized)?;
    println!("{}", toml_string);

    Ok(())
}

/// Execute the config validate command
pub fn validate(path: &Path) -> Result<()> {
    println!("{}", "Validating configuration...".yellow());
    info!("Validating configuration file");

    let cfg = config::load_config(path)?;

    println!("{}", "✓ Configuration is valid".green());
    println!();
    println!("{}", "Summary:".bold());
    println!("  Listen: {}:{}", cfg.server.host, cfg.server.port);
    println!(
        "  Advisor: {} ({})",
        advisor_status(&cfg),
        cfg.advisor.model
    );
    println!("  Snapshots: {}", cfg.snapshots.path.display());
    println!(
        "  Metrics: {}",
        if cfg.metrics.enabled { "enabled" } else { "disabled" }
    );

    Ok(())
}

fn advisor_status(cfg: &Config) -> &'static str {
    if !cfg.advisor.enabled {
        "disabled"
    } else if cfg.advisor.is_usable() {
        "ready"
    } else {
        "enabled, missing API key"
    }
}

/// Sanitize secrets in configuration for safe display
fn sanitize_secrets(cfg: &Config) -> Config {
    let mut sanitized = cfg.clone();
    sanitized.advisor.api_key = mask_api_key(&sanitized.advisor.api_key);
    sanitized
}

/// Mask an API key for safe display
///
/// Shows first 7 and last 4 characters with asterisks in between
/// Example: "sk-1234567890abcdef" -> "sk-1234...cdef"
fn mask_api_key(key: &str) -> String {
    if key.is_empty() {
        return String::new();
    }
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 11 {
        // Too short to mask meaningfully
        return "***".to_string();
    }

    let prefix: String = chars[..7].iter().collect();
    let suffix: String = chars[chars.len() - 4..].iter().collect();

    format!("{}...{}", prefix, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_api_key() {
        assert_eq!(mask_api_key("sk-1234567890abcdef"), "sk-1234...cdef");
        assert_eq!(mask_api_key("short"), "***");
        assert_eq!(mask_api_key(""), "");
    }

    #[test]
    fn test_sanitize_secrets() {
        let mut cfg = Config::default();
        cfg.advisor.api_key = "zai-0123456789abcdef".to_string();

        let sanitized = sanitize_secrets(&cfg);
        assert_eq!(sanitized.advisor.api_key, "zai-012...cdef");
        assert_eq!(cfg.advisor.api_key, "zai-0123456789abcdef");
    }

    #[test]
    fn test_advisor_status() {
        let mut cfg = Config::default();
        assert_eq!(advisor_status(&cfg), "enabled, missing API key");
        cfg.advisor.api_key = "key".to_string();
        assert_eq!(advisor_status(&cfg), "ready");
        cfg.advisor.enabled = false;
        assert_eq!(advisor_status(&cfg), "disabled");
    }
}
