use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "car-cost", version, about = "Car ownership cost and affordability advisor")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Evaluate an input and print the cost breakdown
    Calc {
        /// JSON file holding a full calculator input
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Model key used for the default input, e.g. F30_320D
        #[arg(short, long, conflicts_with = "input")]
        model: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the vehicle profile table
    Profiles {
        /// Show a single profile
        #[arg(short, long)]
        key: Option<String>,
    },

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Display current configuration (with secrets masked)
    Show,

    /// Validate configuration file
    Validate,
}

impl Cli {
    /// Get the command to execute, defaulting to Serve if none provided
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_serve() {
        let cli = Cli {
            config: PathBuf::from("config.toml"),
            command: None,
        };

        assert!(matches!(cli.get_command(), Commands::Serve));
    }

    #[test]
    fn test_cli_parsing_calc_with_model() {
        let args = vec!["car-cost", "calc", "--model", "G20_330E", "--json"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.get_command() {
            Commands::Calc { input, model, json } => {
                assert!(input.is_none());
                assert_eq!(model.as_deref(), Some("G20_330E"));
                assert!(json);
            }
            _ => panic!("Expected Calc command"),
        }
    }

    #[test]
    fn test_cli_calc_input_conflicts_with_model() {
        let args = vec!["car-cost", "calc", "--input", "a.json", "--model", "F30_320D"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_cli_parsing_config_show_with_global_config() {
        let args = vec!["car-cost", "config", "show", "--config", "/etc/car-cost.toml"];
        let cli = Cli::try_parse_from(args).unwrap();

        assert_eq!(cli.config, PathBuf::from("/etc/car-cost.toml"));
        match cli.get_command() {
            Commands::Config { action } => {
                assert!(matches!(action, ConfigCommands::Show));
            }
            _ => panic!("Expected Config command"),
        }
    }

    #[test]
    fn test_cli_parsing_profiles_key() {
        let cli = Cli::try_parse_from(vec!["car-cost", "profiles", "-k", "F10_520D"]).unwrap();
        match cli.get_command() {
            Commands::Profiles { key } => assert_eq!(key.as_deref(), Some("F10_520D")),
            _ => panic!("Expected Profiles command"),
        }
    }
}
