use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use car_cost_advisor::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();
    let command = args.get_command();

    // serve configures tracing from the loaded config
    if !matches!(command, cli::Commands::Serve) {
        init_tracing("warn", "text");
    }

    match command {
        cli::Commands::Serve => {
            commands::serve::execute(&args.config).await?;
        }
        cli::Commands::Calc { input, model, json } => {
            commands::calc::execute(input.as_deref(), model.as_deref(), json)?;
        }
        cli::Commands::Profiles { key } => {
            commands::profiles::execute(key.as_deref())?;
        }
        cli::Commands::Config { action } => match action {
            cli::ConfigCommands::Show => commands::config::show(&args.config)?,
            cli::ConfigCommands::Validate => commands::config::validate(&args.config)?,
        },
        cli::Commands::Version => {
            println!("Car Cost Advisor v{}", env!("CARGO_PKG_VERSION"));
            println!("Profiles: {}", car_cost_advisor::profiles::VehicleModel::ALL.len());
        }
    }

    Ok(())
}
