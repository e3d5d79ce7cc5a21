//! webagent CLI entry point.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use webagent::cli::{commands, Cli, Commands, Output};
use webagent::config::Settings;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        Output::error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Load configuration
    let config_path = Settings::config_path(cli.config.as_deref());
    let settings = Settings::load_from(Some(&config_path))?;

    // Initialize logging
    let log_level = match cli.verbose {
        0 => settings.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("webagent={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Execute command
    match &cli.command {
        Commands::Chat => {
            commands::run_chat(settings).await?;
        }

        Commands::Run { task, max_steps } => {
            commands::run_task(task, *max_steps, settings).await?;
        }

        Commands::Serve { host, port } => {
            let host = host.clone().unwrap_or_else(|| settings.server.host.clone());
            let port = port.unwrap_or(settings.server.port);
            commands::run_serve(&host, port, settings).await?;
        }

        Commands::Tool { tool } => {
            commands::run_tool(tool, settings).await?;
        }

        Commands::Doctor => {
            commands::run_doctor(&settings, &config_path)?;
        }

        Commands::Config { action } => {
            commands::run_config(action, settings, &config_path)?;
        }
    }

    Ok(())
}
