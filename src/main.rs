use std::fs::OpenOptions;
use std::path::Path;
use std::sync::{Arc, Mutex};

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use foodboard::app::AppContext;
use foodboard::cli::{commands, Cli, Commands};
use foodboard::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui);

    // The TUI owns the terminal, so it only logs when given a file
    init_tracing(cli.log.as_deref(), !matches!(command, Commands::Tui))?;

    let config = Config::load()?;
    let ctx = AppContext::new(config, cli.api_url.as_deref())?;

    match &command {
        Commands::List => {
            commands::list_foods(&ctx).await?;
        }
        Commands::Add { .. } => {
            let candidate = command.new_food().unwrap_or_default();
            commands::add_food(&ctx, candidate).await?;
        }
        Commands::Update { id, .. } => {
            let patch = command.patch().unwrap_or_default();
            commands::update_food(&ctx, *id, patch).await?;
        }
        Commands::Delete { id } => {
            commands::delete_food(&ctx, *id).await?;
        }
        Commands::Tui => {
            foodboard::tui::run(Arc::new(ctx)).await?;
        }
    }

    Ok(())
}

fn init_tracing(log_file: Option<&Path>, to_stderr: bool) -> anyhow::Result<()> {
    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        }
        None => None,
    };

    let stderr_layer =
        (to_stderr && log_file.is_none()).then(|| fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .with(EnvFilter::from_default_env())
        .init();

    Ok(())
}
