mod cli;

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use aside_tui::App;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    // Handle subcommands first (before loading config)
    if let Some(cmd) = &cli.command {
        match cmd {
            Commands::Completions { shell } => {
                cli::print_completions(*shell);
                return Ok(());
            }
            Commands::ShowConfig => {
                let config = effective_config(&cli)?;
                println!("{}", serde_yaml::to_string(&config).unwrap_or_default());
                return Ok(());
            }
        }
    }

    let config = Arc::new(effective_config(&cli)?);
    run_tui(config).await
}

/// Layered config with CLI overrides applied on top.
fn effective_config(cli: &Cli) -> anyhow::Result<aside_config::Config> {
    let mut config = aside_config::load(cli.config.as_deref())?;
    if let Some(word) = &cli.word {
        config.word = word.clone();
    }
    if cli.ascii {
        config.tui.ascii_borders = true;
    }
    Ok(config)
}

async fn run_tui(config: Arc<aside_config::Config>) -> anyhow::Result<()> {
    use ratatui::crossterm::{
        event::{DisableMouseCapture, EnableMouseCapture},
        execute,
    };

    let terminal = ratatui::init();
    // The keypad and swipe gestures need pointer events.
    let _ = execute!(std::io::stderr(), EnableMouseCapture);

    let app = App::new(config);
    let result = app.run(terminal).await;

    let _ = execute!(std::io::stderr(), DisableMouseCapture);
    ratatui::restore();

    result
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
