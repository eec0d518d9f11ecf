//! Lexplain CLI - plain-language explanations and authenticity checks for legal documents.

use anyhow::Context;
use clap::Parser;
use lexplain_cli::commands;
use lexplain_cli::{AppContext, Cli, Command, Config, Formatter, Overrides};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = match cli.config {
        Some(path) => path,
        None => Config::path()?,
    };
    let mut config = Config::load_from(&config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;

    if let Some(profile_name) = cli.profile {
        config.switch_profile(profile_name)?;
    }

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    // Config edits are saved without per-run overrides
    let command = match cli.command {
        Command::Config(args) => {
            commands::execute_config(args, &mut config, &config_path, &formatter).await?;
            return Ok(());
        }
        command => command,
    };

    config.apply_overrides(Overrides {
        model: cli.model,
        database: cli.database,
        user_id: cli.user,
    });
    let ctx = AppContext::from_config(&config)?;

    match command {
        Command::Simplify(args) => commands::execute_simplify(args, &ctx, &formatter).await?,
        Command::Verify(args) => commands::execute_verify(args, &ctx, &formatter).await?,
        Command::History(args) => commands::execute_history(args, &ctx, &formatter).await?,
        Command::Show(args) => commands::execute_show(args, &ctx, &formatter).await?,
        Command::Usage(args) => commands::execute_usage(args, &ctx, &formatter).await?,
        Command::Config(_) => {}
    }

    Ok(())
}
