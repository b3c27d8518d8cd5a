use anyhow::Result;
use chess_rules::cli::{App, Cli};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Initialize tracing, quiet unless RUST_LOG asks for more
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let app = App::from_config_path(cli.config.as_deref())?;
    let output = app.run(&cli.command)?;
    print!("{}", output);

    Ok(())
}
