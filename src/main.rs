use anyhow::Result;
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use linebuf::{repl, Config};

/// An in-memory line editor with undo/redo
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Path to a config file (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Start with an empty document instead of the configured lines
    #[arg(long, conflicts_with = "line")]
    empty: bool,

    /// Initial document line; repeat for more lines
    #[arg(long = "line", value_name = "TEXT")]
    line: Vec<String>,

    /// Log filter, e.g. `debug` (overrides RUST_LOG)
    #[arg(long)]
    log_level: Option<String>,

    /// Write the default config file and exit
    #[arg(long)]
    init_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they don't interleave with the document view
    let filter = match &cli.log_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if cli.init_config {
        let path = cli.config.clone().unwrap_or_else(Config::default_path);
        Config::default().save(&path)?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    let mut config = Config::load(cli.config.as_deref())?;
    if cli.empty {
        config.seed_lines.clear();
    } else if !cli.line.is_empty() {
        config.seed_lines = cli.line;
    }

    let mut buffer = config.build_buffer();
    let stdin = io::stdin();
    repl::run(&mut buffer, stdin.lock(), io::stdout(), &config.prompt)?;

    Ok(())
}
