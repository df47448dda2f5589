//! Teamdir command line entry point

use clap::Parser;
use colored::Colorize;
use teamdir_directory::DirectoryConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "teamdir=info,teamdir_cli=info,teamdir_core=info,teamdir_directory=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = teamdir_cli::Cli::parse();
    let config = DirectoryConfig::from_env()?;

    match teamdir_cli::run(cli, config).await {
        Ok(output) => {
            if !output.is_empty() {
                println!("{output}");
            }
            Ok(())
        }
        Err(err) => {
            eprintln!("{} {err}", "error:".red());
            if err.is_load_failure() {
                eprintln!("{}", "Check the roster source and try again.".yellow());
            }
            std::process::exit(1);
        }
    }
}
