use anyhow::Result;
use clap::{CommandFactory, Parser};
use koios_agent_wallet::cli::{handle_cli, Cli};
use tracing_subscriber::EnvFilter;

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    // stdout carries the JSON report, logs go to stderr
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.self_test {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    }

    init_tracing(&cli.log_level);
    handle_cli(cli).await
}
