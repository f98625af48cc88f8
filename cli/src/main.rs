//! Terminal client entry point.

mod args;
mod render;
mod transport;

use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = args::CliArgs::parse();

    let log_filter = if cli.debug {
        "debug".to_string()
    } else {
        "punchline_cli=info,punchline_client=info,warn".to_string()
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(cli.debug)
        .init();

    transport::run(cli).await
}
