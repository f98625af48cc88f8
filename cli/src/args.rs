use clap::Parser;

/// Terminal client for a punchline game server.
#[derive(Parser, Debug, Clone)]
#[command(name = "punchline", version, about = "punchline terminal client")]
pub struct CliArgs {
    /// Server address, e.g. "localhost:3000" or "https://play.example.com"
    #[arg(long, default_value = "localhost:3000")]
    pub server: String,

    /// Display name to request after connecting
    #[arg(long)]
    pub name: Option<String>,

    /// Locale used when rendering card text
    #[arg(long, default_value = "en")]
    pub locale: String,

    /// Verbose logging
    #[arg(long, default_value_t = false)]
    pub debug: bool,
}
