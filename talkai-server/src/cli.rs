use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "talkai-server",
    about = "TalkAI Bridge - OpenAI-compatible gateway for the TalkAI backend",
    version = env!("CARGO_PKG_VERSION"),
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(short, long, env = "TALKAI_PORT", default_value = "8001")]
    pub port: u16,

    #[arg(long, env = "TALKAI_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, help = "Path to the outbound TalkAI key file", default_value = talkai_core::keys::CLIENT_KEYS_FILE)]
    pub keys_file: PathBuf,

    #[arg(long, help = "Path to the model catalog file", default_value = talkai_core::catalog::MODELS_FILE)]
    pub models_file: PathBuf,

    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Start the gateway (default if no command specified)")]
    Serve,

    #[command(about = "Generate a new client API key")]
    GenerateKey,
}
