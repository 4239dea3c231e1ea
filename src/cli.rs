use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "chatcon", about = "Operator console for a line-oriented chat client and server")]
pub struct Cli {
    /// Path to config file (default: ./config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Connect to a chat server and drive the client console
    Client(ClientArgs),
    /// Listen for chat clients and drive the server console
    Server(ServerArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ClientArgs {
    /// Login id; when omitted the first console line must be `#login <id>`
    #[arg(short, long)]
    pub login: Option<String>,

    /// Server host (default from config: localhost)
    pub host: Option<String>,

    /// Server port (default from config: 5555)
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Args)]
pub struct ServerArgs {
    /// Port to listen on (default from config: 5555)
    pub port: Option<u16>,
}
