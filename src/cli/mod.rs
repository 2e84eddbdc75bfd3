//! CLI module for the game catalog.
//!
//! Subcommands:
//! - `serve`: Run the REST API
//! - `init`: Apply schema migrations
//! - `import`: Load game records from JSON files

mod import;
mod init;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::Result;

use crate::config::Config;
use crate::graph::backends::neo4j::Neo4jClient;

/// Game catalog - REST API over a Neo4j game graph
#[derive(Parser)]
#[command(name = "game-catalog")]
#[command(about = "Video-game catalog graph with a REST API")]
#[command(version)]
pub struct App {
    /// Run in verbose mode
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the REST API
    Serve {
        /// Host address to bind to (defaults to the configured API host)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (defaults to the configured API port)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Create constraints and indexes
    Init,

    /// Import game records from a JSON file or a directory of JSON files
    Import {
        /// File or directory to read
        path: PathBuf,
    },
}

impl App {
    /// Run the CLI application.
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Serve { ref host, port } => self.run_serve(host.clone(), port).await,
            Command::Init => self.run_init().await,
            Command::Import { ref path } => self.run_import(path).await,
        }
    }
}

/// Connect to Neo4j with the configured credentials.
async fn connect(config: &Config) -> Result<Neo4jClient> {
    tracing::info!("Connecting to Neo4j at {}", config.redacted_database_url());
    let client = Neo4jClient::connect(
        &config.database_address(),
        &config.database.username,
        &config.database.password,
    )
    .await
    .map_err(|e| color_eyre::eyre::eyre!("Failed to connect: {}", e))?;
    tracing::info!("Connected to Neo4j");
    Ok(client)
}
