//! rtrest - command-line client for the RT REST 1.0 interface
//!
//! Fetches tickets and their related resources from a Request Tracker
//! server and prints them as JSON. Attachment content is written raw to
//! stdout.
//!
//! # Configuration
//!
//! Set the following environment variables (or use a `.env` file):
//!
//! - `RT_BASE_URL`: Base URL of the RT instance
//! - `RT_USERNAME`: Username for authentication
//! - `RT_PASSWORD`: Password for authentication
//!
//! # Usage
//!
//! ```bash
//! rtrest show 42
//! rtrest history 42
//! rtrest attachment 42 error.log > error.log
//! ```

use std::io::Write;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

use rtrest::client::RtClient;
use rtrest::config::Config;

/// Command-line client for the RT REST 1.0 interface.
#[derive(Parser, Debug)]
#[command(name = "rtrest", version)]
#[command(about = "Query a Request Tracker server over its REST 1.0 interface")]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show a ticket
    Show {
        /// The ticket id
        id: u64,
    },

    /// List the history entries of a ticket
    History {
        /// The ticket id
        id: u64,
    },

    /// List the transactions of a ticket
    Transactions {
        /// The ticket id
        id: u64,
    },

    /// List the links of a ticket
    Links {
        /// The ticket id
        id: u64,
    },

    /// List attachment metadata of a ticket
    Attachments {
        /// The ticket id
        id: u64,
    },

    /// Write one attachment's raw content to stdout
    Attachment {
        /// The ticket id
        id: u64,

        /// Filename of the attachment
        filename: String,
    },

    /// List the comments of a ticket
    Comments {
        /// The ticket id
        id: u64,
    },

    /// List the custom fields of a ticket
    CustomFields {
        /// The ticket id
        id: u64,

        /// Restrict to a single field and show its value history instead
        #[arg(long)]
        history_of: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (ignore errors if not found)
    dotenvy::dotenv().ok();

    // Log to stderr; stdout carries the fetched data.
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rtrest=info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let args = Args::parse();

    let config = Config::from_env().context("Failed to load configuration")?;
    let client = RtClient::new(&config).context("Failed to create RT client")?;

    match args.command {
        Commands::Show { id } => print_json(&client.ticket(id).await?)?,
        Commands::History { id } => print_json(&client.ticket_history(id).await?)?,
        Commands::Transactions { id } => print_json(&client.ticket_transactions(id).await?)?,
        Commands::Links { id } => print_json(&client.ticket_links(id).await?)?,
        Commands::Attachments { id } => print_json(&client.ticket_attachments(id).await?)?,
        Commands::Attachment { id, filename } => {
            let bytes = client.ticket_attachment_content(id, &filename).await?;
            std::io::stdout()
                .write_all(&bytes)
                .context("Failed to write attachment to stdout")?;
        }
        Commands::Comments { id } => print_json(&client.ticket_comments(id).await?)?,
        Commands::CustomFields { id, history_of } => match history_of {
            Some(name) => {
                print_json(&client.ticket_custom_field_values_history(id, &name).await?)?;
            }
            None => print_json(&client.ticket_custom_fields(id).await?)?,
        },
    }

    Ok(())
}

/// Prints a value as pretty JSON on stdout.
fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}
