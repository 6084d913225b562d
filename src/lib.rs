//! # rtrest
//!
//! rtrest is a client library for the Request Tracker (RT) REST 1.0
//! text interface.
//!
//! RT's classic REST endpoint answers authenticated GET requests with a
//! line-oriented `key: value` format rather than JSON. This crate wraps the
//! transport and decodes that format into plain Rust structs: tickets,
//! history entries, transactions, links, attachments, comments, and custom
//! fields.
//!
//! ## Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`config`] - Configuration loading from environment variables
//! - [`error`] - Error types with credential-sanitized messages
//! - [`decode`] - The text-format decoder and the [`Record`](decode::Record)
//!   field-table trait
//! - [`client`] - HTTP client with one method per RT resource
//! - [`models`] - Record shapes for RT resources
//!
//! The decoder is a pure function over its input; the client performs one
//! blocking request/response per call with no caching, retries, or shared
//! mutable state. The library is read-only: no write or update operations
//! are exposed.
//!
//! ## Configuration
//!
//! Three environment variables are required:
//!
//! - `RT_BASE_URL`: Base URL of the RT instance
//! - `RT_USERNAME`: Username for authentication
//! - `RT_PASSWORD`: Password for authentication
//!
//! Optional:
//! - `RUST_LOG`: Log level (e.g. `rtrest=debug`)
//!
//! The password is held only in memory, never logged, and sanitized out of
//! error messages built from external data.
//!
//! ## Example
//!
//! ```ignore
//! use rtrest::client::RtClient;
//! use rtrest::config::Config;
//!
//! async fn example() -> Result<(), rtrest::error::RtError> {
//!     let config = Config::from_env()?;
//!     let client = RtClient::new(&config)?;
//!
//!     let ticket = client.ticket(1).await?;
//!     println!("#{}: {} [{}]", ticket.id, ticket.display_subject(), ticket.status);
//!
//!     for entry in client.ticket_history(1).await? {
//!         println!("{}: {} -> {}", entry.field, entry.old_value, entry.new_value);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod client;
pub mod config;
pub mod decode;
pub mod error;
pub mod models;
