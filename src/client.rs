//! HTTP client for the RT REST 1.0 interface.
//!
//! This module provides the `RtClient` struct for making authenticated
//! requests against an RT server. Every call is a single GET carrying the
//! credentials as query parameters; the response envelope is validated here
//! and the payload handed to the [`decode`](crate::decode) module.
//!
//! There is no retry policy: every failure is returned to the caller as-is.
//!
//! # Security
//!
//! The password is never logged. Error details built from response bodies
//! are sanitized before they leave this module.

use std::time::Duration;

use reqwest::{Client, StatusCode};

use crate::config::Config;
use crate::decode::{self, Record};
use crate::error::RtError;
use crate::models::{
    Attachment, Comment, CustomField, CustomFieldChange, CustomFieldValue,
    CustomFieldValueChange, HistoryEntry, Ticket, TicketLink, Transaction,
};

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Marker every valid RT status line carries (e.g. `RT/4.4.4 200 Ok`).
const RT_MARKER: &str = "RT";

/// Maximum length for response excerpts quoted in error messages.
const MAX_ERROR_BODY_LEN: usize = 500;

/// HTTP client for the RT REST 1.0 interface.
///
/// Holds the immutable connection configuration (base URL, credentials) and
/// exposes one method per logical resource. The client is cheap to clone and
/// safe to reuse; each call is independent.
///
/// # Example
///
/// ```ignore
/// let config = Config::from_env()?;
/// let client = RtClient::new(&config)?;
///
/// let ticket = client.ticket(1).await?;
/// println!("#{}: {}", ticket.id, ticket.display_subject());
/// ```
#[derive(Clone)]
pub struct RtClient {
    /// The underlying HTTP client (cloning is cheap).
    http: Client,

    /// Base URL normalized to end in `/REST/1.0/`.
    base_url: String,

    /// Username sent as the `user` query parameter.
    username: String,

    /// Password sent as the `pass` query parameter.
    /// SECURITY: Never log this value!
    password: String,
}

impl RtClient {
    /// Creates a new RT client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `RtError::HttpClient` if the HTTP client fails to initialize.
    pub fn new(config: &Config) -> Result<Self, RtError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(RtError::HttpClient)?;

        let base_url = Self::normalize_base_url(&config.base_url);

        Ok(Self {
            http,
            base_url,
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    /// Normalizes the base URL to ensure it ends with the REST 1.0 prefix.
    ///
    /// Resource paths are relative (`ticket/1/show`), so the normalized URL
    /// always carries a trailing slash.
    fn normalize_base_url(url: &str) -> String {
        let url = url.trim_end_matches('/');
        if url.ends_with("/REST/1.0") {
            format!("{}/", url)
        } else {
            format!("{}/REST/1.0/", url)
        }
    }

    /// Fetches a resource and decodes the payload as a single record.
    ///
    /// This is the generic request operation; the per-resource methods are
    /// thin wrappers supplying a path template and record shape. It is public
    /// so callers can decode custom shapes of their own.
    ///
    /// # Errors
    ///
    /// `Transport` if the request cannot be sent or read, `Auth` on HTTP 401,
    /// `ServerStatus` on any other non-200 status, `Protocol` on a malformed
    /// envelope, `Decode` if the payload fails to decode.
    pub async fn fetch_one<T: Record>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, RtError> {
        let payload = self.fetch_payload(path, params).await?;
        Ok(decode::decode_one(&payload)?)
    }

    /// Fetches a resource and decodes the payload as a list of records.
    ///
    /// # Errors
    ///
    /// Same conditions as [`fetch_one`](Self::fetch_one).
    pub async fn fetch_many<T: Record>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<T>, RtError> {
        let payload = self.fetch_payload(path, params).await?;
        Ok(decode::decode_many(&payload)?)
    }

    /// Performs the authenticated GET and validates the response envelope,
    /// returning the raw payload text.
    async fn fetch_payload(&self, path: &str, params: &[(&str, &str)]) -> Result<String, RtError> {
        let body = self.get_text(path, params).await?;

        // Envelope: status line, blank separator, payload.
        let mut parts = body.splitn(3, '\n');
        let (Some(status_line), Some(_separator), Some(payload)) =
            (parts.next(), parts.next(), parts.next())
        else {
            return Err(RtError::protocol(self.error_detail(&body)));
        };

        if !status_line.contains(RT_MARKER) {
            return Err(RtError::protocol(self.error_detail(&body)));
        }

        Ok(payload.to_string())
    }

    /// Issues the GET request with credentials merged into the query and
    /// returns the response body after status validation.
    async fn get_text(&self, path: &str, params: &[(&str, &str)]) -> Result<String, RtError> {
        let response = self.get(path, params).await?;
        response.text().await.map_err(RtError::Transport)
    }

    /// Issues the GET request and maps the HTTP status to an error.
    async fn get(&self, path: &str, params: &[(&str, &str)]) -> Result<reqwest::Response, RtError> {
        let url = format!("{}{}", self.base_url, path);

        tracing::debug!(path = %path, "Making RT REST request");

        let mut query: Vec<(&str, &str)> = params.to_vec();
        query.push(("user", self.username.as_str()));
        query.push(("pass", self.password.as_str()));

        let response = self
            .http
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(RtError::Transport)?;

        match response.status() {
            StatusCode::OK => Ok(response),
            StatusCode::UNAUTHORIZED => Err(RtError::Auth),
            status => Err(RtError::ServerStatus { status }),
        }
    }

    /// Builds a sanitized, truncated excerpt of a response body for error
    /// messages.
    fn error_detail(&self, body: &str) -> String {
        let detail = RtError::sanitize_message(body, &self.password);
        if detail.len() > MAX_ERROR_BODY_LEN {
            let truncated: String = detail.chars().take(MAX_ERROR_BODY_LEN).collect();
            format!("{}...[truncated]", truncated)
        } else {
            detail
        }
    }

    /// Gets a single ticket.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let ticket = client.ticket(42).await?;
    /// println!("{}: {}", ticket.status, ticket.display_subject());
    /// ```
    pub async fn ticket(&self, id: u64) -> Result<Ticket, RtError> {
        self.fetch_one(&format!("ticket/{}/show", id), &[]).await
    }

    /// Gets the history entries of a ticket.
    pub async fn ticket_history(&self, id: u64) -> Result<Vec<HistoryEntry>, RtError> {
        self.fetch_many(&format!("ticket/{}/history", id), &[]).await
    }

    /// Gets the transactions of a ticket.
    ///
    /// The decoder leaves [`Transaction::attachments`] empty; use
    /// [`ticket_attachments`](Self::ticket_attachments) for attachment
    /// metadata.
    pub async fn ticket_transactions(&self, id: u64) -> Result<Vec<Transaction>, RtError> {
        self.fetch_many(&format!("ticket/{}/transactions", id), &[])
            .await
    }

    /// Gets the links of a ticket (DependsOn, MemberOf, ...).
    pub async fn ticket_links(&self, id: u64) -> Result<Vec<TicketLink>, RtError> {
        self.fetch_many(&format!("ticket/{}/links", id), &[]).await
    }

    /// Gets attachment metadata for a ticket.
    pub async fn ticket_attachments(&self, id: u64) -> Result<Vec<Attachment>, RtError> {
        self.fetch_many(&format!("ticket/{}/attachments", id), &[])
            .await
    }

    /// Downloads the raw content of one attachment.
    ///
    /// Bypasses the text decoder entirely: the body is returned as-is after
    /// the usual status-code validation.
    pub async fn ticket_attachment_content(
        &self,
        id: u64,
        filename: &str,
    ) -> Result<Vec<u8>, RtError> {
        let path = format!(
            "ticket/{}/attachments/{}",
            id,
            urlencoding::encode(filename)
        );
        let response = self.get(&path, &[]).await?;
        let bytes = response.bytes().await.map_err(RtError::Transport)?;
        Ok(bytes.to_vec())
    }

    /// Gets the comments of a ticket.
    pub async fn ticket_comments(&self, id: u64) -> Result<Vec<Comment>, RtError> {
        self.fetch_many(&format!("ticket/{}/comments", id), &[]).await
    }

    /// Gets the custom fields of a ticket.
    pub async fn ticket_custom_fields(&self, id: u64) -> Result<Vec<CustomField>, RtError> {
        self.fetch_many(&format!("ticket/{}/custom_fields", id), &[])
            .await
    }

    /// Gets a single custom field of a ticket by name.
    pub async fn ticket_custom_field(&self, id: u64, name: &str) -> Result<CustomField, RtError> {
        self.fetch_one(&self.custom_field_path(id, name, ""), &[])
            .await
    }

    /// Gets the values of a multi-valued custom field.
    pub async fn ticket_custom_field_values(
        &self,
        id: u64,
        name: &str,
    ) -> Result<Vec<CustomFieldValue>, RtError> {
        self.fetch_many(&self.custom_field_path(id, name, "/values"), &[])
            .await
    }

    /// Gets the change history of a custom field.
    pub async fn ticket_custom_field_history(
        &self,
        id: u64,
        name: &str,
    ) -> Result<Vec<CustomFieldChange>, RtError> {
        self.fetch_many(&self.custom_field_path(id, name, "/history"), &[])
            .await
    }

    /// Gets the value history of a custom field.
    pub async fn ticket_custom_field_values_history(
        &self,
        id: u64,
        name: &str,
    ) -> Result<Vec<CustomFieldValueChange>, RtError> {
        self.fetch_many(&self.custom_field_path(id, name, "/values/history"), &[])
            .await
    }

    /// Builds a `ticket/{id}/custom_fields/{name}{suffix}` path with the
    /// field name percent-encoded.
    fn custom_field_path(&self, id: u64, name: &str, suffix: &str) -> String {
        format!(
            "ticket/{}/custom_fields/{}{}",
            id,
            urlencoding::encode(name),
            suffix
        )
    }
}
