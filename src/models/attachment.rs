//! Attachment metadata model.
//!
//! Covers the `ticket/{id}/attachments` listing. The raw bytes of a single
//! attachment come from
//! [`RtClient::ticket_attachment_content`](crate::client::RtClient::ticket_attachment_content),
//! which bypasses the text decoder.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::decode::{Field, Record};

/// Metadata for one attachment of a ticket.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Attachment {
    /// Attachment id.
    pub id: i64,

    /// Original filename.
    pub filename: String,

    /// Attachment body, when the listing inlines it.
    pub content: String,

    /// MIME content type.
    pub mime_type: String,

    /// User who uploaded the attachment.
    pub creator: String,

    /// Upload time.
    pub created: Option<NaiveDateTime>,

    /// Last modification time.
    pub last_updated: Option<NaiveDateTime>,
}

impl Record for Attachment {
    const FIELDS: &'static [Field<Self>] = &[
        Field::int("id", |a, v| a.id = v),
        Field::str("Filename", |a, v| a.filename = v),
        Field::str("Content", |a, v| a.content = v),
        Field::str("MimeType", |a, v| a.mime_type = v),
        Field::str("Creator", |a, v| a.creator = v),
        Field::time("Created", |a, v| a.created = Some(v)),
        Field::time("LastUpdated", |a, v| a.last_updated = Some(v)),
    ];
}
