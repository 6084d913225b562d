//! Ticket transaction models.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::decode::{Field, Record};

/// One entry of a ticket's transaction listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Transaction {
    /// Transaction id.
    pub id: i64,

    /// Transaction type (protocol key `Type`), e.g. `Create`, `Correspond`.
    pub kind: String,

    /// Field affected by the transaction, if any.
    pub field: String,

    /// Value before the change.
    pub old_value: String,

    /// Value after the change.
    pub new_value: String,

    /// Free-form transaction data.
    pub data: String,

    /// Object the transaction applies to.
    pub object: String,

    /// User who caused the transaction.
    pub creator: String,

    /// When the transaction happened.
    pub created: Option<NaiveDateTime>,

    /// Attachments belonging to this transaction. The text decoder does not
    /// populate this; callers fill it from the attachment endpoints.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<AttachmentSummary>,
}

impl Record for Transaction {
    const FIELDS: &'static [Field<Self>] = &[
        Field::int("id", |t, v| t.id = v),
        Field::str("Type", |t, v| t.kind = v),
        Field::str("Field", |t, v| t.field = v),
        Field::str("OldValue", |t, v| t.old_value = v),
        Field::str("NewValue", |t, v| t.new_value = v),
        Field::str("Data", |t, v| t.data = v),
        Field::str("Object", |t, v| t.object = v),
        Field::str("Creator", |t, v| t.creator = v),
        Field::time("Created", |t, v| t.created = Some(v)),
    ];
}

/// Abbreviated attachment record, as nested under a transaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AttachmentSummary {
    /// Attachment id.
    pub id: i64,

    /// Original filename.
    pub filename: String,

    /// Free-form description.
    pub description: String,

    /// MIME content type.
    pub content_type: String,

    /// Attachment body, when the listing inlines it.
    pub content: String,
}

impl Record for AttachmentSummary {
    const FIELDS: &'static [Field<Self>] = &[
        Field::int("id", |a, v| a.id = v),
        Field::str("Filename", |a, v| a.filename = v),
        Field::str("Description", |a, v| a.description = v),
        Field::str("ContentType", |a, v| a.content_type = v),
        Field::str("Content", |a, v| a.content = v),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_many;

    #[test]
    fn decodes_transaction_listing() {
        let payload = "id: 201\n\
                       Type: Create\n\
                       Creator: bob\n\
                       Created: Mon Mar 4 12:00:00 2013\n\
                       Data: ticket created\n\
                       id: 202\n\
                       Type: Correspond\n\
                       Field: Status\n\
                       OldValue: new\n\
                       NewValue: open\n\
                       Creator: alice\n";

        let txns: Vec<Transaction> = decode_many(payload).unwrap();
        assert_eq!(txns.len(), 2);
        assert_eq!(txns[0].id, 201);
        assert_eq!(txns[0].kind, "Create");
        assert_eq!(txns[0].data, "ticket created");
        assert!(txns[0].attachments.is_empty());
        assert_eq!(txns[1].kind, "Correspond");
        assert_eq!(txns[1].new_value, "open");
    }

    #[test]
    fn multiline_data_is_joined() {
        let payload = "id: 203\nType: Comment\nData: first line\n second line\n";
        let txns: Vec<Transaction> = decode_many(payload).unwrap();
        assert_eq!(txns[0].data, "first line\nsecond line");
    }
}
