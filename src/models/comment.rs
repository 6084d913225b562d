//! Ticket comment model.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::decode::{Field, Record};

/// One entry of a ticket's comment listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Comment {
    /// Comment id.
    pub id: i64,

    /// User who wrote the comment.
    pub creator: String,

    /// When the comment was written.
    pub created: Option<NaiveDateTime>,

    /// Comment body; multi-line bodies are newline-joined.
    pub content: String,

    /// Whether the comment is technician-only. The wire format has no
    /// boolean fields, so this stays `false` unless set by the caller.
    pub is_private: bool,
}

impl Record for Comment {
    const FIELDS: &'static [Field<Self>] = &[
        Field::int("id", |c, v| c.id = v),
        Field::str("Creator", |c, v| c.creator = v),
        Field::time("Created", |c, v| c.created = Some(v)),
        Field::str("Content", |c, v| c.content = v),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_many;

    #[test]
    fn decodes_comment_listing_with_multiline_content() {
        let payload = "id: 401\n\
                       Creator: alice\n\
                       Created: Mon Mar 4 12:00:00 2013\n\
                       Content: looked at the logs\n still nothing obvious\n\
                       id: 402\n\
                       Creator: bob\n\
                       Content: rebooted the printer\n";

        let comments: Vec<Comment> = decode_many(payload).unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].creator, "alice");
        assert_eq!(comments[0].content, "looked at the logs\nstill nothing obvious");
        assert!(!comments[0].is_private);
        assert_eq!(comments[1].id, 402);
        assert_eq!(comments[1].content, "rebooted the printer");
    }
}
