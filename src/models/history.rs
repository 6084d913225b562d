//! Ticket history models.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::decode::{Field, Record};

/// One entry of a ticket's history listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HistoryEntry {
    /// Value before the change.
    pub old_value: String,

    /// Value after the change.
    pub new_value: String,

    /// Name of the field that changed.
    pub field: String,

    /// User who made the change.
    pub creator: String,

    /// When the change happened.
    pub created: Option<NaiveDateTime>,
}

impl Record for HistoryEntry {
    const FIELDS: &'static [Field<Self>] = &[
        Field::str("OldValue", |h, v| h.old_value = v),
        Field::str("NewValue", |h, v| h.new_value = v),
        Field::str("Field", |h, v| h.field = v),
        Field::str("Creator", |h, v| h.creator = v),
        Field::time("Created", |h, v| h.created = Some(v)),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_many;

    #[test]
    fn decodes_history_listing() {
        let payload = "id: 101\n\
                       Field: Status\n\
                       OldValue: new\n\
                       NewValue: open\n\
                       Creator: alice\n\
                       Created: Mon Mar 4 12:00:00 2013\n\
                       id: 102\n\
                       Field: Owner\n\
                       OldValue: Nobody\n\
                       NewValue: alice\n\
                       Creator: alice\n";

        let history: Vec<HistoryEntry> = decode_many(payload).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].field, "Status");
        assert_eq!(history[0].old_value, "new");
        assert_eq!(history[0].new_value, "open");
        assert!(history[0].created.is_some());
        assert_eq!(history[1].field, "Owner");
        assert_eq!(history[1].new_value, "alice");
        assert!(history[1].created.is_none());
    }
}
