//! Custom field models.
//!
//! RT tickets carry site-defined custom fields; these records cover the
//! field listing, per-field values, and the two change-history listings.

use serde::Serialize;

use crate::decode::{Field, Record};

/// A custom field attached to a ticket.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CustomField {
    /// Custom field id.
    pub id: i64,

    /// Field name.
    pub name: String,

    /// Current value.
    pub value: String,
}

impl Record for CustomField {
    const FIELDS: &'static [Field<Self>] = &[
        Field::int("id", |f, v| f.id = v),
        Field::str("Name", |f, v| f.name = v),
        Field::str("Value", |f, v| f.value = v),
    ];
}

/// One value of a multi-valued custom field.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CustomFieldValue {
    /// Value id.
    pub id: i64,

    /// The value itself.
    pub value: String,
}

impl Record for CustomFieldValue {
    const FIELDS: &'static [Field<Self>] = &[
        Field::int("id", |f, v| f.id = v),
        Field::str("Value", |f, v| f.value = v),
    ];
}

/// One entry of a custom field's change history.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CustomFieldChange {
    /// Name of the field that changed.
    pub field: String,

    /// Value before the change.
    pub old: String,

    /// Value after the change.
    pub new: String,
}

impl Record for CustomFieldChange {
    const FIELDS: &'static [Field<Self>] = &[
        Field::str("Field", |c, v| c.field = v),
        Field::str("Old", |c, v| c.old = v),
        Field::str("New", |c, v| c.new = v),
    ];
}

/// One entry of a custom field's value history.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CustomFieldValueChange {
    /// Value before the change.
    pub old_value: String,

    /// Value after the change.
    pub new_value: String,
}

impl Record for CustomFieldValueChange {
    const FIELDS: &'static [Field<Self>] = &[
        Field::str("OldValue", |c, v| c.old_value = v),
        Field::str("NewValue", |c, v| c.new_value = v),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{decode_many, decode_one};

    #[test]
    fn decodes_custom_field_listing() {
        let fields: Vec<CustomField> =
            decode_many("id: 1\nName: Severity\nValue: high\nid: 2\nName: Site\nValue: Not set\n")
                .unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].name, "Severity");
        assert_eq!(fields[0].value, "high");
        assert_eq!(fields[1].name, "Site");
        assert_eq!(fields[1].value, "");
    }

    #[test]
    fn decodes_single_custom_field() {
        let field: CustomField = decode_one("id: 3\nName: Severity\nValue: low\n").unwrap();
        assert_eq!(field.id, 3);
        assert_eq!(field.value, "low");
    }

    #[test]
    fn decodes_value_history() {
        let changes: Vec<CustomFieldValueChange> =
            decode_many("id: 1\nOldValue: low\nNewValue: high\n").unwrap();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].old_value, "low");
        assert_eq!(changes[0].new_value, "high");
    }
}
