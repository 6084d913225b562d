//! Ticket and ticket link models.
//!
//! `Ticket` is the full record returned by `ticket/{id}/show`; `TicketLink`
//! is one entry of the `ticket/{id}/links` listing.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::decode::{Field, Record};

/// A single RT ticket.
///
/// Fields RT reports as empty or `Not set` keep their defaults (empty
/// string, 0, or `None`). The `id` is kept as the raw string RT sends
/// (e.g. `ticket/42`).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Ticket {
    /// Raw ticket identifier as reported by the server.
    pub id: String,

    /// Queue the ticket lives in.
    pub queue: String,

    /// Current owner.
    pub owner: String,

    /// User who created the ticket.
    pub creator: String,

    /// Subject line.
    pub subject: String,

    /// Current status (e.g. `new`, `open`, `resolved`).
    pub status: String,

    /// Current priority.
    pub priority: i64,

    /// Priority the ticket was created with.
    pub initial_priority: i64,

    /// Priority the ticket escalates towards.
    pub final_priority: i64,

    /// Comma-separated requestor addresses.
    pub requestors: String,

    /// Comma-separated Cc watchers.
    pub cc: String,

    /// Comma-separated AdminCc watchers.
    pub admin_cc: String,

    /// When the ticket was created.
    pub created: Option<NaiveDateTime>,

    /// Scheduled start time.
    pub starts: Option<NaiveDateTime>,

    /// Actual start time.
    pub started: Option<NaiveDateTime>,

    /// Due time.
    pub due: Option<NaiveDateTime>,

    /// When the ticket was resolved.
    pub resolved: Option<NaiveDateTime>,

    /// When the requestor was last notified.
    pub told: Option<NaiveDateTime>,

    /// Last modification time.
    pub last_updated: Option<NaiveDateTime>,

    /// Estimated effort in minutes.
    pub time_estimated: i64,

    /// Recorded effort in minutes.
    pub time_worked: i64,

    /// Remaining effort in minutes.
    pub time_left: i64,
}

impl Record for Ticket {
    const FIELDS: &'static [Field<Self>] = &[
        Field::str("id", |t, v| t.id = v),
        Field::str("Queue", |t, v| t.queue = v),
        Field::str("Owner", |t, v| t.owner = v),
        Field::str("Creator", |t, v| t.creator = v),
        Field::str("Subject", |t, v| t.subject = v),
        Field::str("Status", |t, v| t.status = v),
        Field::int("Priority", |t, v| t.priority = v),
        Field::int("InitialPriority", |t, v| t.initial_priority = v),
        Field::int("FinalPriority", |t, v| t.final_priority = v),
        Field::str("Requestors", |t, v| t.requestors = v),
        Field::str("Cc", |t, v| t.cc = v),
        Field::str("AdminCc", |t, v| t.admin_cc = v),
        Field::time("Created", |t, v| t.created = Some(v)),
        Field::time("Starts", |t, v| t.starts = Some(v)),
        Field::time("Started", |t, v| t.started = Some(v)),
        Field::time("Due", |t, v| t.due = Some(v)),
        Field::time("Resolved", |t, v| t.resolved = Some(v)),
        Field::time("Told", |t, v| t.told = Some(v)),
        Field::time("LastUpdated", |t, v| t.last_updated = Some(v)),
        Field::int("TimeEstimated", |t, v| t.time_estimated = v),
        Field::int("TimeWorked", |t, v| t.time_worked = v),
        Field::int("TimeLeft", |t, v| t.time_left = v),
    ];
}

impl Ticket {
    /// The numeric part of the id, if present (`ticket/42` → `42`).
    pub fn numeric_id(&self) -> Option<i64> {
        self.id.rsplit('/').next().and_then(|s| s.parse().ok())
    }

    /// Returns the subject or a placeholder.
    pub fn display_subject(&self) -> &str {
        if self.subject.is_empty() {
            "(No subject)"
        } else {
            &self.subject
        }
    }
}

/// A link from one ticket to another (DependsOn, MemberOf, RefersTo, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TicketLink {
    /// Link type as reported by RT.
    pub kind: String,

    /// Id of the linked ticket.
    pub id: i64,
}

impl Record for TicketLink {
    const FIELDS: &'static [Field<Self>] = &[
        Field::str("Type", |l, v| l.kind = v),
        Field::int("id", |l, v| l.id = v),
    ];
}
