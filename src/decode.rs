//! Decoder for the RT REST 1.0 line-oriented text format.
//!
//! RT's classic REST interface does not speak JSON. A payload is a sequence
//! of `key: value` lines; a line starting with a space continues the previous
//! key's value. List responses concatenate several such blocks, each
//! introduced by an `id` line.
//!
//! This module maps that format onto plain Rust structs. Instead of runtime
//! reflection, every decodable type carries a static field table (see
//! [`Record`]) pairing each protocol key with a setter, so the decoder stays
//! a pure function from text to values.
//!
//! # Example
//!
//! ```ignore
//! let ticket: Ticket = decode::decode_one("id: ticket/1\nQueue: support\n")?;
//! ```

use std::collections::HashMap;

use chrono::NaiveDateTime;
use thiserror::Error;

/// Fixed layout RT uses for timestamps, e.g. `Mon Mar  4 12:00:00 2013`.
const TIME_LAYOUT: &str = "%a %b %e %H:%M:%S %Y";

/// Placeholder RT emits for fields that have no value.
const NOT_SET: &str = "Not set";

/// Errors produced while decoding a payload.
///
/// A decode error aborts the whole decode; no partial record is returned.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// A payload line that is neither empty nor a continuation lacked a colon.
    #[error("payload line without colon: {line:?}")]
    MalformedLine {
        /// The offending line, verbatim.
        line: String,
    },

    /// A value did not match the declared type of its field.
    #[error("cannot decode {value:?} as {expected} for key {key:?}")]
    Coercion {
        /// Canonical protocol key of the field being assigned.
        key: &'static str,
        /// The value that failed to parse.
        value: String,
        /// The expected type ("integer" or "timestamp").
        expected: &'static str,
    },
}

/// Typed setter for one field of a record.
///
/// The decoder coerces the raw value according to the variant before
/// invoking the function: `Int` parses base-10, `Time` parses the fixed
/// RT timestamp layout, `Str` passes the value through.
pub enum Setter<T> {
    /// Assigns the raw string value.
    Str(fn(&mut T, String)),
    /// Parses the value as a base-10 integer before assigning.
    Int(fn(&mut T, i64)),
    /// Parses the value with the RT timestamp layout before assigning.
    Time(fn(&mut T, NaiveDateTime)),
}

/// One entry in a record's field table: a canonical protocol key and the
/// setter for the corresponding struct field.
///
/// Keys are matched case-insensitively, so `id`, `ID` and `Id` in a payload
/// all hit the same field.
pub struct Field<T> {
    /// Canonical protocol key (as RT spells it).
    pub key: &'static str,

    /// Setter invoked when the key matches.
    pub setter: Setter<T>,
}

impl<T> Field<T> {
    /// A string-valued field.
    pub const fn str(key: &'static str, set: fn(&mut T, String)) -> Self {
        Self {
            key,
            setter: Setter::Str(set),
        }
    }

    /// An integer-valued field.
    pub const fn int(key: &'static str, set: fn(&mut T, i64)) -> Self {
        Self {
            key,
            setter: Setter::Int(set),
        }
    }

    /// A timestamp-valued field.
    pub const fn time(key: &'static str, set: fn(&mut T, NaiveDateTime)) -> Self {
        Self {
            key,
            setter: Setter::Time(set),
        }
    }
}

/// A struct that can be populated from an RT payload.
///
/// Implementors list every decodable field in [`FIELDS`](Record::FIELDS);
/// keys present in the payload but absent from the table are silently
/// ignored, which keeps old clients working when the server grows new
/// fields.
pub trait Record: Default + Sized + 'static {
    /// Static table mapping protocol keys to field setters.
    const FIELDS: &'static [Field<Self>];
}

/// Decodes a payload containing a single record.
///
/// Later occurrences of a key overwrite earlier ones. Empty values and the
/// literal `"Not set"` leave the field at its default.
///
/// # Errors
///
/// [`DecodeError::MalformedLine`] for a non-continuation line without a
/// colon, [`DecodeError::Coercion`] when an integer or timestamp field gets
/// an unparsable value.
pub fn decode_one<T: Record>(text: &str) -> Result<T, DecodeError> {
    let mut sink = SingleSink::default();
    scan(text, &mut sink)?;

    let mut record = T::default();
    for (key, value) in &sink.pairs {
        assign(&mut record, key, value)?;
    }
    Ok(record)
}

/// Decodes a payload containing zero or more concatenated record blocks.
///
/// Key/value pairs are grouped into buckets keyed by a running id
/// accumulator: every `id` line re-keys the accumulator to its value (0 when
/// unparsable) before the pair is stored, so each block's `id` lands in its
/// own bucket. Pairs seen before the first `id` line accumulate in bucket 0.
/// Buckets decode to records in order of first appearance; two blocks
/// sharing an id value are merged into one record, so callers should not
/// rely on duplicate ids surviving.
///
/// The accumulator re-keys on every `id` key anywhere in the text, even
/// mid-block; no stricter record-boundary detection is attempted.
///
/// # Errors
///
/// Same conditions as [`decode_one`].
pub fn decode_many<T: Record>(text: &str) -> Result<Vec<T>, DecodeError> {
    let mut sink = ListSink::default();
    scan(text, &mut sink)?;

    let mut records = Vec::with_capacity(sink.buckets.len());
    for (_, pairs) in sink.buckets {
        let mut record = T::default();
        for (key, value) in &pairs {
            assign(&mut record, key, value)?;
        }
        records.push(record);
    }
    Ok(records)
}

/// Destination for scanned key/value pairs.
///
/// `scan` drives one of these; the sink owns the grouping policy (flat map
/// for single records, id-keyed buckets for lists).
trait PairSink {
    /// Appends a continuation fragment to the most recently inserted key.
    fn append_continuation(&mut self, fragment: &str);

    /// Stores a key/value pair.
    fn insert(&mut self, key: &str, value: &str);
}

/// Splits payload text into lines and feeds key/value pairs to `sink`.
fn scan<S: PairSink>(text: &str, sink: &mut S) -> Result<(), DecodeError> {
    let mut seen_key = false;

    for line in text.split('\n') {
        if line.is_empty() {
            continue;
        }

        if line.starts_with(' ') && seen_key {
            // Multiline values are prefixed with a space.
            sink.append_continuation(line.trim());
            // The original parser falls through and re-reads continuation
            // lines that carry a colon as ordinary key/value pairs; keep
            // that behavior.
            if !line.contains(':') {
                continue;
            }
        }

        let (key, rest) = line
            .split_once(':')
            .ok_or_else(|| DecodeError::MalformedLine {
                line: line.to_string(),
            })?;
        // Exactly one leading space separates key from value.
        let value = rest.strip_prefix(' ').unwrap_or(rest);

        seen_key = true;
        sink.insert(key, value);
    }

    Ok(())
}

/// Assigns one pair into `record` via its field table.
///
/// Unknown keys and absent values (`""` / `"Not set"`) are skipped.
fn assign<T: Record>(record: &mut T, key: &str, value: &str) -> Result<(), DecodeError> {
    if value.is_empty() || value == NOT_SET {
        return Ok(());
    }

    let Some(field) = T::FIELDS.iter().find(|f| f.key.eq_ignore_ascii_case(key)) else {
        return Ok(());
    };

    match &field.setter {
        Setter::Str(set) => set(record, value.to_string()),
        Setter::Int(set) => {
            let n = value.parse::<i64>().map_err(|_| DecodeError::Coercion {
                key: field.key,
                value: value.to_string(),
                expected: "integer",
            })?;
            set(record, n);
        }
        Setter::Time(set) => {
            let t = NaiveDateTime::parse_from_str(value, TIME_LAYOUT).map_err(|_| {
                DecodeError::Coercion {
                    key: field.key,
                    value: value.to_string(),
                    expected: "timestamp",
                }
            })?;
            set(record, t);
        }
    }

    Ok(())
}

/// Sink for single-record payloads: one flat key/value map.
#[derive(Default)]
struct SingleSink {
    pairs: HashMap<String, String>,
    last_key: String,
}

impl PairSink for SingleSink {
    fn append_continuation(&mut self, fragment: &str) {
        let entry = self.pairs.entry(self.last_key.clone()).or_default();
        entry.push('\n');
        entry.push_str(fragment);
    }

    fn insert(&mut self, key: &str, value: &str) {
        self.last_key = key.to_string();
        self.pairs.insert(key.to_string(), value.to_string());
    }
}

/// Sink for list payloads: buckets keyed by the running id accumulator,
/// kept in insertion order of first appearance.
#[derive(Default)]
struct ListSink {
    buckets: Vec<(i64, HashMap<String, String>)>,
    current_id: i64,
    last_key: String,
}

impl ListSink {
    fn current_bucket(&mut self) -> &mut HashMap<String, String> {
        let id = self.current_id;
        let pos = match self.buckets.iter().position(|(bid, _)| *bid == id) {
            Some(pos) => pos,
            None => {
                self.buckets.push((id, HashMap::new()));
                self.buckets.len() - 1
            }
        };
        &mut self.buckets[pos].1
    }
}

impl PairSink for ListSink {
    fn append_continuation(&mut self, fragment: &str) {
        let last_key = self.last_key.clone();
        let entry = self.current_bucket().entry(last_key).or_default();
        entry.push('\n');
        entry.push_str(fragment);
    }

    fn insert(&mut self, key: &str, value: &str) {
        if key == "id" {
            // Re-key before storing so a block's id pair lands in its own
            // bucket. An unparsable id falls back to 0.
            self.current_id = value.parse().unwrap_or_default();
        }
        self.last_key = key.to_string();
        self.current_bucket()
            .insert(key.to_string(), value.to_string());
    }
}
