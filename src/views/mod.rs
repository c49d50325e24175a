//! Read-only projections of the document for the presentation layer.

pub mod goals;
pub mod log;
pub mod network;
pub mod now;
pub mod stats;
pub mod timeline;

use std::cmp::Ordering;

use chrono::NaiveDateTime;

/// Earlier deadlines first; tasks without a deadline sort last.
pub(crate) fn deadline_asc(a: Option<&NaiveDateTime>, b: Option<&NaiveDateTime>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Later deadlines first; tasks without a deadline still sort last.
pub(crate) fn deadline_desc(a: Option<&NaiveDateTime>, b: Option<&NaiveDateTime>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(a),
        _ => deadline_asc(a, b),
    }
}
