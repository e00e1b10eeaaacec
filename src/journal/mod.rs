//! Journal module
//!
//! Date-keyed daily notes: free text, a task list and a mood tag per
//! calendar day, persisted as one JSON map in the text store, plus the
//! debounced editing session that coalesces rapid edits into one save.

pub mod models;
pub mod session;
pub mod store;

pub use models::{DailyNote, TaskItem};
pub use session::NoteSession;
pub use store::JournalStore;

use chrono::{DateTime, Utc};

/// Canonical date key (`YYYY-MM-DD`).
///
/// Every read and write path derives its key through this one function,
/// so two timestamps on the same calendar day can never address
/// different records.
pub fn day_key(at: DateTime<Utc>) -> String {
    at.date_naive().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_day_key_ignores_time_of_day() {
        let morning = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let night = Utc.with_ymd_and_hms(2024, 5, 1, 23, 59, 59).unwrap();

        assert_eq!(day_key(morning), "2024-05-01");
        assert_eq!(day_key(morning), day_key(night));
    }

    #[test]
    fn test_day_key_zero_pads() {
        let at = Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap();
        assert_eq!(day_key(at), "2024-01-05");
    }
}
