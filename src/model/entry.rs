use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A `(due: ...)` annotation on a checkbox line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DueDate {
    /// Text between `due:` and `)`, trimmed, exactly as written
    pub raw: String,
    /// Parsed calendar date, `None` when `raw` is not a valid `YYYY-MM-DD`
    pub date: Option<NaiveDate>,
}

impl DueDate {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim().to_string();
        let date = NaiveDate::parse_from_str(&raw, "%Y-%m-%d").ok();
        DueDate { raw, date }
    }

    /// Whether the due moment (00:00 UTC of the due day) lies strictly before `now`.
    /// Unparseable dates are never overdue.
    pub fn is_past(&self, now: DateTime<Utc>) -> bool {
        self.date
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .is_some_and(|start| start.and_utc() < now)
    }
}

/// One parsed checkbox list item with source tracking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckboxEntry {
    /// Checkbox state; the only field the selection step may change
    pub checked: bool,
    /// Optional `category:` prefix (without the colon)
    pub category: Option<String>,
    /// Free text, due annotation excluded
    pub label: String,
    /// Optional `(due: ...)` annotation
    pub due: Option<DueDate>,
    /// 1-based line number in the source file
    pub line: usize,

    // --- Source tracking ---
    /// Byte range of the match in the original text
    #[serde(skip)]
    pub span: Range<usize>,
    /// The matched line, verbatim
    #[serde(skip)]
    pub source_text: String,
    /// Whether `checked` changed since parsing
    #[serde(skip)]
    pub dirty: bool,
}

impl CheckboxEntry {
    /// Create a detached entry (no source), marked dirty
    pub fn new(checked: bool, category: Option<String>, label: String) -> Self {
        CheckboxEntry {
            checked,
            category,
            label,
            due: None,
            line: 0,
            span: 0..0,
            source_text: String::new(),
            dirty: true,
        }
    }

    /// Byte offset of the match start in the original text
    pub fn offset(&self) -> usize {
        self.span.start
    }

    /// Set the checked state, marking the entry dirty only on an actual change.
    /// Returns whether the state changed.
    pub fn set_checked(&mut self, checked: bool) -> bool {
        if self.checked == checked {
            return false;
        }
        self.checked = checked;
        self.dirty = true;
        true
    }

    /// The due date if it parsed
    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due.as_ref().and_then(|d| d.date)
    }

    /// Unchecked with a due date strictly before `now`
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.checked && self.due.as_ref().is_some_and(|d| d.is_past(now))
    }

    /// Character used inside the checkbox `[ ]`
    pub fn checkbox_char(&self) -> char {
        if self.checked { 'x' } else { ' ' }
    }
}

impl PartialEq for CheckboxEntry {
    fn eq(&self, other: &Self) -> bool {
        self.checked == other.checked
            && self.category == other.category
            && self.label == other.label
            && self.due == other.due
    }
}

impl Eq for CheckboxEntry {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_due_date_parse() {
        let due = DueDate::parse(" 2020-01-01 ");
        assert_eq!(due.raw, "2020-01-01");
        assert_eq!(due.date, NaiveDate::from_ymd_opt(2020, 1, 1));

        let bad = DueDate::parse("next tuesday");
        assert_eq!(bad.raw, "next tuesday");
        assert_eq!(bad.date, None);
    }

    #[test]
    fn test_due_date_is_past_is_strict() {
        let due = DueDate::parse("2024-03-10");
        let midnight = Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap();
        assert!(!due.is_past(midnight));
        assert!(due.is_past(midnight + chrono::Duration::seconds(1)));
        assert!(!DueDate::parse("garbage").is_past(midnight));
    }

    #[test]
    fn test_set_checked_tracks_dirty() {
        let mut entry = CheckboxEntry::new(false, None, "Water plants".into());
        entry.dirty = false;
        assert!(!entry.set_checked(false));
        assert!(!entry.dirty);
        assert!(entry.set_checked(true));
        assert!(entry.dirty);
        assert_eq!(entry.checkbox_char(), 'x');
    }

    #[test]
    fn test_checked_entry_is_never_overdue() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        let mut entry = CheckboxEntry::new(false, None, "File taxes".into());
        entry.due = Some(DueDate::parse("2024-04-15"));
        assert!(entry.is_overdue(now));
        entry.set_checked(true);
        assert!(!entry.is_overdue(now));
    }
}
