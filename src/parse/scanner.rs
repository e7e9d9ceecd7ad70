use std::sync::LazyLock;

use regex::Regex;

use crate::model::{CheckboxEntry, DueDate};

/// One checkbox per line: `- [x] category: label (due: 2025-01-31)`.
/// Groups: 1 = state, 2 = category, 3 = label, 4 = due text.
static CHECKBOX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?mR)^- \[(x| )\] (?:([\w-]+):[ \t]+)?(.*?)(?:[ \t]*\(due:[ \t]*([^)\r\n]*)\))?[ \t]*$",
    )
    .unwrap()
});

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("no checkbox entries found")]
    NoEntries,
    #[error("line {line}: invalid due date '{text}' (expected YYYY-MM-DD)")]
    InvalidDueDate { line: usize, text: String },
}

/// A non-fatal problem found while scanning
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanWarning {
    InvalidDueDate { line: usize, text: String },
}

impl std::fmt::Display for ScanWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanWarning::InvalidDueDate { line, text } => write!(
                f,
                "line {}: invalid due date '{}' ignored (expected YYYY-MM-DD)",
                line, text
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOptions {
    /// Treat unparseable due dates as errors instead of warnings
    pub strict: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    pub entries: Vec<CheckboxEntry>,
    pub warnings: Vec<ScanWarning>,
}

/// Scan `text` for checkbox lines, starting at byte `body_start` (past any
/// front matter). Spans and line numbers refer to the full `text`.
pub fn scan_entries(
    text: &str,
    body_start: usize,
    options: ScanOptions,
) -> Result<ScanResult, ScanError> {
    let mut result = ScanResult::default();
    let body = &text[body_start..];

    // Line counting is incremental: newlines before the last match plus the gap
    let mut line = 1 + text[..body_start].matches('\n').count();
    let mut counted_to = body_start;

    for caps in CHECKBOX_RE.captures_iter(body) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let start = body_start + whole.start();
        let end = body_start + whole.end();

        line += text[counted_to..start].matches('\n').count();
        counted_to = start;

        let due = caps.get(4).map(|m| DueDate::parse(m.as_str()));
        if let Some(ref d) = due
            && d.date.is_none()
        {
            if options.strict {
                return Err(ScanError::InvalidDueDate {
                    line,
                    text: d.raw.clone(),
                });
            }
            tracing::warn!(line, text = %d.raw, "ignoring invalid due date");
            result.warnings.push(ScanWarning::InvalidDueDate {
                line,
                text: d.raw.clone(),
            });
        }

        result.entries.push(CheckboxEntry {
            checked: &caps[1] == "x",
            category: caps.get(2).map(|m| m.as_str().to_string()),
            label: caps[3].to_string(),
            due,
            line,
            span: start..end,
            source_text: whole.as_str().to_string(),
            dirty: false,
        });
    }

    if result.entries.is_empty() {
        return Err(ScanError::NoEntries);
    }

    tracing::debug!(entries = result.entries.len(), "scanned checklist");
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn scan(text: &str) -> Vec<CheckboxEntry> {
        scan_entries(text, 0, ScanOptions::default()).unwrap().entries
    }

    #[test]
    fn test_scan_basic_states() {
        let entries = scan("- [ ] buy milk\n- [x] pay rent\n");
        assert_eq!(entries.len(), 2);
        assert!(!entries[0].checked);
        assert_eq!(entries[0].label, "buy milk");
        assert!(entries[1].checked);
        assert_eq!(entries[1].label, "pay rent");
        assert_eq!(entries[1].line, 2);
    }

    #[test]
    fn test_scan_category_and_due() {
        let entries = scan("- [ ] urgent: fix bug (due: 2020-01-01)\n");
        let e = &entries[0];
        assert_eq!(e.category.as_deref(), Some("urgent"));
        assert_eq!(e.label, "fix bug");
        let due = e.due.as_ref().unwrap();
        assert_eq!(due.raw, "2020-01-01");
        assert_eq!(due.date, NaiveDate::from_ymd_opt(2020, 1, 1));
    }

    #[test]
    fn test_scan_category_charset() {
        let entries = scan("- [ ] Home-Lab_2: rack servers\n");
        assert_eq!(entries[0].category.as_deref(), Some("Home-Lab_2"));
        assert_eq!(entries[0].label, "rack servers");
    }

    #[test]
    fn test_colon_without_space_is_not_a_category() {
        let entries = scan("- [ ] read https://example.com\n- [ ] note:later\n");
        assert_eq!(entries[0].category, None);
        assert_eq!(entries[0].label, "read https://example.com");
        assert_eq!(entries[1].category, None);
        assert_eq!(entries[1].label, "note:later");
    }

    #[test]
    fn test_scan_spans_cover_line_only() {
        let text = "# Todo\n\n- [ ] one\r\n- [x] two  \nfooter\n";
        let entries = scan(text);
        assert_eq!(&text[entries[0].span.clone()], "- [ ] one");
        assert_eq!(&text[entries[1].span.clone()], "- [x] two  ");
        assert_eq!(entries[1].label, "two");
        assert_eq!(entries[0].line, 3);
        assert_eq!(entries[1].line, 4);
        assert_eq!(entries[0].offset(), 8);
    }

    #[test]
    fn test_indented_and_other_markers_are_ignored() {
        let entries = scan("  - [ ] nested\n* [ ] star\n- [>] active\n- [X] caps\n- [ ] real\n");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].label, "real");
    }

    #[test]
    fn test_scan_respects_body_start() {
        let text = "---\nurgent: red\n---\n- [ ] a\n";
        let entries = scan_entries(text, 20, ScanOptions::default())
            .unwrap()
            .entries;
        assert_eq!(entries[0].line, 4);
        assert_eq!(entries[0].offset(), 20);
    }

    #[test]
    fn test_no_entries_is_error() {
        let err = scan_entries("# Notes\n\nnothing here\n", 0, ScanOptions::default()).unwrap_err();
        assert!(matches!(err, ScanError::NoEntries));
    }

    #[test]
    fn test_invalid_due_date_warns() {
        let result =
            scan_entries("- [ ] a (due: soonish)\n", 0, ScanOptions::default()).unwrap();
        let e = &result.entries[0];
        assert_eq!(e.label, "a");
        assert_eq!(e.due.as_ref().unwrap().raw, "soonish");
        assert_eq!(e.due_date(), None);
        assert_eq!(
            result.warnings,
            vec![ScanWarning::InvalidDueDate {
                line: 1,
                text: "soonish".into()
            }]
        );
    }

    #[test]
    fn test_invalid_due_date_strict() {
        let err = scan_entries(
            "- [ ] a\n- [ ] b (due: 2024-02-30)\n",
            0,
            ScanOptions { strict: true },
        )
        .unwrap_err();
        match err {
            ScanError::InvalidDueDate { line, text } => {
                assert_eq!(line, 2);
                assert_eq!(text, "2024-02-30");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
