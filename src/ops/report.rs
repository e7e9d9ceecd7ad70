use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::model::CheckboxEntry;

/// Error type for report generation
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("cannot compute a completion rate over zero entries")]
    Empty,
}

/// Completion band: below 50% low, 50–75% medium, 75% and up high
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RateBand {
    Low,
    Medium,
    High,
}

impl RateBand {
    pub fn from_percent(percent: f64) -> Self {
        if percent >= 75.0 {
            RateBand::High
        } else if percent >= 50.0 {
            RateBand::Medium
        } else {
            RateBand::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRate {
    pub total: usize,
    pub checked: usize,
    /// Percentage checked, rounded to two decimal places
    pub percent: f64,
    pub band: RateBand,
}

/// An unchecked entry whose due date has passed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverdueTask {
    pub line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub label: String,
    pub due: NaiveDate,
}

impl std::fmt::Display for OverdueTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (due: {})", self.label, self.due.format("%Y-%m-%d"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub completion: CompletionRate,
    pub overdue: Vec<OverdueTask>,
}

/// Round to two decimal places
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn completion_rate(entries: &[CheckboxEntry]) -> Result<CompletionRate, ReportError> {
    if entries.is_empty() {
        return Err(ReportError::Empty);
    }
    let total = entries.len();
    let checked = entries.iter().filter(|e| e.checked).count();
    let percent = round2(checked as f64 * 100.0 / total as f64);

    Ok(CompletionRate {
        total,
        checked,
        percent,
        band: RateBand::from_percent(percent),
    })
}

/// Unchecked entries due strictly before `now`, in document order
pub fn overdue_tasks(entries: &[CheckboxEntry], now: DateTime<Utc>) -> Vec<OverdueTask> {
    entries
        .iter()
        .filter(|e| e.is_overdue(now))
        .filter_map(|e| {
            Some(OverdueTask {
                line: e.line,
                category: e.category.clone(),
                label: e.label.clone(),
                due: e.due_date()?,
            })
        })
        .collect()
}

pub fn build_report(entries: &[CheckboxEntry], now: DateTime<Utc>) -> Result<Report, ReportError> {
    Ok(Report {
        completion: completion_rate(entries)?,
        overdue: overdue_tasks(entries, now),
    })
}
