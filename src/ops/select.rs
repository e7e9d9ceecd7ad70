use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::model::{CheckboxEntry, Checklist};

/// Error type for the interactive selection step
#[derive(Debug, thiserror::Error)]
pub enum SelectorError {
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),
    #[error("selection failed: {0}")]
    Failed(String),
}

/// One toggleable row offered to a selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub label: String,
    pub category: Option<String>,
    /// Color identifier for the category (front matter or default)
    pub color: String,
    /// Raw due text, if any
    pub due: Option<String>,
    pub overdue: bool,
}

/// Everything a selector needs to present the prompt
#[derive(Debug, Clone)]
pub struct SelectionRequest {
    pub message: String,
    pub choices: Vec<Choice>,
    /// Indices selected when the prompt opens
    pub initial: Vec<usize>,
}

/// A multi-select prompt.
///
/// Returns `Ok(Some(indices))` when the user confirms, `Ok(None)` when they
/// cancel, and an error when the prompt itself fails.
pub trait Selector {
    fn select(&mut self, request: &SelectionRequest) -> Result<Option<Vec<usize>>, SelectorError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// Selection confirmed and applied; `changed` entries flipped state
    Applied { changed: usize },
    /// User backed out; entries untouched
    Cancelled,
}

/// Build the prompt for a checklist. Initial selection is every checked entry.
pub fn build_request(checklist: &Checklist, now: DateTime<Utc>) -> SelectionRequest {
    let choices = checklist
        .entries
        .iter()
        .map(|e| Choice {
            label: e.label.clone(),
            category: e.category.clone(),
            color: e
                .category
                .as_deref()
                .map(|c| checklist.attributes.category_color(c).to_string())
                .unwrap_or_default(),
            due: e.due.as_ref().map(|d| d.raw.clone()),
            overdue: e.is_overdue(now),
        })
        .collect();

    SelectionRequest {
        message: "Select items to toggle".to_string(),
        choices,
        initial: checklist.checked_indices(),
    }
}

/// Overwrite every entry's state from `selected`: checked iff its index is
/// in the selection. Returns how many entries changed.
pub fn apply_selection(entries: &mut [CheckboxEntry], selected: &[usize]) -> usize {
    let selected: HashSet<usize> = selected.iter().copied().collect();
    entries
        .iter_mut()
        .enumerate()
        .map(|(i, e)| e.set_checked(selected.contains(&i)))
        .filter(|&changed| changed)
        .count()
}

/// Present the checklist through `selector` and apply the confirmed selection.
/// Cancellation and errors leave the entries as they were.
pub fn run_selection<S: Selector + ?Sized>(
    checklist: &mut Checklist,
    selector: &mut S,
    now: DateTime<Utc>,
) -> Result<SelectionOutcome, SelectorError> {
    let request = build_request(checklist, now);
    tracing::debug!(
        choices = request.choices.len(),
        initial = request.initial.len(),
        "awaiting selection"
    );

    match selector.select(&request)? {
        Some(selected) => {
            let changed = apply_selection(&mut checklist.entries, &selected);
            tracing::info!(changed, "selection applied");
            Ok(SelectionOutcome::Applied { changed })
        }
        None => {
            tracing::info!("selection cancelled");
            Ok(SelectionOutcome::Cancelled)
        }
    }
}
