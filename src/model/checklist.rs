use std::path::PathBuf;

use super::attributes::DocumentAttributes;
use super::entry::CheckboxEntry;

/// A loaded checklist file: immutable source snapshot plus parsed entries
#[derive(Debug, Clone)]
pub struct Checklist {
    /// Path the file was read from (and will be written back to)
    pub path: PathBuf,
    /// Full original file text; entry spans index into this
    pub source: String,
    /// Category colors from front matter
    pub attributes: DocumentAttributes,
    /// Entries in document order
    pub entries: Vec<CheckboxEntry>,
}

impl Checklist {
    /// Indices of currently checked entries
    pub fn checked_indices(&self) -> Vec<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.checked)
            .map(|(i, _)| i)
            .collect()
    }

    /// Whether any entry changed since parsing
    pub fn is_dirty(&self) -> bool {
        self.entries.iter().any(|e| e.dirty)
    }
}
