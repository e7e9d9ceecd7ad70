use crate::model::CheckboxEntry;

/// Canonical single-line form of an entry:
/// `- [x] category: label (due: 2025-01-31)`
pub fn format_entry(entry: &CheckboxEntry) -> String {
    let mut line = format!("- [{}] ", entry.checkbox_char());

    if let Some(ref category) = entry.category {
        line.push_str(category);
        line.push_str(": ");
    }

    line.push_str(&entry.label);

    if let Some(ref due) = entry.due {
        // `urgent: (due: ...)` would rescan as a category with an empty label
        let colon_label = entry.category.is_none() && entry.label.ends_with(':');
        if !entry.label.is_empty() && !colon_label {
            line.push(' ');
        }
        line.push_str(&format!("(due: {})", due.raw));
    }

    line
}

/// Text an entry contributes to the rewritten document. Clean entries are
/// emitted verbatim, dirty ones in canonical form.
fn entry_text(entry: &CheckboxEntry) -> std::borrow::Cow<'_, str> {
    if entry.dirty {
        format_entry(entry).into()
    } else {
        entry.source_text.as_str().into()
    }
}

/// Rebuild `original` with every entry's span replaced by its current text.
///
/// Spans must come from scanning `original` and be in ascending order. Text
/// between spans is copied from `original` untouched, so replacements of a
/// different length never shift later entries.
pub fn rewrite(original: &str, entries: &[CheckboxEntry]) -> String {
    let mut out = String::with_capacity(original.len() + entries.len());
    let mut cursor = 0;

    for entry in entries {
        debug_assert!(entry.span.start >= cursor, "entry spans out of order");
        out.push_str(&original[cursor..entry.span.start]);
        out.push_str(&entry_text(entry));
        cursor = entry.span.end;
    }

    out.push_str(&original[cursor..]);
    out
}
