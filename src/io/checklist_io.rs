use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::model::Checklist;
use crate::parse::{
    FrontMatter, FrontMatterError, ScanError, ScanOptions, ScanWarning, rewrite, scan_entries,
    split_front_matter,
};

/// Error type for checklist file I/O
#[derive(Debug, thiserror::Error)]
pub enum ChecklistError {
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("could not read {}: {source}", .path.display())]
    ReadError { path: PathBuf, source: io::Error },
    #[error("no matching content: {} has no checkbox lines (expected `- [ ] ...` or `- [x] ...`)", .path.display())]
    NoMatchingContent { path: PathBuf },
    #[error("{}: {source}", .path.display())]
    FrontMatter {
        path: PathBuf,
        source: FrontMatterError,
    },
    #[error("{}: {source}", .path.display())]
    Scan { path: PathBuf, source: ScanError },
    #[error("could not write {}: {source}", .path.display())]
    WriteError { path: PathBuf, source: io::Error },
}

/// A non-fatal problem found while loading
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    Scan(ScanWarning),
    /// The leading fenced block did not parse; it was read as body text
    FrontMatterIgnored(String),
}

impl std::fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadWarning::Scan(w) => write!(f, "{}", w),
            LoadWarning::FrontMatterIgnored(reason) => {
                write!(f, "leading block is not front matter, read as body ({})", reason)
            }
        }
    }
}

/// A freshly loaded checklist plus anything worth telling the user about
#[derive(Debug, Clone)]
pub struct Loaded {
    pub checklist: Checklist,
    pub warnings: Vec<LoadWarning>,
}

/// Read `path`, split its front matter, and scan the body for checkboxes.
///
/// Fails before anything is written: missing file, unreadable file, zero
/// checkbox lines, or (strict) bad front matter or a malformed due date.
/// Outside strict mode a fenced block that is not a valid key/value mapping
/// (a checklist opening with a `---` rule, say) is scanned as body.
pub fn load_checklist(path: &Path, options: ScanOptions) -> Result<Loaded, ChecklistError> {
    let source = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ChecklistError::FileNotFound(path.to_path_buf()),
        _ => ChecklistError::ReadError {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let mut warnings = Vec::new();
    let front = match split_front_matter(&source) {
        Ok(front) => front,
        Err(e) if options.strict => {
            return Err(ChecklistError::FrontMatter {
                path: path.to_path_buf(),
                source: e,
            });
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "front matter ignored");
            warnings.push(LoadWarning::FrontMatterIgnored(e.to_string()));
            FrontMatter::default()
        }
    };

    let scanned = scan_entries(&source, front.body_start, options).map_err(|e| match e {
        ScanError::NoEntries => ChecklistError::NoMatchingContent {
            path: path.to_path_buf(),
        },
        other => ChecklistError::Scan {
            path: path.to_path_buf(),
            source: other,
        },
    })?;

    tracing::debug!(
        path = %path.display(),
        entries = scanned.entries.len(),
        categories = front.attributes.category_colors.len(),
        "loaded checklist"
    );

    Ok(Loaded {
        checklist: Checklist {
            path: path.to_path_buf(),
            source,
            attributes: front.attributes,
            entries: scanned.entries,
        },
        warnings: warnings
            .into_iter()
            .chain(scanned.warnings.into_iter().map(LoadWarning::Scan))
            .collect(),
    })
}

/// Rewrite the checklist's file from its entries. Returns `false` (and
/// touches nothing) when no entry changed.
pub fn save_checklist(checklist: &Checklist) -> Result<bool, ChecklistError> {
    if !checklist.is_dirty() {
        tracing::debug!(path = %checklist.path.display(), "no changes to save");
        return Ok(false);
    }

    let updated = rewrite(&checklist.source, &checklist.entries);
    atomic_write(&checklist.path, updated.as_bytes()).map_err(|e| ChecklistError::WriteError {
        path: checklist.path.clone(),
        source: e,
    })?;

    tracing::info!(path = %checklist.path.display(), "checklist written");
    Ok(true)
}

/// Write via a temp file in the same directory, then rename over `path`.
/// The original file's permissions carry over.
fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    if let Ok(meta) = fs::metadata(path) {
        fs::set_permissions(tmp.path(), meta.permissions())?;
    }
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
