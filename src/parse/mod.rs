pub mod front_matter;
pub mod rewriter;
pub mod scanner;

pub use front_matter::{FrontMatter, FrontMatterError, split_front_matter};
pub use rewriter::{format_entry, rewrite};
pub use scanner::{ScanError, ScanOptions, ScanResult, ScanWarning, scan_entries};
