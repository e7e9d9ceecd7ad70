pub mod attributes;
pub mod checklist;
pub mod entry;

pub use attributes::*;
pub use checklist::*;
pub use entry::*;
