pub mod checklist_io;

pub use checklist_io::{ChecklistError, LoadWarning, Loaded, load_checklist, save_checklist};
