pub mod app;
pub mod input;
pub mod render;
pub mod theme;

pub use app::{Picker, PickerExit, TerminalSelector, run};
pub use theme::Theme;
