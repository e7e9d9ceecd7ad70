use std::io;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::ops::select::{Choice, SelectionRequest, Selector, SelectorError};

use super::input;
use super::render;
use super::theme::Theme;

/// How the picker was closed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerExit {
    Confirm,
    Cancel,
}

/// Multi-select picker state
pub struct Picker {
    pub message: String,
    pub choices: Vec<Choice>,
    /// Selection flag per choice
    pub selected: Vec<bool>,
    pub cursor: usize,
    /// First visible row
    pub scroll_offset: usize,
    pub theme: Theme,
    pub exit: Option<PickerExit>,
}

impl Picker {
    pub fn new(request: &SelectionRequest, theme: Theme) -> Self {
        let mut selected = vec![false; request.choices.len()];
        for &i in &request.initial {
            if let Some(slot) = selected.get_mut(i) {
                *slot = true;
            }
        }
        Picker {
            message: request.message.clone(),
            choices: request.choices.clone(),
            selected,
            cursor: 0,
            scroll_offset: 0,
            theme,
            exit: None,
        }
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.choices.len() {
            self.cursor += 1;
        }
    }

    pub fn move_top(&mut self) {
        self.cursor = 0;
    }

    pub fn move_bottom(&mut self) {
        self.cursor = self.choices.len().saturating_sub(1);
    }

    pub fn toggle_current(&mut self) {
        if let Some(slot) = self.selected.get_mut(self.cursor) {
            *slot = !*slot;
        }
    }

    /// Select everything, or clear everything if all are already selected
    pub fn toggle_all(&mut self) {
        let all = self.selected.iter().all(|&s| s);
        self.selected.iter_mut().for_each(|s| *s = !all);
    }

    pub fn selected_count(&self) -> usize {
        self.selected.iter().filter(|&&s| s).count()
    }

    pub fn selected_indices(&self) -> Vec<usize> {
        self.selected
            .iter()
            .enumerate()
            .filter(|(_, s)| **s)
            .map(|(i, _)| i)
            .collect()
    }

    /// Adjust `scroll_offset` so the cursor is inside a window of `height` rows
    pub fn scroll_to_cursor(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.cursor < self.scroll_offset {
            self.scroll_offset = self.cursor;
        } else if self.cursor >= self.scroll_offset + height {
            self.scroll_offset = self.cursor + 1 - height;
        }
    }

    /// Final answer once the picker has closed
    pub fn result(&self) -> Option<Vec<usize>> {
        match self.exit {
            Some(PickerExit::Confirm) => Some(self.selected_indices()),
            _ => None,
        }
    }
}

/// `Selector` backed by a full-screen terminal picker
#[derive(Default)]
pub struct TerminalSelector {
    pub theme: Theme,
}

impl TerminalSelector {
    pub fn new(theme: Theme) -> Self {
        TerminalSelector { theme }
    }
}

impl Selector for TerminalSelector {
    fn select(&mut self, request: &SelectionRequest) -> Result<Option<Vec<usize>>, SelectorError> {
        let mut picker = Picker::new(request, self.theme.clone());
        run(&mut picker)?;
        Ok(picker.result())
    }
}

/// Run the picker until the user confirms or cancels
pub fn run(picker: &mut Picker) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e);
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, picker);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    picker: &mut Picker,
) -> io::Result<()> {
    while picker.exit.is_none() {
        terminal.draw(|frame| render::render(frame, picker))?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(picker, key);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(n: usize, initial: Vec<usize>) -> SelectionRequest {
        SelectionRequest {
            message: "Select items to toggle".into(),
            choices: (0..n)
                .map(|i| Choice {
                    label: format!("item {}", i),
                    category: None,
                    color: String::new(),
                    due: None,
                    overdue: false,
                })
                .collect(),
            initial,
        }
    }

    #[test]
    fn test_initial_selection_seeded() {
        let picker = Picker::new(&request(3, vec![0, 2, 7]), Theme::default());
        assert_eq!(picker.selected, vec![true, false, true]);
        assert_eq!(picker.selected_count(), 2);
    }

    #[test]
    fn test_cursor_bounds() {
        let mut picker = Picker::new(&request(3, vec![]), Theme::default());
        picker.move_up();
        assert_eq!(picker.cursor, 0);
        picker.move_bottom();
        picker.move_down();
        assert_eq!(picker.cursor, 2);
        picker.move_top();
        assert_eq!(picker.cursor, 0);
    }

    #[test]
    fn test_toggle_all() {
        let mut picker = Picker::new(&request(3, vec![1]), Theme::default());
        picker.toggle_all();
        assert_eq!(picker.selected_indices(), vec![0, 1, 2]);
        picker.toggle_all();
        assert!(picker.selected_indices().is_empty());
    }

    #[test]
    fn test_scroll_follows_cursor() {
        let mut picker = Picker::new(&request(20, vec![]), Theme::default());
        picker.cursor = 12;
        picker.scroll_to_cursor(5);
        assert_eq!(picker.scroll_offset, 8);
        picker.cursor = 3;
        picker.scroll_to_cursor(5);
        assert_eq!(picker.scroll_offset, 3);
    }

    #[test]
    fn test_result_depends_on_exit() {
        let mut picker = Picker::new(&request(2, vec![1]), Theme::default());
        assert_eq!(picker.result(), None);
        picker.exit = Some(PickerExit::Cancel);
        assert_eq!(picker.result(), None);
        picker.exit = Some(PickerExit::Confirm);
        assert_eq!(picker.result(), Some(vec![1]));
    }
}
