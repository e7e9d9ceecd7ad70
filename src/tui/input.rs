use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{Picker, PickerExit};

/// Handle a key event in the picker
pub fn handle_key(picker: &mut Picker, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if matches!(key.code, KeyCode::Char('c') | KeyCode::Char('d')) {
            picker.exit = Some(PickerExit::Cancel);
        }
        return;
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => picker.move_up(),
        KeyCode::Down | KeyCode::Char('j') => picker.move_down(),
        KeyCode::Home | KeyCode::Char('g') => picker.move_top(),
        KeyCode::End | KeyCode::Char('G') => picker.move_bottom(),
        KeyCode::Char(' ') => picker.toggle_current(),
        KeyCode::Char('a') => picker.toggle_all(),
        KeyCode::Enter => picker.exit = Some(PickerExit::Confirm),
        KeyCode::Esc | KeyCode::Char('q') => picker.exit = Some(PickerExit::Cancel),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::select::{Choice, SelectionRequest};
    use crate::tui::theme::Theme;

    fn picker() -> Picker {
        let choices = ["milk", "eggs", "bread"]
            .iter()
            .map(|l| Choice {
                label: l.to_string(),
                category: None,
                color: String::new(),
                due: None,
                overdue: false,
            })
            .collect();
        Picker::new(
            &SelectionRequest {
                message: "Select items to toggle".into(),
                choices,
                initial: vec![0],
            },
            Theme::default(),
        )
    }

    fn press(picker: &mut Picker, code: KeyCode) {
        handle_key(picker, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_navigate_and_toggle_then_confirm() {
        let mut p = picker();
        press(&mut p, KeyCode::Char('j'));
        press(&mut p, KeyCode::Char(' '));
        press(&mut p, KeyCode::Up);
        press(&mut p, KeyCode::Char(' '));
        press(&mut p, KeyCode::Enter);
        assert_eq!(p.exit, Some(PickerExit::Confirm));
        assert_eq!(p.result(), Some(vec![1]));
    }

    #[test]
    fn test_escape_cancels() {
        let mut p = picker();
        press(&mut p, KeyCode::Char(' '));
        press(&mut p, KeyCode::Esc);
        assert_eq!(p.result(), None);
    }

    #[test]
    fn test_ctrl_c_cancels() {
        let mut p = picker();
        handle_key(
            &mut p,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert_eq!(p.exit, Some(PickerExit::Cancel));
    }

    #[test]
    fn test_jump_to_ends() {
        let mut p = picker();
        press(&mut p, KeyCode::Char('G'));
        assert_eq!(p.cursor, 2);
        press(&mut p, KeyCode::Char('g'));
        assert_eq!(p.cursor, 0);
    }
}
