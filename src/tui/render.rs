use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::util::unicode;

use super::app::Picker;

const KEY_HINTS: &str = "\u{2191}\u{2193} move  space toggle  a all  enter confirm  esc cancel";

/// Draw the whole picker: header, choice list, key hints
pub fn render(frame: &mut Frame, picker: &mut Picker) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // message + blank
            Constraint::Min(1),    // choices
            Constraint::Length(1), // key hints
        ])
        .split(frame.area());

    render_header(frame, picker, chunks[0]);
    render_choices(frame, picker, chunks[1]);
    frame.render_widget(
        Paragraph::new(Span::styled(KEY_HINTS, Style::default().fg(picker.theme.dim))),
        chunks[2],
    );
}

fn render_header(frame: &mut Frame, picker: &Picker, area: Rect) {
    let line = Line::from(vec![
        Span::styled("? ", Style::default().fg(picker.theme.highlight)),
        Span::styled(
            picker.message.clone(),
            Style::default()
                .fg(picker.theme.text_bright)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}/{} selected", picker.selected_count(), picker.choices.len()),
            Style::default().fg(picker.theme.dim),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_choices(frame: &mut Frame, picker: &mut Picker, area: Rect) {
    let height = area.height as usize;
    let width = area.width as usize;
    picker.scroll_to_cursor(height);

    let theme = &picker.theme;
    let mut lines: Vec<Line> = Vec::new();

    for (i, choice) in picker
        .choices
        .iter()
        .enumerate()
        .skip(picker.scroll_offset)
        .take(height)
    {
        let is_cursor = i == picker.cursor;
        let base = if is_cursor {
            Style::default()
                .fg(theme.text_bright)
                .bg(theme.selection_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text)
        };

        let mut spans: Vec<Span> = Vec::new();
        let indicator = if is_cursor { "\u{25B6} " } else { "  " };
        spans.push(Span::styled(indicator, base.fg(theme.highlight)));

        let mark = if picker.selected[i] { "[x] " } else { "[ ] " };
        let mark_style = if picker.selected[i] {
            base.fg(theme.green)
        } else {
            base
        };
        spans.push(Span::styled(mark, mark_style));
        let mut used = unicode::display_width(indicator) + mark.len();

        if let Some(ref category) = choice.category {
            let tag = format!("{} ", category);
            used += unicode::display_width(&tag);
            spans.push(Span::styled(tag, base.fg(theme.category_color(&choice.color))));
        }

        let due = choice
            .due
            .as_ref()
            .map(|d| format!(" (due: {})", d))
            .unwrap_or_default();
        let due_w = unicode::display_width(&due);

        let label_budget = width.saturating_sub(used + due_w);
        let label = unicode::truncate_to_width(&choice.label, label_budget);
        used += unicode::display_width(&label);
        spans.push(Span::styled(label, base));

        if !due.is_empty() {
            let due_color = if choice.overdue { theme.red } else { theme.dim };
            used += due_w;
            spans.push(Span::styled(due, base.fg(due_color)));
        }

        // Fill the rest of the cursor row so the highlight spans the width
        if is_cursor && used < width {
            spans.push(Span::styled(" ".repeat(width - used), base));
        }

        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), area);
}
