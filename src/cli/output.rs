use crossterm::style::{Color as TermColor, Stylize, style};
use ratatui::style::Color;
use serde::Serialize;

use crate::model::Checklist;
use crate::ops::report::{CompletionRate, OverdueTask, RateBand};
use crate::tui::Theme;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct EntryJson {
    pub index: usize,
    pub line: usize,
    pub checked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due: Option<String>,
    pub overdue: bool,
}

#[derive(Serialize)]
pub struct ListJson {
    pub file: String,
    pub entries: Vec<EntryJson>,
}

pub fn list_to_json(checklist: &Checklist, now: chrono::DateTime<chrono::Utc>) -> ListJson {
    ListJson {
        file: checklist.path.display().to_string(),
        entries: checklist
            .entries
            .iter()
            .enumerate()
            .map(|(index, e)| EntryJson {
                index,
                line: e.line,
                checked: e.checked,
                category: e.category.clone(),
                label: e.label.clone(),
                due: e.due.as_ref().map(|d| d.raw.clone()),
                overdue: e.is_overdue(now),
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Text output
// ---------------------------------------------------------------------------

/// Applies theme colors to console text, or passes it through when color is off
pub struct Painter {
    pub theme: Theme,
    pub color: bool,
}

impl Painter {
    pub fn new(theme: Theme, color: bool) -> Self {
        Painter { theme, color }
    }

    pub fn plain() -> Self {
        Painter::new(Theme::default(), false)
    }

    pub fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            style(text).with(to_term_color(color)).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn band_color(&self, band: RateBand) -> Color {
        match band {
            RateBand::Low => self.theme.red,
            RateBand::Medium => self.theme.yellow,
            RateBand::High => self.theme.green,
        }
    }
}

/// Map a ratatui color onto the crossterm palette used for plain console output
fn to_term_color(color: Color) -> TermColor {
    match color {
        Color::Reset => TermColor::Reset,
        Color::Black => TermColor::Black,
        Color::Red => TermColor::DarkRed,
        Color::Green => TermColor::DarkGreen,
        Color::Yellow => TermColor::DarkYellow,
        Color::Blue => TermColor::DarkBlue,
        Color::Magenta => TermColor::DarkMagenta,
        Color::Cyan => TermColor::DarkCyan,
        Color::Gray => TermColor::Grey,
        Color::DarkGray => TermColor::DarkGrey,
        Color::LightRed => TermColor::Red,
        Color::LightGreen => TermColor::Green,
        Color::LightYellow => TermColor::Yellow,
        Color::LightBlue => TermColor::Blue,
        Color::LightMagenta => TermColor::Magenta,
        Color::LightCyan => TermColor::Cyan,
        Color::White => TermColor::White,
        Color::Rgb(r, g, b) => TermColor::Rgb { r, g, b },
        Color::Indexed(i) => TermColor::AnsiValue(i),
    }
}

pub fn format_overdue(overdue: &[OverdueTask], painter: &Painter) -> String {
    if overdue.is_empty() {
        return format!("{}\n", painter.paint("No overdue tasks.", painter.theme.green));
    }
    let mut out = format!(
        "{}\n",
        painter.paint(
            &format!("Overdue tasks ({}):", overdue.len()),
            painter.theme.red
        )
    );
    for task in overdue {
        out.push_str(&format!("  - {}\n", task));
    }
    out
}

pub fn format_completion(rate: &CompletionRate, painter: &Painter) -> String {
    let percent = format!("{:.2}%", rate.percent);
    format!(
        "Completion rate: {} ({}/{} done)\n",
        painter.paint(&percent, painter.band_color(rate.band)),
        rate.checked,
        rate.total
    )
}

/// One line per entry: index, checkbox, colored category, label, due date
pub fn format_list(
    checklist: &Checklist,
    now: chrono::DateTime<chrono::Utc>,
    painter: &Painter,
) -> String {
    let width = checklist.entries.len().saturating_sub(1).to_string().len();
    let mut out = String::new();
    for (i, e) in checklist.entries.iter().enumerate() {
        out.push_str(&format!("{:>width$}  [{}] ", i, e.checkbox_char(), width = width));
        if let Some(ref category) = e.category {
            let color = painter
                .theme
                .category_color(checklist.attributes.category_color(category));
            out.push_str(&painter.paint(&format!("{}:", category), color));
            out.push(' ');
        }
        out.push_str(&e.label);
        if let Some(ref due) = e.due {
            let color = if e.is_overdue(now) {
                painter.theme.red
            } else {
                painter.theme.dim
            };
            out.push_str(&painter.paint(&format!(" (due: {})", due.raw), color));
        }
        out.push('\n');
    }
    out
}
