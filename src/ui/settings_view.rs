use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::settings::Settings;
use crate::App;

/// Number of selectable rows; one per persisted option.
pub const ROW_COUNT: usize = 13;

const ROW_LABELS: [&str; ROW_COUNT] = [
    "test duration",
    "difficulty",
    "font size",
    "show keyboard",
    "sound effects",
    "theme",
    "caret style",
    "smooth caret",
    "timer warning",
    "stop on error",
    "quick restart",
    "auto start next",
    "stats tracking",
];

/// Destructive actions waiting on a y/n answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    ResetStats,
    ClearData,
}

#[derive(Debug, Default)]
pub struct SettingsViewState {
    pub selected: usize,
    pub confirm: Option<PendingAction>,
}

fn on_off(v: bool) -> &'static str {
    if v {
        "on"
    } else {
        "off"
    }
}

pub fn value_text(settings: &Settings, row: usize) -> String {
    match row {
        0 => format!("{}s", settings.test_duration),
        1 => settings.difficulty_level.to_string(),
        2 => settings.font_size.to_string(),
        3 => on_off(settings.show_keyboard).to_string(),
        4 => on_off(settings.sound_effects).to_string(),
        5 => settings.theme.to_string(),
        6 => settings.caret_style.to_string(),
        7 => on_off(settings.smooth_caret).to_string(),
        8 => on_off(settings.timer_warning).to_string(),
        9 => on_off(settings.stop_on_error).to_string(),
        10 => on_off(settings.quick_restart).to_string(),
        11 => on_off(settings.auto_start_next).to_string(),
        12 => settings.stats_tracking.to_string(),
        _ => String::new(),
    }
}

pub fn render_settings(app: &mut App, f: &mut Frame) {
    let palette = app.theme.palette();
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let dim = Style::default().fg(palette.dim);

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled("settings", bold.fg(palette.accent))),
        Line::default(),
    ];

    for (idx, label) in ROW_LABELS.iter().enumerate() {
        let value = value_text(&app.settings, idx);
        let row = format!("{label:<16} {value}");
        if idx == app.settings_view.selected {
            lines.push(Line::from(Span::styled(
                format!("▸ {row}"),
                bold.fg(palette.accent),
            )));
        } else {
            lines.push(Line::from(Span::styled(format!("  {row}"), dim)));
        }
    }

    lines.push(Line::default());
    match app.settings_view.confirm {
        Some(PendingAction::ResetStats) => {
            lines.push(Line::from(Span::styled(
                "reset all statistics? this cannot be undone (y/n)",
                bold.fg(palette.warning),
            )));
        }
        Some(PendingAction::ClearData) => {
            lines.push(Line::from(Span::styled(
                "clear ALL data including settings? this cannot be undone (y/n)",
                bold.fg(palette.warning),
            )));
        }
        None => {
            lines.push(Line::from(Span::styled(
                "↑/↓ select / (enter) change / (e)xport / (R)eset stats / (X) clear all / (esc) back",
                dim.add_modifier(Modifier::ITALIC),
            )));
        }
    }

    let area = f.area();
    let top = area.height.saturating_sub(lines.len() as u16) / 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(top), Constraint::Min(0)].as_ref())
        .split(area);

    let widget = Paragraph::new(lines).alignment(Alignment::Center);
    f.render_widget(widget, chunks[1]);
}
