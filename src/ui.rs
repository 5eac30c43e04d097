pub mod home;
pub mod keyboard;
pub mod screen;
pub mod settings_view;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::session::CharOutcome;
use crate::settings::CaretStyle;
use crate::ui::keyboard::{KeyboardWidget, KEYBOARD_HEIGHT};
use crate::{App, View};

const HORIZONTAL_MARGIN: u16 = 5;

/// WPM at which the results gauge reads full.
pub const GAUGE_CAP_WPM: f64 = 120.0;

/// Skill label for a final WPM, shown under the results gauge.
pub fn performance_tag(wpm: u32) -> &'static str {
    match wpm {
        w if w >= 100 => "speed demon",
        w if w >= 80 => "advanced",
        w if w >= 60 => "proficient",
        w if w >= 40 => "intermediate",
        w if w >= 20 => "progressing",
        _ => "beginner",
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.view {
            View::Results => render_results(self, area, buf),
            _ => render_typing(self, area, buf),
        }
    }
}

fn caret_modifier(style: CaretStyle) -> Modifier {
    match style {
        CaretStyle::Line => Modifier::UNDERLINED,
        CaretStyle::Block => Modifier::REVERSED,
        CaretStyle::Underline => Modifier::UNDERLINED | Modifier::BOLD,
    }
}

fn render_typing(app: &App, area: Rect, buf: &mut Buffer) {
    let session = &app.session;
    let palette = app.theme.palette();

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let correct_style = bold.fg(palette.correct);
    let incorrect_style = bold.fg(palette.incorrect);
    let pending_style = bold.fg(palette.dim).add_modifier(Modifier::DIM);

    let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
    let mut prompt_lines =
        ((session.passage.width() as f64 / max_chars_per_line as f64).ceil() + 1.0) as u16;
    if session.passage.width() <= max_chars_per_line as usize {
        prompt_lines = 1;
    }

    let keyboard_lines = if app.settings.show_keyboard {
        KEYBOARD_HEIGHT + 1
    } else {
        0
    };
    let content = 2 + prompt_lines + 2 + keyboard_lines;
    let top = area.height.saturating_sub(content) / 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints(
            [
                Constraint::Length(top),
                Constraint::Length(2),
                Constraint::Length(prompt_lines),
                Constraint::Length(2),
                Constraint::Length(keyboard_lines),
                Constraint::Min(0),
            ]
            .as_ref(),
        )
        .split(area);

    // Countdown, or the unlimited marker for practice runs
    let timer_text = match session.remaining_secs {
        Some(secs) => secs.to_string(),
        None => "∞".to_string(),
    };
    let timer_style = if session.in_warning_zone() && app.settings.timer_warning {
        bold.fg(palette.warning)
    } else {
        bold.fg(palette.dim).add_modifier(Modifier::DIM)
    };
    Paragraph::new(Span::styled(timer_text, timer_style))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

    let spans: Vec<Span> = session
        .passage
        .chars()
        .enumerate()
        .map(|(idx, expected)| {
            let mut style = match session.outcomes[idx] {
                CharOutcome::Correct => correct_style,
                CharOutcome::Incorrect => incorrect_style,
                CharOutcome::Pending => pending_style,
            };
            if idx == session.cursor {
                style = style
                    .remove_modifier(Modifier::DIM)
                    .add_modifier(caret_modifier(app.settings.caret_style));
            }
            let shown = match (expected, session.outcomes[idx]) {
                (' ', CharOutcome::Incorrect) => "·".to_string(),
                (c, _) => c.to_string(),
            };
            Span::styled(shown, style)
        })
        .collect();

    Paragraph::new(Line::from(spans))
        .alignment(if prompt_lines == 1 {
            Alignment::Center
        } else {
            Alignment::Left
        })
        .wrap(Wrap { trim: true })
        .render(chunks[2], buf);

    let live = Paragraph::new(Span::styled(
        format!("{} wpm   {}% acc", session.wpm(), session.accuracy()),
        Style::default().fg(palette.text),
    ))
    .alignment(Alignment::Center);
    live.render(chunks[3], buf);

    if app.settings.show_keyboard {
        let next_key = session.expected_char(session.cursor);
        KeyboardWidget::new(next_key, palette).render(chunks[4], buf);
    }
}

fn render_results(app: &App, area: Rect, buf: &mut Buffer) {
    let session = &app.session;
    let palette = app.theme.palette();
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let italic = Style::default().add_modifier(Modifier::ITALIC);

    let top = area.height.saturating_sub(10) / 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN * 2)
        .constraints(
            [
                Constraint::Length(top),
                Constraint::Length(1), // headline stats
                Constraint::Length(1), // keystroke detail
                Constraint::Length(1),
                Constraint::Length(3), // performance gauge
                Constraint::Length(1), // tag / personal best
                Constraint::Length(1),
                Constraint::Length(1), // legend
                Constraint::Min(0),
            ]
            .as_ref(),
        )
        .split(area);

    let wpm = session.wpm();
    let accuracy = session.accuracy();

    Paragraph::new(Span::styled(
        format!("{wpm} wpm   {accuracy}% acc"),
        bold.fg(palette.text),
    ))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);

    Paragraph::new(Span::styled(
        format!(
            "{} correct   {} errors",
            session.correct_keystrokes, session.errors
        ),
        Style::default().fg(palette.dim),
    ))
    .alignment(Alignment::Center)
    .render(chunks[2], buf);

    let ratio = (wpm as f64 / GAUGE_CAP_WPM).min(1.0);
    Gauge::default()
        .gauge_style(Style::default().fg(palette.accent))
        .ratio(ratio)
        .label(format!("{wpm} wpm"))
        .render(chunks[4], buf);

    let tag_line = if app.personal_best {
        Span::styled(
            format!("{} — new personal best!", performance_tag(wpm)),
            bold.fg(palette.correct),
        )
    } else {
        Span::styled(performance_tag(wpm), bold.fg(palette.accent))
    };
    Paragraph::new(tag_line)
        .alignment(Alignment::Center)
        .render(chunks[5], buf);

    Paragraph::new(Span::styled(
        "(r)etry / (n)ew text / (h)ome / (esc)ape",
        italic.fg(palette.dim),
    ))
    .alignment(Alignment::Center)
    .render(chunks[7], buf);
}
