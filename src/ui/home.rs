use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::App;

const RECENT_SESSIONS: usize = 5;

pub fn render_home(app: &mut App, f: &mut Frame) {
    let palette = app.theme.palette();
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let dim = Style::default().fg(palette.dim);

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled("typro", bold.fg(palette.accent))),
        Line::from(Span::styled(
            "terminal typing practice",
            dim.add_modifier(Modifier::ITALIC),
        )),
        Line::default(),
        Line::from(Span::styled(
            format!(
                "best {} wpm   avg {}% acc   {} tests   {}m typed",
                app.stats.best_wpm,
                app.stats.avg_accuracy,
                app.stats.tests_taken,
                app.stats.time_typed
            ),
            bold.fg(palette.text),
        )),
        Line::default(),
    ];

    let recent = app
        .stats
        .sessions_history
        .iter()
        .rev()
        .take(RECENT_SESSIONS);
    let mut any = false;
    for record in recent {
        any = true;
        lines.push(Line::from(Span::styled(
            format!(
                "{}   {} wpm   {}%   {} err   {}",
                record.date.format("%b %d %H:%M"),
                record.wpm,
                record.accuracy,
                record.errors,
                record.mode
            ),
            dim,
        )));
    }
    if !any {
        lines.push(Line::from(Span::styled(
            "no sessions yet — take a timed test to build history",
            dim.add_modifier(Modifier::ITALIC),
        )));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "(p)ractice / (t)imed test / (s)ettings / (d)ark-light / (q)uit",
        dim.add_modifier(Modifier::ITALIC),
    )));

    let area = f.area();
    let top = area.height.saturating_sub(lines.len() as u16) / 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(top), Constraint::Min(0)].as_ref())
        .split(area);

    let widget = Paragraph::new(lines).alignment(Alignment::Center);
    f.render_widget(widget, chunks[1]);
}
