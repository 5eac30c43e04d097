use crate::theme::Palette;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

const ROWS: [&str; 3] = ["qwertyuiop", "asdfghjkl;", "zxcvbnm,.'"];

/// Height the typing view reserves for the keyboard, in lines.
pub const KEYBOARD_HEIGHT: u16 = 5;

/// On-screen keyboard with the next expected key highlighted.
pub struct KeyboardWidget {
    next_key: Option<char>,
    palette: Palette,
}

impl KeyboardWidget {
    pub fn new(next_key: Option<char>, palette: Palette) -> Self {
        Self { next_key, palette }
    }

    fn highlight_target(&self) -> Option<char> {
        self.next_key.map(|c| c.to_ascii_lowercase())
    }
}

impl Widget for KeyboardWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let target = self.highlight_target();

        let key_style = Style::default().fg(self.palette.dim);
        let highlight_style = Style::default()
            .fg(self.palette.accent)
            .add_modifier(Modifier::REVERSED | Modifier::BOLD);

        let mut lines: Vec<Line> = ROWS
            .iter()
            .map(|row| {
                let spans: Vec<Span> = row
                    .chars()
                    .map(|key| {
                        let style = if target == Some(key) {
                            highlight_style
                        } else {
                            key_style
                        };
                        Span::styled(format!(" {key} "), style)
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        let space_style = if target == Some(' ') {
            highlight_style
        } else {
            key_style
        };
        lines.push(Line::from(Span::styled("        space        ", space_style)));

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}
