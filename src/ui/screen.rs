use ratatui::Frame;

use crate::ui::home::render_home;
use crate::ui::settings_view::render_settings;
use crate::{App, View};

/// A UI screen boundary: each view owns its rendering.
pub trait Screen {
    fn render(&self, app: &mut App, f: &mut Frame);
}

/// Typing screen - the App widget projects the active session
pub struct TypingScreen;

impl Screen for TypingScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        f.render_widget(&*app, f.area());
    }
}

/// Results screen - the App widget projects the finished session
pub struct ResultsScreen;

impl Screen for ResultsScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        f.render_widget(&*app, f.area());
    }
}

pub struct HomeScreen;

impl Screen for HomeScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        render_home(app, f);
    }
}

pub struct SettingsScreen;

impl Screen for SettingsScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        render_settings(app, f);
    }
}

/// Helper to construct the appropriate screen for the current view
pub fn current_screen(view: &View) -> Box<dyn Screen> {
    match view {
        View::Home => Box::new(HomeScreen),
        View::Typing => Box::new(TypingScreen),
        View::Settings => Box::new(SettingsScreen),
        View::Results => Box::new(ResultsScreen),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn every_view_renders_through_its_screen() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();

        for view in [View::Home, View::Typing, View::Settings, View::Results] {
            let mut app = test_app("hello");
            app.view = view.clone();
            let screen = current_screen(&app.view.clone());
            terminal.draw(|f| screen.render(&mut app, f)).unwrap();
        }
    }
}
