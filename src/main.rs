pub mod app_dirs;
pub mod metrics;
pub mod passages;
pub mod runtime;
pub mod session;
pub mod settings;
pub mod stats;
pub mod theme;
pub mod ui;

use crate::{
    passages::PassageProvider,
    runtime::{spawn_event_threads, AppEvent, TICK_INTERVAL},
    session::{Mode, Session},
    settings::{Difficulty, FileSettingsStore, Settings, SettingsStore},
    stats::{FileStatsStore, Stats, StatsStore},
    theme::{FileThemeStore, Theme},
    ui::screen::current_screen,
    ui::settings_view::{PendingAction, SettingsViewState, ROW_COUNT},
};
use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin, BufRead, Write},
    path::PathBuf,
};

const DEFAULT_EXPORT_FILE: &str = "typro-export.json";

/// terminal typing practice with live wpm, a virtual keyboard, and progress tracking
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal typing trainer: round-robin passages, per-character feedback, live wpm/accuracy, and locally persisted progress."
)]
pub struct Cli {
    /// countdown length for timed tests, in seconds
    #[clap(short = 's', long)]
    duration: Option<u32>,

    /// start in untimed practice mode (never recorded)
    #[clap(short = 'p', long)]
    practice: bool,

    /// passage difficulty tier
    #[clap(short = 'd', long, value_enum)]
    difficulty: Option<CliDifficulty>,

    /// require correcting a mistyped character before moving on
    #[clap(long)]
    stop_on_error: bool,

    /// write a stats/settings snapshot to PATH and exit
    #[clap(long, value_name = "PATH", num_args = 0..=1, default_missing_value = "typro-export.json")]
    export: Option<PathBuf>,

    /// reset aggregate statistics to zero and exit
    #[clap(long)]
    reset_stats: bool,

    /// remove all persisted records (settings, stats, theme) and exit
    #[clap(long)]
    clear_data: bool,

    /// answer yes to confirmation prompts of destructive flags
    #[clap(short = 'y', long)]
    yes: bool,
}

#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum CliDifficulty {
    Easy,
    Medium,
    Hard,
}

impl CliDifficulty {
    fn as_difficulty(&self) -> Difficulty {
        match self {
            CliDifficulty::Easy => Difficulty::Easy,
            CliDifficulty::Medium => Difficulty::Medium,
            CliDifficulty::Hard => Difficulty::Hard,
        }
    }
}

impl Cli {
    /// Flags that run without a terminal UI and exit.
    fn wants_headless(&self) -> bool {
        self.export.is_some() || self.reset_stats || self.clear_data
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Home,
    Typing,
    Settings,
    Results,
}

/// Whether the event loop keeps going after a keystroke.
#[derive(Debug)]
pub enum KeyFlow {
    Continue,
    Quit,
}

#[derive(Debug)]
pub struct App {
    pub view: View,
    pub session: Session,
    pub settings: Settings,
    pub stats: Stats,
    pub theme: Theme,
    pub settings_view: SettingsViewState,
    pub personal_best: bool,
    mode: Mode,
    passages: PassageProvider,
    settings_store: FileSettingsStore,
    stats_store: FileStatsStore,
    theme_store: FileThemeStore,
}

impl App {
    pub fn new(cli: &Cli) -> Self {
        Self::with_stores(
            cli,
            FileSettingsStore::new(),
            FileStatsStore::new(),
            FileThemeStore::new(),
        )
    }

    pub fn with_stores(
        cli: &Cli,
        settings_store: FileSettingsStore,
        stats_store: FileStatsStore,
        theme_store: FileThemeStore,
    ) -> Self {
        let mut settings = settings_store.load();
        // CLI flags shape the launched sessions without touching the record
        if let Some(duration) = cli.duration {
            settings.test_duration = duration;
        }
        if let Some(difficulty) = cli.difficulty {
            settings.difficulty_level = difficulty.as_difficulty();
        }
        if cli.stop_on_error {
            settings.stop_on_error = true;
        }

        let stats = stats_store.load();
        let theme = theme_store.load();
        let passages = PassageProvider::new();
        let mode = if cli.practice {
            Mode::Practice
        } else {
            Mode::Timed
        };
        let session = Session::new(
            passages.current(settings.difficulty_level).to_string(),
            mode,
            Some(settings.test_duration),
            settings.stop_on_error,
        );

        Self {
            view: View::Home,
            session,
            settings,
            stats,
            theme,
            settings_view: SettingsViewState::default(),
            personal_best: false,
            mode,
            passages,
            settings_store,
            stats_store,
            theme_store,
        }
    }

    /// Replace the session wholesale; dropping the old one is what cancels
    /// its countdown.
    fn start_session(&mut self, mode: Mode) {
        self.mode = mode;
        self.session = Session::new(
            self.passages.current(self.settings.difficulty_level).to_string(),
            mode,
            Some(self.settings.test_duration),
            self.settings.stop_on_error,
        );
        self.personal_best = false;
        self.view = View::Typing;
    }

    /// Fresh session over the same passage.
    fn restart(&mut self) {
        self.session = Session::new(
            self.session.passage.clone(),
            self.mode,
            Some(self.settings.test_duration),
            self.settings.stop_on_error,
        );
        self.personal_best = false;
        self.view = View::Typing;
    }

    fn next_text(&mut self) {
        self.passages.advance();
        self.start_session(self.mode);
    }

    /// Fold the finished session into the aggregate (unless it is a practice
    /// run or tracking is off) and move on per the auto-start setting.
    fn finish_session(&mut self) {
        if stats::should_record(self.settings.stats_tracking, self.session.mode) {
            let wpm = self.session.wpm();
            self.personal_best = wpm > self.stats.best_wpm;
            self.stats.record(
                wpm,
                self.session.accuracy(),
                self.session.errors,
                self.session.mode,
                self.session.seconds_used(),
            );
            let _ = self.stats_store.save(&self.stats);
        }
        if self.settings.auto_start_next {
            self.next_text();
        } else {
            self.view = View::Results;
        }
    }

    fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.settings.theme = theme;
        let _ = self.theme_store.save(theme);
        let _ = self.settings_store.save(&self.settings);
    }

    /// Cycle the value of one settings row and persist the record.
    fn change_setting(&mut self, row: usize) {
        match row {
            0 => self.settings.test_duration = Settings::next_duration(self.settings.test_duration),
            1 => self.settings.difficulty_level = self.settings.difficulty_level.cycled(),
            2 => self.settings.font_size = self.settings.font_size.cycled(),
            3 => self.settings.show_keyboard = !self.settings.show_keyboard,
            4 => self.settings.sound_effects = !self.settings.sound_effects,
            5 => return self.set_theme(self.theme.toggled()),
            6 => self.settings.caret_style = self.settings.caret_style.cycled(),
            7 => self.settings.smooth_caret = !self.settings.smooth_caret,
            8 => self.settings.timer_warning = !self.settings.timer_warning,
            9 => self.settings.stop_on_error = !self.settings.stop_on_error,
            10 => self.settings.quick_restart = !self.settings.quick_restart,
            11 => self.settings.auto_start_next = !self.settings.auto_start_next,
            12 => self.settings.stats_tracking = self.settings.stats_tracking.cycled(),
            _ => return,
        }
        let _ = self.settings_store.save(&self.settings);
    }

    fn reset_stats(&mut self) {
        self.stats = Stats::default();
        let _ = self.stats_store.save(&self.stats);
    }

    fn clear_all_data(&mut self) {
        let _ = self.settings_store.clear();
        let _ = self.stats_store.clear();
        let _ = self.theme_store.clear();
        self.settings = Settings::default();
        self.stats = Stats::default();
        self.theme = Theme::Dark;
    }

    /// One countdown tick. Only the active typing view ticks, so a session
    /// that was navigated away from or replaced never sees a stale tick.
    pub fn on_tick(&mut self) {
        if self.view != View::Typing {
            return;
        }
        if self.session.has_started() && !self.session.has_finished() {
            self.session.on_tick();
            if self.session.has_finished() {
                self.finish_session();
            }
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) -> KeyFlow {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('c') {
                return KeyFlow::Quit;
            }
            return KeyFlow::Continue;
        }
        match self.view {
            View::Home => self.on_home_key(key.code),
            View::Typing => self.on_typing_key(key.code),
            View::Settings => self.on_settings_key(key.code),
            View::Results => self.on_results_key(key.code),
        }
    }

    fn on_home_key(&mut self, code: KeyCode) -> KeyFlow {
        match code {
            KeyCode::Char('p') => self.start_session(Mode::Practice),
            KeyCode::Char('t') => self.start_session(Mode::Timed),
            KeyCode::Char('s') => {
                self.settings_view = SettingsViewState::default();
                self.view = View::Settings;
            }
            KeyCode::Char('d') => self.set_theme(self.theme.toggled()),
            KeyCode::Char('q') | KeyCode::Esc => return KeyFlow::Quit,
            _ => {}
        }
        KeyFlow::Continue
    }

    fn on_typing_key(&mut self, code: KeyCode) -> KeyFlow {
        match code {
            KeyCode::Esc => self.view = View::Home,
            KeyCode::Tab if self.settings.quick_restart => self.restart(),
            KeyCode::Backspace => self.session.backspace(),
            KeyCode::Char(c) => {
                self.session.write(c);
                if self.session.has_finished() {
                    self.finish_session();
                }
            }
            _ => {}
        }
        KeyFlow::Continue
    }

    fn on_results_key(&mut self, code: KeyCode) -> KeyFlow {
        match code {
            KeyCode::Char('r') => self.restart(),
            KeyCode::Char('n') => self.next_text(),
            KeyCode::Char('h') => self.view = View::Home,
            KeyCode::Esc => return KeyFlow::Quit,
            _ => {}
        }
        KeyFlow::Continue
    }

    fn on_settings_key(&mut self, code: KeyCode) -> KeyFlow {
        // A pending destructive action swallows everything except y/n
        if let Some(action) = self.settings_view.confirm {
            match code {
                KeyCode::Char('y') => {
                    match action {
                        PendingAction::ResetStats => self.reset_stats(),
                        PendingAction::ClearData => {
                            self.clear_all_data();
                            self.view = View::Home;
                        }
                    }
                    self.settings_view.confirm = None;
                }
                KeyCode::Char('n') | KeyCode::Esc => self.settings_view.confirm = None,
                _ => {}
            }
            return KeyFlow::Continue;
        }

        match code {
            KeyCode::Up => {
                self.settings_view.selected = self
                    .settings_view
                    .selected
                    .checked_sub(1)
                    .unwrap_or(ROW_COUNT - 1);
            }
            KeyCode::Down => {
                self.settings_view.selected = (self.settings_view.selected + 1) % ROW_COUNT;
            }
            KeyCode::Enter => self.change_setting(self.settings_view.selected),
            KeyCode::Char('e') => {
                let _ = stats::export_to_file(DEFAULT_EXPORT_FILE, &self.stats, &self.settings);
            }
            KeyCode::Char('R') => self.settings_view.confirm = Some(PendingAction::ResetStats),
            KeyCode::Char('X') => self.settings_view.confirm = Some(PendingAction::ClearData),
            KeyCode::Esc => self.view = View::Home,
            _ => {}
        }
        KeyFlow::Continue
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if cli.wants_headless() {
        return run_headless(&cli);
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&cli);
    start_tui(&mut terminal, &mut app)?;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

/// Run the export/reset/clear flags without entering the terminal UI.
fn run_headless(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let settings_store = FileSettingsStore::new();
    let stats_store = FileStatsStore::new();
    let theme_store = FileThemeStore::new();

    if let Some(path) = &cli.export {
        stats::export_to_file(path, &stats_store.load(), &settings_store.load())?;
        println!("exported to {}", path.display());
    }

    if cli.reset_stats && (cli.yes || confirm("reset all statistics? this cannot be undone")?) {
        stats_store.save(&Stats::default())?;
        println!("statistics reset");
    }

    if cli.clear_data
        && (cli.yes || confirm("clear ALL data including settings? this cannot be undone")?)
    {
        settings_store.clear()?;
        stats_store.clear()?;
        theme_store.clear()?;
        println!("all data cleared");
    }

    Ok(())
}

fn confirm(prompt: &str) -> io::Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().eq_ignore_ascii_case("y"))
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<(), Box<dyn Error>> {
    let events = spawn_event_threads(TICK_INTERVAL);

    terminal.draw(|f| ui(app, f))?;

    loop {
        match events.recv()? {
            AppEvent::Tick => {
                let was_running = app.view == View::Typing
                    && app.session.has_started()
                    && !app.session.has_finished();
                app.on_tick();
                // Redraw only while the countdown is visibly moving
                if was_running {
                    terminal.draw(|f| ui(app, f))?;
                }
            }
            AppEvent::Resize => {
                terminal.draw(|f| ui(app, f))?;
            }
            AppEvent::Key(key) => {
                if let KeyFlow::Quit = app.on_key(key) {
                    break;
                }
                terminal.draw(|f| ui(app, f))?;
            }
        }
    }

    Ok(())
}

fn ui(app: &mut App, f: &mut Frame) {
    let view = app.view.clone();
    current_screen(&view).render(app, f);
}
