//! Main application state and TUI event loop for the raid dashboard.
//!
//! [`App`] owns the theme, the session selection and the loaded reports.
//! Key handling is pure state manipulation in [`App::handle_key`]; the only
//! side effect it can request is a reload, returned as [`AppAction::Reload`]
//! and carried out by [`App::run`] through the [`DataManager`].

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    widgets::Paragraph,
    Frame, Terminal,
};

use raid_core::catalog::Catalog;
use raid_core::error::{DashboardError, Result};
use raid_core::models::{Selection, SelectionMode};
use raid_data::aggregator::sessions_in_scope;
use raid_data::loader::ReportSet;
use raid_data::ranking::LabelStyle;
use raid_runtime::dashboard::{build_dashboard, DashboardSnapshot};
use raid_runtime::data_manager::DataManager;

use crate::components::header::Header;
use crate::dashboard_view::{
    max_scroll, render_blocked, render_body, render_footer, render_warnings, warnings_height,
};
use crate::selector_view::{render_selector, SELECTOR_WIDTH};
use crate::table_view::render_no_data;
use crate::themes::Theme;

/// How long the loop waits for a key before yielding to the runtime.
const TICK_RATE: Duration = Duration::from_millis(250);

// ── AppAction ─────────────────────────────────────────────────────────────────

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Continue,
    Reload,
    Quit,
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the dashboard TUI.
pub struct App {
    pub theme: Theme,
    pub catalog: Catalog,
    pub selection: Selection,
    /// Index into the session list.
    pub cursor: usize,
    /// Body scroll offset, in body items.
    pub scroll: usize,
    pub reports: ReportSet,
    /// Shown in the "no reports" placeholder.
    pub reports_dir: String,
    /// Current dashboard, `None` while the selection is empty.
    pub snapshot: Option<DashboardSnapshot>,
    /// Message replacing the body while the selection is empty.
    pub blocked: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(
        theme_name: &str,
        catalog: Catalog,
        selection: Selection,
        reports: ReportSet,
        reports_dir: impl Into<String>,
    ) -> Self {
        let mut app = Self {
            theme: Theme::from_name(theme_name),
            catalog,
            selection,
            cursor: 0,
            scroll: 0,
            reports,
            reports_dir: reports_dir.into(),
            snapshot: None,
            blocked: None,
            should_quit: false,
        };
        app.cursor = app.initial_cursor();
        app.refresh();
        app
    }

    /// Session identifiers in listing order.
    pub fn sessions(&self) -> Vec<String> {
        self.reports.session_ids()
    }

    /// Sessions the current selection puts in scope.
    pub fn scope(&self) -> Vec<String> {
        sessions_in_scope(&self.selection, &self.reports.sessions)
    }

    fn initial_cursor(&self) -> usize {
        let scope = self.scope();
        self.reports
            .sessions
            .iter()
            .position(|s| scope.first() == Some(&s.session.id))
            .unwrap_or(0)
    }

    fn cursor_session(&self) -> Option<String> {
        self.reports
            .sessions
            .get(self.cursor)
            .map(|s| s.session.id.clone())
    }

    /// Replace the loaded reports, e.g. after a reload.
    pub fn set_reports(&mut self, reports: ReportSet) {
        self.reports = reports;
        self.cursor = self.cursor.min(self.reports.sessions.len().saturating_sub(1));
        self.refresh();
    }

    /// Recompute the dashboard for the current selection.
    pub fn refresh(&mut self) {
        match build_dashboard(
            &self.selection,
            &self.reports,
            &self.catalog,
            LabelStyle::Plain,
        ) {
            Ok(snapshot) => {
                self.scroll = self.scroll.min(max_scroll(&snapshot));
                self.snapshot = Some(snapshot);
                self.blocked = None;
            }
            Err(e) => {
                tracing::debug!(
                    error = %e,
                    mode = self.selection.mode.as_str(),
                    "dashboard blocked"
                );
                self.snapshot = None;
                self.blocked = Some(e.to_string());
            }
        }
    }

    // ── Key handling ──────────────────────────────────────────────────────────

    /// Apply one key press to the application state.
    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return AppAction::Quit;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
                return AppAction::Quit;
            }
            KeyCode::Char('r') => return AppAction::Reload,
            KeyCode::Char('t') => self.theme = self.theme.next(),
            KeyCode::Char('m') => self.cycle_mode(),
            KeyCode::Up | KeyCode::Char('k') => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                let last = self.reports.sessions.len().saturating_sub(1);
                self.cursor = (self.cursor + 1).min(last);
            }
            KeyCode::PageDown => {
                let limit = self.snapshot.as_ref().map(max_scroll).unwrap_or(0);
                self.scroll = (self.scroll + 1).min(limit);
            }
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Enter if self.selection.mode == SelectionMode::Single => {
                if let Some(id) = self.cursor_session() {
                    self.selection = Selection::single(id);
                    self.refresh();
                }
            }
            KeyCode::Char(' ') if self.selection.mode == SelectionMode::Multiple => {
                if let Some(id) = self.cursor_session() {
                    self.selection.toggle(&id);
                    self.refresh();
                }
            }
            KeyCode::Char('a') if self.selection.mode == SelectionMode::Multiple => {
                self.selection.sessions = self.sessions();
                self.refresh();
            }
            KeyCode::Char('n') if self.selection.mode == SelectionMode::Multiple => {
                self.selection.sessions.clear();
                self.refresh();
            }
            _ => {}
        }
        AppAction::Continue
    }

    /// Move to the next selection mode. Entering Single mode picks the
    /// session under the cursor; other modes keep the chosen sessions.
    fn cycle_mode(&mut self) {
        self.selection.mode = self.selection.mode.next();
        if self.selection.mode == SelectionMode::Single {
            if let Some(id) = self.cursor_session() {
                self.selection.sessions = vec![id];
            }
        }
        self.refresh();
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Render the current application state into `frame`.
    pub fn render(&self, frame: &mut Frame) {
        let warnings = &self.reports.warnings;
        let [header_area, main_area, warnings_area, footer_area] = Layout::vertical([
            Constraint::Length(4),
            Constraint::Min(0),
            Constraint::Length(warnings_height(warnings.len())),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let scope = self.scope();
        let rows = self.snapshot.as_ref().map(|s| s.row_count);
        let header = Header::new(self.selection.mode, &scope, rows, &self.theme);
        frame.render_widget(Paragraph::new(header.to_lines()), header_area);

        let [selector_area, body_area] =
            Layout::horizontal([Constraint::Length(SELECTOR_WIDTH), Constraint::Min(0)])
                .areas(main_area);

        render_selector(
            frame,
            selector_area,
            &self.sessions(),
            &self.selection,
            &scope,
            self.cursor,
            &self.theme,
        );

        if self.reports.sessions.is_empty() {
            render_no_data(frame, body_area, &self.reports_dir, &self.theme);
        } else if let Some(snapshot) = &self.snapshot {
            render_body(frame, body_area, snapshot, self.scroll, &self.theme);
        } else {
            let message = self.blocked.as_deref().unwrap_or_default();
            render_blocked(frame, body_area, message, self.selection.mode, &self.theme);
        }

        render_warnings(frame, warnings_area, warnings, &self.theme);
        render_footer(frame, footer_area, self.selection.mode, &self.theme);
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Run the dashboard until the user quits.
    ///
    /// Uses `crossterm::event::poll` with a short timeout and yields to the
    /// runtime between polls so an OS-level Ctrl+C can be observed by the
    /// caller. Once raw mode is on, the terminal is restored on every exit
    /// path, including a failed screen setup. Terminal failures surface as
    /// [`DashboardError::Terminal`].
    pub async fn run(mut self, manager: &mut DataManager) -> Result<()> {
        enable_raw_mode().map_err(terminal_error)?;

        let result = self.run_on_screen(manager).await;
        let restored = restore_terminal().map_err(terminal_error);
        finish(result, restored)
    }

    async fn run_on_screen(&mut self, manager: &mut DataManager) -> Result<()> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(terminal_error)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout)).map_err(terminal_error)?;

        self.event_loop(&mut terminal, manager)
            .await
            .map_err(terminal_error)
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        manager: &mut DataManager,
    ) -> io::Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;

            if event::poll(TICK_RATE)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        match self.handle_key(key) {
                            AppAction::Quit => break,
                            AppAction::Reload => {
                                let reports = manager.reload().clone();
                                self.set_reports(reports);
                            }
                            AppAction::Continue => {}
                        }
                    }
                }
            }

            tokio::task::yield_now().await;
        }
        Ok(())
    }
}

fn terminal_error(e: io::Error) -> DashboardError {
    DashboardError::Terminal(e.to_string())
}

/// Combine the session outcome with the terminal restore. A session error
/// wins; a failed restore is reported only when the session itself ended
/// cleanly.
fn finish(session: Result<()>, restored: Result<()>) -> Result<()> {
    session.and(restored)
}

/// Leave the alternate screen and raw mode.
pub fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, cursor::Show)?;
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use raid_core::models::{LoadedSession, PlayerRecord, Session, SessionLoadError};
    use ratatui::backend::TestBackend;
    use std::path::PathBuf;

    fn session(id: &str, players: Vec<PlayerRecord>) -> LoadedSession {
        LoadedSession {
            session: Session {
                id: id.into(),
                path: PathBuf::from(format!("reports/{id}/report.json")),
                modified: None,
            },
            players: players.into_iter().map(|p| p.with_session(id)).collect(),
        }
    }

    fn reports() -> ReportSet {
        ReportSet {
            sessions: vec![
                session(
                    "kara-01",
                    vec![
                        PlayerRecord::new("Thrall").with_stat("dps", 1000.0),
                        PlayerRecord::new("Jaina").with_stat("dps", 1500.0),
                    ],
                ),
                session(
                    "kara-02",
                    vec![PlayerRecord::new("Thrall").with_stat("dps", 1400.0)],
                ),
                session("broken", vec![]),
            ],
            warnings: vec![SessionLoadError {
                session: "broken".into(),
                path: PathBuf::from("reports/broken/report.json"),
                message: "expected value at line 1 column 1".into(),
            }],
        }
    }

    fn app(selection: Selection) -> App {
        App::new("dark", Catalog::raid(), selection, reports(), "reports")
    }

    fn press(app: &mut App, code: KeyCode) -> AppAction {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|r| r.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    // ── Construction ──────────────────────────────────────────────────────────

    #[test]
    fn test_app_creation() {
        let app = app(Selection::single("kara-02"));
        assert_eq!(app.cursor, 1);
        assert_eq!(app.scope(), vec!["kara-02"]);
        assert!(app.snapshot.is_some());
        assert!(app.blocked.is_none());
        assert!(!app.should_quit);
    }

    #[test]
    fn test_app_unknown_theme_falls_back() {
        let app = App::new("neon", Catalog::raid(), Selection::all(), reports(), "reports");
        assert!(app.theme.name == "dark" || app.theme.name == "light");
    }

    #[test]
    fn test_app_starts_blocked_on_empty_selection() {
        let app = app(Selection::multiple(Vec::<String>::new()));
        assert!(app.snapshot.is_none());
        assert_eq!(
            app.blocked.as_deref(),
            Some("No player data for the selected sessions")
        );
    }

    // ── Keys ──────────────────────────────────────────────────────────────────

    #[test]
    fn test_quit_keys() {
        let mut a = app(Selection::all());
        assert_eq!(press(&mut a, KeyCode::Char('q')), AppAction::Quit);
        assert!(a.should_quit);

        let mut b = app(Selection::all());
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(b.handle_key(ctrl_c), AppAction::Quit);
    }

    #[test]
    fn test_reload_key_requests_reload() {
        let mut a = app(Selection::all());
        assert_eq!(press(&mut a, KeyCode::Char('r')), AppAction::Reload);
        assert!(!a.should_quit);
    }

    #[test]
    fn test_cursor_moves_within_bounds() {
        let mut a = app(Selection::single("kara-01"));
        press(&mut a, KeyCode::Up);
        assert_eq!(a.cursor, 0);
        press(&mut a, KeyCode::Down);
        press(&mut a, KeyCode::Char('j'));
        press(&mut a, KeyCode::Down);
        assert_eq!(a.cursor, 2);
        press(&mut a, KeyCode::Char('k'));
        assert_eq!(a.cursor, 1);
    }

    #[test]
    fn test_enter_picks_session_in_single_mode() {
        let mut a = app(Selection::single("kara-01"));
        press(&mut a, KeyCode::Down);
        press(&mut a, KeyCode::Enter);
        assert_eq!(a.selection, Selection::single("kara-02"));
        assert_eq!(a.snapshot.as_ref().unwrap().row_count, 1);
    }

    #[test]
    fn test_enter_on_broken_session_blocks() {
        let mut a = app(Selection::single("kara-01"));
        press(&mut a, KeyCode::Down);
        press(&mut a, KeyCode::Down);
        press(&mut a, KeyCode::Enter);
        assert!(a.snapshot.is_none());
        assert!(a.blocked.is_some());
    }

    #[test]
    fn test_mode_cycle() {
        let mut a = app(Selection::all());
        press(&mut a, KeyCode::Down);
        press(&mut a, KeyCode::Char('m'));
        assert_eq!(a.selection, Selection::single("kara-02"));

        press(&mut a, KeyCode::Char('m'));
        assert_eq!(a.selection.mode, SelectionMode::Multiple);
        assert_eq!(a.selection.sessions, vec!["kara-02"]);

        press(&mut a, KeyCode::Char('m'));
        assert_eq!(a.selection.mode, SelectionMode::All);
        assert!(a.snapshot.as_ref().unwrap().aggregated);
    }

    #[test]
    fn test_space_toggles_in_multiple_mode() {
        let mut a = app(Selection::multiple(["kara-01"]));
        press(&mut a, KeyCode::Down);
        press(&mut a, KeyCode::Char(' '));
        assert_eq!(a.scope(), vec!["kara-01", "kara-02"]);
        assert!(a.snapshot.as_ref().unwrap().aggregated);

        press(&mut a, KeyCode::Char(' '));
        assert_eq!(a.scope(), vec!["kara-01"]);
    }

    #[test]
    fn test_space_ignored_outside_multiple_mode() {
        let mut a = app(Selection::single("kara-01"));
        press(&mut a, KeyCode::Char(' '));
        assert_eq!(a.selection, Selection::single("kara-01"));
    }

    #[test]
    fn test_select_all_and_none() {
        let mut a = app(Selection::multiple(["kara-01"]));
        press(&mut a, KeyCode::Char('a'));
        assert_eq!(a.scope(), vec!["kara-01", "kara-02", "broken"]);

        press(&mut a, KeyCode::Char('n'));
        assert!(a.scope().is_empty());
        assert!(a.snapshot.is_none());
        assert!(a.blocked.is_some());
    }

    #[test]
    fn test_scroll_clamped() {
        let mut a = app(Selection::all());
        let limit = max_scroll(a.snapshot.as_ref().unwrap());
        for _ in 0..limit + 5 {
            press(&mut a, KeyCode::PageDown);
        }
        assert_eq!(a.scroll, limit);
        press(&mut a, KeyCode::PageUp);
        assert_eq!(a.scroll, limit - 1);
    }

    #[test]
    fn test_theme_key_cycles() {
        let mut a = app(Selection::all());
        press(&mut a, KeyCode::Char('t'));
        assert_eq!(a.theme.name, "light");
    }

    #[test]
    fn test_set_reports_clamps_cursor() {
        let mut a = app(Selection::single("kara-01"));
        press(&mut a, KeyCode::Down);
        press(&mut a, KeyCode::Down);
        let mut fewer = reports();
        fewer.sessions.truncate(1);
        a.set_reports(fewer);
        assert_eq!(a.cursor, 0);
        assert!(a.snapshot.is_some());
    }

    // ── Terminal errors ───────────────────────────────────────────────────────

    #[test]
    fn test_terminal_error_mapping() {
        let err = terminal_error(io::Error::other("not a tty"));
        assert!(matches!(err, DashboardError::Terminal(_)));
        assert_eq!(err.to_string(), "Terminal error: not a tty");
    }

    #[test]
    fn test_finish_keeps_session_error_over_restore_error() {
        let session = Err(DashboardError::Terminal("enter alternate screen".into()));
        let restored = Err(DashboardError::Terminal("disable raw mode".into()));
        let err = finish(session, restored).unwrap_err();
        assert_eq!(err.to_string(), "Terminal error: enter alternate screen");
    }

    #[test]
    fn test_finish_reports_failed_restore() {
        let restored = Err(DashboardError::Terminal("disable raw mode".into()));
        let err = finish(Ok(()), restored).unwrap_err();
        assert_eq!(err.to_string(), "Terminal error: disable raw mode");
        assert!(finish(Ok(()), Ok(())).is_ok());
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    #[test]
    fn test_render_dashboard() {
        let mut terminal = Terminal::new(TestBackend::new(140, 50)).unwrap();
        let a = app(Selection::single("kara-01"));
        terminal.draw(|frame| a.render(frame)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("RAID PERFORMANCE DASHBOARD"));
        assert!(text.contains("[ Single | kara-01 | 2 players ]"));
        assert!(text.contains("Top 10 Damage Dealers (DPS)"));
        assert!(text.contains("Warnings"));
        assert!(text.contains("Enter pick"));
    }

    #[test]
    fn test_render_blocked_dashboard() {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        let a = app(Selection::multiple(Vec::<String>::new()));
        terminal.draw(|frame| a.render(frame)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("No player data for the selected sessions"));
        assert!(!text.contains("Top 10 Damage Dealers"));
    }

    #[test]
    fn test_render_without_reports() {
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        let a = App::new(
            "dark",
            Catalog::raid(),
            Selection::all(),
            ReportSet::default(),
            "reports",
        );
        terminal.draw(|frame| a.render(frame)).unwrap();
        assert!(buffer_text(&terminal).contains("No raid reports found"));
    }

    #[test]
    fn test_render_small_terminal_does_not_panic() {
        let mut terminal = Terminal::new(TestBackend::new(20, 6)).unwrap();
        let a = app(Selection::all());
        terminal.draw(|frame| a.render(frame)).unwrap();
    }
}
