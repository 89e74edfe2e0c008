//! Application core — event loop, overlays, action dispatch.

use std::sync::Arc;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use dojo_core::{KeyValueStore, Location, PortalConfig, Toast, kv};

use crate::action::Action;
use crate::component::Component;
use crate::data_bridge;
use crate::event::{Event, EventReader};
use crate::screens::DashboardScreen;
use crate::theme;
use crate::tui::Tui;
use crate::widgets::overlay;

/// Connection status as seen by the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    #[default]
    Connecting,
    Connected,
    Failed,
}

/// Everything the app needs from start-up.
pub struct AppSettings {
    pub portal: PortalConfig,
    pub location: Arc<Location>,
    /// Client-side flags (the onboarding walkthrough).
    pub flags: Arc<dyn KeyValueStore>,
    /// How long a toast stays on screen.
    pub toast_timeout: Duration,
}

/// Top-level application state and event loop.
pub struct App {
    settings: AppSettings,
    dashboard: DashboardScreen,
    running: bool,
    connection_status: ConnectionStatus,
    help_visible: bool,
    search_active: bool,
    /// Text typed into the search prompt so far.
    search_query: String,
    walkthrough_visible: bool,
    /// The visible toast and when it appeared. A new toast replaces it.
    toast: Option<(Toast, Instant)>,
    /// Toasts pushed by the dashboard controller.
    toast_rx: mpsc::UnboundedReceiver<Toast>,
    /// Cancels an in-flight connect.
    data_cancel: CancellationToken,
    /// Action sender. Components can dispatch actions through this.
    action_tx: mpsc::UnboundedSender<Action>,
    /// Action receiver, drained by the main loop.
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new(settings: AppSettings) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let (toast_tx, toast_rx) = mpsc::unbounded_channel();
        let dashboard = DashboardScreen::new(
            Arc::clone(&settings.location),
            toast_tx,
            settings.portal.url.to_string(),
        );

        Self {
            settings,
            dashboard,
            running: true,
            connection_status: ConnectionStatus::default(),
            help_visible: false,
            search_active: false,
            search_query: String::new(),
            walkthrough_visible: false,
            toast: None,
            toast_rx,
            data_cancel: CancellationToken::new(),
            action_tx,
            action_rx,
        }
    }

    /// (Re)start the background connect.
    fn connect(&mut self) {
        self.data_cancel.cancel();
        self.data_cancel = CancellationToken::new();
        self.connection_status = ConnectionStatus::Connecting;
        info!(url = %self.settings.portal.url, "connecting to learner portal");
        tokio::spawn(data_bridge::spawn_data_bridge(
            self.settings.portal.clone(),
            self.action_tx.clone(),
            self.data_cancel.clone(),
        ));
    }

    /// Run the main event loop.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::enter()?;
        self.dashboard.init(self.action_tx.clone())?;
        self.connect();

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!("TUI event loop started");

        while self.running {
            // 1. Wait for the next event
            let Some(event) = events.next().await else {
                break;
            };

            // 2. Map event → action(s)
            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(action) = self.handle_mouse_event(mouse) {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize | Event::Render => self.action_tx.send(Action::Render)?,
                Event::Tick => self.action_tx.send(Action::Tick)?,
            }

            // 3. Toasts from the controller join the action queue
            while let Ok(toast) = self.toast_rx.try_recv() {
                self.action_tx.send(Action::Notify(toast))?;
            }

            // 4. Drain and process all queued actions
            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        self.data_cancel.cancel();
        info!("TUI event loop ended");
        Ok(())
    }

    /// Map a key event to an action. Overlays take keys first, then global
    /// keys, then the dashboard.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.walkthrough_visible {
            return Ok(Some(Action::DismissWalkthrough));
        }

        if self.search_active {
            return Ok(self.search_key(key));
        }

        if self.help_visible {
            return Ok(match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Some(Action::ToggleHelp),
                _ => None,
            });
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(match key.code {
                KeyCode::Char('c') => Some(Action::Quit),
                _ => None,
            });
        }

        // Shifted symbols like '?' arrive with SHIFT set, so match on the code.
        match key.code {
            KeyCode::Char('q') => return Ok(Some(Action::Quit)),
            KeyCode::Esc if self.toast.is_some() => return Ok(Some(Action::DismissToast)),
            KeyCode::Char('?') => return Ok(Some(Action::ToggleHelp)),
            KeyCode::Char('/') if self.connection_status == ConnectionStatus::Connected => {
                return Ok(Some(Action::OpenSearch));
            }
            _ => {}
        }

        self.dashboard.handle_key_event(key)
    }

    /// Keys while the search prompt is open. The whole query travels in
    /// the action so state only changes in `process_action`.
    fn search_key(&self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => Some(Action::CloseSearch),
            KeyCode::Enter => Some(Action::SearchSubmit(self.search_query.clone())),
            KeyCode::Backspace => {
                let mut query = self.search_query.clone();
                query.pop();
                Some(Action::SearchInput(query))
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let mut query = self.search_query.clone();
                query.push(c);
                Some(Action::SearchInput(query))
            }
            _ => None,
        }
    }

    fn handle_mouse_event(&self, mouse: MouseEvent) -> Option<Action> {
        if self.walkthrough_visible || self.help_visible || self.search_active {
            return None;
        }
        match mouse.kind {
            MouseEventKind::ScrollUp => Some(Action::MoveUp),
            MouseEventKind::ScrollDown => Some(Action::MoveDown),
            _ => None,
        }
    }

    /// Process a single action: update app state, then propagate to the dashboard.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.running = false;
                return Ok(());
            }

            Action::ToggleHelp => {
                self.help_visible = !self.help_visible;
                return Ok(());
            }

            Action::OpenSearch => {
                self.search_active = true;
                self.search_query = self.dashboard.search_text();
                return Ok(());
            }

            Action::CloseSearch => {
                self.search_active = false;
                self.search_query.clear();
                return Ok(());
            }

            Action::SearchInput(query) => {
                self.search_query.clone_from(query);
                return Ok(());
            }

            Action::SearchSubmit(query) => {
                debug!(%query, "search submitted");
                self.search_active = false;
                self.search_query.clear();
            }

            Action::Notify(toast) => {
                info!(kind = ?toast.kind, title = %toast.title, "toast");
                self.toast = Some((toast.clone(), Instant::now()));
                return Ok(());
            }

            Action::DismissToast => {
                self.toast = None;
                return Ok(());
            }

            Action::ShowWalkthrough => {
                self.walkthrough_visible = true;
                return Ok(());
            }

            Action::DismissWalkthrough => {
                self.walkthrough_visible = false;
                return Ok(());
            }

            Action::Connected(_) => {
                self.connection_status = ConnectionStatus::Connected;
                if kv::first_visit(&*self.settings.flags) {
                    self.action_tx.send(Action::ShowWalkthrough)?;
                }
            }

            Action::ConnectFailed(_) => {
                self.connection_status = ConnectionStatus::Failed;
            }

            Action::Refresh if self.connection_status != ConnectionStatus::Connected => {
                self.connect();
            }

            Action::Tick => {
                let expired = self
                    .toast
                    .as_ref()
                    .is_some_and(|(_, shown)| shown.elapsed() >= self.settings.toast_timeout);
                if expired {
                    self.toast = None;
                }
            }

            // Render is handled in the main loop, not here
            Action::Render => return Ok(()),

            _ => {}
        }

        if let Some(follow_up) = self.dashboard.update(action)? {
            self.action_tx.send(follow_up)?;
        }
        Ok(())
    }

    /// Render the full application frame.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        // Layout: [dashboard] [status bar]
        let layout = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);
        let content_area = layout[0];
        let status_area = layout[1];

        self.dashboard.render(frame, content_area);
        self.render_status_bar(frame, status_area);

        if let Some((ref toast, _)) = self.toast {
            overlay::render_toast(frame, content_area, toast);
        }
        if self.help_visible {
            overlay::render_help(frame, area);
        }
        if self.walkthrough_visible {
            overlay::render_walkthrough(frame, area);
        }
    }

    /// Bottom status bar: connection status, then the search prompt or key hints.
    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let connection_indicator = match self.connection_status {
            ConnectionStatus::Connected => {
                Span::styled("● connected", Style::default().fg(theme::SUCCESS_GREEN))
            }
            ConnectionStatus::Connecting => {
                Span::styled("◐ connecting", Style::default().fg(theme::ELECTRIC_YELLOW))
            }
            ConnectionStatus::Failed => {
                Span::styled("○ offline", Style::default().fg(theme::ERROR_RED))
            }
        };

        let mut spans = vec![Span::raw(" "), connection_indicator];
        if self.search_active {
            spans.push(Span::styled(" │ / ", theme::key_hint_key()));
            spans.push(Span::styled(
                format!("{}█", self.search_query),
                Style::default().fg(theme::NEON_CYAN),
            ));
            spans.push(Span::styled("   Enter apply  Esc cancel", theme::key_hint()));
        } else {
            spans.push(Span::styled(
                " │ Enter open  / search  s sort  ? help  q quit",
                theme::key_hint(),
            ));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use dojo_core::{MemoryStore, ToastKind};
    use pretty_assertions::assert_eq;
    use url::Url;

    use super::*;

    fn app(toast_timeout: Duration) -> App {
        let url = Url::parse("https://courses.dojo.example.com").unwrap();
        App::new(AppSettings {
            portal: PortalConfig::new(url.clone(), "acme"),
            location: Arc::new(Location::new(url.join("/acme/").unwrap())),
            flags: Arc::new(MemoryStore::new()),
            toast_timeout,
        })
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn walkthrough_swallows_the_next_key() {
        let mut app = app(Duration::from_secs(5));
        app.process_action(&Action::ShowWalkthrough).unwrap();

        let action = app.handle_key_event(key(KeyCode::Char('q'))).unwrap();
        assert!(matches!(action, Some(Action::DismissWalkthrough)));

        app.process_action(&Action::DismissWalkthrough).unwrap();
        let action = app.handle_key_event(key(KeyCode::Char('q'))).unwrap();
        assert!(matches!(action, Some(Action::Quit)));
    }

    #[test]
    fn search_prompt_collects_text_until_enter() {
        let mut app = app(Duration::from_secs(5));
        app.process_action(&Action::OpenSearch).unwrap();

        for c in ['r', 'u', 'x'] {
            let action = app.handle_key_event(key(KeyCode::Char(c))).unwrap().unwrap();
            app.process_action(&action).unwrap();
        }
        let action = app.handle_key_event(key(KeyCode::Backspace)).unwrap().unwrap();
        app.process_action(&action).unwrap();
        assert_eq!(app.search_query, "ru");

        let action = app.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert!(matches!(action, Some(Action::SearchSubmit(ref q)) if q == "ru"));
    }

    #[test]
    fn search_needs_a_connection() {
        let mut app = app(Duration::from_secs(5));
        assert!(app.handle_key_event(key(KeyCode::Char('/'))).unwrap().is_none());
    }

    #[test]
    fn help_closes_on_question_mark_or_esc() {
        let mut app = app(Duration::from_secs(5));
        app.process_action(&Action::ToggleHelp).unwrap();
        assert!(app.help_visible);

        assert!(app.handle_key_event(key(KeyCode::Char('x'))).unwrap().is_none());
        let action = app.handle_key_event(key(KeyCode::Esc)).unwrap();
        assert!(matches!(action, Some(Action::ToggleHelp)));
    }

    #[test]
    fn esc_dismisses_the_toast_first() {
        let mut app = app(Duration::from_secs(5));
        app.process_action(&Action::Notify(Toast::request_sent())).unwrap();

        let action = app.handle_key_event(key(KeyCode::Esc)).unwrap();
        assert!(matches!(action, Some(Action::DismissToast)));
        app.process_action(&Action::DismissToast).unwrap();
        assert!(app.toast.is_none());
    }

    #[test]
    fn newer_toast_replaces_the_visible_one() {
        let mut app = app(Duration::from_secs(5));
        app.process_action(&Action::Notify(Toast::request_sent())).unwrap();
        app.process_action(&Action::Notify(Toast::request_failed())).unwrap();

        let (toast, _) = app.toast.as_ref().unwrap();
        assert_eq!(toast.kind, ToastKind::Error);
    }

    #[test]
    fn toast_expires_on_tick() {
        let mut app = app(Duration::ZERO);
        app.process_action(&Action::Notify(Toast::already_requested())).unwrap();
        app.process_action(&Action::Tick).unwrap();
        assert!(app.toast.is_none());
    }

    #[test]
    fn failed_connect_marks_the_status() {
        let mut app = app(Duration::from_secs(5));
        app.process_action(&Action::ConnectFailed("boom".into())).unwrap();
        assert_eq!(app.connection_status, ConnectionStatus::Failed);
    }
}
