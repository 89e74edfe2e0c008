//! Dashboard screen — learning path, paginated catalog with filters and
//! sort, and the course drawer, all driven through a `DashboardController`.

use std::collections::BTreeSet;
use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, TableState};
use throbber_widgets_tui::{Throbber, ThrobberState};
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{debug, info, warn};
use url::Url;

use dojo_core::{
    AuthenticatedUser, CatalogFilter, CourseSource, CtaEffect, DashboardController, DashboardView,
    LearningPathInfo, Location, NotificationSink, PendingRequest, Portal, QuerySync, Toast,
    ToastKind,
};

use crate::action::{Action, Panel};
use crate::component::Component;
use crate::data_bridge;
use crate::theme;
use crate::widgets::{course_table, drawer, filter_bar};

/// Steps `m` cycles the max-hours filter through, after "any".
const MAX_HOURS_STEPS: &[u32] = &[2, 5, 10, 20];

/// The next value of a single-select facet: none → first → … → last → none.
pub fn next_facet(available: &[String], current: &BTreeSet<String>) -> Option<String> {
    let Some(active) = current.iter().next() else {
        return available.first().cloned();
    };
    available
        .iter()
        .position(|v| v == active)
        .and_then(|i| available.get(i + 1))
        .cloned()
}

pub fn next_max_hours(current: Option<u32>) -> Option<u32> {
    match current {
        None => MAX_HOURS_STEPS.first().copied(),
        Some(h) => MAX_HOURS_STEPS.iter().copied().find(|step| *step > h),
    }
}

/// Screen-local key bindings. Global keys (quit, help, search) are
/// handled by the app before this is consulted.
pub fn key_action(key: KeyEvent, focus: Panel) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    let action = match key.code {
        KeyCode::Tab | KeyCode::BackTab => Action::FocusPanel(focus.toggle()),
        KeyCode::Char('k') | KeyCode::Up => Action::MoveUp,
        KeyCode::Char('j') | KeyCode::Down => Action::MoveDown,
        KeyCode::Enter => Action::Activate,
        KeyCode::Esc => Action::CloseDrawer,
        KeyCode::Char('n') | KeyCode::Right => Action::NextPage,
        KeyCode::Char('p') | KeyCode::Left => Action::PreviousPage,
        KeyCode::Char('[') => Action::HistoryBack,
        KeyCode::Char(']') => Action::HistoryForward,
        KeyCode::Char('l') => Action::CycleLanguage,
        KeyCode::Char('d') => Action::CycleDifficulty,
        KeyCode::Char('c') => Action::ToggleCertificate,
        KeyCode::Char('t') => Action::ToggleSubtitles,
        KeyCode::Char('m') => Action::CycleMaxHours,
        KeyCode::Char('x') => Action::ClearFilters,
        KeyCode::Char('s') => Action::CycleSort,
        KeyCode::Char('S') => Action::OpenSurvey,
        KeyCode::Char('r') => Action::Refresh,
        KeyCode::Char(c @ '1'..='9') => {
            let n = c.to_digit(10).and_then(|d| usize::try_from(d).ok());
            Action::RemoveChip(n.unwrap_or(0))
        }
        _ => return None,
    };
    Some(action)
}

/// Open `url` in the system browser; a toast explains any failure.
fn open_in_browser(url: &Url) -> Option<Action> {
    info!(%url, "opening in browser");
    match open::that_detached(url.as_str()) {
        Ok(()) => None,
        Err(e) => {
            warn!(%url, error = %e, "could not open browser");
            Some(Action::Notify(Toast::new(
                ToastKind::Error,
                "Could not open your browser",
                url.to_string(),
            )))
        }
    }
}

struct Session {
    portal: Portal,
    controller: DashboardController,
}

enum LoadState {
    Connecting,
    Failed(String),
    Ready(Box<Session>),
}

pub struct DashboardScreen {
    action_tx: Option<UnboundedSender<Action>>,
    location: Arc<Location>,
    toast_tx: mpsc::UnboundedSender<Toast>,
    portal_url: String,
    state: LoadState,
    focus: Panel,
    path_state: TableState,
    catalog_state: TableState,
    throbber_state: ThrobberState,
}

impl DashboardScreen {
    pub fn new(
        location: Arc<Location>,
        toast_tx: mpsc::UnboundedSender<Toast>,
        portal_url: String,
    ) -> Self {
        Self {
            action_tx: None,
            location,
            toast_tx,
            portal_url,
            state: LoadState::Connecting,
            focus: Panel::default(),
            path_state: TableState::default().with_selected(0),
            catalog_state: TableState::default().with_selected(0),
            throbber_state: ThrobberState::default(),
        }
    }

    /// The catalog search currently applied, to prefill the search prompt.
    pub fn search_text(&self) -> String {
        match self.state {
            LoadState::Ready(ref session) => session.controller.filter().search.unwrap_or_default(),
            _ => String::new(),
        }
    }

    fn attach(&mut self, portal: &Portal) {
        let location: Arc<dyn QuerySync> = self.location.clone();
        let notifications: Arc<dyn NotificationSink> = Arc::new(self.toast_tx.clone());
        let controller = DashboardController::new(
            portal.provider(),
            location,
            notifications,
            portal.learning_path_info().kickoff_survey,
        );
        info!(page = controller.page(), "dashboard attached");
        self.state = LoadState::Ready(Box::new(Session {
            portal: portal.clone(),
            controller,
        }));
        self.focus = Panel::Catalog;
        self.sync_cursors();
    }

    fn session_mut(&mut self) -> Option<&mut Session> {
        match self.state {
            LoadState::Ready(ref mut session) => Some(session),
            _ => None,
        }
    }

    /// Keep both cursors on a row that exists.
    fn sync_cursors(&mut self) {
        let LoadState::Ready(ref session) = self.state else {
            return;
        };
        let view = session.controller.view();
        clamp_cursor(&mut self.path_state, view.learning_path.len());
        clamp_cursor(&mut self.catalog_state, view.catalog.len());
    }

    fn reset_catalog_cursor(&mut self) {
        self.catalog_state.select(Some(0));
        self.sync_cursors();
    }

    fn move_cursor(&mut self, down: bool) {
        let state = match self.focus {
            Panel::LearningPath => &mut self.path_state,
            Panel::Catalog => &mut self.catalog_state,
        };
        let current = state.selected().unwrap_or(0);
        state.select(Some(if down {
            current.saturating_add(1)
        } else {
            current.saturating_sub(1)
        }));
        self.sync_cursors();
    }

    fn update_filter(&mut self, edit: impl FnOnce(&Session, CatalogFilter) -> CatalogFilter) {
        let Some(session) = self.session_mut() else {
            return;
        };
        let next = edit(session, session.controller.filter());
        session.controller.apply_filter(next);
        self.reset_catalog_cursor();
    }

    /// Enter: open the course under the cursor, or run the call to action
    /// when that course's drawer is already open.
    fn activate(&mut self) -> Option<Action> {
        let focus = self.focus;
        let cursor = match focus {
            Panel::LearningPath => self.path_state.selected(),
            Panel::Catalog => self.catalog_state.selected(),
        }
        .unwrap_or(0);
        let action_tx = self.action_tx.clone();
        let session = self.session_mut()?;

        let view = session.controller.view();
        let (cards, source) = match focus {
            Panel::LearningPath => (&view.learning_path, CourseSource::LearningPath),
            Panel::Catalog => (&view.catalog, CourseSource::Catalog),
        };
        let under_cursor = cards.get(cursor);

        if let Some(card) = under_cursor.filter(|card| !card.selected) {
            session.controller.select_course(card.course.id, source);
            return None;
        }
        match session.controller.trigger_call_to_action()? {
            CtaEffect::Open(url) => open_in_browser(&url),
            CtaEffect::Request(pending) => {
                spawn_request(pending, action_tx);
                None
            }
        }
    }
}

/// The backend's count decides the empty state, like the "N courses" aside.
fn learning_path_is_empty(info: &LearningPathInfo) -> bool {
    info.count == 0
}

/// Panel height: room for the empty-state text, or one row per course
/// plus borders and header, capped.
fn learning_path_height(info: &LearningPathInfo, rows: usize) -> u16 {
    if learning_path_is_empty(info) {
        return 5;
    }
    u16::try_from(rows)
        .unwrap_or(u16::MAX)
        .saturating_add(3)
        .min(10)
}

fn clamp_cursor(state: &mut TableState, len: usize) {
    let selected = state.selected().unwrap_or(0);
    state.select(Some(selected.min(len.saturating_sub(1))));
}

fn spawn_request(pending: PendingRequest, action_tx: Option<UnboundedSender<Action>>) {
    debug!(course = %pending.course(), "spawning course request");
    tokio::spawn(async move {
        if let Some(completion) = pending.run().await {
            if let Some(tx) = action_tx {
                let _ = tx.send(Action::RequestSettled(completion));
            }
        }
    });
}

impl Component for DashboardScreen {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if !matches!(self.state, LoadState::Ready(_)) {
            return Ok(match key.code {
                KeyCode::Char('r') => Some(Action::Refresh),
                _ => None,
            });
        }
        Ok(key_action(key, self.focus))
    }

    #[allow(clippy::too_many_lines)]
    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::Connected(portal) => self.attach(portal),

            Action::ConnectFailed(reason) => {
                self.state = LoadState::Failed(reason.clone());
            }

            Action::Refresh => match self.state {
                LoadState::Ready(ref session) => {
                    if let Some(ref tx) = self.action_tx {
                        data_bridge::spawn_refresh(session.portal.clone(), tx.clone());
                    }
                }
                // The app reconnects; show progress until it reports back.
                _ => self.state = LoadState::Connecting,
            },

            Action::Refreshed => {
                if let Some(session) = self.session_mut() {
                    session.controller.refresh();
                    let survey = session.portal.learning_path_info().kickoff_survey;
                    session.controller.set_kickoff_survey(survey);
                }
                self.sync_cursors();
            }

            Action::RefreshFailed(reason) => {
                return Ok(Some(Action::Notify(Toast::new(
                    ToastKind::Error,
                    "Could not refresh courses",
                    reason.clone(),
                ))));
            }

            Action::Tick => {
                if let LoadState::Ready(ref session) = self.state {
                    if session.controller.is_requesting() {
                        self.throbber_state.calc_next();
                    }
                } else {
                    self.throbber_state.calc_next();
                }
            }

            Action::FocusPanel(panel) => self.focus = *panel,
            Action::MoveUp => self.move_cursor(false),
            Action::MoveDown => self.move_cursor(true),
            Action::Activate => return Ok(self.activate()),

            Action::CloseDrawer => {
                if let Some(session) = self.session_mut() {
                    session.controller.clear_selection();
                }
            }

            Action::NextPage | Action::PreviousPage => {
                if let Some(session) = self.session_mut() {
                    if matches!(action, Action::NextPage) {
                        session.controller.next_page();
                    } else {
                        session.controller.previous_page();
                    }
                }
                self.reset_catalog_cursor();
            }

            Action::HistoryBack | Action::HistoryForward => {
                let moved = if matches!(action, Action::HistoryBack) {
                    self.location.back()
                } else {
                    self.location.forward()
                };
                if moved {
                    if let Some(session) = self.session_mut() {
                        session.controller.restore_from_location();
                    }
                    self.reset_catalog_cursor();
                }
            }

            Action::SearchSubmit(query) => {
                self.update_filter(|_, f| f.with_search(query));
            }

            Action::CycleLanguage => self.update_filter(|session, mut f| {
                let available = session.portal.store().available_languages();
                let next = next_facet(&available, &f.languages);
                f.languages.clear();
                match next {
                    Some(code) => f.with_language(&code),
                    None => f,
                }
            }),

            Action::CycleDifficulty => self.update_filter(|session, mut f| {
                let available = session.portal.store().available_difficulties();
                let next = next_facet(&available, &f.difficulty);
                f.difficulty.clear();
                match next {
                    Some(level) => f.with_difficulty(&level),
                    None => f,
                }
            }),

            Action::ToggleCertificate => self.update_filter(|_, f| {
                let on = !f.certificate_only;
                f.with_certificate_only(on)
            }),

            Action::ToggleSubtitles => self.update_filter(|_, f| {
                let on = !f.subtitles_only;
                f.with_subtitles_only(on)
            }),

            Action::CycleMaxHours => self.update_filter(|_, f| {
                let next = next_max_hours(f.max_hours);
                f.with_max_hours(next)
            }),

            Action::RemoveChip(n) => {
                if let Some(session) = self.session_mut() {
                    let chips = session.controller.filter().active_chips();
                    if let Some(chip) = n.checked_sub(1).and_then(|i| chips.get(i)) {
                        session.controller.remove_filter_chip(chip);
                    }
                }
                self.reset_catalog_cursor();
            }

            Action::ClearFilters => {
                if let Some(session) = self.session_mut() {
                    session.controller.clear_filters();
                }
                self.reset_catalog_cursor();
            }

            Action::CycleSort => {
                if let Some(session) = self.session_mut() {
                    let next = session.controller.sorting().next();
                    session.controller.apply_sort(next);
                }
                self.reset_catalog_cursor();
            }

            Action::OpenSurvey => {
                let Some(session) = self.session_mut() else {
                    return Ok(None);
                };
                return Ok(match session.controller.kickoff_survey() {
                    Some(survey) => open_in_browser(survey),
                    None => Some(Action::Notify(Toast::new(
                        ToastKind::Info,
                        "No learning survey yet",
                        "Your learning path does not have a kickoff survey.",
                    ))),
                });
            }

            Action::RequestSettled(completion) => {
                if let Some(session) = self.session_mut() {
                    session.controller.settle_request(completion.clone());
                }
            }

            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        match self.state {
            LoadState::Connecting => self.render_connecting(frame, area),
            LoadState::Failed(ref reason) => self.render_failed(frame, area, reason),
            LoadState::Ready(ref session) => self.render_dashboard(frame, area, session),
        }
    }
}

// ── Rendering ────────────────────────────────────────────────────────

impl DashboardScreen {
    fn render_connecting(&self, frame: &mut Frame, area: Rect) {
        let layout = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .split(area);
        let throbber = Throbber::default()
            .label(format!("  Connecting to {}…", self.portal_url))
            .style(Style::default().fg(theme::NEON_CYAN))
            .throbber_style(Style::default().fg(theme::DOJO_INDIGO));
        frame.render_stateful_widget(throbber, layout[1], &mut self.throbber_state.clone());
    }

    #[allow(clippy::unused_self)]
    fn render_failed(&self, frame: &mut Frame, area: Rect, reason: &str) {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "  Could not load your dashboard",
                Style::default().fg(theme::ERROR_RED),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!("  {reason}"),
                Style::default().fg(theme::DIM_WHITE),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("  r ", theme::key_hint_key()),
                Span::styled("retry   ", theme::key_hint()),
                Span::styled("q ", theme::key_hint_key()),
                Span::styled("quit", theme::key_hint()),
            ]),
        ];
        frame.render_widget(Paragraph::new(text), area);
    }

    fn render_dashboard(&self, frame: &mut Frame, area: Rect, session: &Session) {
        let view = session.controller.view();
        let info = session.portal.learning_path_info();
        let path_height = learning_path_height(&info, view.learning_path.len());

        let layout = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(path_height),
            Constraint::Min(8),
        ])
        .split(area);

        render_header(frame, layout[0], session);
        self.render_learning_path(frame, layout[1], session, &view);
        self.render_catalog(frame, layout[2], &view);

        if let Some(ref open) = view.drawer {
            let body = Rect::new(
                area.x,
                layout[1].y,
                area.width,
                area.height.saturating_sub(layout[0].height),
            );
            let width = (body.width / 2).max(44).min(body.width);
            let drawer_area =
                Rect::new(body.right().saturating_sub(width), body.y, width, body.height);
            drawer::render_drawer(frame, drawer_area, open, &self.throbber_state);
        }
    }

    fn panel_block(&self, panel: Panel, title: &'static str) -> Block<'static> {
        let border = if self.focus == panel {
            theme::border_focused()
        } else {
            theme::border_default()
        };
        Block::default()
            .title(format!(" {title} "))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border)
    }

    fn render_learning_path(
        &self,
        frame: &mut Frame,
        area: Rect,
        session: &Session,
        view: &DashboardView,
    ) {
        let info = session.portal.learning_path_info();
        let mut block = self.panel_block(Panel::LearningPath, "My learning path").title(
            Line::from(Span::styled(
                format!(" Available for kick-off: {} ", info.count_label()),
                theme::key_hint(),
            ))
            .right_aligned(),
        );
        if let Some(name) = &info.name {
            block = block.title(Span::styled(format!("{name} "), theme::subtitle_style()));
        }
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if learning_path_is_empty(&info) {
            let text = vec![
                Line::from(Span::styled(
                    "You don't have a course in Learning path yet",
                    Style::default().fg(theme::DIM_WHITE),
                )),
                Line::from(Span::styled(
                    "Check out our complete course catalog for courses that might interest you",
                    theme::key_hint(),
                )),
            ];
            frame.render_widget(Paragraph::new(text).centered(), inner);
            return;
        }

        let mut state = self.path_state.clone();
        if self.focus != Panel::LearningPath {
            state.select(None);
        }
        frame.render_stateful_widget(
            course_table::course_table(&view.learning_path),
            inner,
            &mut state,
        );
    }

    fn render_catalog(&self, frame: &mut Frame, area: Rect, view: &DashboardView) {
        let block = self.panel_block(Panel::Catalog, "Course catalog").title(
            Line::from(Span::styled(
                format!(" {} courses ", view.catalog_total),
                theme::key_hint(),
            ))
            .right_aligned(),
        );
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let columns =
            Layout::horizontal([Constraint::Min(40), Constraint::Length(34)]).split(inner);
        let has_chips = !view.filter_chips.is_empty();
        let list = Layout::vertical([
            Constraint::Length(u16::from(has_chips)),
            Constraint::Min(3),
            Constraint::Length(u16::from(view.show_pagination())),
        ])
        .split(columns[0]);

        if has_chips {
            frame.render_widget(Paragraph::new(filter_bar::chip_line(&view.filter_chips)), list[0]);
        }

        if view.catalog.is_empty() {
            let text = vec![
                Line::from(""),
                Line::from(Span::styled(
                    "Can't find what you're looking for?",
                    Style::default().fg(theme::DIM_WHITE),
                )),
                Line::from(Span::styled(
                    "Get in touch with us at #dojo-help",
                    theme::key_hint(),
                )),
            ];
            frame.render_widget(Paragraph::new(text).centered(), list[1]);
        } else {
            let mut state = self.catalog_state.clone();
            if self.focus != Panel::Catalog {
                state.select(None);
            }
            frame.render_stateful_widget(
                course_table::course_table(&view.catalog),
                list[1],
                &mut state,
            );
        }

        if view.show_pagination() {
            let line = Line::from(vec![
                Span::styled("◂ p  ", theme::key_hint()),
                Span::styled(
                    format!("Page {} of {}", view.page, view.page_count),
                    theme::title_style(),
                ),
                Span::styled("  n ▸", theme::key_hint()),
            ]);
            frame.render_widget(Paragraph::new(line).centered(), list[2]);
        }

        frame.render_widget(
            Paragraph::new(filter_bar::sidebar_lines(&view.filter, view.sort)).block(
                Block::default()
                    .borders(Borders::LEFT)
                    .border_style(theme::border_default()),
            ),
            columns[1],
        );
    }
}

fn render_header(frame: &mut Frame, area: Rect, session: &Session) {
    let enterprise = &session.portal.enterprise().name;
    let mut title = vec![Span::styled(format!(" Dashboard - {enterprise}"), theme::title_style())];
    if session.controller.kickoff_survey().is_some() {
        title.push(Span::styled("    S ", theme::key_hint_key()));
        title.push(Span::styled("Start learning survey", theme::key_hint()));
    }
    let text = vec![
        Line::from(title),
        Line::from(Span::styled(
            format!(" {}", AuthenticatedUser::greeting(session.portal.user())),
            Style::default().fg(theme::DIM_WHITE),
        )),
        Line::from(Span::styled(
            " Today is a great day for education.",
            theme::subtitle_style(),
        )),
    ];
    frame.render_widget(Paragraph::new(text), area);
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn langs(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_owned()).collect()
    }

    fn active(value: Option<&str>) -> BTreeSet<String> {
        value.into_iter().map(str::to_owned).collect()
    }

    #[test]
    fn facet_cycle_walks_then_clears() {
        let available = langs(&["de", "en", "ja"]);
        assert_eq!(next_facet(&available, &active(None)).as_deref(), Some("de"));
        assert_eq!(next_facet(&available, &active(Some("de"))).as_deref(), Some("en"));
        assert_eq!(next_facet(&available, &active(Some("ja"))), None);
    }

    #[test]
    fn facet_cycle_restarts_after_unknown_value() {
        let available = langs(&["en"]);
        assert_eq!(next_facet(&available, &active(Some("fr"))), None);
        assert_eq!(next_facet(&[], &active(None)), None);
    }

    #[test]
    fn max_hours_cycle() {
        assert_eq!(next_max_hours(None), Some(2));
        assert_eq!(next_max_hours(Some(2)), Some(5));
        assert_eq!(next_max_hours(Some(7)), Some(10));
        assert_eq!(next_max_hours(Some(20)), None);
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn keys_map_to_dashboard_actions() {
        assert!(matches!(
            key_action(key(KeyCode::Tab), Panel::Catalog),
            Some(Action::FocusPanel(Panel::LearningPath))
        ));
        let on_catalog = |code| key_action(key(code), Panel::Catalog);
        assert!(matches!(on_catalog(KeyCode::Char('j')), Some(Action::MoveDown)));
        assert!(matches!(on_catalog(KeyCode::Right), Some(Action::NextPage)));
        assert!(matches!(on_catalog(KeyCode::Char('[')), Some(Action::HistoryBack)));
        assert!(matches!(on_catalog(KeyCode::Char('S')), Some(Action::OpenSurvey)));
        assert!(matches!(on_catalog(KeyCode::Char('3')), Some(Action::RemoveChip(3))));
        assert!(on_catalog(KeyCode::Char('z')).is_none());
    }

    #[test]
    fn control_chords_are_not_screen_keys() {
        let ctrl_d = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL);
        assert!(key_action(ctrl_d, Panel::Catalog).is_none());
    }

    fn path_info(count: u32) -> LearningPathInfo {
        LearningPathInfo {
            count,
            ..LearningPathInfo::default()
        }
    }

    #[test]
    fn learning_path_empty_state_follows_backend_count() {
        assert!(learning_path_is_empty(&path_info(0)));
        assert!(!learning_path_is_empty(&path_info(2)));
        // Cards present but a zero count still shows the empty state.
        assert_eq!(learning_path_height(&path_info(0), 2), 5);
    }

    #[test]
    fn learning_path_height_grows_with_rows_up_to_a_cap() {
        assert_eq!(learning_path_height(&path_info(3), 3), 6);
        assert_eq!(learning_path_height(&path_info(40), 40), 10);
    }

    #[test]
    fn cursor_clamps_to_rows() {
        let mut state = TableState::default().with_selected(7);
        clamp_cursor(&mut state, 3);
        assert_eq!(state.selected(), Some(2));
        clamp_cursor(&mut state, 0);
        assert_eq!(state.selected(), Some(0));
    }
}
