//! Application core: event loop, focus, overlays, and frame layout.
//!
//! Terminal events become [`Action`]s; presenter signals are applied as
//! they arrive. Both run on this one task, so the presenters never see
//! concurrent calls.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use strum::IntoEnumIterator;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use tripboard_core::{
    FilterType, Key, KeyListeners, Models, PointId, PointsApi, TripPresenter, Ui, UpdateType,
};

use crate::action::{Action, Notification, NotificationLevel};
use crate::board;
use crate::bootstrap;
use crate::event::{self, Event, EventReader};
use crate::scene::{self, SharedScene, lock};
use crate::summary::TripSummary;
use crate::theme;
use crate::tui::Tui;
use crate::views::{SceneSurface, SceneViews};

const TICK_RATE: Duration = Duration::from_millis(100);
const RENDER_RATE: Duration = Duration::from_millis(33);
const NOTIFICATION_TTL: Duration = Duration::from_secs(4);

pub struct App {
    trip: TripPresenter,
    models: Models,
    scene: SharedScene,
    /// Shown in the header: the endpoint, or "demo".
    source: String,
    focus: Option<PointId>,
    running: bool,
    help_visible: bool,
    notification: Option<(Notification, Instant)>,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new(api: Arc<dyn PointsApi>, source: String) -> Self {
        let scene = scene::shared();
        let ui = Ui::new(
            Box::new(SceneViews::new(SharedScene::clone(&scene))),
            Box::new(SceneSurface::new(SharedScene::clone(&scene))),
            Box::new(KeyListeners::default()),
        );
        let models = Models::new(api);
        let trip = TripPresenter::new(ui, models.clone());
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        Self {
            trip,
            models,
            scene,
            source,
            focus: None,
            running: true,
            help_visible: false,
            notification: None,
            action_tx,
            action_rx,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;

        self.trip.init();
        self.spawn_bootstrap();
        let mut events = EventReader::new(TICK_RATE, RENDER_RATE);
        info!(source = %self.source, "event loop started");

        while self.running {
            tokio::select! {
                event = events.next() => {
                    let Some(event) = event else {
                        break;
                    };
                    if let Some(action) = self.map_event(event) {
                        self.action_tx.send(action)?;
                    }
                }
                Some(signal) = self.trip.next_signal() => {
                    self.trip.handle_signal(signal);
                    self.pump_signals();
                }
            }

            while let Ok(action) = self.action_rx.try_recv() {
                let render = action == Action::Render;
                self.process_action(action).await;
                if render {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        events.stop();
        info!("event loop ended");
        Ok(())
    }

    fn spawn_bootstrap(&self) {
        let models = self.models.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let failure = bootstrap::load(&models).await.err().map(|e| e.to_string());
            let _ = tx.send(Action::Loaded(failure));
        });
    }

    /// Apply queued presenter signals and keep focus on a rendered row.
    fn pump_signals(&mut self) {
        self.trip.process_pending();
        self.sync_focus();
    }

    fn map_event(&self, event: Event) -> Option<Action> {
        match event {
            Event::Key(key) => self.handle_key_event(key),
            Event::Resize(w, h) => Some(Action::Resize(w, h)),
            Event::Tick => Some(Action::Tick),
            Event::Render => Some(Action::Render),
        }
    }

    /// Global keys first; anything else goes to the presenters. An open
    /// form gets every key except Ctrl+C.
    fn handle_key_event(&self, key: KeyEvent) -> Option<Action> {
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }
        let key = event::translate(key)?;

        if self.help_visible {
            return matches!(key, Key::Escape | Key::Char('?')).then_some(Action::ToggleHelp);
        }
        if self.form_open() {
            return Some(Action::Board(key));
        }

        let action = match key {
            Key::Char('q') => Action::Quit,
            Key::Char('?') => Action::ToggleHelp,
            Key::Char('n') if !self.trip.is_loading() => Action::NewPoint,
            Key::Char(c @ '1'..='4') => {
                let index = c.to_digit(10).and_then(|d| usize::try_from(d).ok())? - 1;
                Action::SetFilter(FilterType::iter().nth(index)?)
            }
            Key::Char('j') | Key::Down => Action::FocusNext,
            Key::Char('k') | Key::Up => Action::FocusPrev,
            other => Action::Board(other),
        };
        Some(action)
    }

    async fn process_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::Render | Action::Resize(..) => {}
            Action::Tick => {
                lock(&self.scene).tick();
                if self
                    .notification
                    .as_ref()
                    .is_some_and(|(_, shown)| shown.elapsed() > NOTIFICATION_TTL)
                {
                    self.notification = None;
                }
            }
            Action::Board(key) => {
                self.trip.handle_key(key, self.focus.as_ref());
                self.sync_focus();
            }
            Action::FocusNext => self.move_focus(true),
            Action::FocusPrev => self.move_focus(false),
            Action::SetFilter(filter) => self.set_filter(filter),
            Action::NewPoint => {
                if let Err(e) = self.trip.create_point().await {
                    warn!(error = %e, "cannot open the new point form");
                    self.notify(Notification::error(format!("Cannot create a point: {e}")));
                }
            }
            Action::ToggleHelp => self.help_visible = !self.help_visible,
            Action::Loaded(None) => debug!("initial load finished"),
            Action::Loaded(Some(reason)) => {
                self.notify(Notification::error(format!(
                    "Failed to load latest route information: {reason}"
                )));
            }
        }
    }

    fn notify(&mut self, notification: Notification) {
        self.notification = Some((notification, Instant::now()));
    }

    fn form_open(&self) -> bool {
        self.trip.is_creating() || self.trip.editing_point().is_some()
    }

    /// Filters with no matching point cannot be picked.
    fn set_filter(&mut self, filter: FilterType) {
        if filter == self.models.filter.filter() {
            return;
        }
        if self.filter_count(filter) == 0 {
            self.notify(Notification::info(filter.empty_message()));
            return;
        }
        debug!(%filter, "filter changed");
        self.models.filter.set_filter(UpdateType::Major, filter);
    }

    fn filter_count(&self, filter: FilterType) -> usize {
        let now = Utc::now();
        self.models
            .points
            .points()
            .iter()
            .filter(|point| filter.matches(point, now))
            .count()
    }

    fn sync_focus(&mut self) {
        let rendered = self.trip.rendered_points();
        let still_shown = self
            .focus
            .as_ref()
            .is_some_and(|id| rendered.contains(id));
        if !still_shown {
            self.focus = rendered.into_iter().next();
        }
    }

    fn move_focus(&mut self, forward: bool) {
        let rendered = self.trip.rendered_points();
        if rendered.is_empty() {
            self.focus = None;
            return;
        }
        let current = self
            .focus
            .as_ref()
            .and_then(|id| rendered.iter().position(|r| r == id));
        let next = match (current, forward) {
            (None, _) => 0,
            (Some(i), true) => (i + 1).min(rendered.len() - 1),
            (Some(i), false) => i.saturating_sub(1),
        };
        self.focus = rendered.get(next).cloned();
    }

    // ── Rendering ───────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let [header, filters, sort, body, status] = Layout::vertical([
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        self.render_header(frame, header);
        self.render_filters(frame, filters);

        let board = board::board_lines(&lock(&self.scene), self.focus.as_ref());
        if let Some(current) = board.sort {
            frame.render_widget(Paragraph::new(board::sort_bar(current)), sort);
        }
        let offset = board.focus_line.map_or(0, |line| {
            let half = usize::from(body.height / 2);
            line.saturating_sub(half)
        });
        frame.render_widget(
            Paragraph::new(board.lines).scroll((u16::try_from(offset).unwrap_or(u16::MAX), 0)),
            body,
        );

        self.render_status_bar(frame, status);

        let area = frame.area();
        if let Some((notification, _)) = &self.notification {
            render_notification(frame, area, notification);
        }
        if self.help_visible {
            render_help_overlay(frame, area);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let summary = TripSummary::new(
            &self.models.points.points(),
            &self.models.offers.cached(),
            &self.models.destinations.cached(),
        );
        let block = Block::default()
            .title(format!(" tripboard · {} ", self.source))
            .title_style(theme::title())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border());

        let route = if summary.route.is_empty() {
            "No route yet".to_owned()
        } else {
            summary.route
        };
        let lines = vec![
            Line::from(vec![
                Span::styled(route, theme::text()),
                Span::styled(
                    summary.dates.map(|d| format!("   {d}")).unwrap_or_default(),
                    theme::muted(),
                ),
            ]),
            Line::from(vec![
                Span::styled("Total: ", theme::muted()),
                Span::styled(format!("€ {}", summary.cost), theme::price()),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_filters(&self, frame: &mut Frame, area: Rect) {
        let current = self.models.filter.filter();
        let mut spans = vec![Span::styled(" Filter ", theme::muted())];
        for (i, filter) in FilterType::iter().enumerate() {
            let count = self.filter_count(filter);
            let style = if filter == current {
                theme::tab_active()
            } else if count == 0 {
                theme::tab_disabled()
            } else {
                theme::tab_inactive()
            };
            spans.push(Span::styled(format!(" {} {filter} ({count}) ", i + 1), style));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let hints: &[(&str, &str)] = if self.form_open() {
            &[("Enter", "save"), ("Tab", "field"), ("←/→", "change"), ("Esc", "close")]
        } else if self.trip.is_loading() {
            &[("?", "help"), ("q", "quit")]
        } else {
            &[
                ("n", "new"),
                ("1-4", "filter"),
                ("d/t/p", "sort"),
                ("j/k", "move"),
                ("Enter", "edit"),
                ("f", "favorite"),
                ("?", "help"),
                ("q", "quit"),
            ]
        };
        let mut spans = vec![Span::raw(" ")];
        for (key, label) in hints {
            spans.push(Span::styled(format!("{key} "), theme::key_hint_key()));
            spans.push(Span::styled(format!("{label}  "), theme::key_hint()));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    const KEYS: &[(&str, &str)] = &[
        ("n", "New point"),
        ("1-4", "Everything / future / present / past"),
        ("d t p", "Sort by day / time / price"),
        ("j/k ↑/↓", "Move between points"),
        ("Enter e", "Edit the focused point"),
        ("f", "Toggle favorite"),
        ("", ""),
        ("Tab", "Next form field"),
        ("←/→", "Change the field value"),
        ("0-9 ⌫", "Type the price"),
        ("Space", "Toggle the offer under the cursor"),
        ("Enter", "Save"),
        ("x", "Delete (cancel for a new point)"),
        ("r", "Roll the form up"),
        ("Esc", "Close every open form"),
    ];

    let help_area = centered(area, 60, u16::try_from(KEYS.len() + 4).unwrap_or(u16::MAX));
    frame.render_widget(Clear, help_area);
    let block = Block::default()
        .title(" Keys ")
        .title_style(theme::title())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border_focused())
        .style(Style::default().bg(theme::BG_DARK));

    let mut lines = vec![Line::from("")];
    lines.extend(KEYS.iter().map(|(key, what)| {
        Line::from(vec![
            Span::styled(format!("  {key:<10}"), theme::key_hint_key()),
            Span::styled(*what, theme::text()),
        ])
    }));
    frame.render_widget(Paragraph::new(lines).block(block), help_area);
}

fn render_notification(frame: &mut Frame, area: Rect, notification: &Notification) {
    let (color, icon) = match notification.level {
        NotificationLevel::Error => (theme::RED, "✗"),
        NotificationLevel::Info => (theme::CYAN, "·"),
    };
    let len = u16::try_from(notification.message.chars().count()).unwrap_or(u16::MAX);
    let width = len.saturating_add(6).clamp(20, 70).min(area.width);
    let height = 3;
    let toast = Rect::new(
        area.x + area.width.saturating_sub(width + 1),
        area.y + area.height.saturating_sub(height + 1),
        width,
        height,
    );

    frame.render_widget(Clear, toast);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
        .style(Style::default().bg(theme::BG_DARK));
    let line = Line::from(vec![
        Span::styled(format!(" {icon} "), Style::default().fg(color)),
        Span::styled(notification.message.clone(), theme::text()),
    ]);
    frame.render_widget(Paragraph::new(line).block(block), toast);
}
