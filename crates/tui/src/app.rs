//! TUI application state and event loop.
//!
//! This module defines the main `App` struct that holds the rendering
//! copy of the dashboard state and the event loop built on
//! `tokio::select!`.

use anyhow::Result;
use crossterm::event::KeyEvent;
use pb_protocol::{BuildRecord, Environment, Event, Op, RunState, StageDefinition};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tokio::select;
use tokio::sync::mpsc::{Receiver, UnboundedSender};
use tokio_stream::StreamExt;

use crate::event_handler;
use crate::tui::{Tui, TuiEvent};
use crate::widgets::{builds, console::ConsoleView, environments, pipeline};

/// Which of the two selectable panels has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelFocus {
    /// The build-history table.
    Builds,
    /// The environment cards.
    Environments,
}

/// Main TUI application state.
///
/// Holds everything needed to render the dashboard. The run state is a
/// rendering copy rebuilt from core events; the simulator owns the
/// authoritative one.
pub struct App {
    /// Ordered stage catalog, shared with the simulator.
    pub catalog: Vec<StageDefinition>,
    /// Rendering copy of the current run.
    pub run: RunState,
    /// Static build-history records.
    pub builds: Vec<BuildRecord>,
    /// Static environment records.
    pub environments: Vec<Environment>,
    /// Which selectable panel has focus.
    pub focus: PanelFocus,
    /// Selected row in the build-history table.
    pub selected_build: usize,
    /// Selected environment card.
    pub selected_env: usize,
    /// Console panel scroll state.
    pub console: ConsoleView,
    /// Latest selection notification, shown in the status bar.
    pub notice: Option<String>,
    /// Channel to send operations to the core.
    pub op_tx: UnboundedSender<Op>,
    /// Channel to receive events from the core.
    pub event_rx: Receiver<Event>,
    /// Flag to indicate if the application should exit.
    pub should_exit: bool,
}

impl App {
    /// Create a new App with communication channels.
    pub fn new(
        catalog: Vec<StageDefinition>,
        builds: Vec<BuildRecord>,
        environments: Vec<Environment>,
        op_tx: UnboundedSender<Op>,
        event_rx: Receiver<Event>,
    ) -> Self {
        Self {
            catalog,
            run: RunState::new(),
            builds,
            environments,
            focus: PanelFocus::Builds,
            selected_build: 0,
            selected_env: 0,
            console: ConsoleView::new(),
            notice: None,
            op_tx,
            event_rx,
            should_exit: false,
        }
    }

    /// Main event loop.
    ///
    /// Uses `tokio::select!` to handle keyboard input and core events
    /// concurrently.
    pub async fn run(&mut self, tui: &mut Tui) -> Result<()> {
        let mut tui_events = tui.event_stream();

        tui.frame_requester().schedule_frame();

        while !self.should_exit {
            select! {
                Some(event) = self.event_rx.recv() => {
                    self.handle_core_event(event);
                    tui.frame_requester().schedule_frame();
                }
                Some(tui_event) = tui_events.next() => {
                    self.handle_tui_event(tui, tui_event)?;
                }
            }
        }

        Ok(())
    }

    /// Handle events from the core (pb-core).
    pub fn handle_core_event(&mut self, event: Event) {
        event_handler::apply_core_event(&mut self.run, event);
    }

    /// Handle TUI events (keyboard input, resize, draw).
    fn handle_tui_event(&mut self, tui: &mut Tui, event: TuiEvent) -> Result<()> {
        match event {
            TuiEvent::Key(key_event) => {
                self.handle_key_event(key_event);
                tui.frame_requester().schedule_frame();
            }
            TuiEvent::Draw => {
                tui.draw(|frame| {
                    // Split borrows: widgets take the fields they need
                    render_app(frame, self);
                })?;
            }
        }
        Ok(())
    }

    /// Handle keyboard events.
    pub fn handle_key_event(&mut self, key_event: KeyEvent) {
        self.should_exit = event_handler::handle_key_event(self, key_event);
    }
}

/// Render the full dashboard layout.
pub fn render_app(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with run control
            Constraint::Length(3), // Stage timeline
            Constraint::Length(9), // Builds + environments
            Constraint::Min(5),    // Console
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_header(frame, chunks[0], &app.run);
    pipeline::render_pipeline(frame, chunks[1], &app.catalog, &app.run);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
        .split(chunks[2]);

    builds::render_builds(
        frame,
        middle[0],
        &app.builds,
        app.selected_build,
        app.focus == PanelFocus::Builds,
    );
    environments::render_environments(
        frame,
        middle[1],
        &app.environments,
        app.selected_env,
        app.focus == PanelFocus::Environments,
    );

    app.console.render(frame, chunks[3], &app.run.log);
    render_status_bar(frame, chunks[4], app.notice.as_deref());
}

/// Header with the title and the run control state.
fn render_header(frame: &mut Frame, area: Rect, run: &RunState) {
    let control = if run.is_running {
        Span::styled(
            "⏳ Running...  [c] cancel",
            Style::default().fg(Color::Yellow),
        )
    } else {
        Span::styled(
            "▶ [r] run pipeline",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )
    };

    let line = Line::from(vec![
        Span::styled(
            "🔧 Pipeboard CI/CD",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("    "),
        control,
        Span::raw("    [q] quit"),
    ]);

    let paragraph = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

/// One-line status bar showing the latest selection notification.
fn render_status_bar(frame: &mut Frame, area: Rect, notice: Option<&str>) {
    let text = notice.unwrap_or("Tab: switch panel  ↑/↓: select  Enter: choose  j/k: scroll log");
    let paragraph = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}
