//! Terminal initialization and event plumbing.
//!
//! This module provides the `Tui` wrapper around ratatui's Terminal,
//! handling raw mode setup, the crossterm event stream, and frame
//! scheduling. Frame requests are coalesced so a burst of state
//! changes produces a single draw.

use anyhow::Result;
use crossterm::event::Event;
use crossterm::event::KeyEvent;
use crossterm::execute;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::stdout;
use std::io::Stdout;
use std::pin::Pin;
use std::time::Duration;
use std::time::Instant;
use tokio::select;
use tokio_stream::Stream;
use tokio_stream::StreamExt;

/// Type alias for the terminal backend we're using.
pub type TerminalBackend = CrosstermBackend<Stdout>;

/// TUI events that can be emitted.
#[derive(Debug)]
pub enum TuiEvent {
    /// Keyboard event.
    Key(KeyEvent),
    /// Draw event (triggered by the frame scheduler or a resize).
    Draw,
}

/// Main TUI wrapper.
pub struct Tui {
    /// The underlying ratatui terminal.
    terminal: Terminal<TerminalBackend>,
    /// Channel for scheduling frames.
    frame_schedule_tx: tokio::sync::mpsc::UnboundedSender<Instant>,
    /// Broadcast channel for draw events.
    draw_tx: tokio::sync::broadcast::Sender<()>,
}

impl Tui {
    /// Initialize the terminal in raw mode on the alternate screen.
    pub fn init() -> Result<Self> {
        enable_raw_mode()?;
        execute!(stdout(), EnterAlternateScreen)?;

        // Restore the terminal even if we panic mid-draw
        set_panic_hook();

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;

        let (frame_schedule_tx, frame_schedule_rx) = tokio::sync::mpsc::unbounded_channel();
        let (draw_tx, _) = tokio::sync::broadcast::channel(1);

        spawn_frame_coalescer(frame_schedule_rx, draw_tx.clone());

        Ok(Self {
            terminal,
            frame_schedule_tx,
            draw_tx,
        })
    }

    /// Restore the terminal to its original state.
    pub fn restore(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(stdout(), LeaveAlternateScreen)?;
        Ok(())
    }

    /// Get a frame requester for scheduling draws.
    pub fn frame_requester(&self) -> FrameRequester {
        FrameRequester {
            frame_schedule_tx: self.frame_schedule_tx.clone(),
        }
    }

    /// Create a merged stream of keyboard and draw events.
    pub fn event_stream(&self) -> Pin<Box<dyn Stream<Item = TuiEvent> + Send + 'static>> {
        let mut crossterm_events = crossterm::event::EventStream::new();
        let mut draw_rx = self.draw_tx.subscribe();

        let event_stream = async_stream::stream! {
            loop {
                select! {
                    Some(Ok(event)) = crossterm_events.next() => {
                        match event {
                            Event::Key(key_event) => yield TuiEvent::Key(key_event),
                            Event::Resize(_, _) => yield TuiEvent::Draw,
                            _ => {}
                        }
                    }
                    result = draw_rx.recv() => {
                        match result {
                            // Lagged draws coalesce into a single one
                            Ok(()) | Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => {
                                yield TuiEvent::Draw;
                            }
                            Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                        }
                    }
                }
            }
        };

        Box::pin(event_stream)
    }

    /// Draw the UI with the provided function.
    pub fn draw<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut ratatui::Frame),
    {
        self.terminal.draw(f)?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

/// Background task turning frame requests into draw broadcasts.
///
/// Keeps only the earliest pending deadline; requests that arrive
/// while one is pending are folded into it.
fn spawn_frame_coalescer(
    mut requests_rx: tokio::sync::mpsc::UnboundedReceiver<Instant>,
    draw_tx: tokio::sync::broadcast::Sender<()>,
) {
    tokio::spawn(async move {
        use tokio::time::sleep_until;
        use tokio::time::Instant as TokioInstant;

        let mut pending: Option<Instant> = None;

        loop {
            let deadline = pending.unwrap_or_else(|| Instant::now() + Duration::from_secs(3600));
            let sleep_fut = sleep_until(TokioInstant::from_std(deadline));
            tokio::pin!(sleep_fut);

            select! {
                request = requests_rx.recv() => {
                    match request {
                        Some(at) => {
                            if pending.map_or(true, |p| at < p) {
                                pending = Some(at);
                            }
                        }
                        None => break,
                    }
                }
                () = &mut sleep_fut => {
                    if pending.take().is_some() {
                        let _ = draw_tx.send(());
                    }
                }
            }
        }
    });
}

/// Handle for scheduling frame redraws.
#[derive(Clone, Debug)]
pub struct FrameRequester {
    frame_schedule_tx: tokio::sync::mpsc::UnboundedSender<Instant>,
}

impl FrameRequester {
    /// Schedule a frame to be drawn immediately.
    pub fn schedule_frame(&self) {
        let _ = self.frame_schedule_tx.send(Instant::now());
    }

    /// Schedule a frame to be drawn after a delay.
    pub fn schedule_frame_in(&self, dur: Duration) {
        let _ = self.frame_schedule_tx.send(Instant::now() + dur);
    }
}

/// Set a panic hook that restores the terminal before panicking.
fn set_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}
