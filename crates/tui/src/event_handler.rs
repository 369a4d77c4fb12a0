//! Event handling utilities for the TUI.
//!
//! This module provides functions for handling the two event sources:
//! - Core events (from pb-core), folded into the rendering copy of the
//!   run state
//! - Keyboard events (user input), translated into `Op`s and local
//!   view changes

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use pb_protocol::{Event, Op, RunState, StageStatus};

use crate::app::{App, PanelFocus};

/// Fold a core event into the rendering copy of the run state.
///
/// The TUI never mutates run state on its own; this is a pure replay
/// of transitions the simulator already performed.
pub fn apply_core_event(run: &mut RunState, event: Event) {
    match event {
        Event::RunStarted { run_id } => {
            *run = RunState::new();
            run.run_id = run_id;
            run.is_running = true;
        }
        Event::StageStatusUpdate {
            stage_id,
            status,
            stage_index,
        } => {
            if status == StageStatus::Running {
                run.active_stage = Some(stage_id.clone());
                run.current_stage_index = stage_index;
            }
            run.statuses.insert(stage_id, status);
        }
        Event::LogLine { content } => {
            run.log.push(content);
        }
        Event::RunCompleted { .. } | Event::RunCancelled { .. } => {
            run.is_running = false;
            run.active_stage = None;
            run.completed_at = Some(chrono::Utc::now());
        }
    }
}

/// Handle a keyboard event from the user.
///
/// Returns `true` if the application should exit, `false` otherwise.
pub fn handle_key_event(app: &mut App, key_event: KeyEvent) -> bool {
    if key_event.kind != KeyEventKind::Press {
        return false;
    }

    match key_event.code {
        KeyCode::Char('q') => {
            let _ = app.op_tx.send(Op::Shutdown);
            return true;
        }
        KeyCode::Char('r') => {
            // The run control is disabled while a run is in flight;
            // the simulator guards against duplicates as well.
            if !app.run.is_running {
                let _ = app.op_tx.send(Op::StartRun);
            }
        }
        KeyCode::Char('c') => {
            if app.run.is_running {
                let _ = app.op_tx.send(Op::CancelRun);
            }
        }
        KeyCode::Tab => {
            app.focus = match app.focus {
                PanelFocus::Builds => PanelFocus::Environments,
                PanelFocus::Environments => PanelFocus::Builds,
            };
        }
        KeyCode::Up => move_selection(app, -1),
        KeyCode::Down => move_selection(app, 1),
        KeyCode::Enter => select_focused(app),
        KeyCode::Char('k') => app.console.scroll_up(),
        KeyCode::Char('j') => app.console.scroll_down(),
        KeyCode::PageUp => app.console.page_up(10),
        KeyCode::PageDown => app.console.page_down(10),
        KeyCode::End => app.console.scroll_to_bottom(),
        KeyCode::Home => app.console.scroll_to_top(),
        _ => {}
    }

    false
}

/// Move the selection in the focused panel, clamped to its list.
fn move_selection(app: &mut App, delta: isize) {
    let (selected, len) = match app.focus {
        PanelFocus::Builds => (&mut app.selected_build, app.builds.len()),
        PanelFocus::Environments => (&mut app.selected_env, app.environments.len()),
    };

    if len == 0 {
        return;
    }
    if delta < 0 {
        *selected = selected.saturating_sub(1);
    } else {
        *selected = (*selected + 1).min(len - 1);
    }
}

/// Report the focused panel's selection as a notification line.
///
/// Selections carry only the record's identity and never touch the
/// simulator.
fn select_focused(app: &mut App) {
    app.notice = match app.focus {
        PanelFocus::Builds => app
            .builds
            .get(app.selected_build)
            .map(|b| format!("Selected build #{} ({})", b.number, b.branch)),
        PanelFocus::Environments => app
            .environments
            .get(app.selected_env)
            .map(|e| format!("Selected environment {}", e.id)),
    };
}
