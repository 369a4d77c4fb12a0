//! Stage timeline widget.
//!
//! Renders the stage catalog as a left-to-right timeline with a status
//! mark per stage and connectors between them. The connector before a
//! stage lights up once that stage has been reached, so progress reads
//! strictly left to right.

use pb_protocol::{RunState, StageDefinition, StageStatus};
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Wrap;
use ratatui::Frame;

/// Status mark shown after a stage's label.
fn status_mark(status: Option<StageStatus>) -> &'static str {
    match status {
        Some(StageStatus::Running) => "⏳",
        Some(StageStatus::Success) => "✓",
        Some(StageStatus::Failed) => "✗",
        None => "·",
    }
}

fn stage_style(status: Option<StageStatus>, is_active: bool) -> Style {
    let style = match status {
        Some(StageStatus::Running) => Style::default().fg(Color::Yellow),
        Some(StageStatus::Success) => Style::default().fg(Color::Green),
        Some(StageStatus::Failed) => Style::default().fg(Color::Red),
        None => Style::default().fg(Color::DarkGray),
    };

    if is_active {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

/// Renders the stage timeline for the current run.
pub fn render_pipeline(frame: &mut Frame, area: Rect, catalog: &[StageDefinition], run: &RunState) {
    let mut spans: Vec<Span> = Vec::new();

    for (index, stage) in catalog.iter().enumerate() {
        if index > 0 {
            // Connector lights up once the stage it leads to is reached
            let reached = run.status_of(&stage.id).is_some();
            let connector_style = if reached {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            spans.push(Span::styled(" → ", connector_style));
        }

        let status = run.status_of(&stage.id);
        let is_active = run.active_stage.as_deref() == Some(stage.id.as_str());
        spans.push(Span::styled(
            format!(
                "{} {} ({}) {}",
                stage.icon,
                stage.name,
                stage.nominal_duration,
                status_mark(status)
            ),
            stage_style(status, is_active),
        ));
    }

    if spans.is_empty() {
        spans.push(Span::styled(
            "No stages configured.",
            Style::default().fg(Color::DarkGray),
        ));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Pipeline Stages");

    let paragraph = Paragraph::new(Line::from(spans))
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}
