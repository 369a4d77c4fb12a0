//! Build history widget.
//!
//! Shows the static build-history records in a table, with the
//! selection highlighted when the panel has focus.

use pb_protocol::{BuildRecord, BuildStatus};
use ratatui::layout::Constraint;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Cell;
use ratatui::widgets::Row;
use ratatui::widgets::Table;
use ratatui::widgets::TableState;
use ratatui::Frame;

/// Renders the build history table.
///
/// # Arguments
/// * `frame` - The frame to render into
/// * `area` - The area to render the table in
/// * `builds` - Build records to display, newest first
/// * `selected` - Index of the currently selected record
/// * `focused` - Whether this panel currently has keyboard focus
pub fn render_builds(
    frame: &mut Frame,
    area: Rect,
    builds: &[BuildRecord],
    selected: usize,
    focused: bool,
) {
    let rows: Vec<Row> = builds
        .iter()
        .map(|b| {
            let (mark, status_style) = match b.status {
                BuildStatus::Success => ("✅", Style::default().fg(Color::Green)),
                BuildStatus::Failed => ("❌", Style::default().fg(Color::Red)),
            };

            Row::new(vec![
                Cell::from(mark).style(status_style),
                Cell::from(format!("#{}", b.number)),
                Cell::from(b.branch.clone()),
                Cell::from(b.commit.clone()),
                Cell::from(b.time.clone()),
                Cell::from(b.duration.clone()),
            ])
        })
        .collect();

    let header = Row::new(vec![
        Cell::from(""),
        Cell::from("Build"),
        Cell::from("Branch"),
        Cell::from("Commit"),
        Cell::from("When"),
        Cell::from("Duration"),
    ])
    .style(
        Style::default()
            .add_modifier(Modifier::BOLD)
            .fg(Color::Cyan),
    );

    let widths = [
        Constraint::Length(2),
        Constraint::Length(6),
        Constraint::Percentage(35),
        Constraint::Length(9),
        Constraint::Length(12),
        Constraint::Length(9),
    ];

    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Build History")
                .border_style(border_style),
        )
        .row_highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut table_state = TableState::default();
    if !builds.is_empty() {
        table_state.select(Some(selected.min(builds.len() - 1)));
    }

    frame.render_stateful_widget(table, area, &mut table_state);
}
