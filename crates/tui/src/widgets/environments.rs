//! Environment cards widget.
//!
//! Shows one card per deployment environment, side by side. The
//! selected card gets a highlighted border when the panel has focus.

use pb_protocol::Environment;
use ratatui::layout::Constraint;
use ratatui::layout::Direction;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Renders the environment cards.
pub fn render_environments(
    frame: &mut Frame,
    area: Rect,
    environments: &[Environment],
    selected: usize,
    focused: bool,
) {
    let block = Block::default().borders(Borders::ALL).title("Environments");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if environments.is_empty() {
        return;
    }

    let constraints: Vec<Constraint> = environments
        .iter()
        .map(|_| Constraint::Ratio(1, environments.len() as u32))
        .collect();
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(inner);

    for (index, env) in environments.iter().enumerate() {
        let is_selected = focused && index == selected;
        let border_style = if is_selected {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let lines = vec![
            Line::from(vec![
                Span::styled(
                    env.name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(env.status.clone(), Style::default().fg(Color::Green)),
            ]),
            Line::from(env.version.clone()),
            Line::from(Span::styled(
                env.url.clone(),
                Style::default().fg(Color::DarkGray),
            )),
        ];

        let card = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style),
        );
        frame.render_widget(card, cards[index]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pb_core::catalog::environments;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render_to_string(envs: &[Environment], selected: usize) -> String {
        let backend = TestBackend::new(100, 8);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal
            .draw(|frame| {
                render_environments(frame, frame.area(), envs, selected, true);
            })
            .unwrap();

        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_environment_cards_render_all_environments() {
        let content = render_to_string(&environments(), 0);

        assert!(content.contains("Development"));
        assert!(content.contains("Staging"));
        assert!(content.contains("Production"));
        assert!(content.contains("v1.4.1"));
        assert!(content.contains("deployed"));
    }

    #[test]
    fn test_environment_cards_render_empty_list() {
        let content = render_to_string(&[], 0);

        assert!(content.contains("Environments"));
    }
}
