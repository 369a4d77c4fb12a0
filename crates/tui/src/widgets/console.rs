//! Console output widget with scrolling support.
//!
//! Displays the run's append-only log in a scrollable view with a
//! scrollbar indicating position. The view follows new output until
//! the user scrolls away.

use ratatui::{
    layout::Rect,
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

/// Widget state for the console panel.
pub struct ConsoleView {
    /// Current scroll offset (number of lines scrolled from the top).
    pub scroll_offset: usize,

    /// When true, the view sticks to the newest line on each render.
    pub follow: bool,

    /// Largest useful offset for the last rendered viewport; scroll
    /// methods clamp against this so reaching it resumes follow mode.
    max_offset: usize,
}

impl ConsoleView {
    /// Create a new ConsoleView following the log tail.
    pub fn new() -> Self {
        Self {
            scroll_offset: 0,
            follow: true,
            max_offset: 0,
        }
    }

    /// Render the console for the given log lines.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, log: &[String]) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Console Output");

        let visible_lines = area.height.saturating_sub(2) as usize;
        self.max_offset = log.len().saturating_sub(visible_lines);

        if self.follow {
            self.scroll_offset = self.max_offset;
        } else {
            self.scroll_offset = self.scroll_offset.min(self.max_offset);
        }

        let text = if log.is_empty() {
            "$ Waiting for build...\n\nPress 'r' to start a new run.".to_string()
        } else {
            log.join("\n")
        };

        let paragraph = Paragraph::new(text)
            .block(block)
            .scroll((self.scroll_offset as u16, 0));

        frame.render_widget(paragraph, area);

        // Scrollbar only when the log overflows the viewport
        if log.len() > visible_lines {
            let mut scrollbar_state = ScrollbarState::default()
                .content_length(log.len())
                .viewport_content_length(visible_lines)
                .position(self.scroll_offset);

            let scrollbar = Scrollbar::default()
                .orientation(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("↑"))
                .end_symbol(Some("↓"));

            frame.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
        }
    }

    /// Scroll up by one line, leaving follow mode.
    pub fn scroll_up(&mut self) {
        self.follow = false;
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    /// Scroll down by one line, resuming follow mode at the bottom.
    pub fn scroll_down(&mut self) {
        self.scroll_offset = (self.scroll_offset + 1).min(self.max_offset);
        if self.scroll_offset == self.max_offset {
            self.follow = true;
        }
    }

    /// Scroll up by a page.
    pub fn page_up(&mut self, page_size: usize) {
        self.follow = false;
        self.scroll_offset = self.scroll_offset.saturating_sub(page_size);
    }

    /// Scroll down by a page, resuming follow mode at the bottom.
    pub fn page_down(&mut self, page_size: usize) {
        self.scroll_offset = (self.scroll_offset + page_size).min(self.max_offset);
        if self.scroll_offset == self.max_offset {
            self.follow = true;
        }
    }

    /// Jump to the top of the log.
    pub fn scroll_to_top(&mut self) {
        self.follow = false;
        self.scroll_offset = 0;
    }

    /// Jump to the newest line and resume following.
    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = self.max_offset;
        self.follow = true;
    }
}

impl Default for ConsoleView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render_to_string(console: &mut ConsoleView, log: &[String]) -> String {
        let backend = TestBackend::new(80, 10);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal
            .draw(|frame| {
                console.render(frame, frame.area(), log);
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
    fn test_console_renders_idle_placeholder() {
        let mut console = ConsoleView::new();
        let content = render_to_string(&mut console, &[]);

        assert!(content.contains("Console Output"));
        assert!(content.contains("Waiting for build"));
    }

    #[test]
    fn test_console_renders_log_lines() {
        let mut console = ConsoleView::new();
        let log = vec![
            "$ Starting pipeline...".to_string(),
            "[🔨] Running Build...".to_string(),
        ];
        let content = render_to_string(&mut console, &log);

        assert!(content.contains("Starting pipeline"));
        assert!(content.contains("Running Build"));
    }

    #[test]
    fn test_console_follows_tail_by_default() {
        let mut console = ConsoleView::new();
        let log: Vec<String> = (0..30).map(|i| format!("line {i}")).collect();
        let content = render_to_string(&mut console, &log);

        assert!(content.contains("line 29"));
        assert!(!content.contains("line 0 "));
    }

    #[test]
    fn test_scroll_up_leaves_follow_mode() {
        let mut console = ConsoleView::new();
        console.scroll_offset = 5;

        console.scroll_up();

        assert!(!console.follow);
        assert_eq!(console.scroll_offset, 4);
    }

    #[test]
    fn test_scroll_down_resumes_follow_at_viewport_bottom() {
        // 30 lines in a 10-row area: 8 visible, so the bottom of the
        // view sits at offset 22, well below log.len() - 1.
        let mut console = ConsoleView::new();
        let log: Vec<String> = (0..30).map(|i| format!("line {i}")).collect();
        render_to_string(&mut console, &log);
        assert_eq!(console.scroll_offset, 22);

        console.scroll_up();
        assert!(!console.follow);

        console.scroll_down();
        assert_eq!(console.scroll_offset, 22);
        assert!(console.follow, "reaching the bottom should resume follow");
    }

    #[test]
    fn test_page_down_resumes_follow_at_viewport_bottom() {
        let mut console = ConsoleView::new();
        let log: Vec<String> = (0..30).map(|i| format!("line {i}")).collect();
        render_to_string(&mut console, &log);

        console.scroll_to_top();
        console.page_down(10);
        assert!(!console.follow);

        console.page_down(100);
        assert_eq!(console.scroll_offset, 22);
        assert!(console.follow);
    }

    #[test]
    fn test_scroll_to_bottom_resumes_follow() {
        let mut console = ConsoleView::new();
        let log: Vec<String> = (0..20).map(|i| format!("line {i}")).collect();
        render_to_string(&mut console, &log);

        console.scroll_to_top();
        assert!(!console.follow);

        console.scroll_to_bottom();
        assert!(console.follow);
        assert_eq!(console.scroll_offset, 12);
    }
}
