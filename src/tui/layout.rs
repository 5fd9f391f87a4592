use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen regions
pub struct AppLayout {
    pub search_area: Rect,
    pub list_area: Rect,
    pub preview_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Create layout:
    /// - Search bar: top 3 rows
    /// - History list: 40% width (left)
    /// - Preview pane: 60% width (right)
    /// - Status bar: bottom row
    pub fn new(area: Rect) -> Self {
        let vertical_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search bar
                Constraint::Min(3),    // Main area (at least 3 rows)
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        let horizontal_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(vertical_chunks[1]);

        Self {
            search_area: vertical_chunks[0],
            list_area: horizontal_chunks[0],
            preview_area: horizontal_chunks[1],
            status_area: vertical_chunks[2],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_splits_correctly() {
        let area = Rect::new(0, 0, 100, 30);
        let layout = AppLayout::new(area);

        assert_eq!(layout.search_area.height, 3);
        assert_eq!(layout.search_area.y, 0);

        assert_eq!(layout.status_area.height, 1);
        assert_eq!(layout.status_area.y, 29);

        assert_eq!(layout.list_area.height, 26);
        assert_eq!(layout.preview_area.height, 26);
        assert_eq!(layout.list_area.width, 40);
        assert_eq!(layout.preview_area.width, 60);
    }

    #[test]
    fn test_layout_minimum_height() {
        let area = Rect::new(0, 0, 100, 7);
        let layout = AppLayout::new(area);

        assert_eq!(layout.status_area.height, 1);
        assert_eq!(layout.list_area.height, 3);
    }
}
