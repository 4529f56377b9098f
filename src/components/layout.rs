//! Layout calculations for the UI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Dashboard screen layout areas
pub struct MainLayout {
    pub header: Rect,
    pub cards: Rect,
    pub tabs: Rect,
    pub table: Rect,
    pub status: Rect,
    pub help: Rect,
}

/// Calculate centered popup area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let popup_x = (area.width.saturating_sub(width)) / 2;
    let popup_y = (area.height.saturating_sub(height)) / 2;

    Rect::new(
        popup_x,
        popup_y,
        width.min(area.width),
        height.min(area.height),
    )
}

/// Calculate the dashboard layout: header row, overview cards, tab strip,
/// table area, status line, help bar.
pub fn calculate_main_layout(area: Rect) -> MainLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header (greeting + pickers)
            Constraint::Length(6), // Overview cards
            Constraint::Length(2), // Tabs
            Constraint::Min(5),    // Table
            Constraint::Length(1), // Status line
            Constraint::Length(3), // Help bar
        ])
        .split(area);

    MainLayout {
        header: chunks[0],
        cards: chunks[1],
        tabs: chunks[2],
        table: chunks[3],
        status: chunks[4],
        help: chunks[5],
    }
}
