//! Marketplace selector dialog
//!
//! Searchable list over the marketplace catalog. Selecting persists the
//! choice; the default marketplace is a separate, independently removable
//! setting reachable from the same dialog.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::marketplace::{self, Marketplace};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

pub struct MarketplaceDialog {
    pub query: String,
    pub selected_index: usize,
    list_state: ListState,
    /// Currently selected marketplace code
    current: Option<String>,
    /// Default marketplace code
    default: Option<String>,
}

impl Default for MarketplaceDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl MarketplaceDialog {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            query: String::new(),
            selected_index: 0,
            list_state,
            current: None,
            default: None,
        }
    }

    pub fn open(&mut self, current: Option<&str>, default: Option<&str>) {
        self.query.clear();
        self.set_context(current, default);
        self.selected_index = current
            .and_then(|code| marketplace::MARKETPLACES.iter().position(|m| m.code == code))
            .unwrap_or(0);
        self.list_state.select(Some(self.selected_index));
    }

    /// Refresh the current/default markers without resetting the search
    pub fn set_context(&mut self, current: Option<&str>, default: Option<&str>) {
        self.current = current.map(|s| s.to_string());
        self.default = default.map(|s| s.to_string());
    }

    fn filtered(&self) -> Vec<Marketplace> {
        marketplace::search(&self.query)
    }

    fn selected_marketplace(&self) -> Option<Marketplace> {
        self.filtered().get(self.selected_index).copied()
    }

    fn clamp(&mut self) {
        let len = self.filtered().len();
        if len == 0 {
            self.selected_index = 0;
            self.list_state.select(None);
        } else {
            if self.selected_index >= len {
                self.selected_index = len - 1;
            }
            self.list_state.select(Some(self.selected_index));
        }
    }
}

impl Component for MarketplaceDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc => Some(Action::CloseModal),
            KeyCode::Up => {
                if self.selected_index > 0 {
                    self.selected_index -= 1;
                    self.list_state.select(Some(self.selected_index));
                }
                None
            }
            KeyCode::Down => {
                if self.selected_index + 1 < self.filtered().len() {
                    self.selected_index += 1;
                    self.list_state.select(Some(self.selected_index));
                }
                None
            }
            KeyCode::Enter => self
                .selected_marketplace()
                .map(|m| Action::SelectMarketplace(m.code.to_string())),
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => self
                .selected_marketplace()
                .map(|m| Action::SetDefaultMarketplace(m.code.to_string())),
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::RemoveDefaultMarketplace)
            }
            KeyCode::Backspace => {
                self.query.pop();
                self.clamp();
                None
            }
            KeyCode::Char(c) => {
                self.query.push(c);
                self.clamp();
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup_area = centered_popup(area, 46, 15);
        frame.render_widget(Clear, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search input
                Constraint::Min(3),    // List
                Constraint::Length(3), // Help
            ])
            .split(popup_area);

        let search = Paragraph::new(Line::from(vec![
            Span::styled("Search: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}_", self.query),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Select Marketplace ")
                .title_style(
                    Style::default()
                        .fg(Color::Rgb(151, 71, 255))
                        .add_modifier(Modifier::BOLD),
                ),
        );
        frame.render_widget(search, chunks[0]);

        let filtered = self.filtered();
        let items: Vec<ListItem> = if filtered.is_empty() {
            vec![ListItem::new(Line::from(Span::styled(
                "No marketplace found.",
                Style::default().fg(Color::DarkGray),
            )))]
        } else {
            filtered
                .iter()
                .map(|m| {
                    let is_current = self.current.as_deref() == Some(m.code);
                    let is_default = self.default.as_deref() == Some(m.code);
                    let mut spans = vec![
                        Span::styled(
                            if is_current { "● " } else { "  " },
                            Style::default().fg(Color::Green),
                        ),
                        Span::styled(
                            format!("{:<4}", m.code.to_uppercase()),
                            Style::default().fg(Color::Cyan),
                        ),
                        Span::raw(m.label),
                    ];
                    if is_default {
                        spans.push(Span::styled(
                            "  (default)",
                            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
                        ));
                    }
                    ListItem::new(Line::from(spans))
                })
                .collect()
        };

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::LEFT | Borders::RIGHT)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .highlight_style(
                Style::default()
                    .bg(Color::Rgb(151, 71, 255))
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");
        frame.render_stateful_widget(list, chunks[1], &mut self.list_state);

        let help = Paragraph::new(Line::from(vec![
            Span::styled(" Enter ", Style::default().fg(Color::Yellow)),
            Span::raw("Select  "),
            Span::styled(" ^d ", Style::default().fg(Color::Cyan)),
            Span::raw("Set default  "),
            Span::styled(" ^r ", Style::default().fg(Color::Cyan)),
            Span::raw("Remove default  "),
            Span::styled(" Esc ", Style::default().fg(Color::Yellow)),
            Span::raw("Close"),
        ]))
        .alignment(ratatui::layout::Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[2]);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    fn press(dialog: &mut MarketplaceDialog, code: KeyCode) -> Option<Action> {
        dialog.handle_key_event(KeyEvent::from(code)).unwrap()
    }

    #[test]
    fn test_typing_filters_and_enter_selects() {
        let mut dialog = MarketplaceDialog::new();
        dialog.open(Some("us"), None);

        for c in "mex".chars() {
            press(&mut dialog, KeyCode::Char(c));
        }
        let action = press(&mut dialog, KeyCode::Enter);
        assert_eq!(action, Some(Action::SelectMarketplace("mx".to_string())));
    }

    #[test]
    fn test_no_match_yields_no_selection() {
        let mut dialog = MarketplaceDialog::new();
        dialog.open(None, None);
        for c in "zzz".chars() {
            press(&mut dialog, KeyCode::Char(c));
        }
        assert_eq!(press(&mut dialog, KeyCode::Enter), None);
    }

    #[test]
    fn test_opening_highlights_the_current_marketplace() {
        let mut dialog = MarketplaceDialog::new();
        dialog.open(Some("ca"), Some("ca"));
        assert_eq!(dialog.selected_index, 3);
    }

    #[test]
    fn test_default_shortcuts_emit_the_dedicated_actions() {
        let mut dialog = MarketplaceDialog::new();
        dialog.open(Some("us"), None);

        let set = dialog
            .handle_key_event(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL))
            .unwrap();
        assert_eq!(set, Some(Action::SetDefaultMarketplace("us".to_string())));

        let remove = dialog
            .handle_key_event(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL))
            .unwrap();
        assert_eq!(remove, Some(Action::RemoveDefaultMarketplace));
    }
}
