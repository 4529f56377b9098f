//! Unpin confirmation dialog
//!
//! Pinning is immediate, unpinning asks first; the destructive choice is
//! the highlighted one.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub struct UnpinDialog;

impl Default for UnpinDialog {
    fn default() -> Self {
        Self
    }
}

impl UnpinDialog {
    pub fn draw_with_name(&self, frame: &mut Frame, area: Rect, name: &str) -> Result<()> {
        let popup_area = centered_popup(area, 52, 8);
        frame.render_widget(Clear, popup_area);

        let content = vec![
            Line::from(""),
            Line::from(vec![
                Span::raw("Are you sure you want to unpin "),
                Span::styled(
                    name.to_string(),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
                Span::raw("?"),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    " y/Enter ",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::raw("Unpin  "),
                Span::styled(
                    " n/Esc ",
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                ),
                Span::raw("Cancel"),
            ]),
        ];

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red))
                    .title(" Unpin ")
                    .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            )
            .alignment(ratatui::layout::Alignment::Center);

        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}

impl Component for UnpinDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Some(Action::ConfirmModal),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Action::CloseModal),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        self.draw_with_name(frame, area, "this row")
    }
}
