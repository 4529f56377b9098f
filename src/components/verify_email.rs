//! Email verification screen component
//!
//! Six-digit one-time code entry. Submit stays disabled until exactly six
//! digits are present; only digits are accepted.

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

pub const CODE_LEN: usize = 6;

pub struct VerifyEmailComponent {
    pub code: String,
    /// Email the code was sent to, shown in the prompt
    pub email: String,
    pub error: Option<String>,
    pub loading: bool,
}

impl Default for VerifyEmailComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl VerifyEmailComponent {
    pub fn new() -> Self {
        Self {
            code: String::new(),
            email: String::new(),
            error: None,
            loading: false,
        }
    }

    pub fn set_email(&mut self, email: &str) {
        self.email = email.to_string();
        self.code.clear();
        self.error = None;
        self.loading = false;
    }

    fn code_complete(&self) -> bool {
        self.code.len() == CODE_LEN
    }
}

impl Component for VerifyEmailComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.loading {
            return Ok(None);
        }
        let action = match key.code {
            KeyCode::Enter if self.code_complete() => {
                self.loading = true;
                Some(Action::SubmitVerification)
            }
            KeyCode::Enter => {
                self.error = Some(format!(
                    "Your one-time password must be exactly {} characters.",
                    CODE_LEN
                ));
                None
            }
            KeyCode::Backspace => {
                self.code.pop();
                self.error = None;
                None
            }
            KeyCode::Char(c) if c.is_ascii_digit() && self.code.len() < CODE_LEN => {
                self.code.push(c);
                self.error = None;
                None
            }
            KeyCode::Esc => Some(Action::SignOut),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        frame.render_widget(Clear, area);
        frame.render_widget(
            Block::default().style(Style::default().bg(Color::Rgb(0, 0, 1))),
            area,
        );

        let popup = centered_popup(area, 54, 14);

        // One boxed slot per digit
        let mut slots: Vec<Span> = Vec::new();
        for i in 0..CODE_LEN {
            let digit = self.code.chars().nth(i).map(|c| c.to_string());
            let (text, style) = match digit {
                Some(d) => (
                    format!(" {} ", d),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
                None => (" _ ".to_string(), Style::default().fg(Color::DarkGray)),
            };
            slots.push(Span::styled(text, style));
            if i + 1 < CODE_LEN {
                slots.push(Span::raw(" "));
            }
        }

        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Check your email inbox",
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ))
            .alignment(ratatui::layout::Alignment::Center),
            Line::from(Span::styled(
                format!("We've sent a code to {}", self.email),
                Style::default().fg(Color::DarkGray),
            ))
            .alignment(ratatui::layout::Alignment::Center),
            Line::from(""),
            Line::from(slots).alignment(ratatui::layout::Alignment::Center),
            Line::from(""),
        ];

        if let Some(ref err) = self.error {
            lines.push(
                Line::from(Span::styled(err.clone(), Style::default().fg(Color::Red)))
                    .alignment(ratatui::layout::Alignment::Center),
            );
            lines.push(Line::from(""));
        }

        let verify_label = if self.loading { "Verifying..." } else { "Verify" };
        let verify_style = if self.code_complete() && !self.loading {
            Style::default().fg(Color::Rgb(151, 71, 255)).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        lines.push(
            Line::from(vec![
                Span::styled(format!("[ {} ]", verify_label), verify_style),
                Span::raw("   "),
                Span::styled(" Esc ", Style::default().fg(Color::Yellow)),
                Span::raw("Cancel"),
            ])
            .alignment(ratatui::layout::Alignment::Center),
        );

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Verify your email ")
                .title_style(
                    Style::default()
                        .fg(Color::Rgb(151, 71, 255))
                        .add_modifier(Modifier::BOLD),
                )
                .border_style(Style::default().fg(Color::DarkGray)),
        );

        frame.render_widget(Clear, popup);
        frame.render_widget(paragraph, popup);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent};

    fn press(component: &mut VerifyEmailComponent, code: KeyCode) -> Option<Action> {
        component.handle_key_event(KeyEvent::from(code)).unwrap()
    }

    #[test]
    fn test_only_digits_are_accepted_up_to_six() {
        let mut verify = VerifyEmailComponent::new();
        for c in "12a3x456789".chars() {
            press(&mut verify, KeyCode::Char(c));
        }
        assert_eq!(verify.code, "123456");
    }

    #[test]
    fn test_submit_requires_a_complete_code() {
        let mut verify = VerifyEmailComponent::new();
        for c in "1234".chars() {
            press(&mut verify, KeyCode::Char(c));
        }
        assert_eq!(press(&mut verify, KeyCode::Enter), None);
        assert!(verify.error.is_some());

        press(&mut verify, KeyCode::Char('5'));
        press(&mut verify, KeyCode::Char('6'));
        assert_eq!(press(&mut verify, KeyCode::Enter), Some(Action::SubmitVerification));
        assert!(verify.loading);
    }

    #[test]
    fn test_keys_are_ignored_while_loading() {
        let mut verify = VerifyEmailComponent::new();
        verify.loading = true;
        assert_eq!(press(&mut verify, KeyCode::Char('1')), None);
        assert!(verify.code.is_empty());
    }
}
