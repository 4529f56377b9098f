//! Sign-up screen component

use crate::action::Action;
use crate::component::Component;
use crate::components::auth_form::{AuthField, AuthForm};
use crate::components::centered_popup;
use crate::model::ui::AppMode;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Account creation form; success hands over to email verification
pub struct SignUpComponent {
    pub form: AuthForm,
}

impl Default for SignUpComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl SignUpComponent {
    pub fn new() -> Self {
        Self { form: AuthForm::new() }
    }
}

impl Component for SignUpComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.form.loading {
            return Ok(None);
        }
        let action = match key.code {
            KeyCode::Enter => {
                if self.form.filled() && self.form.validate() {
                    self.form.loading = true;
                    Some(Action::SubmitSignUp)
                } else {
                    self.form.validate();
                    None
                }
            }
            KeyCode::Tab | KeyCode::Down | KeyCode::Up => {
                self.form.next_field();
                None
            }
            KeyCode::Backspace => {
                self.form.input_backspace();
                None
            }
            KeyCode::Char('i') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::Navigate(AppMode::SignIn))
            }
            KeyCode::Esc => Some(Action::Navigate(AppMode::SignIn)),
            KeyCode::Char(c) => {
                self.form.input_char(c);
                None
            }
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

        let popup = centered_popup(area, 52, 18);

        let field = |label: &str, value: &str, focused: bool, masked: bool| -> Vec<Line<'static>> {
            let shown = if masked {
                "*".repeat(value.chars().count())
            } else {
                value.to_string()
            };
            let cursor = if focused { "_" } else { "" };
            let value_style = if focused {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            vec![
                Line::from(Span::styled(
                    label.to_string(),
                    Style::default().fg(Color::DarkGray),
                )),
                Line::from(vec![
                    Span::styled("> ", Style::default().fg(Color::Cyan)),
                    Span::styled(format!("{}{}", shown, cursor), value_style),
                ]),
            ]
        };

        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Create your account",
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ))
            .alignment(ratatui::layout::Alignment::Center),
            Line::from(""),
        ];

        lines.extend(field(
            "Email",
            &self.form.email,
            self.form.focus == AuthField::Email,
            false,
        ));
        if let Some(ref err) = self.form.email_error {
            lines.push(Line::from(Span::styled(
                err.clone(),
                Style::default().fg(Color::Red),
            )));
        }
        lines.push(Line::from(""));

        lines.extend(field(
            "Password",
            &self.form.password,
            self.form.focus == AuthField::Password,
            true,
        ));
        if let Some(ref err) = self.form.password_error {
            lines.push(Line::from(Span::styled(
                err.clone(),
                Style::default().fg(Color::Red),
            )));
        }
        lines.push(Line::from(""));

        if let Some(ref err) = self.form.error {
            lines.push(Line::from(Span::styled(
                err.clone(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));
        }

        let submit_label = if self.form.loading { "Signing Up..." } else { "Sign Up" };
        let submit_style = if self.form.filled() && !self.form.loading {
            Style::default().fg(Color::Rgb(151, 71, 255)).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        lines.push(
            Line::from(Span::styled(format!("[ {} ]", submit_label), submit_style))
                .alignment(ratatui::layout::Alignment::Center),
        );
        lines.push(Line::from(""));
        lines.push(
            Line::from(vec![
                Span::styled(" Ctrl+i / Esc ", Style::default().fg(Color::Cyan)),
                Span::raw("Back to sign in"),
            ])
            .alignment(ratatui::layout::Alignment::Center),
        );

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Pixamp · Sign up ")
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
