//! Sign-in screen component

use crate::action::Action;
use crate::component::Component;
use crate::components::auth_form::{AuthField, AuthForm};
use crate::components::centered_popup;
use crate::model::ui::AppMode;
use crate::services::auth::OAuthProvider;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Email/password sign-in with an OAuth shortcut
pub struct SignInComponent {
    pub form: AuthForm,
}

impl Default for SignInComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl SignInComponent {
    pub fn new() -> Self {
        Self { form: AuthForm::new() }
    }

    fn field_line<'a>(label: &'a str, value: String, focused: bool, masked: bool) -> Vec<Line<'a>> {
        let shown = if masked {
            "*".repeat(value.chars().count())
        } else {
            value
        };
        let cursor = if focused { "_" } else { "" };
        let value_style = if focused {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        vec![
            Line::from(Span::styled(label, Style::default().fg(Color::DarkGray))),
            Line::from(vec![
                Span::styled("> ", Style::default().fg(Color::Cyan)),
                Span::styled(format!("{}{}", shown, cursor), value_style),
            ]),
        ]
    }
}

impl Component for SignInComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.form.loading {
            return Ok(None);
        }
        let action = match key.code {
            KeyCode::Enter => {
                // Submit only passes validated, filled forms to the service
                if self.form.filled() && self.form.validate() {
                    self.form.loading = true;
                    Some(Action::SubmitSignIn)
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
            KeyCode::Char('g') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.form.loading = true;
                Some(Action::OAuthSignIn(OAuthProvider::Google))
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::Navigate(AppMode::SignUp))
            }
            KeyCode::Esc => Some(Action::ForceQuit),
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

        let popup = centered_popup(area, 52, 19);

        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Welcome back!",
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ))
            .alignment(ratatui::layout::Alignment::Center),
            Line::from(""),
        ];

        lines.extend(Self::field_line(
            "Email",
            self.form.email.clone(),
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

        lines.extend(Self::field_line(
            "Password",
            self.form.password.clone(),
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

        let submit_label = if self.form.loading { "Logging in..." } else { "Log in" };
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
                Span::styled(" Ctrl+g ", Style::default().fg(Color::Yellow)),
                Span::raw("Continue with Google  "),
                Span::styled(" Ctrl+u ", Style::default().fg(Color::Cyan)),
                Span::raw("Create account"),
            ])
            .alignment(ratatui::layout::Alignment::Center),
        );

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Pixamp · Sign in ")
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
