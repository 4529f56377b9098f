//! CNAME registration wizard dialog
//!
//! Renders the `CnameWizard` state machine: the three Meta-side
//! instruction pages, the domain entry page and the confirmation page,
//! with the cancel prompt layered over whichever step it interrupted.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::wizard::{CnameWizard, WizardEvent, WizardState, WizardStep};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub struct CnameWizardDialog {
    pub wizard: CnameWizard,
}

impl Default for CnameWizardDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl CnameWizardDialog {
    pub fn new() -> Self {
        Self { wizard: CnameWizard::new() }
    }

    fn step_body(&self, step: WizardStep) -> Vec<Line<'static>> {
        let bullet = |text: &str| -> Line<'static> {
            Line::from(vec![
                Span::styled("  • ", Style::default().fg(Color::Rgb(151, 71, 255))),
                Span::raw(text.to_string()),
            ])
        };
        let numbered = |n: usize, text: &str| -> Line<'static> {
            Line::from(vec![
                Span::styled(format!("  {}. ", n), Style::default().fg(Color::Rgb(151, 71, 255))),
                Span::raw(text.to_string()),
            ])
        };

        match step {
            WizardStep::Intro => vec![
                Line::from("Before you can benefit from Pixamp Attribution, we"),
                Line::from("will help you complete the 3 steps below:"),
                Line::from(""),
                numbered(1, "Add a subdomain on Meta"),
                numbered(2, "Verify the new subdomain on Meta"),
                numbered(3, "Register app.pixamp.xyz as a CNAME"),
                Line::from(""),
                Line::from("This set-up is necessary for effective tracking."),
            ],
            WizardStep::AddSubdomain => vec![
                Line::from("Add to Meta the custom subdomain you want to show"),
                Line::from("in your campaigns:"),
                Line::from(""),
                numbered(1, "Open Meta Business Manager → owned domains"),
                numbered(2, "Select the right Business Account"),
                numbered(3, "Click \"ADD\""),
                numbered(4, "Enter the domain (e.g. social.pixamp.xyz)"),
                Line::from(""),
                bullet("business.facebook.com/settings/owned-domains"),
            ],
            WizardStep::VerifySubdomain => vec![
                Line::from("Confirm your business's authenticity by verifying"),
                Line::from("the subdomain on Meta Business:"),
                Line::from(""),
                numbered(1, "Open the DNS record section of your domain host"),
                numbered(2, "Add a new TXT entry with Meta's record"),
                numbered(3, "Add @ to the Host field if required"),
                numbered(4, "Back in Business Manager, click \"Verify\""),
            ],
            WizardStep::CreateRecord => vec![
                Line::from("Create a CNAME record with app.pixamp.xyz as the"),
                Line::from("destination for the subdomain you verified:"),
                Line::from(""),
                numbered(1, "Open the DNS record section of your domain host"),
                numbered(2, "Add New Record, type CNAME"),
                bullet("Name/Host: the subdomain (social for social.pixamp.xyz)"),
                bullet("TTL (if required): 3600"),
                bullet("Value/Destination: app.pixamp.xyz"),
                numbered(3, "Save the new CNAME record"),
                Line::from(""),
                Line::from(Span::styled(
                    "The exact steps vary by domain host.",
                    Style::default().fg(Color::DarkGray),
                )),
            ],
            WizardStep::EnterDomain => {
                let mut lines = vec![
                    Line::from("Enter your verified domain:"),
                    Line::from(""),
                    Line::from(vec![
                        Span::styled("> ", Style::default().fg(Color::Cyan)),
                        Span::styled(
                            format!("{}_", self.wizard.domain_input),
                            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                        ),
                    ]),
                    Line::from(Span::styled(
                        "  subdomain.domain.com",
                        Style::default().fg(Color::DarkGray),
                    )),
                ];
                if let Some(ref err) = self.wizard.error {
                    lines.push(Line::from(""));
                    lines.push(Line::from(Span::styled(
                        err.clone(),
                        Style::default().fg(Color::Red),
                    )));
                }
                lines
            }
            WizardStep::Done => vec![
                Line::from(""),
                Line::from(Span::styled(
                    "  ✓  Congrats!",
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from("Your CNAME has been registered on Pixamp"),
                Line::from("with success!"),
            ],
        }
    }
}

impl Component for CnameWizardDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match self.wizard.state() {
            WizardState::Step(step) => match key.code {
                KeyCode::Enter => Some(Action::Wizard(WizardEvent::Next)),
                KeyCode::Left => Some(Action::Wizard(WizardEvent::Previous)),
                KeyCode::Esc => Some(Action::Wizard(WizardEvent::RequestCancel)),
                KeyCode::Backspace if step == WizardStep::EnterDomain => {
                    self.wizard.input_backspace();
                    None
                }
                KeyCode::Char(c) if step == WizardStep::EnterDomain => {
                    self.wizard.input_char(c);
                    None
                }
                _ => None,
            },
            WizardState::CancelConfirm { .. } => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    Some(Action::Wizard(WizardEvent::ConfirmCancel))
                }
                KeyCode::Char('u') | KeyCode::Char('n') | KeyCode::Esc => {
                    Some(Action::Wizard(WizardEvent::UndoCancel))
                }
                _ => None,
            },
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        match self.wizard.state() {
            WizardState::CancelConfirm { .. } => {
                let popup_area = centered_popup(area, 52, 8);
                frame.render_widget(Clear, popup_area);

                let content = vec![
                    Line::from(""),
                    Line::from("Are you sure you want to cancel the"),
                    Line::from("new CNAME registry?"),
                    Line::from(""),
                    Line::from(vec![
                        Span::styled(
                            " u/Esc ",
                            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                        ),
                        Span::raw("Undo  "),
                        Span::styled(
                            " y/Enter ",
                            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                        ),
                        Span::raw("Cancel registry"),
                    ]),
                ];

                let paragraph = Paragraph::new(content)
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .border_style(Style::default().fg(Color::Red))
                            .title(" Cancel new CNAME registry ")
                            .title_style(
                                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                            ),
                    )
                    .alignment(ratatui::layout::Alignment::Center);
                frame.render_widget(paragraph, popup_area);
            }
            WizardState::Step(step) => {
                let popup_area = centered_popup(area, 60, 19);
                frame.render_widget(Clear, popup_area);

                let mut lines: Vec<Line> = Vec::new();
                if let Some(progress) = step.progress() {
                    lines.push(Line::from(Span::styled(
                        progress.to_string(),
                        Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD),
                    )));
                    lines.push(Line::from(""));
                }
                lines.extend(self.step_body(step));
                lines.push(Line::from(""));

                let next_label = match step {
                    WizardStep::Intro => "Let's Start",
                    WizardStep::EnterDomain => "Finish",
                    WizardStep::Done => "Close",
                    _ => "Next Step",
                };
                let mut footer = vec![
                    Span::styled(" ⏎ ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
                    Span::raw(next_label),
                ];
                if step != WizardStep::Intro && step != WizardStep::Done {
                    footer.push(Span::raw("  "));
                    footer.push(Span::styled(
                        " ← ",
                        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                    ));
                    footer.push(Span::raw("Previous"));
                }
                if step != WizardStep::Done {
                    footer.push(Span::raw("  "));
                    footer.push(Span::styled(
                        " Esc ",
                        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                    ));
                    footer.push(Span::raw("Cancel"));
                }
                lines.push(Line::from(footer));

                let title = if step.title().is_empty() {
                    " CNAME ".to_string()
                } else {
                    format!(" {} ", step.title())
                };
                let paragraph = Paragraph::new(lines).block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Rgb(151, 71, 255)))
                        .title(title)
                        .title_style(
                            Style::default()
                                .fg(Color::Rgb(151, 71, 255))
                                .add_modifier(Modifier::BOLD),
                        ),
                );
                frame.render_widget(paragraph, popup_area);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    fn press(dialog: &mut CnameWizardDialog, code: KeyCode) -> Option<Action> {
        dialog.handle_key_event(KeyEvent::from(code)).unwrap()
    }

    #[test]
    fn test_enter_advances_and_esc_requests_cancel() {
        let mut dialog = CnameWizardDialog::new();
        assert_eq!(press(&mut dialog, KeyCode::Enter), Some(Action::Wizard(WizardEvent::Next)));
        assert_eq!(
            press(&mut dialog, KeyCode::Esc),
            Some(Action::Wizard(WizardEvent::RequestCancel))
        );
    }

    #[test]
    fn test_typing_only_lands_in_the_domain_step() {
        let mut dialog = CnameWizardDialog::new();
        press(&mut dialog, KeyCode::Char('x'));
        assert!(dialog.wizard.domain_input.is_empty());

        for _ in 0..4 {
            dialog.wizard.apply(WizardEvent::Next);
        }
        press(&mut dialog, KeyCode::Char('x'));
        assert_eq!(dialog.wizard.domain_input, "x");
    }

    #[test]
    fn test_cancel_prompt_keys_map_to_undo_and_confirm() {
        let mut dialog = CnameWizardDialog::new();
        dialog.wizard.apply(WizardEvent::RequestCancel);

        assert_eq!(
            press(&mut dialog, KeyCode::Char('u')),
            Some(Action::Wizard(WizardEvent::UndoCancel))
        );
        assert_eq!(
            press(&mut dialog, KeyCode::Char('y')),
            Some(Action::Wizard(WizardEvent::ConfirmCancel))
        );
    }
}
