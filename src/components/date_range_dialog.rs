//! Date-range picker dialog
//!
//! Preset list on the left, custom from/to entry on the right. Applying a
//! preset closes immediately; a custom range only applies once both dates
//! parse, mirroring the disabled Validate button upstream.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::daterange::{DatePreset, DateRange};
use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Which half of the dialog receives input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pane {
    Presets,
    CustomFrom,
    CustomTo,
}

pub struct DateRangeDialog {
    presets: Vec<DatePreset>,
    pub selected_index: usize,
    list_state: ListState,
    pane: Pane,
    from_input: String,
    to_input: String,
    pub error: Option<String>,
}

impl Default for DateRangeDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl DateRangeDialog {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            presets: DatePreset::all(),
            selected_index: 0,
            list_state,
            pane: Pane::Presets,
            from_input: String::new(),
            to_input: String::new(),
            error: None,
        }
    }

    /// Reset to the preset list with the active preset highlighted
    pub fn open(&mut self, current: Option<DatePreset>) {
        self.pane = Pane::Presets;
        self.error = None;
        self.from_input.clear();
        self.to_input.clear();
        self.selected_index = current
            .and_then(|preset| self.presets.iter().position(|p| *p == preset))
            .unwrap_or(0);
        self.list_state.select(Some(self.selected_index));
    }

    fn select_next(&mut self) {
        if self.selected_index + 1 < self.presets.len() {
            self.selected_index += 1;
            self.list_state.select(Some(self.selected_index));
        }
    }

    fn select_prev(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
            self.list_state.select(Some(self.selected_index));
        }
    }

    /// Both inputs parsed and ordered, or None while incomplete
    fn parse_custom(&self) -> Option<DateRange> {
        let from = NaiveDate::parse_from_str(self.from_input.trim(), DATE_FORMAT).ok()?;
        let to = NaiveDate::parse_from_str(self.to_input.trim(), DATE_FORMAT).ok()?;
        (from <= to).then_some(DateRange { from, to })
    }

    fn active_input_mut(&mut self) -> Option<&mut String> {
        match self.pane {
            Pane::CustomFrom => Some(&mut self.from_input),
            Pane::CustomTo => Some(&mut self.to_input),
            Pane::Presets => None,
        }
    }
}

impl Component for DateRangeDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match (self.pane, key.code) {
            (_, KeyCode::Esc) => Some(Action::CloseModal),

            (Pane::Presets, KeyCode::Up | KeyCode::Char('k')) => {
                self.select_prev();
                None
            }
            (Pane::Presets, KeyCode::Down | KeyCode::Char('j')) => {
                self.select_next();
                None
            }
            (Pane::Presets, KeyCode::Enter) => self
                .presets
                .get(self.selected_index)
                .map(|preset| Action::ApplyPreset(*preset)),
            (Pane::Presets, KeyCode::Char('c') | KeyCode::Tab) => {
                self.pane = Pane::CustomFrom;
                None
            }

            (Pane::CustomFrom | Pane::CustomTo, KeyCode::Tab) => {
                self.pane = match self.pane {
                    Pane::CustomFrom => Pane::CustomTo,
                    _ => Pane::CustomFrom,
                };
                None
            }
            (Pane::CustomFrom | Pane::CustomTo, KeyCode::BackTab) => {
                self.pane = Pane::Presets;
                None
            }
            (Pane::CustomFrom | Pane::CustomTo, KeyCode::Enter) => match self.parse_custom() {
                Some(range) => {
                    self.error = None;
                    Some(Action::ApplyCustomRange(range))
                }
                None => {
                    self.error = Some("Enter both dates as YYYY-MM-DD, from before to".to_string());
                    None
                }
            },
            (Pane::CustomFrom | Pane::CustomTo, KeyCode::Backspace) => {
                if let Some(input) = self.active_input_mut() {
                    input.pop();
                }
                self.error = None;
                None
            }
            (Pane::CustomFrom | Pane::CustomTo, KeyCode::Char(c))
                if c.is_ascii_digit() || c == '-' =>
            {
                if let Some(input) = self.active_input_mut() {
                    if input.len() < 10 {
                        input.push(c);
                    }
                }
                self.error = None;
                None
            }

            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup_area = centered_popup(area, 62, 21);
        frame.render_widget(Clear, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(3)])
            .split(popup_area);

        let content = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(22), Constraint::Min(20)])
            .split(chunks[0]);

        // Left: preset list
        let items: Vec<ListItem> = self
            .presets
            .iter()
            .map(|preset| ListItem::new(Line::from(preset.label().to_string())))
            .collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Preset ")
                    .title_style(Style::default().fg(Color::Cyan))
                    .border_style(if self.pane == Pane::Presets {
                        Style::default().fg(Color::Cyan)
                    } else {
                        Style::default().fg(Color::DarkGray)
                    }),
            )
            .highlight_style(
                Style::default()
                    .bg(Color::Rgb(151, 71, 255))
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");
        frame.render_stateful_widget(list, content[0], &mut self.list_state);

        // Right: custom range inputs
        let input_line = |label: &str, value: &str, focused: bool| -> Line<'static> {
            let cursor = if focused { "_" } else { "" };
            Line::from(vec![
                Span::styled(format!("{:<6}", label), Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format!("{}{}", value, cursor),
                    if focused {
                        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(Color::Gray)
                    },
                ),
            ])
        };

        let mut custom_lines = vec![
            Line::from(Span::styled(
                "Custom range (YYYY-MM-DD)",
                Style::default().fg(Color::White),
            )),
            Line::from(""),
            input_line("From", &self.from_input, self.pane == Pane::CustomFrom),
            input_line("To", &self.to_input, self.pane == Pane::CustomTo),
            Line::from(""),
        ];

        let validate_style = if self.parse_custom().is_some() {
            Style::default().fg(Color::Rgb(151, 71, 255)).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        custom_lines.push(Line::from(Span::styled("[ Validate ]", validate_style)));

        if let Some(ref err) = self.error {
            custom_lines.push(Line::from(""));
            custom_lines.push(Line::from(Span::styled(
                err.clone(),
                Style::default().fg(Color::Red),
            )));
        }

        custom_lines.push(Line::from(""));
        custom_lines.push(Line::from(Span::styled(
            "Selecting a range before your Pixamp account was",
            Style::default().fg(Color::DarkGray),
        )));
        custom_lines.push(Line::from(Span::styled(
            "created only shows data from generated links.",
            Style::default().fg(Color::DarkGray),
        )));

        let custom = Paragraph::new(custom_lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Custom ")
                .title_style(Style::default().fg(Color::Cyan))
                .border_style(if self.pane != Pane::Presets {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default().fg(Color::DarkGray)
                }),
        );
        frame.render_widget(custom, content[1]);

        // Help bar
        let help = Paragraph::new(Line::from(vec![
            Span::styled(" Enter ", Style::default().fg(Color::Yellow)),
            Span::raw("Apply  "),
            Span::styled(" Tab/c ", Style::default().fg(Color::Cyan)),
            Span::raw("Custom  "),
            Span::styled(" j/k ", Style::default().fg(Color::Cyan)),
            Span::raw("Navigate  "),
            Span::styled(" Esc ", Style::default().fg(Color::Yellow)),
            Span::raw("Close"),
        ]))
        .alignment(ratatui::layout::Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[1]);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    fn press(dialog: &mut DateRangeDialog, code: KeyCode) -> Option<Action> {
        dialog.handle_key_event(KeyEvent::from(code)).unwrap()
    }

    fn type_str(dialog: &mut DateRangeDialog, s: &str) {
        for c in s.chars() {
            press(dialog, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_enter_applies_the_highlighted_preset() {
        let mut dialog = DateRangeDialog::new();
        dialog.open(Some(DatePreset::Last7Days));

        let action = press(&mut dialog, KeyCode::Enter);
        assert_eq!(action, Some(Action::ApplyPreset(DatePreset::Last7Days)));
    }

    #[test]
    fn test_custom_range_requires_both_valid_dates() {
        let mut dialog = DateRangeDialog::new();
        dialog.open(None);
        press(&mut dialog, KeyCode::Char('c'));

        type_str(&mut dialog, "2024-05-01");
        assert_eq!(press(&mut dialog, KeyCode::Enter), None);
        assert!(dialog.error.is_some());

        press(&mut dialog, KeyCode::Tab);
        type_str(&mut dialog, "2024-05-31");
        let action = press(&mut dialog, KeyCode::Enter);
        match action {
            Some(Action::ApplyCustomRange(range)) => {
                assert_eq!(range.from.to_string(), "2024-05-01");
                assert_eq!(range.to.to_string(), "2024-05-31");
            }
            other => panic!("unexpected action: {:?}", other),
        }
    }

    #[test]
    fn test_inverted_custom_range_is_rejected() {
        let mut dialog = DateRangeDialog::new();
        dialog.open(None);
        press(&mut dialog, KeyCode::Char('c'));
        type_str(&mut dialog, "2024-06-30");
        press(&mut dialog, KeyCode::Tab);
        type_str(&mut dialog, "2024-06-01");

        assert_eq!(press(&mut dialog, KeyCode::Enter), None);
        assert!(dialog.error.is_some());
    }

    #[test]
    fn test_non_date_characters_are_ignored() {
        let mut dialog = DateRangeDialog::new();
        dialog.open(None);
        press(&mut dialog, KeyCode::Char('c'));
        type_str(&mut dialog, "2x0e2,4-01-02");
        assert_eq!(dialog.from_input, "2024-01-02");
    }
}
