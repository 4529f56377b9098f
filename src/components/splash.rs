//! Splash screen component
//!
//! Displays the Pixamp wordmark briefly before handing over to sign-in.

use crate::action::Action;
use crate::component::Component;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};

/// Splash screen component
pub struct SplashComponent {
    /// When the splash screen was shown
    start_time: Option<Instant>,
    /// Duration to show splash before auto-advancing
    duration: Duration,
}

impl Default for SplashComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl SplashComponent {
    pub fn new() -> Self {
        Self {
            start_time: None,
            duration: Duration::from_millis(1200),
        }
    }

    /// Check if splash duration has elapsed
    pub fn is_complete(&self) -> bool {
        self.start_time
            .map(|t| t.elapsed() >= self.duration)
            .unwrap_or(false)
    }

    fn wordmark() -> Vec<&'static str> {
        vec![
            "█████╗ ██╗██╗  ██╗ █████╗ ███╗   ███╗██████╗ ",
            "██╔══██╗██║╚██╗██╔╝██╔══██╗████╗ ████║██╔══██╗",
            "██████╔╝██║ ╚███╔╝ ███████║██╔████╔██║██████╔╝",
            "██╔═══╝ ██║ ██╔██╗ ██╔══██║██║╚██╔╝██║██╔═══╝ ",
            "██║     ██║██╔╝ ██╗██║  ██║██║ ╚═╝ ██║██║     ",
            "╚═╝     ╚═╝╚═╝  ╚═╝╚═╝  ╚═╝╚═╝     ╚═╝╚═╝     ",
        ]
    }
}

impl Component for SplashComponent {
    fn init(&mut self) -> Result<()> {
        self.start_time = Some(Instant::now());
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        // Any key press skips the splash screen
        match key.code {
            KeyCode::Char('q') => Ok(Some(Action::ForceQuit)),
            _ => Ok(Some(Action::SplashComplete)),
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if action == Action::Tick && self.is_complete() {
            return Ok(Some(Action::SplashComplete));
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let bg = Color::Rgb(0, 0, 1);

        frame.render_widget(Clear, area);
        frame.render_widget(Block::default().style(Style::default().bg(bg)), area);

        let logo_lines = Self::wordmark();
        let logo_height = logo_lines.len() as u16;
        let logo_width = logo_lines.first().map(|l| l.chars().count()).unwrap_or(0) as u16;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length((area.height.saturating_sub(logo_height + 4)) / 2),
                Constraint::Length(logo_height),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);

        let accent = Color::Rgb(151, 71, 255);

        let logo: Vec<Line> = logo_lines
            .iter()
            .map(|line| {
                Line::from(Span::styled(
                    line.to_string(),
                    Style::default().fg(accent).bg(bg),
                ))
            })
            .collect();

        let centered_x = (area.width.saturating_sub(logo_width)) / 2;
        let logo_rect = Rect::new(centered_x, chunks[1].y, logo_width, logo_height);
        frame.render_widget(Paragraph::new(logo), logo_rect);

        let subtitle = "Marketing attribution, in your terminal";
        let subtitle_width = subtitle.len() as u16;
        let subtitle_x = (area.width.saturating_sub(subtitle_width)) / 2;
        let subtitle_rect = Rect::new(subtitle_x, chunks[3].y, subtitle_width, 1);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                subtitle,
                Style::default()
                    .fg(Color::DarkGray)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            ))),
            subtitle_rect,
        );

        Ok(())
    }
}
