//! Overview cards above the tables
//!
//! Attributed sales, visits and request volume for the active period, plus
//! the connection status of the linked accounts.

use crate::model::aggregate::Aggregate;
use crate::model::domain::DomainState;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render_cards(frame: &mut Frame, area: Rect, totals: &Aggregate, domain: &DomainState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(22),
            Constraint::Percentage(22),
            Constraint::Percentage(22),
            Constraint::Percentage(34),
        ])
        .split(area);

    let period = domain.period.label(domain.today);
    stat_card(frame, chunks[0], "Attributed Sales", &format_count(totals.total_sales()), &period);
    stat_card(frame, chunks[1], "Visits", &format_count(totals.total_visits), &period);
    stat_card(frame, chunks[2], "Requests", &format_count(domain.requests_last_week), "last 7 days");
    status_card(frame, chunks[3], domain);
}

fn stat_card(frame: &mut Frame, area: Rect, title: &str, value: &str, caption: &str) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", value),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("  {}", caption),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", title))
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(paragraph, area);
}

fn status_card(frame: &mut Frame, area: Rect, domain: &DomainState) {
    let status_line = |name: &str, active: bool| -> Line<'static> {
        let (label, color) = if active {
            ("Active", Color::Green)
        } else {
            ("Inactive", Color::Red)
        };
        Line::from(vec![
            Span::styled(format!("  {:<22}", name), Style::default().fg(Color::White)),
            Span::styled(format!("{} ●", label), Style::default().fg(color)),
        ])
    };

    let lines = vec![
        status_line("Amazon", domain.amazon_connected),
        status_line("Meta Business Manager", domain.meta_connected),
        status_line("CNAME", domain.cname_active()),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Account status ")
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(paragraph, area);
}

/// Render 14056 as "14,056"
fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_grouping() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(14056), "14,056");
        assert_eq!(format_count(1234567), "1,234,567");
    }
}
