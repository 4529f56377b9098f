//! Nested performance table rendering
//!
//! Draws the flattened row list of the active tab: chevrons for expandable
//! rows, indentation per depth, status bullets, pin markers, sortable
//! column headers and a sticky totals row.

use crate::components::home::HomeComponent;
use crate::model::aggregate::{self, attributed_sales};
use crate::model::node::CampaignStatus;
use crate::model::row_store::{SortDirection, SortKey, VisibleRow};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Fixed-width numeric columns; the name column takes the rest
const COLUMNS: &[(&str, SortKey, u16)] = &[
    ("Status", SortKey::Status, 10),
    ("Spend", SortKey::Spend, 11),
    ("Meta ROAS", SortKey::MetaRoas, 10),
    ("ROAS", SortKey::Roas, 7),
    ("Clicks", SortKey::Clicks, 7),
    ("Orders", SortKey::Orders, 7),
    ("Visits", SortKey::Visits, 7),
    ("Sales", SortKey::Sales, 6),
];

pub fn render_table(frame: &mut Frame, area: Rect, home: &HomeComponent) {
    let store = home.active_store();
    let rows = store.visible_rows();
    let totals = aggregate::project(store.nodes());

    let fixed: u16 = COLUMNS.iter().map(|(_, _, w)| w + 2).sum();
    let name_width = area.width.saturating_sub(fixed + 4).max(16) as usize;

    let mut lines: Vec<Line> = Vec::new();
    lines.push(header_line(store.sort_key(), store.sort_direction(), name_width));
    lines.push(Line::from(Span::styled(
        "─".repeat(area.width.saturating_sub(2) as usize),
        Style::default().fg(Color::DarkGray),
    )));

    if rows.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No results.",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let selected = home.selected_index();
    for (i, row) in rows.iter().enumerate() {
        lines.push(row_line(row, i == selected, name_width));
    }

    lines.push(Line::from(Span::styled(
        "─".repeat(area.width.saturating_sub(2) as usize),
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(totals_line(&totals, name_width));

    // Keep the selected row inside the viewport; header and totals take 4
    let visible_height = area.height.saturating_sub(2) as usize;
    let row_window = visible_height.saturating_sub(4).max(1);
    let scroll = (selected + 1).saturating_sub(row_window);

    let title = if store.search().is_empty() {
        format!(" {} ({}) ", home.active_tab.name(), rows.len())
    } else {
        format!(
            " {} ({}) [search: {}] ",
            home.active_tab.name(),
            rows.len(),
            store.search()
        )
    };

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .scroll((scroll as u16, 0));

    frame.render_widget(paragraph, area);
}

fn header_line(sort_key: SortKey, direction: SortDirection, name_width: usize) -> Line<'static> {
    let header_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let mut spans = Vec::new();

    let name_marker = if sort_key == SortKey::Name {
        direction.marker()
    } else {
        ""
    };
    spans.push(Span::styled(
        format!("  {:<width$}", format!("Name {}", name_marker), width = name_width),
        header_style,
    ));

    for (label, key, width) in COLUMNS {
        let marker = if sort_key == *key { direction.marker() } else { "" };
        spans.push(Span::styled(
            format!("  {:>width$}", format!("{} {}", label, marker).trim_end(), width = *width as usize),
            header_style,
        ));
    }

    Line::from(spans)
}

fn row_line<'a>(row: &VisibleRow<'a>, selected: bool, name_width: usize) -> Line<'a> {
    let node = row.node;
    let metrics = &node.metrics;

    let indent = "  ".repeat(row.depth as usize);
    let chevron = if node.has_children() {
        if row.expanded {
            "▾ "
        } else {
            "▸ "
        }
    } else {
        "  "
    };
    let pin = if row.pinned { "✦ " } else { "" };

    let mut name = format!("{}{}{}{}", indent, pin, chevron, node.name);
    if name.width() > name_width {
        name = name.chars().take(name_width.saturating_sub(1)).collect();
        name.push('…');
    }

    let name_style = if selected {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else if row.depth == 0 {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Gray)
    };

    let bullet_style = match node.status {
        CampaignStatus::Active => Style::default().fg(Color::Green),
        CampaignStatus::Inactive => Style::default().fg(Color::DarkGray),
    };

    let row_style = if selected {
        Style::default().bg(Color::Rgb(40, 30, 60))
    } else {
        Style::default()
    };

    let cells = vec![
        Span::styled(format!("  {:<width$}", name, width = name_width), name_style),
        Span::styled(
            format!("  {:>10}", format!("● {}", node.status.label())),
            bullet_style,
        ),
        Span::raw(format!("  {:>11}", format!("${:.2}", metrics.spend))),
        Span::raw(format!("  {:>10}", format!("{:.2}x", metrics.meta_roas))),
        Span::raw(format!("  {:>7}", format!("{:.2}x", metrics.roas))),
        Span::raw(format!("  {:>7}", metrics.clicks)),
        Span::raw(format!("  {:>7}", metrics.orders)),
        Span::raw(format!("  {:>7}", metrics.visits)),
        Span::raw(format!("  {:>6}", attributed_sales(metrics.visits))),
    ];

    Line::from(cells).style(row_style)
}

fn totals_line(totals: &aggregate::Aggregate, name_width: usize) -> Line<'static> {
    let bold = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
    Line::from(vec![
        Span::styled(format!("  {:<width$}", "Totals", width = name_width), bold),
        Span::styled(format!("  {:>10}", ""), bold),
        Span::styled(format!("  {:>11}", format!("${:.2}", totals.total_spend)), bold),
        Span::styled(format!("  {:>10}", format!("{:.2}x", totals.mean_meta_roas)), bold),
        Span::styled(format!("  {:>7}", format!("{:.2}x", totals.mean_roas)), bold),
        Span::styled(format!("  {:>7}", totals.total_clicks), bold),
        Span::styled(format!("  {:>7}", totals.total_orders), bold),
        Span::styled(format!("  {:>7}", totals.total_visits), bold),
        Span::styled(format!("  {:>6}", totals.total_sales()), bold),
    ])
}
