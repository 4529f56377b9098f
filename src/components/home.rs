//! Home component - the dashboard screen
//!
//! Owns the three table tabs (campaigns, ad sets, ads), each with its own
//! independent row store, plus the selection cursor and search mode.

use crate::action::Action;
use crate::component::Component;
use crate::components::{calculate_main_layout, overview, perf_table};
use crate::model::domain::DomainState;
use crate::model::node::CampaignNode;
use crate::model::row_store::{HierarchicalRowStore, SortKey};
use crate::model::ui::Tab;
use crate::model::aggregate;
use crate::services::data;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

/// Dashboard component holding per-tab table state
pub struct HomeComponent {
    pub active_tab: Tab,

    campaigns: HierarchicalRowStore,
    ad_sets: HierarchicalRowStore,
    ads: HierarchicalRowStore,

    /// Selection cursor into each tab's visible rows
    selected: [usize; 3],

    /// Whether typed keys go to the search query
    pub search_mode: bool,
}

impl HomeComponent {
    pub fn new(campaigns: Vec<CampaignNode>) -> Self {
        let ad_sets = data::all_ad_sets(&campaigns);
        let ads = data::all_ads(&campaigns);
        Self {
            active_tab: Tab::Campaigns,
            campaigns: HierarchicalRowStore::new(campaigns),
            ad_sets: HierarchicalRowStore::new(ad_sets),
            ads: HierarchicalRowStore::new(ads),
            selected: [0; 3],
            search_mode: false,
        }
    }

    /// Swap in a freshly loaded tree, rebuilding the flattened tabs
    pub fn set_campaigns(&mut self, campaigns: Vec<CampaignNode>) {
        self.ad_sets.set_nodes(data::all_ad_sets(&campaigns));
        self.ads.set_nodes(data::all_ads(&campaigns));
        self.campaigns.set_nodes(campaigns);
        self.selected = [0; 3];
    }

    fn tab_index(&self) -> usize {
        match self.active_tab {
            Tab::Campaigns => 0,
            Tab::AdSets => 1,
            Tab::Ads => 2,
        }
    }

    pub fn store(&self, tab: Tab) -> &HierarchicalRowStore {
        match tab {
            Tab::Campaigns => &self.campaigns,
            Tab::AdSets => &self.ad_sets,
            Tab::Ads => &self.ads,
        }
    }

    pub fn active_store(&self) -> &HierarchicalRowStore {
        self.store(self.active_tab)
    }

    pub fn active_store_mut(&mut self) -> &mut HierarchicalRowStore {
        match self.active_tab {
            Tab::Campaigns => &mut self.campaigns,
            Tab::AdSets => &mut self.ad_sets,
            Tab::Ads => &mut self.ads,
        }
    }

    pub fn selected_index(&self) -> usize {
        self.selected[self.tab_index()]
    }

    /// Id, name and pin state of the row under the cursor
    pub fn selected_row(&self) -> Option<(String, String, bool)> {
        let rows = self.active_store().visible_rows();
        rows.get(self.selected_index())
            .map(|row| (row.node.id.clone(), row.node.name.clone(), row.pinned))
    }

    fn clamp_selection(&mut self) {
        let len = self.active_store().visible_rows().len();
        let idx = self.tab_index();
        if len == 0 {
            self.selected[idx] = 0;
        } else if self.selected[idx] >= len {
            self.selected[idx] = len - 1;
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────

    pub fn next(&mut self) {
        let len = self.active_store().visible_rows().len();
        if len == 0 {
            return;
        }
        let idx = self.tab_index();
        self.selected[idx] = (self.selected[idx] + 1) % len;
    }

    pub fn previous(&mut self) {
        let len = self.active_store().visible_rows().len();
        if len == 0 {
            return;
        }
        let idx = self.tab_index();
        self.selected[idx] = if self.selected[idx] == 0 {
            len - 1
        } else {
            self.selected[idx] - 1
        };
    }

    pub fn select_first(&mut self) {
        let idx = self.tab_index();
        self.selected[idx] = 0;
    }

    pub fn select_last(&mut self) {
        let len = self.active_store().visible_rows().len();
        let idx = self.tab_index();
        self.selected[idx] = len.saturating_sub(1);
    }

    pub fn next_tab(&mut self) {
        let tabs = Tab::all();
        let current = tabs.iter().position(|t| *t == self.active_tab).unwrap_or(0);
        self.active_tab = tabs[(current + 1) % tabs.len()];
        self.clamp_selection();
    }

    pub fn previous_tab(&mut self) {
        let tabs = Tab::all();
        let current = tabs.iter().position(|t| *t == self.active_tab).unwrap_or(0);
        self.active_tab = tabs[(current + tabs.len() - 1) % tabs.len()];
        self.clamp_selection();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // View State
    // ─────────────────────────────────────────────────────────────────────────

    pub fn toggle_expand_selected(&mut self) {
        if let Some((id, _, _)) = self.selected_row() {
            self.active_store_mut().toggle_expanded(&id);
            self.clamp_selection();
        }
    }

    pub fn sort_by(&mut self, key: SortKey) {
        self.active_store_mut().sort_by(key);
        self.clamp_selection();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Search
    // ─────────────────────────────────────────────────────────────────────────

    pub fn enter_search_mode(&mut self) {
        self.search_mode = true;
    }

    pub fn exit_search_mode(&mut self) {
        self.search_mode = false;
    }

    pub fn search_input(&mut self, c: char) {
        let query = format!("{}{}", self.active_store().search(), c);
        self.active_store_mut().set_search(&query);
        self.select_first();
    }

    pub fn search_backspace(&mut self) {
        let mut query = self.active_store().search().to_string();
        query.pop();
        self.active_store_mut().set_search(&query);
        self.select_first();
    }
}

impl Component for HomeComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            // Navigation
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextItem),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevItem),
            KeyCode::Tab => Some(Action::NextTab),
            KeyCode::BackTab => Some(Action::PrevTab),
            KeyCode::Char('g') => Some(Action::FirstItem),
            KeyCode::Char('G') => Some(Action::LastItem),

            // Table view state
            KeyCode::Enter | KeyCode::Char(' ') => Some(Action::ToggleExpand),
            KeyCode::Char('p') => Some(Action::TogglePin),
            KeyCode::Char('1') => Some(Action::SortBy(SortKey::Name)),
            KeyCode::Char('2') => Some(Action::SortBy(SortKey::Status)),
            KeyCode::Char('3') => Some(Action::SortBy(SortKey::Spend)),
            KeyCode::Char('4') => Some(Action::SortBy(SortKey::MetaRoas)),
            KeyCode::Char('5') => Some(Action::SortBy(SortKey::Roas)),
            KeyCode::Char('6') => Some(Action::SortBy(SortKey::Clicks)),
            KeyCode::Char('7') => Some(Action::SortBy(SortKey::Orders)),
            KeyCode::Char('8') => Some(Action::SortBy(SortKey::Visits)),
            KeyCode::Char('9') => Some(Action::SortBy(SortKey::Sales)),

            // Search
            KeyCode::Char('/') => Some(Action::EnterSearchMode),

            // Dialogs
            KeyCode::Char('d') => Some(Action::OpenDateRange),
            KeyCode::Char('m') => Some(Action::OpenMarketplace),
            KeyCode::Char('w') => Some(Action::OpenCnameWizard),
            KeyCode::Char('e') => Some(Action::ExportCsv),
            KeyCode::Char('R') => Some(Action::RefreshData),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('q') => Some(Action::OpenQuitDialog),
            KeyCode::Char('Q') => Some(Action::SignOut),

            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, _action: Action) -> Result<Option<Action>> {
        // Updates are applied by App, which owns the surrounding state and
        // calls the methods above directly.
        Ok(None)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing goes through draw_dashboard, which takes the full context
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rendering Functions
// ═══════════════════════════════════════════════════════════════════════════════

/// Context needed for rendering the dashboard
pub struct DashboardContext<'a> {
    pub domain: &'a DomainState,
    pub error: Option<&'a str>,
    pub status_message: Option<&'a str>,
}

/// Draw the dashboard screen
pub fn draw_dashboard(
    frame: &mut Frame,
    area: Rect,
    home: &HomeComponent,
    ctx: &DashboardContext,
) -> Result<()> {
    let layout = calculate_main_layout(area);

    render_header(frame, layout.header, ctx);
    let totals = aggregate::project(home.store(Tab::Campaigns).nodes());
    overview::render_cards(frame, layout.cards, &totals, ctx.domain);
    render_tabs(frame, layout.tabs, home);
    perf_table::render_table(frame, layout.table, home);
    render_status_bar(frame, layout.status, home, ctx);
    render_help_bar(frame, layout.help, home);

    Ok(())
}

fn render_header(frame: &mut Frame, area: Rect, ctx: &DashboardContext) {
    let domain = ctx.domain;
    let marketplace = domain
        .marketplace
        .as_deref()
        .and_then(crate::model::marketplace::find)
        .map(|m| m.label.to_string())
        .unwrap_or_else(|| "Select marketplace".to_string());

    let line = Line::from(vec![
        Span::styled(
            format!("Hello {}", domain.display_name()),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "  ·  Here's how your campaigns are going",
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw("   "),
        Span::styled(
            format!("[{}]", domain.period.label(domain.today)),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(" "),
        Span::styled(format!("[{}]", marketplace), Style::default().fg(Color::Magenta)),
    ]);

    frame.render_widget(
        Paragraph::new(line).block(Block::default().borders(Borders::BOTTOM)),
        area,
    );
}

fn render_tabs(frame: &mut Frame, area: Rect, home: &HomeComponent) {
    let all_tabs = Tab::all();
    let titles: Vec<String> = all_tabs
        .iter()
        .map(|t| format!("{} ({})", t.name(), home.store(*t).nodes().len()))
        .collect();
    let selected = all_tabs
        .iter()
        .position(|t| *t == home.active_tab)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::BOTTOM))
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(Color::Rgb(151, 71, 255))
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(tabs, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, home: &HomeComponent, ctx: &DashboardContext) {
    let mut spans = vec![];

    if let Some(error) = ctx.error {
        spans.push(Span::styled(
            format!(" Error: {} ", error),
            Style::default().fg(Color::Red),
        ));
    } else {
        if let Some((_, name, pinned)) = home.selected_row() {
            spans.push(Span::styled(
                format!(" {} ", name),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ));
            if pinned {
                spans.push(Span::styled("pinned ", Style::default().fg(Color::Yellow)));
            }
        }
        if let Some(status) = ctx.status_message {
            spans.push(Span::styled(
                format!(" {} ", status),
                Style::default().fg(Color::Yellow),
            ));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_help_bar(frame: &mut Frame, area: Rect, home: &HomeComponent) {
    let help_spans = if home.search_mode {
        vec![
            Span::styled(
                " Esc/Enter ",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::raw("Done  "),
            Span::styled(
                format!("Search: {}_", home.active_store().search()),
                Style::default().fg(Color::Cyan),
            ),
        ]
    } else {
        vec![
            Span::styled(" q ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::raw("Quit "),
            Span::styled(" ⏎ ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw("Expand "),
            Span::styled(" p ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw("Pin "),
            Span::styled(" 1-9 ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw("Sort "),
            Span::styled(" / ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw("Search "),
            Span::styled(" d ", Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)),
            Span::raw("Dates "),
            Span::styled(" m ", Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)),
            Span::raw("Marketplace "),
            Span::styled(" w ", Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)),
            Span::raw("CNAME "),
            Span::styled(" e ", Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)),
            Span::raw("Export "),
            Span::styled(" ? ", Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
            Span::raw("Help"),
        ]
    };

    let paragraph = Paragraph::new(Line::from(help_spans))
        .block(Block::default().borders(Borders::TOP))
        .alignment(ratatui::layout::Alignment::Left);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::data::sample_campaigns;

    #[test]
    fn test_tabs_have_independent_view_state() {
        let mut home = HomeComponent::new(sample_campaigns());

        let first_campaign = home.store(Tab::Campaigns).nodes()[0].id.clone();
        home.active_store_mut().set_pinned(&first_campaign, true);
        home.active_store_mut().sort_by(SortKey::Spend);

        home.next_tab();
        assert_eq!(home.active_tab, Tab::AdSets);
        assert!(home.active_store().visible_rows().iter().all(|r| !r.pinned));
        assert_eq!(
            home.active_store().sort_direction(),
            crate::model::row_store::SortDirection::Unsorted
        );
    }

    #[test]
    fn test_selection_wraps_at_both_ends() {
        let mut home = HomeComponent::new(sample_campaigns());
        let len = home.active_store().visible_rows().len();

        home.previous();
        assert_eq!(home.selected_index(), len - 1);
        home.next();
        assert_eq!(home.selected_index(), 0);
    }

    #[test]
    fn test_cursor_clamps_when_rows_disappear() {
        let mut home = HomeComponent::new(sample_campaigns());
        home.select_last();

        home.active_store_mut().set_search("tab-mx");
        home.sort_by(SortKey::Name);

        assert_eq!(home.active_store().visible_rows().len(), 1);
        assert_eq!(home.selected_index(), 0);
    }

    #[test]
    fn test_expand_toggles_through_the_cursor() {
        let mut home = HomeComponent::new(sample_campaigns());
        let before = home.active_store().visible_rows().len();

        home.select_first();
        home.toggle_expand_selected();
        let after = home.active_store().visible_rows().len();
        assert!(after > before);

        home.toggle_expand_selected();
        assert_eq!(home.active_store().visible_rows().len(), before);
    }

    #[test]
    fn test_search_input_narrows_the_active_tab_only() {
        let mut home = HomeComponent::new(sample_campaigns());
        for c in "tab-uk".chars() {
            home.search_input(c);
        }
        assert_eq!(home.active_store().visible_rows().len(), 2);

        home.next_tab();
        assert!(home.active_store().search().is_empty());
    }
}
