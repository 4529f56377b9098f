//! View-state projection for the nested performance tables
//!
//! Each table tab (campaigns, ad sets, ads) owns one `HierarchicalRowStore`.
//! The store holds the immutable node tree for that tab plus the mutable view
//! state (expansion, pin order, sort, search) and projects both into the flat
//! row list the table renders. The three tabs never share view state.

use crate::model::aggregate::attributed_sales;
use crate::model::node::CampaignNode;
use std::cmp::Ordering;
use std::collections::HashSet;

/// Column a table can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Status,
    Spend,
    MetaRoas,
    Roas,
    Clicks,
    Orders,
    Visits,
    Sales,
}

/// Sort direction; `Unsorted` keeps the pinned/unpinned partitioned order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
    #[default]
    Unsorted,
}

impl SortDirection {
    /// Repeated sorts on the same column cycle ascending → descending → off
    fn next(self) -> SortDirection {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Unsorted,
            SortDirection::Unsorted => SortDirection::Ascending,
        }
    }

    pub fn marker(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
            SortDirection::Unsorted => "",
        }
    }
}

/// A node annotated with the render state derived from the view state
#[derive(Debug, Clone, Copy)]
pub struct VisibleRow<'a> {
    pub node: &'a CampaignNode,
    /// 0 = campaign, 1 = ad set, 2 = ad
    pub depth: u8,
    pub pinned: bool,
    /// Only meaningful when the node has children
    pub expanded: bool,
}

/// Tree of rows plus the per-tab view state projected over it
pub struct HierarchicalRowStore {
    nodes: Vec<CampaignNode>,
    expanded: HashSet<String>,
    /// Insertion order is display order within the pinned group
    pinned: Vec<String>,
    sort_key: SortKey,
    sort_direction: SortDirection,
    /// Lowercased search query; empty means no filter
    search: String,
}

impl HierarchicalRowStore {
    pub fn new(nodes: Vec<CampaignNode>) -> Self {
        Self {
            nodes,
            expanded: HashSet::new(),
            pinned: Vec::new(),
            sort_key: SortKey::Name,
            sort_direction: SortDirection::Unsorted,
            search: String::new(),
        }
    }

    pub fn nodes(&self) -> &[CampaignNode] {
        &self.nodes
    }

    /// Replace the underlying tree, keeping the view state. Ids that no
    /// longer resolve simply stop matching anything.
    pub fn set_nodes(&mut self, nodes: Vec<CampaignNode>) {
        self.nodes = nodes;
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn is_pinned(&self, id: &str) -> bool {
        self.pinned.iter().any(|p| p == id)
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    /// Show or hide a node's children. Unknown ids and leaves are no-ops;
    /// calling twice with the same value equals calling once.
    pub fn set_expanded(&mut self, id: &str, expanded: bool) {
        if expanded {
            match find_node(&self.nodes, id) {
                Some(node) if node.has_children() => {
                    self.expanded.insert(id.to_string());
                }
                _ => {}
            }
        } else {
            self.expanded.remove(id);
        }
    }

    pub fn toggle_expanded(&mut self, id: &str) {
        let expand = !self.expanded.contains(id);
        self.set_expanded(id, expand);
    }

    /// Pin or unpin a single row. Pinning never propagates to ancestors or
    /// descendants; unknown ids are no-ops.
    pub fn set_pinned(&mut self, id: &str, pinned: bool) {
        if pinned {
            if !self.is_pinned(id) && find_node(&self.nodes, id).is_some() {
                self.pinned.push(id.to_string());
            }
        } else {
            self.pinned.retain(|p| p != id);
        }
    }

    /// Sort by `key`, cycling the direction when the key is unchanged
    pub fn sort_by(&mut self, key: SortKey) {
        if self.sort_key == key {
            self.sort_direction = self.sort_direction.next();
        } else {
            self.sort_key = key;
            self.sort_direction = SortDirection::Ascending;
        }
    }

    pub fn set_sort(&mut self, key: SortKey, direction: SortDirection) {
        self.sort_key = key;
        self.sort_direction = direction;
    }

    /// Case-insensitive substring filter on row names. The filter applies to
    /// each row at its own level: a non-matching row is dropped together with
    /// its subtree, and a matching parent never requires matching children.
    pub fn set_search(&mut self, query: &str) {
        self.search = query.to_lowercase();
    }

    /// Project the tree and view state into the ordered flat row list.
    ///
    /// At every level: pinned rows first (in pin order), unpinned after (in
    /// original order); both groups independently and stably sorted when a
    /// sort direction is active; expanded rows recurse at depth + 1 with the
    /// same sort config and the same global pin set.
    pub fn visible_rows(&self) -> Vec<VisibleRow<'_>> {
        let mut rows = Vec::new();
        self.emit_level(&self.nodes, 0, &mut rows);
        rows
    }

    fn emit_level<'a>(&'a self, level: &'a [CampaignNode], depth: u8, out: &mut Vec<VisibleRow<'a>>) {
        let mut pinned: Vec<&CampaignNode> = self
            .pinned
            .iter()
            .filter_map(|id| level.iter().find(|n| &n.id == id))
            .filter(|n| self.matches_search(n))
            .collect();
        let mut unpinned: Vec<&CampaignNode> = level
            .iter()
            .filter(|n| !self.is_pinned(&n.id))
            .filter(|n| self.matches_search(n))
            .collect();

        if self.sort_direction != SortDirection::Unsorted {
            pinned.sort_by(|a, b| self.compare(a, b));
            unpinned.sort_by(|a, b| self.compare(a, b));
        }

        for node in pinned.into_iter().chain(unpinned) {
            let expanded = node.has_children() && self.expanded.contains(&node.id);
            out.push(VisibleRow {
                node,
                depth,
                pinned: self.is_pinned(&node.id),
                expanded,
            });
            if expanded {
                self.emit_level(&node.children, depth + 1, out);
            }
        }
    }

    fn matches_search(&self, node: &CampaignNode) -> bool {
        self.search.is_empty() || node.name.to_lowercase().contains(&self.search)
    }

    fn compare(&self, a: &CampaignNode, b: &CampaignNode) -> Ordering {
        let ordering = match self.sort_key {
            SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortKey::Status => a.status.sort_key().cmp(b.status.sort_key()),
            SortKey::Spend => cmp_f64(a.metrics.spend, b.metrics.spend),
            SortKey::MetaRoas => cmp_f64(a.metrics.meta_roas, b.metrics.meta_roas),
            SortKey::Roas => cmp_f64(a.metrics.roas, b.metrics.roas),
            SortKey::Clicks => a.metrics.clicks.cmp(&b.metrics.clicks),
            SortKey::Orders => a.metrics.orders.cmp(&b.metrics.orders),
            SortKey::Visits => a.metrics.visits.cmp(&b.metrics.visits),
            SortKey::Sales => {
                attributed_sales(a.metrics.visits).cmp(&attributed_sales(b.metrics.visits))
            }
        };
        match self.sort_direction {
            SortDirection::Descending => ordering.reverse(),
            _ => ordering,
        }
    }
}

fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

fn find_node<'a>(level: &'a [CampaignNode], id: &str) -> Option<&'a CampaignNode> {
    for node in level {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find_node(&node.children, id) {
            return Some(found);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::node::{CampaignStatus, Metrics};

    fn metrics(spend: f64, visits: u64) -> Metrics {
        Metrics {
            spend,
            visits,
            ..Metrics::default()
        }
    }

    fn sample_tree() -> Vec<CampaignNode> {
        vec![
            CampaignNode::leaf("c1", "Campaign 1", CampaignStatus::Active, metrics(120.0, 200))
                .with_children(vec![CampaignNode::leaf(
                    "c1-s1",
                    "Ad Set 1-1",
                    CampaignStatus::Active,
                    metrics(120.0, 200),
                )
                .with_children(vec![
                    CampaignNode::leaf("c1-s1-a1", "Ad 1-1-1", CampaignStatus::Active, metrics(60.0, 90)),
                    CampaignNode::leaf("c1-s1-a2", "Ad 1-1-2", CampaignStatus::Active, metrics(60.0, 110)),
                ])]),
            CampaignNode::leaf("c2", "Campaign 2", CampaignStatus::Inactive, metrics(150.0, 150)),
            CampaignNode::leaf("c3", "Another push", CampaignStatus::Active, metrics(90.0, 400)),
        ]
    }

    fn ids<'a>(rows: &[VisibleRow<'a>]) -> Vec<&'a str> {
        rows.iter().map(|r| r.node.id.as_str()).collect()
    }

    #[test]
    fn test_collapsed_tree_shows_top_level_only() {
        let store = HierarchicalRowStore::new(sample_tree());
        assert_eq!(ids(&store.visible_rows()), vec!["c1", "c2", "c3"]);
    }

    #[test]
    fn test_fully_expanded_depths() {
        let mut store = HierarchicalRowStore::new(sample_tree());
        store.set_expanded("c1", true);
        store.set_expanded("c1-s1", true);

        let rows = store.visible_rows();
        // 1 campaign + 1 ad set + 2 ads, depth order 0,1,2,2
        let c1_rows: Vec<_> = rows.iter().take(4).collect();
        assert_eq!(c1_rows.len(), 4);
        assert_eq!(
            c1_rows.iter().map(|r| r.depth).collect::<Vec<_>>(),
            vec![0, 1, 2, 2]
        );
    }

    #[test]
    fn test_expansion_is_idempotent() {
        let mut store = HierarchicalRowStore::new(sample_tree());
        store.set_expanded("c1", true);
        let once = ids(&store.visible_rows())
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>();
        store.set_expanded("c1", true);
        assert_eq!(ids(&store.visible_rows()), once);
    }

    #[test]
    fn test_expanding_a_leaf_is_a_no_op() {
        let mut store = HierarchicalRowStore::new(sample_tree());
        store.set_expanded("c2", true);
        assert!(!store.is_expanded("c2"));
        assert_eq!(ids(&store.visible_rows()), vec!["c1", "c2", "c3"]);
    }

    #[test]
    fn test_unknown_id_operations_are_no_ops() {
        let mut store = HierarchicalRowStore::new(sample_tree());
        store.set_pinned("nonexistent", true);
        store.set_expanded("nonexistent", true);

        let rows = store.visible_rows();
        assert_eq!(ids(&rows), vec!["c1", "c2", "c3"]);
        assert!(rows.iter().all(|r| !r.pinned));
    }

    #[test]
    fn test_pinned_rows_come_first_in_pin_order() {
        let mut store = HierarchicalRowStore::new(sample_tree());
        store.set_pinned("c3", true);
        store.set_pinned("c2", true);
        assert_eq!(ids(&store.visible_rows()), vec!["c3", "c2", "c1"]);

        store.set_pinned("c3", false);
        assert_eq!(ids(&store.visible_rows()), vec!["c2", "c1", "c3"]);
    }

    #[test]
    fn test_pin_precedence_holds_under_sorting() {
        let mut store = HierarchicalRowStore::new(sample_tree());
        store.set_pinned("c2", true);
        store.set_sort(SortKey::Name, SortDirection::Ascending);

        let rows = store.visible_rows();
        assert_eq!(rows[0].node.id, "c2");
        assert!(rows[0].pinned);
        // Unpinned group sorted among themselves
        assert_eq!(&ids(&rows)[1..], &["c3", "c1"]);
    }

    #[test]
    fn test_sort_cycle_asc_desc_off() {
        let mut store = HierarchicalRowStore::new(sample_tree());
        assert_eq!(store.sort_direction(), SortDirection::Unsorted);

        store.sort_by(SortKey::Spend);
        assert_eq!(store.sort_direction(), SortDirection::Ascending);
        assert_eq!(ids(&store.visible_rows()), vec!["c3", "c1", "c2"]);

        store.sort_by(SortKey::Spend);
        assert_eq!(store.sort_direction(), SortDirection::Descending);
        assert_eq!(ids(&store.visible_rows()), vec!["c2", "c1", "c3"]);

        store.sort_by(SortKey::Spend);
        assert_eq!(store.sort_direction(), SortDirection::Unsorted);
        assert_eq!(ids(&store.visible_rows()), vec!["c1", "c2", "c3"]);
    }

    #[test]
    fn test_switching_sort_key_starts_ascending() {
        let mut store = HierarchicalRowStore::new(sample_tree());
        store.sort_by(SortKey::Spend);
        store.sort_by(SortKey::Visits);
        assert_eq!(store.sort_key(), SortKey::Visits);
        assert_eq!(store.sort_direction(), SortDirection::Ascending);
    }

    #[test]
    fn test_sort_is_stable_on_ties() {
        let nodes = vec![
            CampaignNode::leaf("a", "Alpha", CampaignStatus::Active, metrics(100.0, 10)),
            CampaignNode::leaf("b", "Beta", CampaignStatus::Active, metrics(100.0, 10)),
            CampaignNode::leaf("c", "Gamma", CampaignStatus::Active, metrics(100.0, 10)),
        ];
        let mut store = HierarchicalRowStore::new(nodes);

        store.set_sort(SortKey::Spend, SortDirection::Ascending);
        assert_eq!(ids(&store.visible_rows()), vec!["a", "b", "c"]);
        store.set_sort(SortKey::Spend, SortDirection::Descending);
        assert_eq!(ids(&store.visible_rows()), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_children_sorted_with_same_config() {
        let mut store = HierarchicalRowStore::new(sample_tree());
        store.set_expanded("c1", true);
        store.set_expanded("c1-s1", true);
        store.set_sort(SortKey::Visits, SortDirection::Descending);

        let rows = store.visible_rows();
        let ads: Vec<&str> = rows
            .iter()
            .filter(|r| r.depth == 2)
            .map(|r| r.node.id.as_str())
            .collect();
        assert_eq!(ads, vec!["c1-s1-a2", "c1-s1-a1"]);
    }

    #[test]
    fn test_search_filters_rows_at_their_own_level() {
        let mut store = HierarchicalRowStore::new(sample_tree());
        store.set_expanded("c1", true);
        store.set_search("campaign");

        // "Another push" drops out; the ad set under Campaign 1 does not
        // match "campaign" and is dropped with its subtree.
        assert_eq!(ids(&store.visible_rows()), vec!["c1", "c2"]);

        store.set_search("");
        assert_eq!(ids(&store.visible_rows()).len(), 4);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let mut store = HierarchicalRowStore::new(sample_tree());
        store.set_search("ANOTHER");
        assert_eq!(ids(&store.visible_rows()), vec!["c3"]);
    }

    #[test]
    fn test_pinning_a_nested_row_pins_only_that_row() {
        let mut store = HierarchicalRowStore::new(sample_tree());
        store.set_expanded("c1", true);
        store.set_expanded("c1-s1", true);
        store.set_pinned("c1-s1-a2", true);

        let rows = store.visible_rows();
        // Campaign order untouched; within the ad level the pinned ad leads.
        assert_eq!(rows[0].node.id, "c1");
        assert!(!rows[0].pinned);
        let ads: Vec<&str> = rows
            .iter()
            .filter(|r| r.depth == 2)
            .map(|r| r.node.id.as_str())
            .collect();
        assert_eq!(ads, vec!["c1-s1-a2", "c1-s1-a1"]);
    }
}
