//! Roll-up figures for the totals row and the overview cards
//!
//! Aggregation is a pure projection over the full node set of a tab,
//! independent of expansion or filtering, recomputed on every read. At the
//! dozens-of-rows scale involved there is nothing to cache.

use crate::model::node::CampaignNode;

/// Attributed sales are synthesized from visits until real order data is
/// wired in. Placeholder projection rate, not a business figure.
pub const SALES_PER_VISIT: f64 = 0.1;

/// Synthetic sales figure for a visit count
pub fn attributed_sales(visits: u64) -> u64 {
    (visits as f64 * SALES_PER_VISIT).floor() as u64
}

/// Summary statistics over one table's row set
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Aggregate {
    pub total_spend: f64,
    pub total_clicks: u64,
    pub total_orders: u64,
    pub total_visits: u64,
    /// Arithmetic mean; 0 over an empty row set
    pub mean_meta_roas: f64,
    pub mean_roas: f64,
}

impl Aggregate {
    pub fn total_sales(&self) -> u64 {
        attributed_sales(self.total_visits)
    }
}

/// Compute sums for the additive fields and means for the rate fields.
///
/// The mean of an empty set is defined as 0 so an empty table renders a
/// zeroed totals row instead of NaN.
pub fn project(nodes: &[CampaignNode]) -> Aggregate {
    let mut agg = Aggregate::default();
    for node in nodes {
        agg.total_spend += node.metrics.spend;
        agg.total_clicks += node.metrics.clicks;
        agg.total_orders += node.metrics.orders;
        agg.total_visits += node.metrics.visits;
    }
    if !nodes.is_empty() {
        let count = nodes.len() as f64;
        agg.mean_meta_roas = nodes.iter().map(|n| n.metrics.meta_roas).sum::<f64>() / count;
        agg.mean_roas = nodes.iter().map(|n| n.metrics.roas).sum::<f64>() / count;
    }
    agg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::node::{CampaignStatus, Metrics};

    fn node(id: &str, spend: f64, clicks: u64, roas: f64) -> CampaignNode {
        CampaignNode::leaf(
            id,
            id.to_uppercase(),
            CampaignStatus::Active,
            Metrics {
                spend,
                clicks,
                meta_roas: roas,
                roas,
                ..Metrics::default()
            },
        )
    }

    #[test]
    fn test_empty_set_means_are_zero() {
        let agg = project(&[]);
        assert_eq!(agg.mean_meta_roas, 0.0);
        assert_eq!(agg.mean_roas, 0.0);
        assert_eq!(agg.total_spend, 0.0);
    }

    #[test]
    fn test_sums_over_three_rows() {
        let nodes = vec![
            node("a", 120.0, 78, 2.0),
            node("b", 234.0, 156, 3.0),
            node("c", 140.0, 100, 4.0),
        ];
        let agg = project(&nodes);
        assert_eq!(agg.total_spend, 494.0);
        assert_eq!(agg.total_clicks, 334);
        assert_eq!(agg.mean_roas, 3.0);
    }

    #[test]
    fn test_sales_floor_the_visit_projection() {
        assert_eq!(attributed_sales(0), 0);
        assert_eq!(attributed_sales(9), 0);
        assert_eq!(attributed_sales(10), 1);
        assert_eq!(attributed_sales(199), 19);
    }

    #[test]
    fn test_aggregate_ignores_expansion_state() {
        // project() only ever sees the node list; there is no view state
        // involved, so a collapsed tree and an expanded one aggregate alike.
        let parent = node("p", 50.0, 10, 1.0).with_children(vec![node("c", 25.0, 5, 1.0)]);
        let agg = project(std::slice::from_ref(&parent));
        assert_eq!(agg.total_spend, 50.0);
    }
}
