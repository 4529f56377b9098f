//! CSV export of the table currently on screen

use crate::model::aggregate::{attributed_sales, Aggregate};
use crate::model::row_store::VisibleRow;
use anyhow::{Context, Result};
use chrono::Local;
use std::path::{Path, PathBuf};

/// Export file name for a tab, stamped so repeated exports never collide
pub fn default_export_path(tab_name: &str) -> PathBuf {
    let stamp = Local::now().format("%Y%m%d-%H%M%S");
    let slug = tab_name.to_lowercase().replace(' ', "-");
    PathBuf::from(format!("pixamp-{}-{}.csv", slug, stamp))
}

/// Write the visible rows plus a totals line to `path`.
///
/// Rows come out exactly as displayed: same order, children indented under
/// their parent via the depth column.
pub fn export_visible_rows(path: &Path, rows: &[VisibleRow<'_>], totals: &Aggregate) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating export file {}", path.display()))?;

    writer.write_record([
        "depth", "name", "status", "spend", "meta_roas", "roas", "clicks", "orders", "visits",
        "sales",
    ])?;

    for row in rows {
        let m = &row.node.metrics;
        writer.write_record([
            row.depth.to_string(),
            row.node.name.clone(),
            row.node.status.label().to_string(),
            format!("{:.2}", m.spend),
            format!("{:.2}", m.meta_roas),
            format!("{:.2}", m.roas),
            m.clicks.to_string(),
            m.orders.to_string(),
            m.visits.to_string(),
            attributed_sales(m.visits).to_string(),
        ])?;
    }

    writer.write_record([
        String::new(),
        "Totals".to_string(),
        String::new(),
        format!("{:.2}", totals.total_spend),
        format!("{:.2}", totals.mean_meta_roas),
        format!("{:.2}", totals.mean_roas),
        totals.total_clicks.to_string(),
        totals.total_orders.to_string(),
        totals.total_visits.to_string(),
        totals.total_sales().to_string(),
    ])?;

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::aggregate;
    use crate::model::node::{CampaignNode, CampaignStatus, Metrics};
    use crate::model::row_store::HierarchicalRowStore;

    #[test]
    fn test_export_matches_the_visible_rows() {
        let nodes = vec![CampaignNode::leaf(
            "c1",
            "Campaign 1",
            CampaignStatus::Active,
            Metrics { spend: 120.0, clicks: 78, visits: 200, ..Metrics::default() },
        )
        .with_children(vec![CampaignNode::leaf(
            "c1-s1",
            "Ad Set 1-1",
            CampaignStatus::Active,
            Metrics { spend: 120.0, clicks: 78, visits: 200, ..Metrics::default() },
        )])];

        let mut store = HierarchicalRowStore::new(nodes);
        store.set_expanded("c1", true);
        let rows = store.visible_rows();
        let totals = aggregate::project(store.nodes());

        let path = std::env::temp_dir().join(format!("pixamp-export-test-{}.csv", std::process::id()));
        export_visible_rows(&path, &rows, &totals).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let records: Vec<csv::StringRecord> =
            reader.records().collect::<Result<_, _>>().unwrap();

        // Two data rows plus the totals line
        assert_eq!(records.len(), 3);
        assert_eq!(&records[0][1], "Campaign 1");
        assert_eq!(&records[1][0], "1");
        assert_eq!(&records[1][1], "Ad Set 1-1");
        assert_eq!(&records[2][1], "Totals");
        assert_eq!(&records[2][3], "120.00");

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_export_path_carries_the_tab_slug() {
        let path = default_export_path("Ad Sets");
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("pixamp-ad-sets-"));
        assert!(name.ends_with(".csv"));
    }
}
