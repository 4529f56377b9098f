//! Campaign data source
//!
//! There is no live backend yet: the tree either comes from a JSON fixture
//! on disk or from the built-in sample set. The flatteners below derive the
//! root lists for the Ad Sets and Ads tabs from the same tree.

use crate::model::node::{CampaignNode, CampaignStatus, Metrics};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Load a campaign tree from a JSON fixture
pub fn load_campaigns(path: &Path) -> Result<Vec<CampaignNode>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading campaign fixture {}", path.display()))?;
    let campaigns: Vec<CampaignNode> = serde_json::from_str(&contents)
        .with_context(|| format!("parsing campaign fixture {}", path.display()))?;
    Ok(campaigns)
}

/// Ad sets across all campaigns, roots for the Ad Sets tab
pub fn all_ad_sets(campaigns: &[CampaignNode]) -> Vec<CampaignNode> {
    campaigns
        .iter()
        .flat_map(|campaign| campaign.children.iter().cloned())
        .collect()
}

/// Ads across all campaigns, roots for the Ads tab
pub fn all_ads(campaigns: &[CampaignNode]) -> Vec<CampaignNode> {
    campaigns
        .iter()
        .flat_map(|campaign| campaign.children.iter())
        .flat_map(|ad_set| ad_set.children.iter().cloned())
        .collect()
}

/// Built-in sample data used when no fixture is configured
pub fn sample_campaigns() -> Vec<CampaignNode> {
    let metrics = |spend: f64, meta_roas: f64, roas: f64, clicks: u64, orders: u64, visits: u64| {
        Metrics { spend, meta_roas, roas, clicks, orders, visits }
    };

    vec![
        CampaignNode::leaf(
            "cmp-tab-uk-1",
            "TAB-UK-1",
            CampaignStatus::Active,
            metrics(1240.50, 2.31, 2.05, 1478, 96, 3200),
        )
        .with_children(vec![
            CampaignNode::leaf(
                "set-tab-uk-1a",
                "TAB-UK-1 / Prospecting",
                CampaignStatus::Active,
                metrics(820.00, 2.45, 2.12, 960, 61, 2100),
            )
            .with_children(vec![
                CampaignNode::leaf(
                    "ad-tab-uk-1a-video",
                    "Prospecting · Video 30s",
                    CampaignStatus::Active,
                    metrics(510.00, 2.61, 2.30, 610, 40, 1350),
                ),
                CampaignNode::leaf(
                    "ad-tab-uk-1a-carousel",
                    "Prospecting · Carousel",
                    CampaignStatus::Active,
                    metrics(310.00, 2.18, 1.82, 350, 21, 750),
                ),
            ]),
            CampaignNode::leaf(
                "set-tab-uk-1b",
                "TAB-UK-1 / Retargeting",
                CampaignStatus::Active,
                metrics(420.50, 2.02, 1.91, 518, 35, 1100),
            )
            .with_children(vec![CampaignNode::leaf(
                "ad-tab-uk-1b-static",
                "Retargeting · Static",
                CampaignStatus::Active,
                metrics(420.50, 2.02, 1.91, 518, 35, 1100),
            )]),
        ]),
        CampaignNode::leaf(
            "cmp-tab-uk-2",
            "TAB-UK-2",
            CampaignStatus::Active,
            metrics(980.00, 1.82, 1.66, 1120, 58, 2450),
        )
        .with_children(vec![CampaignNode::leaf(
            "set-tab-uk-2a",
            "TAB-UK-2 / Broad",
            CampaignStatus::Active,
            metrics(980.00, 1.82, 1.66, 1120, 58, 2450),
        )]),
        // Paused campaign with no ad sets yet
        CampaignNode::leaf(
            "cmp-tab-mx-1",
            "TAB-MX-1",
            CampaignStatus::Inactive,
            metrics(145.20, 0.96, 0.88, 210, 4, 480),
        ),
        CampaignNode::leaf(
            "cmp-tab-de-1",
            "TAB-DE-1",
            CampaignStatus::Active,
            metrics(1610.75, 2.64, 2.41, 1890, 131, 4050),
        )
        .with_children(vec![
            CampaignNode::leaf(
                "set-tab-de-1a",
                "TAB-DE-1 / Lookalike",
                CampaignStatus::Active,
                metrics(1010.75, 2.88, 2.60, 1240, 92, 2700),
            )
            .with_children(vec![
                CampaignNode::leaf(
                    "ad-tab-de-1a-ugc",
                    "Lookalike · UGC",
                    CampaignStatus::Active,
                    metrics(640.25, 3.05, 2.74, 790, 63, 1725),
                ),
                CampaignNode::leaf(
                    "ad-tab-de-1a-story",
                    "Lookalike · Story",
                    CampaignStatus::Inactive,
                    metrics(370.50, 2.55, 2.31, 450, 29, 975),
                ),
            ]),
            // Ad set with no ads yet
            CampaignNode::leaf(
                "set-tab-de-1b",
                "TAB-DE-1 / Interests",
                CampaignStatus::Inactive,
                metrics(600.00, 2.21, 2.05, 650, 39, 1350),
            ),
        ]),
        CampaignNode::leaf(
            "cmp-tab-us-1",
            "TAB-US-1",
            CampaignStatus::Active,
            metrics(2120.00, 4.56, 4.02, 2410, 205, 5600),
        )
        .with_children(vec![CampaignNode::leaf(
            "set-tab-us-1a",
            "TAB-US-1 / Launch",
            CampaignStatus::Active,
            metrics(2120.00, 4.56, 4.02, 2410, 205, 5600),
        )
        .with_children(vec![CampaignNode::leaf(
            "ad-tab-us-1a-hero",
            "Launch · Hero video",
            CampaignStatus::Active,
            metrics(2120.00, 4.56, 4.02, 2410, 205, 5600),
        )])]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_tree_has_the_expected_shape() {
        let campaigns = sample_campaigns();
        assert_eq!(campaigns.len(), 5);
        // One campaign with no ad sets, one ad set with no ads
        assert!(campaigns.iter().any(|c| !c.has_children()));
        assert!(campaigns
            .iter()
            .flat_map(|c| c.children.iter())
            .any(|s| !s.has_children()));
    }

    #[test]
    fn test_flatteners_cover_every_level() {
        let campaigns = sample_campaigns();
        let ad_sets = all_ad_sets(&campaigns);
        let ads = all_ads(&campaigns);

        assert_eq!(ad_sets.len(), 6);
        assert_eq!(ads.len(), 6);
        assert!(ads.iter().all(|ad| !ad.has_children()));
    }

    #[test]
    fn test_fixture_round_trip() {
        let campaigns = sample_campaigns();
        let json = serde_json::to_string(&campaigns).unwrap();
        let parsed: Vec<CampaignNode> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), campaigns.len());
        assert_eq!(parsed[0].children.len(), campaigns[0].children.len());
    }
}
