//! Data models for the campaign hierarchy (campaigns, ad sets, ads)

use serde::{Deserialize, Serialize};

/// Activation state reported for a row of the hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CampaignStatus {
    Active,
    Inactive,
}

impl CampaignStatus {
    pub fn label(&self) -> &str {
        match self {
            CampaignStatus::Active => "Active",
            CampaignStatus::Inactive => "Inactive",
        }
    }

    /// Text key used when sorting the status column
    pub fn sort_key(&self) -> &str {
        match self {
            CampaignStatus::Active => "ACTIVE",
            CampaignStatus::Inactive => "INACTIVE",
        }
    }
}

/// Performance figures attached to every node of the hierarchy
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    #[serde(default)]
    pub spend: f64,
    /// ROAS as reported by the ad platform
    #[serde(default)]
    pub meta_roas: f64,
    /// ROAS as attributed by Pixamp
    #[serde(default)]
    pub roas: f64,
    #[serde(default)]
    pub clicks: u64,
    #[serde(default)]
    pub orders: u64,
    #[serde(default)]
    pub visits: u64,
}

/// One row of the campaign → ad set → ad tree.
///
/// The same shape is used at every level; leaves simply have no children.
/// An absent `children` field in a fixture and an empty list are equivalent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignNode {
    pub id: String,
    pub name: String,
    pub status: CampaignStatus,
    #[serde(flatten)]
    pub metrics: Metrics,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<CampaignNode>,
}

impl CampaignNode {
    pub fn leaf(
        id: impl Into<String>,
        name: impl Into<String>,
        status: CampaignStatus,
        metrics: Metrics,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status,
            metrics,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<CampaignNode>) -> Self {
        self.children = children;
        self
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_children_equals_empty_children() {
        let without: CampaignNode =
            serde_json::from_str(r#"{"id":"a","name":"A","status":"ACTIVE"}"#).unwrap();
        let with: CampaignNode =
            serde_json::from_str(r#"{"id":"a","name":"A","status":"ACTIVE","children":[]}"#)
                .unwrap();

        assert!(!without.has_children());
        assert!(!with.has_children());
        assert_eq!(without.children.len(), with.children.len());
    }

    #[test]
    fn test_metrics_default_to_zero() {
        let node: CampaignNode =
            serde_json::from_str(r#"{"id":"a","name":"A","status":"INACTIVE"}"#).unwrap();
        assert_eq!(node.metrics.spend, 0.0);
        assert_eq!(node.metrics.clicks, 0);
        assert_eq!(node.status, CampaignStatus::Inactive);
    }
}
