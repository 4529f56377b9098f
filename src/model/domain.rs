//! Domain state - business/data state separate from UI concerns

use crate::model::daterange::{DatePreset, PeriodSelection};
use crate::model::node::CampaignNode;
use chrono::NaiveDate;

/// Domain state containing all business data
pub struct DomainState {
    /// Campaign → ad set → ad tree as loaded from the data source
    pub campaigns: Vec<CampaignNode>,

    /// Active reporting period
    pub period: PeriodSelection,

    /// "Today" as captured at startup; all preset math is relative to it
    pub today: NaiveDate,

    /// Currently selected marketplace code
    pub marketplace: Option<String>,

    /// Default marketplace code, tracked independently of the selection
    pub default_marketplace: Option<String>,

    /// Active session id, present once sign-in completed
    pub session_id: Option<String>,

    /// Email of the signed-in user, for the greeting
    pub user_email: Option<String>,

    /// Domains registered through the CNAME wizard
    pub cname_domains: Vec<String>,

    /// Connection status of the linked ad accounts
    pub amazon_connected: bool,
    pub meta_connected: bool,

    /// Request counter shown on the overview card
    pub requests_last_week: u64,
}

impl DomainState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            campaigns: Vec::new(),
            period: PeriodSelection::Preset(DatePreset::Last7Days),
            today,
            marketplace: None,
            default_marketplace: None,
            session_id: None,
            user_email: None,
            cname_domains: Vec::new(),
            amazon_connected: true,
            meta_connected: false,
            requests_last_week: 14_056,
        }
    }

    pub fn cname_active(&self) -> bool {
        !self.cname_domains.is_empty()
    }

    /// Display name for the greeting, taken from the email local part
    pub fn display_name(&self) -> String {
        self.user_email
            .as_deref()
            .and_then(|email| email.split('@').next())
            .map(|name| name.to_string())
            .unwrap_or_else(|| "there".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_display_name_uses_email_local_part() {
        let mut domain = DomainState::new(NaiveDate::from_ymd_opt(2024, 11, 20).unwrap());
        assert_eq!(domain.display_name(), "there");

        domain.user_email = Some("romain@pixamp.xyz".to_string());
        assert_eq!(domain.display_name(), "romain");
    }

    #[test]
    fn test_cname_goes_active_with_a_registered_domain() {
        let mut domain = DomainState::new(NaiveDate::from_ymd_opt(2024, 11, 20).unwrap());
        assert!(!domain.cname_active());
        domain.cname_domains.push("social.pixamp.xyz".to_string());
        assert!(domain.cname_active());
    }
}
