//! UI state - presentation state separate from domain data

/// Tab selection over the three table variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Campaigns,
    AdSets,
    Ads,
}

impl Tab {
    pub fn all() -> Vec<Tab> {
        vec![Tab::Campaigns, Tab::AdSets, Tab::Ads]
    }

    pub fn name(&self) -> &str {
        match self {
            Tab::Campaigns => "Campaigns",
            Tab::AdSets => "Ad Sets",
            Tab::Ads => "Ads",
        }
    }
}

/// Top-level screen the application is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Splash,
    SignIn,
    SignUp,
    VerifyEmail,
    Running,
}
