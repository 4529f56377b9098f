//! External service interactions
//!
//! This module contains services for the app's external collaborators:
//! - Identity provider client (sessions, sign-up, email verification)
//! - Campaign data source (fixture loading, sample data)
//! - Settings persistence (dual-backend key-value store)
//! - CSV export

pub mod auth;
pub mod data;
pub mod export;
pub mod settings;

pub use auth::{
    AuthError, AuthErrorCode, AuthService, MockAuthService, OAuthProvider, SessionStatus,
    SignUpHandle,
};
pub use data::{all_ad_sets, all_ads, load_campaigns, sample_campaigns};
pub use export::{default_export_path, export_visible_rows};
pub use settings::{
    default_store, DualStore, SettingsStore, DEFAULT_MARKETPLACE_KEY, MARKETPLACE_KEY,
};
