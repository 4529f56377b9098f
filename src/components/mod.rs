//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering
//! logic. Components communicate through Actions rather than direct state
//! mutation.

pub mod auth_form;
pub mod cname_wizard_dialog;
pub mod date_range_dialog;
pub mod help_dialog;
pub mod home;
pub mod layout;
pub mod marketplace_dialog;
pub mod overview;
pub mod perf_table;
pub mod quit_dialog;
pub mod sign_in;
pub mod sign_up;
pub mod splash;
pub mod unpin_dialog;
pub mod verify_email;

pub use cname_wizard_dialog::CnameWizardDialog;
pub use date_range_dialog::DateRangeDialog;
pub use help_dialog::HelpDialog;
pub use home::{draw_dashboard, DashboardContext, HomeComponent};
pub use layout::{calculate_main_layout, centered_popup};
pub use marketplace_dialog::MarketplaceDialog;
pub use quit_dialog::QuitDialog;
pub use sign_in::SignInComponent;
pub use sign_up::SignUpComponent;
pub use splash::SplashComponent;
pub use unpin_dialog::UnpinDialog;
pub use verify_email::VerifyEmailComponent;
