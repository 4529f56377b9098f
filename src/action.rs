//! Action enum - All possible application actions
//!
//! Actions are discrete operations that the application can perform.
//! Components emit Actions in response to events, and the App processes
//! them to update state.

use crate::model::daterange::{DatePreset, DateRange};
use crate::model::row_store::SortKey;
use crate::model::ui::AppMode;
use crate::model::wizard::WizardEvent;
use crate::services::auth::OAuthProvider;
use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick for time-based updates
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Force quit without confirmation
    ForceQuit,
    /// Transition from splash to the first real screen
    SplashComplete,
    /// Switch to another screen
    Navigate(AppMode),
    /// Clear the session and return to sign-in
    SignOut,

    // ─────────────────────────────────────────────────────────────────────────
    // Auth Forms
    // ─────────────────────────────────────────────────────────────────────────
    /// Submit the sign-in form
    SubmitSignIn,
    /// Submit the sign-up form
    SubmitSignUp,
    /// Submit the one-time verification code
    SubmitVerification,
    /// Start the OAuth redirect flow
    OAuthSignIn(OAuthProvider),

    // ─────────────────────────────────────────────────────────────────────────
    // Table Navigation
    // ─────────────────────────────────────────────────────────────────────────
    /// Move to the next visible row
    NextItem,
    /// Move to the previous visible row
    PrevItem,
    /// Move to the next tab
    NextTab,
    /// Move to the previous tab
    PrevTab,
    /// Jump to the first row
    FirstItem,
    /// Jump to the last row
    LastItem,

    // ─────────────────────────────────────────────────────────────────────────
    // Table View State
    // ─────────────────────────────────────────────────────────────────────────
    /// Expand or collapse the selected row
    ToggleExpand,
    /// Pin the selected row, or ask to unpin it when already pinned
    TogglePin,
    /// Sort by a column, cycling direction on repeats
    SortBy(SortKey),
    /// Write the visible rows of the active tab to a CSV file
    ExportCsv,
    /// Reload campaign data from the configured source
    RefreshData,

    // ─────────────────────────────────────────────────────────────────────────
    // Search
    // ─────────────────────────────────────────────────────────────────────────
    /// Enter search mode
    EnterSearchMode,
    /// Exit search mode
    ExitSearchMode,
    /// Add character to search query
    SearchInput(char),
    /// Remove last character from search query
    SearchBackspace,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    /// Open quit confirmation dialog
    OpenQuitDialog,
    /// Open the date-range picker
    OpenDateRange,
    /// Open the marketplace selector
    OpenMarketplace,
    /// Open the CNAME registration wizard
    OpenCnameWizard,
    /// Open the keyboard shortcut reference
    OpenHelp,
    /// Close the current modal
    CloseModal,
    /// Confirm the current modal action
    ConfirmModal,

    // ─────────────────────────────────────────────────────────────────────────
    // Date Range
    // ─────────────────────────────────────────────────────────────────────────
    /// Apply a named preset and close the picker
    ApplyPreset(DatePreset),
    /// Apply a validated custom range and close the picker
    ApplyCustomRange(DateRange),

    // ─────────────────────────────────────────────────────────────────────────
    // Marketplace
    // ─────────────────────────────────────────────────────────────────────────
    /// Select a marketplace (persisted)
    SelectMarketplace(String),
    /// Mark a marketplace as the default (persisted separately)
    SetDefaultMarketplace(String),
    /// Drop the default marketplace without touching the selection
    RemoveDefaultMarketplace,

    // ─────────────────────────────────────────────────────────────────────────
    // CNAME Wizard
    // ─────────────────────────────────────────────────────────────────────────
    /// Drive the wizard state machine
    Wizard(WizardEvent),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::SplashComplete => write!(f, "SplashComplete"),
            Action::Navigate(mode) => write!(f, "Navigate({:?})", mode),
            Action::SignOut => write!(f, "SignOut"),
            Action::SubmitSignIn => write!(f, "SubmitSignIn"),
            Action::SubmitSignUp => write!(f, "SubmitSignUp"),
            Action::SubmitVerification => write!(f, "SubmitVerification"),
            Action::OAuthSignIn(provider) => write!(f, "OAuthSignIn({:?})", provider),
            Action::NextItem => write!(f, "NextItem"),
            Action::PrevItem => write!(f, "PrevItem"),
            Action::NextTab => write!(f, "NextTab"),
            Action::PrevTab => write!(f, "PrevTab"),
            Action::FirstItem => write!(f, "FirstItem"),
            Action::LastItem => write!(f, "LastItem"),
            Action::ToggleExpand => write!(f, "ToggleExpand"),
            Action::TogglePin => write!(f, "TogglePin"),
            Action::SortBy(key) => write!(f, "SortBy({:?})", key),
            Action::ExportCsv => write!(f, "ExportCsv"),
            Action::RefreshData => write!(f, "RefreshData"),
            Action::EnterSearchMode => write!(f, "EnterSearchMode"),
            Action::ExitSearchMode => write!(f, "ExitSearchMode"),
            Action::SearchInput(c) => write!(f, "SearchInput('{}')", c),
            Action::SearchBackspace => write!(f, "SearchBackspace"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenDateRange => write!(f, "OpenDateRange"),
            Action::OpenMarketplace => write!(f, "OpenMarketplace"),
            Action::OpenCnameWizard => write!(f, "OpenCnameWizard"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::ConfirmModal => write!(f, "ConfirmModal"),
            Action::ApplyPreset(preset) => write!(f, "ApplyPreset({})", preset.label()),
            Action::ApplyCustomRange(range) => write!(f, "ApplyCustomRange({})", range.format()),
            Action::SelectMarketplace(code) => write!(f, "SelectMarketplace({})", code),
            Action::SetDefaultMarketplace(code) => write!(f, "SetDefaultMarketplace({})", code),
            Action::RemoveDefaultMarketplace => write!(f, "RemoveDefaultMarketplace"),
            Action::Wizard(event) => write!(f, "Wizard({:?})", event),
        }
    }
}
