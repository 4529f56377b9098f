//! Root application component
//!
//! The App struct implements the Component trait, acting as the root
//! component that delegates event handling and rendering to child
//! components. App coordinates between components and the services; the
//! business rules live in the model layer.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    draw_dashboard, CnameWizardDialog, DashboardContext, DateRangeDialog, HelpDialog,
    HomeComponent, MarketplaceDialog, QuitDialog, SignInComponent, SignUpComponent,
    SplashComponent, UnpinDialog, VerifyEmailComponent,
};
use crate::config::Config;
use crate::model::aggregate;
use crate::model::daterange::PeriodSelection;
use crate::model::domain::DomainState;
use crate::model::modal::{Modal, ModalStack};
use crate::model::ui::AppMode;
use crate::model::wizard::{CnameWizard, WizardExit};
use crate::services::auth::{AuthErrorCode, AuthService, MockAuthService, SessionStatus, SignUpHandle};
use crate::services::settings::{
    CookieFileStore, DualStore, JsonFileStore, SettingsStore, DEFAULT_MARKETPLACE_KEY,
    MARKETPLACE_KEY,
};
use crate::services::{self, data};
use anyhow::Result;
use chrono::Local;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};
use std::path::{Path, PathBuf};

/// Main application state - coordinates between components
pub struct App {
    /// Current application mode
    pub mode: AppMode,

    /// Mode to enter once the splash finishes
    pub next_mode_after_splash: AppMode,

    /// Domain state (business data)
    pub domain: DomainState,

    /// Modal overlay stack
    pub modals: ModalStack,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Error message to display
    pub error: Option<String>,

    /// Status message to display
    pub status_message: Option<String>,

    /// Identity provider client
    auth: MockAuthService,

    /// Marketplace persistence (JSON settings + cookie mirror)
    settings: DualStore<JsonFileStore, CookieFileStore>,

    /// Sign-up waiting for its email verification code
    pending_sign_up: Option<SignUpHandle>,

    /// Persisted app config and where it lives
    config: Config,
    config_dir: PathBuf,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub splash: SplashComponent,
    pub sign_in: SignInComponent,
    pub sign_up: SignUpComponent,
    pub verify_email: VerifyEmailComponent,
    pub home: HomeComponent,
    pub quit_dialog: QuitDialog,
    pub unpin_dialog: UnpinDialog,
    pub date_range_dialog: DateRangeDialog,
    pub marketplace_dialog: MarketplaceDialog,
    pub wizard_dialog: CnameWizardDialog,
    pub help_dialog: HelpDialog,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Create a new App instance from the on-disk config
    pub fn new() -> App {
        let config_dir =
            Config::config_dir().unwrap_or_else(|| PathBuf::from(".pixamp-tui"));
        let config = Config::load_from(&config_dir).unwrap_or_default();
        Self::with_parts(config, &config_dir)
    }

    fn with_parts(config: Config, config_dir: &Path) -> App {
        let today = Local::now().date_naive();
        let mut domain = DomainState::new(today);
        let settings = services::settings::default_store(config_dir.to_path_buf());

        let mut error = None;
        let campaigns = match config.fixture_path.as_deref() {
            Some(path) => match data::load_campaigns(Path::new(path)) {
                Ok(campaigns) => campaigns,
                Err(e) => {
                    error = Some(format!("{:#}; falling back to sample data", e));
                    data::sample_campaigns()
                }
            },
            None => data::sample_campaigns(),
        };

        domain.marketplace = settings.get(MARKETPLACE_KEY);
        domain.default_marketplace = settings.get(DEFAULT_MARKETPLACE_KEY);

        // A stored session token skips the auth screens
        let next_mode = if config.session_token.is_some() {
            domain.session_id = config.session_token.clone();
            domain.user_email = config.user_email.clone();
            AppMode::Running
        } else {
            AppMode::SignIn
        };

        App {
            mode: AppMode::Splash,
            next_mode_after_splash: next_mode,
            domain,
            modals: ModalStack::new(),
            should_quit: false,
            error,
            status_message: None,
            auth: MockAuthService::new(),
            settings,
            pending_sign_up: None,
            config,
            config_dir: config_dir.to_path_buf(),
            splash: SplashComponent::new(),
            sign_in: SignInComponent::new(),
            sign_up: SignUpComponent::new(),
            verify_email: VerifyEmailComponent::new(),
            home: HomeComponent::new(campaigns),
            quit_dialog: QuitDialog,
            unpin_dialog: UnpinDialog,
            date_range_dialog: DateRangeDialog::new(),
            marketplace_dialog: MarketplaceDialog::new(),
            wizard_dialog: CnameWizardDialog::new(),
            help_dialog: HelpDialog::default(),
        }
    }

    /// Record a completed authentication and enter the dashboard
    fn complete_sign_in(&mut self, email: Option<String>, session_id: String) {
        self.domain.session_id = Some(session_id.clone());
        self.domain.user_email = email.clone();
        self.config.session_token = Some(session_id);
        self.config.user_email = email;
        let _ = self.config.save_to(&self.config_dir);
        self.pending_sign_up = None;
        self.mode = AppMode::Running;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Auth Flows
    // ─────────────────────────────────────────────────────────────────────────

    fn submit_sign_in(&mut self) {
        let email = self.sign_in.form.email.trim().to_string();
        let password = self.sign_in.form.password.clone();

        match self.auth.create_session(&email, &password) {
            Ok(SessionStatus::Complete { session_id }) => {
                match self.auth.set_active_session(&session_id) {
                    Ok(()) => self.complete_sign_in(Some(email), session_id),
                    Err(err) => self.sign_in.form.error = Some(err.message),
                }
            }
            Ok(SessionStatus::NeedsFirstFactor) => {
                self.sign_in.form.error =
                    Some("Please complete the first authentication step.".to_string());
            }
            Err(err) => {
                self.sign_in.form.error = Some(err.message);
            }
        }
        // The submit guard is released on every path
        self.sign_in.form.loading = false;
    }

    fn submit_sign_up(&mut self) {
        let email = self.sign_up.form.email.trim().to_string();
        let password = self.sign_up.form.password.clone();

        match self.auth.create_sign_up(&email, &password) {
            Ok(handle) => match self.auth.prepare_email_verification(&handle) {
                Ok(()) => {
                    self.verify_email.set_email(&handle.email);
                    self.pending_sign_up = Some(handle);
                    self.mode = AppMode::VerifyEmail;
                }
                Err(err) => self.sign_up.form.error = Some(err.message),
            },
            Err(err) if err.code == AuthErrorCode::IdentifierAlreadyExists => {
                // Message plus a redirect back to sign-in
                self.mode = AppMode::SignIn;
                self.sign_in.form.reset();
                self.sign_in.form.error = Some(err.message);
            }
            Err(err) => {
                self.sign_up.form.error = Some(err.message);
            }
        }
        self.sign_up.form.loading = false;
    }

    fn submit_verification(&mut self) {
        let code = self.verify_email.code.clone();
        match self.pending_sign_up.clone() {
            Some(handle) => match self.auth.attempt_email_verification(&handle, &code) {
                Ok(SessionStatus::Complete { session_id }) => {
                    match self.auth.set_active_session(&session_id) {
                        Ok(()) => {
                            self.status_message =
                                Some("Verification successful! Your email has been verified.".to_string());
                            self.complete_sign_in(Some(handle.email), session_id);
                        }
                        Err(err) => self.verify_email.error = Some(err.message),
                    }
                }
                Ok(SessionStatus::NeedsFirstFactor) => {
                    self.verify_email.error =
                        Some("Verification failed. Please check the OTP and try again.".to_string());
                }
                Err(err) => self.verify_email.error = Some(err.message),
            },
            None => {
                self.verify_email.error =
                    Some("An error occurred during verification. Please try again.".to_string());
            }
        }
        self.verify_email.loading = false;
    }

    fn oauth_sign_in(&mut self, provider: crate::services::auth::OAuthProvider) {
        match self.auth.authenticate_with_redirect(provider) {
            Ok(SessionStatus::Complete { session_id }) => {
                match self.auth.set_active_session(&session_id) {
                    Ok(()) => self.complete_sign_in(None, session_id),
                    Err(err) => self.sign_in.form.error = Some(err.message),
                }
            }
            Ok(SessionStatus::NeedsFirstFactor) | Err(_) => {
                self.sign_in.form.error =
                    Some("An error occurred during Google sign-in. Please try again.".to_string());
            }
        }
        self.sign_in.form.loading = false;
    }

    fn sign_out(&mut self) {
        self.domain.session_id = None;
        self.domain.user_email = None;
        self.config.session_token = None;
        self.config.user_email = None;
        let _ = self.config.save_to(&self.config_dir);
        self.pending_sign_up = None;
        self.sign_in.form.reset();
        self.mode = AppMode::SignIn;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Dashboard Helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn toggle_pin_selected(&mut self) {
        if let Some((id, name, pinned)) = self.home.selected_row() {
            if pinned {
                self.modals.push(Modal::UnpinConfirm { id, name });
            } else {
                self.home.active_store_mut().set_pinned(&id, true);
                self.status_message = Some(format!("Pinned '{}'", name));
            }
        }
    }

    fn export_active_tab(&mut self) {
        let path = services::default_export_path(self.home.active_tab.name());
        let result = {
            let store = self.home.active_store();
            let rows = store.visible_rows();
            let totals = aggregate::project(store.nodes());
            services::export_visible_rows(&path, &rows, &totals).map(|_| rows.len())
        };
        match result {
            Ok(count) => {
                self.status_message =
                    Some(format!("Exported {} rows to {}", count, path.display()));
            }
            Err(err) => self.error = Some(format!("{:#}", err)),
        }
    }

    fn refresh_data(&mut self) {
        let campaigns = match self.config.fixture_path.as_deref() {
            Some(path) => match data::load_campaigns(Path::new(path)) {
                Ok(campaigns) => campaigns,
                Err(err) => {
                    self.error = Some(format!("{:#}", err));
                    return;
                }
            },
            None => data::sample_campaigns(),
        };
        self.error = None;
        self.home.set_campaigns(campaigns);
        self.status_message = Some("Campaign data refreshed".to_string());
    }

    fn refresh_marketplace_dialog(&mut self) {
        self.marketplace_dialog.set_context(
            self.domain.marketplace.as_deref(),
            self.domain.default_marketplace.as_deref(),
        );
    }

    fn handle_modal_key_event(&mut self, modal: &Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.handle_key_event(key),
            Modal::UnpinConfirm { .. } => self.unpin_dialog.handle_key_event(key),
            Modal::DateRange => self.date_range_dialog.handle_key_event(key),
            Modal::Marketplace => self.marketplace_dialog.handle_key_event(key),
            Modal::CnameWizard => self.wizard_dialog.handle_key_event(key),
            Modal::Help => self.help_dialog.handle_key_event(key),
        }
    }

    fn handle_search_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        use crossterm::event::KeyCode;
        let action = match key.code {
            KeyCode::Esc | KeyCode::Enter => Some(Action::ExitSearchMode),
            KeyCode::Backspace => Some(Action::SearchBackspace),
            KeyCode::Char(c) => Some(Action::SearchInput(c)),
            _ => None,
        };
        Ok(action)
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: &Modal) -> Result<()> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.draw(frame, area),
            Modal::UnpinConfirm { name, .. } => {
                self.unpin_dialog.draw_with_name(frame, area, name)
            }
            Modal::DateRange => self.date_range_dialog.draw(frame, area),
            Modal::Marketplace => self.marketplace_dialog.draw(frame, area),
            Modal::CnameWizard => self.wizard_dialog.draw(frame, area),
            Modal::Help => self.help_dialog.draw(frame, area),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn init(&mut self) -> Result<()> {
        self.splash.init()?;
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match self.mode {
            AppMode::Splash => self.splash.handle_key_event(key),
            AppMode::SignIn => self.sign_in.handle_key_event(key),
            AppMode::SignUp => self.sign_up.handle_key_event(key),
            AppMode::VerifyEmail => self.verify_email.handle_key_event(key),
            AppMode::Running => {
                if let Some(modal) = self.modals.top().cloned() {
                    self.handle_modal_key_event(&modal, key)
                } else if self.home.search_mode {
                    self.handle_search_key_event(key)
                } else {
                    self.home.handle_key_event(key)
                }
            }
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => {
                if self.mode == AppMode::Splash && self.splash.is_complete() {
                    return Ok(Some(Action::SplashComplete));
                }
            }
            Action::SplashComplete => {
                self.mode = self.next_mode_after_splash;
            }
            Action::ForceQuit => {
                self.should_quit = true;
            }
            Action::Resize(_, _) => {}
            Action::Navigate(mode) => {
                if mode == AppMode::SignUp {
                    self.sign_up.form.reset();
                }
                if mode == AppMode::SignIn {
                    self.sign_in.form.reset();
                }
                self.mode = mode;
            }
            Action::SignOut => self.sign_out(),

            // ─────────────────────────────────────────────────────────────────
            // Auth
            // ─────────────────────────────────────────────────────────────────
            Action::SubmitSignIn => self.submit_sign_in(),
            Action::SubmitSignUp => self.submit_sign_up(),
            Action::SubmitVerification => self.submit_verification(),
            Action::OAuthSignIn(provider) => self.oauth_sign_in(provider),

            // ─────────────────────────────────────────────────────────────────
            // Navigation (delegate to HomeComponent)
            // ─────────────────────────────────────────────────────────────────
            Action::NextItem => self.home.next(),
            Action::PrevItem => self.home.previous(),
            Action::NextTab => self.home.next_tab(),
            Action::PrevTab => self.home.previous_tab(),
            Action::FirstItem => self.home.select_first(),
            Action::LastItem => self.home.select_last(),

            // ─────────────────────────────────────────────────────────────────
            // Table View State
            // ─────────────────────────────────────────────────────────────────
            Action::ToggleExpand => self.home.toggle_expand_selected(),
            Action::TogglePin => self.toggle_pin_selected(),
            Action::SortBy(key) => self.home.sort_by(key),
            Action::ExportCsv => self.export_active_tab(),
            Action::RefreshData => self.refresh_data(),

            // ─────────────────────────────────────────────────────────────────
            // Search (delegate to HomeComponent)
            // ─────────────────────────────────────────────────────────────────
            Action::EnterSearchMode => self.home.enter_search_mode(),
            Action::ExitSearchMode => self.home.exit_search_mode(),
            Action::SearchInput(c) => self.home.search_input(c),
            Action::SearchBackspace => self.home.search_backspace(),

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => {
                self.modals.push(Modal::QuitConfirm);
            }
            Action::OpenDateRange => {
                let current = match self.domain.period {
                    PeriodSelection::Preset(preset) => Some(preset),
                    PeriodSelection::Custom(_) => None,
                };
                self.date_range_dialog.open(current);
                self.modals.push(Modal::DateRange);
            }
            Action::OpenMarketplace => {
                self.marketplace_dialog.open(
                    self.domain.marketplace.as_deref(),
                    self.domain.default_marketplace.as_deref(),
                );
                self.modals.push(Modal::Marketplace);
            }
            Action::OpenCnameWizard => {
                // The flow restarts from the first step on every opening
                self.wizard_dialog.wizard = CnameWizard::new();
                self.modals.push(Modal::CnameWizard);
            }
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.push(Modal::Help);
            }
            Action::CloseModal => {
                self.modals.pop();
            }
            Action::ConfirmModal => {
                if let Some(Modal::UnpinConfirm { id, name }) = self.modals.top().cloned() {
                    self.home.active_store_mut().set_pinned(&id, false);
                    self.status_message = Some(format!("Unpinned '{}'", name));
                    self.modals.pop();
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Date Range
            // ─────────────────────────────────────────────────────────────────
            Action::ApplyPreset(preset) => {
                self.domain.period = PeriodSelection::Preset(preset);
                self.modals.pop();
                self.status_message = Some(format!("Period set to {}", preset.label()));
            }
            Action::ApplyCustomRange(range) => {
                self.domain.period = PeriodSelection::Custom(range);
                self.modals.pop();
                self.status_message = Some(format!("Period set to {}", range.format()));
            }

            // ─────────────────────────────────────────────────────────────────
            // Marketplace
            // ─────────────────────────────────────────────────────────────────
            Action::SelectMarketplace(code) => {
                if let Err(err) = self.settings.set(MARKETPLACE_KEY, &code) {
                    self.error = Some(format!("{:#}", err));
                }
                self.domain.marketplace = Some(code.clone());
                self.modals.pop();
                let label = crate::model::marketplace::find(&code)
                    .map(|m| m.label.to_string())
                    .unwrap_or(code);
                self.status_message = Some(format!("Marketplace changed to {}", label));
            }
            Action::SetDefaultMarketplace(code) => {
                if let Err(err) = self.settings.set(DEFAULT_MARKETPLACE_KEY, &code) {
                    self.error = Some(format!("{:#}", err));
                }
                self.domain.default_marketplace = Some(code);
                self.refresh_marketplace_dialog();
            }
            Action::RemoveDefaultMarketplace => {
                if let Err(err) = self.settings.remove(DEFAULT_MARKETPLACE_KEY) {
                    self.error = Some(format!("{:#}", err));
                }
                self.domain.default_marketplace = None;
                self.refresh_marketplace_dialog();
            }

            // ─────────────────────────────────────────────────────────────────
            // CNAME Wizard
            // ─────────────────────────────────────────────────────────────────
            Action::Wizard(event) => match self.wizard_dialog.wizard.apply(event) {
                Some(WizardExit::Completed(domain_name)) => {
                    self.status_message =
                        Some(format!("CNAME {} registered with success", domain_name));
                    self.domain.cname_domains.push(domain_name);
                    self.modals.pop();
                }
                Some(WizardExit::Cancelled) => {
                    self.modals.pop();
                }
                None => {}
            },
        }

        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        match self.mode {
            AppMode::Splash => self.splash.draw(frame, area)?,
            AppMode::SignIn => self.sign_in.draw(frame, area)?,
            AppMode::SignUp => self.sign_up.draw(frame, area)?,
            AppMode::VerifyEmail => self.verify_email.draw(frame, area)?,
            AppMode::Running => {
                let ctx = DashboardContext {
                    domain: &self.domain,
                    error: self.error.as_deref(),
                    status_message: self.status_message.as_deref(),
                };
                draw_dashboard(frame, area, &self.home, &ctx)?;

                if let Some(modal) = self.modals.top().cloned() {
                    self.draw_modal(frame, area, &modal)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::row_store::SortKey;
    use crate::model::wizard::WizardEvent;

    fn test_app() -> App {
        use std::sync::atomic::{AtomicUsize, Ordering};
        static SEQ: AtomicUsize = AtomicUsize::new(0);
        let dir = std::env::temp_dir().join(format!(
            "pixamp-app-test-{}-{}",
            std::process::id(),
            SEQ.fetch_add(1, Ordering::Relaxed)
        ));
        App::with_parts(Config::default(), &dir)
    }

    fn drain(app: &mut App, action: Action) {
        let mut current = Some(action);
        while let Some(a) = current {
            current = app.update(a).unwrap();
        }
    }

    #[test]
    fn test_fresh_app_goes_to_sign_in_after_splash() {
        let mut app = test_app();
        assert_eq!(app.mode, AppMode::Splash);
        drain(&mut app, Action::SplashComplete);
        assert_eq!(app.mode, AppMode::SignIn);
    }

    #[test]
    fn test_demo_sign_in_reaches_the_dashboard() {
        let mut app = test_app();
        app.mode = AppMode::SignIn;
        app.sign_in.form.email = MockAuthService::DEMO_EMAIL.to_string();
        app.sign_in.form.password = MockAuthService::DEMO_PASSWORD.to_string();
        app.sign_in.form.loading = true;

        drain(&mut app, Action::SubmitSignIn);

        assert_eq!(app.mode, AppMode::Running);
        assert!(app.domain.session_id.is_some());
        assert!(!app.sign_in.form.loading);
        assert_eq!(app.domain.display_name(), "demo");
    }

    #[test]
    fn test_failed_sign_in_surfaces_an_error_and_clears_loading() {
        let mut app = test_app();
        app.mode = AppMode::SignIn;
        app.sign_in.form.email = MockAuthService::DEMO_EMAIL.to_string();
        app.sign_in.form.password = "wrong-password".to_string();
        app.sign_in.form.loading = true;

        drain(&mut app, Action::SubmitSignIn);

        assert_eq!(app.mode, AppMode::SignIn);
        assert!(app.sign_in.form.error.is_some());
        assert!(!app.sign_in.form.loading);
    }

    #[test]
    fn test_existing_account_sign_up_redirects_to_sign_in() {
        let mut app = test_app();
        app.mode = AppMode::SignUp;
        app.sign_up.form.email = MockAuthService::DEMO_EMAIL.to_string();
        app.sign_up.form.password = "whatever1".to_string();
        app.sign_up.form.loading = true;

        drain(&mut app, Action::SubmitSignUp);

        assert_eq!(app.mode, AppMode::SignIn);
        assert!(app
            .sign_in
            .form
            .error
            .as_deref()
            .unwrap()
            .contains("already have an account"));
    }

    #[test]
    fn test_sign_up_and_verification_flow() {
        let mut app = test_app();
        app.mode = AppMode::SignUp;
        app.sign_up.form.email = "fresh@pixamp.xyz".to_string();
        app.sign_up.form.password = "secret123".to_string();
        app.sign_up.form.loading = true;

        drain(&mut app, Action::SubmitSignUp);
        assert_eq!(app.mode, AppMode::VerifyEmail);
        assert_eq!(app.verify_email.email, "fresh@pixamp.xyz");

        app.verify_email.code = "999999".to_string();
        drain(&mut app, Action::SubmitVerification);
        assert_eq!(app.mode, AppMode::VerifyEmail);
        assert!(app.verify_email.error.is_some());

        app.verify_email.code = MockAuthService::VERIFICATION_CODE.to_string();
        drain(&mut app, Action::SubmitVerification);
        assert_eq!(app.mode, AppMode::Running);
        assert_eq!(app.domain.display_name(), "fresh");
    }

    #[test]
    fn test_unpin_goes_through_the_confirmation_dialog() {
        let mut app = test_app();
        app.mode = AppMode::Running;

        drain(&mut app, Action::TogglePin);
        let (id, _, pinned) = app.home.selected_row().unwrap();
        assert!(pinned);

        // Second toggle asks instead of unpinning outright
        drain(&mut app, Action::TogglePin);
        assert!(matches!(app.modals.top(), Some(Modal::UnpinConfirm { .. })));
        assert!(app.home.active_store().is_pinned(&id));

        drain(&mut app, Action::ConfirmModal);
        assert!(app.modals.is_empty());
        assert!(!app.home.active_store().is_pinned(&id));
    }

    #[test]
    fn test_wizard_completion_registers_the_domain() {
        let mut app = test_app();
        app.mode = AppMode::Running;
        drain(&mut app, Action::OpenCnameWizard);

        for _ in 0..4 {
            drain(&mut app, Action::Wizard(WizardEvent::Next));
        }
        for c in "social.pixamp.xyz".chars() {
            app.wizard_dialog.wizard.input_char(c);
        }
        drain(&mut app, Action::Wizard(WizardEvent::Next)); // to Done
        drain(&mut app, Action::Wizard(WizardEvent::Next)); // close

        assert!(app.modals.is_empty());
        assert!(app.domain.cname_active());
        assert_eq!(app.domain.cname_domains, vec!["social.pixamp.xyz"]);
    }

    #[test]
    fn test_marketplace_selection_persists_through_the_dual_store() {
        let mut app = test_app();
        app.mode = AppMode::Running;

        drain(&mut app, Action::SelectMarketplace("mx".to_string()));
        assert_eq!(app.domain.marketplace.as_deref(), Some("mx"));
        assert_eq!(app.settings.get(MARKETPLACE_KEY).as_deref(), Some("mx"));

        drain(&mut app, Action::SetDefaultMarketplace("mx".to_string()));
        drain(&mut app, Action::RemoveDefaultMarketplace);
        assert_eq!(app.settings.get(DEFAULT_MARKETPLACE_KEY), None);
        assert_eq!(app.settings.get(MARKETPLACE_KEY).as_deref(), Some("mx"));
    }

    #[test]
    fn test_refresh_reloads_data_and_resets_the_cursor() {
        let mut app = test_app();
        app.mode = AppMode::Running;

        drain(&mut app, Action::NextItem);
        assert_eq!(app.home.selected_index(), 1);

        drain(&mut app, Action::RefreshData);
        assert_eq!(app.home.selected_index(), 0);
        assert!(app
            .status_message
            .as_deref()
            .unwrap()
            .contains("refreshed"));
    }

    #[test]
    fn test_sort_action_reaches_the_active_tab_only() {
        let mut app = test_app();
        app.mode = AppMode::Running;

        drain(&mut app, Action::SortBy(SortKey::Spend));
        assert_eq!(app.home.active_store().sort_key(), SortKey::Spend);

        drain(&mut app, Action::NextTab);
        assert_eq!(
            app.home.active_store().sort_direction(),
            crate::model::row_store::SortDirection::Unsorted
        );
    }
}
