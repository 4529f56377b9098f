//! Identity provider client
//!
//! The provider is an external collaborator: this module only defines the
//! call surface and branches the rest of the app needs. `MockAuthService`
//! stands in for the hosted service; it is deterministic and synchronous so
//! the sign-in, sign-up and verification flows are fully exercisable offline.

use std::collections::HashMap;

/// Outcome of a session or verification attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    /// Authentication finished; the session can be activated
    Complete { session_id: String },
    /// A further factor is required before the session is usable
    NeedsFirstFactor,
}

/// Opaque handle for an in-progress sign-up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpHandle {
    pub email: String,
}

/// OAuth providers the redirect flow supports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OAuthProvider {
    Google,
}

/// Error returned by the provider, carrying the machine-readable code the
/// caller branches on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthError {
    pub code: AuthErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorCode {
    /// Sign-up attempted with an email that already has an account
    IdentifierAlreadyExists,
    InvalidCredentials,
    InvalidCode,
}

impl AuthError {
    fn new(code: AuthErrorCode, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AuthError {}

/// Call surface of the identity provider
pub trait AuthService {
    fn create_session(&mut self, identifier: &str, secret: &str)
        -> Result<SessionStatus, AuthError>;
    fn set_active_session(&mut self, session_id: &str) -> Result<(), AuthError>;
    fn create_sign_up(&mut self, email: &str, secret: &str) -> Result<SignUpHandle, AuthError>;
    fn prepare_email_verification(&mut self, handle: &SignUpHandle) -> Result<(), AuthError>;
    fn attempt_email_verification(
        &mut self,
        handle: &SignUpHandle,
        code: &str,
    ) -> Result<SessionStatus, AuthError>;
    /// Redirect-based OAuth; returns the session established on return
    fn authenticate_with_redirect(
        &mut self,
        provider: OAuthProvider,
    ) -> Result<SessionStatus, AuthError>;
}

/// In-memory stand-in for the hosted identity provider.
///
/// Accounts created through `create_sign_up` persist for the process
/// lifetime; one demo account exists from the start. The verification code
/// is fixed so the flow can be driven by hand.
pub struct MockAuthService {
    accounts: HashMap<String, String>,
    pending_code: String,
    active_session: Option<String>,
    session_counter: u32,
}

impl MockAuthService {
    pub const DEMO_EMAIL: &'static str = "demo@pixamp.xyz";
    pub const DEMO_PASSWORD: &'static str = "attribution";
    pub const VERIFICATION_CODE: &'static str = "424242";

    pub fn new() -> Self {
        let mut accounts = HashMap::new();
        accounts.insert(Self::DEMO_EMAIL.to_string(), Self::DEMO_PASSWORD.to_string());
        Self {
            accounts,
            pending_code: Self::VERIFICATION_CODE.to_string(),
            active_session: None,
            session_counter: 0,
        }
    }

    pub fn active_session(&self) -> Option<&str> {
        self.active_session.as_deref()
    }

    fn next_session_id(&mut self) -> String {
        self.session_counter += 1;
        format!("sess_{:04}", self.session_counter)
    }
}

impl Default for MockAuthService {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthService for MockAuthService {
    fn create_session(
        &mut self,
        identifier: &str,
        secret: &str,
    ) -> Result<SessionStatus, AuthError> {
        match self.accounts.get(identifier) {
            // Known account, no factor supplied yet
            Some(_) if secret.is_empty() => Ok(SessionStatus::NeedsFirstFactor),
            Some(stored) if stored == secret => {
                let session_id = self.next_session_id();
                Ok(SessionStatus::Complete { session_id })
            }
            _ => Err(AuthError::new(
                AuthErrorCode::InvalidCredentials,
                "Log in failed. Please check your credentials.",
            )),
        }
    }

    fn set_active_session(&mut self, session_id: &str) -> Result<(), AuthError> {
        self.active_session = Some(session_id.to_string());
        Ok(())
    }

    fn create_sign_up(&mut self, email: &str, secret: &str) -> Result<SignUpHandle, AuthError> {
        if self.accounts.contains_key(email) {
            return Err(AuthError::new(
                AuthErrorCode::IdentifierAlreadyExists,
                "You already have an account. Please log in instead.",
            ));
        }
        self.accounts.insert(email.to_string(), secret.to_string());
        Ok(SignUpHandle { email: email.to_string() })
    }

    fn prepare_email_verification(&mut self, _handle: &SignUpHandle) -> Result<(), AuthError> {
        self.pending_code = Self::VERIFICATION_CODE.to_string();
        Ok(())
    }

    fn attempt_email_verification(
        &mut self,
        _handle: &SignUpHandle,
        code: &str,
    ) -> Result<SessionStatus, AuthError> {
        if code == self.pending_code {
            let session_id = self.next_session_id();
            Ok(SessionStatus::Complete { session_id })
        } else {
            Err(AuthError::new(
                AuthErrorCode::InvalidCode,
                "Please check the OTP and try again.",
            ))
        }
    }

    fn authenticate_with_redirect(
        &mut self,
        _provider: OAuthProvider,
    ) -> Result<SessionStatus, AuthError> {
        let session_id = self.next_session_id();
        Ok(SessionStatus::Complete { session_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_with_the_demo_account() {
        let mut auth = MockAuthService::new();
        let status = auth
            .create_session(MockAuthService::DEMO_EMAIL, MockAuthService::DEMO_PASSWORD)
            .unwrap();
        let SessionStatus::Complete { session_id } = status else {
            panic!("expected a completed session");
        };
        auth.set_active_session(&session_id).unwrap();
        assert_eq!(auth.active_session(), Some(session_id.as_str()));
    }

    #[test]
    fn test_wrong_password_is_rejected() {
        let mut auth = MockAuthService::new();
        let err = auth
            .create_session(MockAuthService::DEMO_EMAIL, "nope")
            .unwrap_err();
        assert_eq!(err.code, AuthErrorCode::InvalidCredentials);
    }

    #[test]
    fn test_missing_factor_is_reported_not_errored() {
        let mut auth = MockAuthService::new();
        let status = auth
            .create_session(MockAuthService::DEMO_EMAIL, "")
            .unwrap();
        assert_eq!(status, SessionStatus::NeedsFirstFactor);
    }

    #[test]
    fn test_duplicate_sign_up_reports_existing_identifier() {
        let mut auth = MockAuthService::new();
        let err = auth
            .create_sign_up(MockAuthService::DEMO_EMAIL, "whatever")
            .unwrap_err();
        assert_eq!(err.code, AuthErrorCode::IdentifierAlreadyExists);
    }

    #[test]
    fn test_sign_up_then_verify_completes_a_session() {
        let mut auth = MockAuthService::new();
        let handle = auth.create_sign_up("new@pixamp.xyz", "secret123").unwrap();
        auth.prepare_email_verification(&handle).unwrap();

        let err = auth.attempt_email_verification(&handle, "000000").unwrap_err();
        assert_eq!(err.code, AuthErrorCode::InvalidCode);

        let status = auth
            .attempt_email_verification(&handle, MockAuthService::VERIFICATION_CODE)
            .unwrap();
        assert!(matches!(status, SessionStatus::Complete { .. }));

        // The new account can now sign in with its password
        let status = auth.create_session("new@pixamp.xyz", "secret123").unwrap();
        assert!(matches!(status, SessionStatus::Complete { .. }));
    }

    #[test]
    fn test_oauth_redirect_yields_a_session() {
        let mut auth = MockAuthService::new();
        let status = auth.authenticate_with_redirect(OAuthProvider::Google).unwrap();
        assert!(matches!(status, SessionStatus::Complete { .. }));
    }
}
