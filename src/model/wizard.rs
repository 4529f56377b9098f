//! CNAME registration wizard state machine
//!
//! Replaces ad hoc step counters with an explicit six-step machine plus a
//! cancel-confirmation sub-state that remembers where to resume.

/// The six pages of the registration flow, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    /// Overview of the three Meta-side tasks ahead
    Intro,
    /// Add the custom subdomain in Meta Business Manager
    AddSubdomain,
    /// Verify the subdomain with a DNS TXT record
    VerifySubdomain,
    /// Create the CNAME record at the domain host
    CreateRecord,
    /// Enter the verified domain to register it
    EnterDomain,
    /// Registration confirmed
    Done,
}

impl WizardStep {
    pub fn title(&self) -> &str {
        match self {
            WizardStep::Intro => "New CNAME Registry",
            WizardStep::AddSubdomain => "Add subdomain on Meta",
            WizardStep::VerifySubdomain => "Verify subdomain on Meta",
            WizardStep::CreateRecord => "Create a CNAME record",
            WizardStep::EnterDomain => "New CNAME registry",
            WizardStep::Done => "",
        }
    }

    /// Progress tag for the three Meta-side steps, e.g. "Step 2/3"
    pub fn progress(&self) -> Option<&str> {
        match self {
            WizardStep::AddSubdomain => Some("Step 1/3"),
            WizardStep::VerifySubdomain => Some("Step 2/3"),
            WizardStep::CreateRecord => Some("Step 3/3"),
            _ => None,
        }
    }

    fn next(&self) -> Option<WizardStep> {
        match self {
            WizardStep::Intro => Some(WizardStep::AddSubdomain),
            WizardStep::AddSubdomain => Some(WizardStep::VerifySubdomain),
            WizardStep::VerifySubdomain => Some(WizardStep::CreateRecord),
            WizardStep::CreateRecord => Some(WizardStep::EnterDomain),
            WizardStep::EnterDomain => Some(WizardStep::Done),
            WizardStep::Done => None,
        }
    }

    fn previous(&self) -> Option<WizardStep> {
        match self {
            WizardStep::Intro => None,
            WizardStep::AddSubdomain => Some(WizardStep::Intro),
            WizardStep::VerifySubdomain => Some(WizardStep::AddSubdomain),
            WizardStep::CreateRecord => Some(WizardStep::VerifySubdomain),
            WizardStep::EnterDomain => Some(WizardStep::CreateRecord),
            WizardStep::Done => None,
        }
    }
}

/// Current machine state: a step, or the cancel prompt overlaying one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardState {
    Step(WizardStep),
    /// Cancel was requested; `resume` is where Undo returns to
    CancelConfirm { resume: WizardStep },
}

/// Inputs the machine reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardEvent {
    Next,
    Previous,
    RequestCancel,
    UndoCancel,
    ConfirmCancel,
}

/// How a finished wizard left the flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardExit {
    Cancelled,
    /// Carries the registered domain
    Completed(String),
}

/// The wizard dialog state: machine state plus the domain entry field
pub struct CnameWizard {
    state: WizardState,
    pub domain_input: String,
    pub error: Option<String>,
}

impl Default for CnameWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl CnameWizard {
    pub fn new() -> Self {
        Self {
            state: WizardState::Step(WizardStep::Intro),
            domain_input: String::new(),
            error: None,
        }
    }

    pub fn state(&self) -> WizardState {
        self.state
    }

    /// Apply an event. Returns `Some` when the wizard is done and the dialog
    /// should close; the machine resets itself for the next opening.
    pub fn apply(&mut self, event: WizardEvent) -> Option<WizardExit> {
        match (self.state, event) {
            (WizardState::Step(step), WizardEvent::Next) => {
                if step == WizardStep::EnterDomain && !self.validate_domain() {
                    return None;
                }
                if step == WizardStep::Done {
                    let domain = self.domain_input.trim().to_string();
                    self.reset();
                    return Some(WizardExit::Completed(domain));
                }
                if let Some(next) = step.next() {
                    self.state = WizardState::Step(next);
                    self.error = None;
                }
                None
            }
            (WizardState::Step(step), WizardEvent::Previous) => {
                if let Some(previous) = step.previous() {
                    self.state = WizardState::Step(previous);
                    self.error = None;
                }
                None
            }
            (WizardState::Step(step), WizardEvent::RequestCancel) => {
                self.state = WizardState::CancelConfirm { resume: step };
                None
            }
            (WizardState::CancelConfirm { resume }, WizardEvent::UndoCancel) => {
                self.state = WizardState::Step(resume);
                None
            }
            (WizardState::CancelConfirm { .. }, WizardEvent::ConfirmCancel) => {
                self.reset();
                Some(WizardExit::Cancelled)
            }
            _ => None,
        }
    }

    pub fn input_char(&mut self, c: char) {
        if let WizardState::Step(WizardStep::EnterDomain) = self.state {
            self.domain_input.push(c);
            self.error = None;
        }
    }

    pub fn input_backspace(&mut self) {
        if let WizardState::Step(WizardStep::EnterDomain) = self.state {
            self.domain_input.pop();
            self.error = None;
        }
    }

    fn validate_domain(&mut self) -> bool {
        let domain = self.domain_input.trim();
        if domain.is_empty() {
            self.error = Some("Enter your verified domain".to_string());
            return false;
        }
        if !domain.contains('.') {
            self.error = Some("Enter a full domain, e.g. social.pixamp.xyz".to_string());
            return false;
        }
        true
    }

    fn reset(&mut self) {
        self.state = WizardState::Step(WizardStep::Intro);
        self.domain_input.clear();
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_step(wizard: &CnameWizard, step: WizardStep) -> bool {
        wizard.state() == WizardState::Step(step)
    }

    #[test]
    fn test_walks_forward_through_all_steps() {
        let mut wizard = CnameWizard::new();
        assert!(at_step(&wizard, WizardStep::Intro));

        wizard.apply(WizardEvent::Next);
        assert!(at_step(&wizard, WizardStep::AddSubdomain));
        wizard.apply(WizardEvent::Next);
        wizard.apply(WizardEvent::Next);
        assert!(at_step(&wizard, WizardStep::CreateRecord));
        wizard.apply(WizardEvent::Next);
        assert!(at_step(&wizard, WizardStep::EnterDomain));
    }

    #[test]
    fn test_previous_stops_at_the_first_step() {
        let mut wizard = CnameWizard::new();
        wizard.apply(WizardEvent::Previous);
        assert!(at_step(&wizard, WizardStep::Intro));

        wizard.apply(WizardEvent::Next);
        wizard.apply(WizardEvent::Previous);
        assert!(at_step(&wizard, WizardStep::Intro));
    }

    #[test]
    fn test_domain_entry_gates_the_finish() {
        let mut wizard = CnameWizard::new();
        for _ in 0..4 {
            wizard.apply(WizardEvent::Next);
        }
        assert!(at_step(&wizard, WizardStep::EnterDomain));

        // Empty and dotless inputs are rejected in place
        assert_eq!(wizard.apply(WizardEvent::Next), None);
        assert!(wizard.error.is_some());
        assert!(at_step(&wizard, WizardStep::EnterDomain));

        for c in "shop".chars() {
            wizard.input_char(c);
        }
        assert_eq!(wizard.apply(WizardEvent::Next), None);
        assert!(wizard.error.is_some());

        for c in ".pixamp.xyz".chars() {
            wizard.input_char(c);
        }
        assert_eq!(wizard.apply(WizardEvent::Next), None);
        assert!(at_step(&wizard, WizardStep::Done));

        let exit = wizard.apply(WizardEvent::Next);
        assert_eq!(exit, Some(WizardExit::Completed("shop.pixamp.xyz".to_string())));
        // Machine resets for the next opening
        assert!(at_step(&wizard, WizardStep::Intro));
        assert!(wizard.domain_input.is_empty());
    }

    #[test]
    fn test_cancel_confirmation_remembers_the_step() {
        let mut wizard = CnameWizard::new();
        wizard.apply(WizardEvent::Next);
        wizard.apply(WizardEvent::Next);
        assert!(at_step(&wizard, WizardStep::VerifySubdomain));

        wizard.apply(WizardEvent::RequestCancel);
        assert_eq!(
            wizard.state(),
            WizardState::CancelConfirm { resume: WizardStep::VerifySubdomain }
        );

        wizard.apply(WizardEvent::UndoCancel);
        assert!(at_step(&wizard, WizardStep::VerifySubdomain));
    }

    #[test]
    fn test_confirm_cancel_exits_and_resets() {
        let mut wizard = CnameWizard::new();
        wizard.apply(WizardEvent::Next);
        wizard.apply(WizardEvent::RequestCancel);

        let exit = wizard.apply(WizardEvent::ConfirmCancel);
        assert_eq!(exit, Some(WizardExit::Cancelled));
        assert!(at_step(&wizard, WizardStep::Intro));
    }

    #[test]
    fn test_typing_is_ignored_outside_the_domain_step() {
        let mut wizard = CnameWizard::new();
        wizard.input_char('x');
        assert!(wizard.domain_input.is_empty());
    }
}
