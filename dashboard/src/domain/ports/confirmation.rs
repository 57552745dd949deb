//! Driven port asking the user to confirm destructive actions.

/// Port for yes/no confirmation.
#[cfg_attr(test, mockall::automock)]
pub trait ConfirmationGate: Send + Sync {
    /// Return `true` when the user accepts `prompt`.
    fn confirm(&self, prompt: &str) -> bool;
}

/// Gate that accepts every prompt.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl ConfirmationGate for AlwaysConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}
