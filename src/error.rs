//! Error types for MASAR.

use rust_decimal::Decimal;

/// Top-level error type for the prototype.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Risk profile error: {0}")]
    Profile(#[from] ProfileError),

    #[error("Onboarding error: {0}")]
    Onboarding(#[from] OnboardingError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Investment error: {0}")]
    Invest(#[from] InvestError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Malformed risk questionnaire input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    #[error("Unknown risk answer: {0:?} (expected conservative, balanced or growth)")]
    UnknownAnswer(String),

    #[error("Unknown risk profile: {0:?} (expected conservative, balanced or growth)")]
    UnknownProfile(String),

    #[error("Expected exactly {expected} risk answers, got {actual}")]
    WrongAnswerCount { expected: usize, actual: usize },
}

/// Onboarding wizard errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OnboardingError {
    #[error("Question {question} has no answer selected")]
    NoAnswerSelected { question: usize },

    #[error("Option {option} does not exist (choose 1-{available})")]
    InvalidOption { option: usize, available: usize },

    #[error("No question is being asked at the {step} step")]
    NotOnQuestion { step: String },

    #[error("Onboarding is already complete")]
    AlreadyComplete,

    #[error(transparent)]
    Profile(#[from] ProfileError),
}

/// Product catalog errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Product {id} not found")]
    NotFound { id: String },
}

/// Investment flow errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvestError {
    #[error("Amount {amount} EGP is below the {minimum} EGP minimum")]
    BelowMinimum { amount: Decimal, minimum: Decimal },

    #[error("Amount must be positive, got {0}")]
    NonPositive(Decimal),

    #[error("Amount {0} EGP cannot be increased any further")]
    AmountTooLarge(Decimal),

    #[error("Preset {index} does not exist (choose 1-{available})")]
    UnknownPreset { index: usize, available: usize },

    #[error("Amount can only be changed on the amount step")]
    AmountLocked,

    #[error("Investment flow is already finished")]
    Finished,
}

/// Session navigation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("Action {action} is not available in the {stage} stage")]
    WrongStage { action: String, stage: String },

    #[error("No product selected")]
    NoProductSelected,

    #[error("No investment in progress")]
    NoActiveInvestment,

    #[error("Unknown tab: {0}")]
    UnknownTab(String),
}

/// Channel-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("Failed to send response on channel {name}: {reason}")]
    SendFailed { name: String, reason: String },
}

/// Result type alias for MASAR.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_error_converts_into_top_level() {
        let err: Error = ProfileError::UnknownAnswer("aggressive".into()).into();
        assert!(matches!(err, Error::Profile(_)));
        assert!(err.to_string().contains("aggressive"));
    }

    #[test]
    fn onboarding_wraps_profile_error_transparently() {
        let inner = ProfileError::WrongAnswerCount {
            expected: 3,
            actual: 2,
        };
        let err = OnboardingError::from(inner.clone());
        assert_eq!(err.to_string(), inner.to_string());
    }
}
