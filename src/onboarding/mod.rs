//! Onboarding: the first-launch risk questionnaire.
//!
//! A welcome screen followed by three fixed questions. Confirming the last
//! question classifies the answers into a `RiskProfile`, which the session
//! stores on the user for the rest of the run.

pub mod questions;
pub mod state;

pub use questions::{QUESTIONS, Question, QuestionOption};
pub use state::{Advance, OnboardingState, OnboardingStep};
