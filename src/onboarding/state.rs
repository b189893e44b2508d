//! Onboarding wizard state machine: tracks which step the user is on and
//! the answer selected for each question.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::questions::{QUESTIONS, Question};
use crate::error::OnboardingError;
use crate::profile::{ANSWER_COUNT, RiskAnswer, RiskAnswers, RiskProfile};

/// The steps of the onboarding wizard.
///
/// Progresses linearly: Welcome → Question(1) → Question(2) → Question(3) →
/// Complete. `Question` carries the 1-based question number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStep {
    #[default]
    Welcome,
    Question(usize),
    Complete,
}

impl OnboardingStep {
    /// Get the next step in the linear progression, if any.
    pub fn next(&self) -> Option<OnboardingStep> {
        match self {
            Self::Welcome => Some(Self::Question(1)),
            Self::Question(n) if *n < QUESTIONS.len() => Some(Self::Question(n + 1)),
            Self::Question(_) => Some(Self::Complete),
            Self::Complete => None,
        }
    }

    /// Get the previous step, if any. Complete has no way back.
    pub fn previous(&self) -> Option<OnboardingStep> {
        match self {
            Self::Welcome | Self::Complete => None,
            Self::Question(n) if *n <= 1 => Some(Self::Welcome),
            Self::Question(n) => Some(Self::Question(n - 1)),
        }
    }

    /// Whether this step is terminal (onboarding is done).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete)
    }

    /// Zero-based position used for the progress bar.
    pub fn index(&self) -> usize {
        match self {
            Self::Welcome => 0,
            Self::Question(n) => *n,
            Self::Complete => QUESTIONS.len() + 1,
        }
    }
}

impl std::fmt::Display for OnboardingStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Welcome => write!(f, "welcome"),
            Self::Question(n) => write!(f, "question {n} of {}", QUESTIONS.len()),
            Self::Complete => write!(f, "complete"),
        }
    }
}

/// Outcome of pressing "next".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved to another step.
    Step(OnboardingStep),
    /// The last question was answered and the profile derived.
    Completed(RiskProfile),
}

/// Wizard state for one onboarding run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OnboardingState {
    /// Current step.
    pub step: OnboardingStep,
    /// Selected answer per question (index = question number - 1).
    selected: [Option<RiskAnswer>; ANSWER_COUNT],
    /// Set once the last question is confirmed.
    profile: Option<RiskProfile>,
}

impl OnboardingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of progress segments: one per question plus the welcome screen.
    pub fn total_steps(&self) -> usize {
        QUESTIONS.len() + 1
    }

    pub fn current_question(&self) -> Option<&'static Question> {
        match self.step {
            OnboardingStep::Question(n) => n.checked_sub(1).and_then(|i| QUESTIONS.get(i)),
            _ => None,
        }
    }

    /// Answer selected for a question, by 1-based number.
    pub fn selected(&self, question: usize) -> Option<RiskAnswer> {
        question
            .checked_sub(1)
            .and_then(|i| self.selected.get(i).copied().flatten())
    }

    pub fn profile(&self) -> Option<RiskProfile> {
        self.profile
    }

    /// Select an option of the current question by its 1-based position.
    /// Re-selecting overwrites the previous choice.
    pub fn select(&mut self, position: usize) -> Result<RiskAnswer, OnboardingError> {
        let question = self.question_or_err()?;
        let option = question
            .option(position)
            .ok_or(OnboardingError::InvalidOption {
                option: position,
                available: question.options.len(),
            })?;
        self.record(question.id, option.value);
        Ok(option.value)
    }

    /// Select the option carrying a given answer category.
    pub fn select_answer(&mut self, answer: RiskAnswer) -> Result<(), OnboardingError> {
        let question = self.question_or_err()?;
        self.record(question.id, answer);
        Ok(())
    }

    fn record(&mut self, question: usize, answer: RiskAnswer) {
        debug!(question, answer = %answer, "Risk answer selected");
        self.selected[question - 1] = Some(answer);
    }

    fn question_or_err(&self) -> Result<&'static Question, OnboardingError> {
        if self.step.is_terminal() {
            return Err(OnboardingError::AlreadyComplete);
        }
        self.current_question()
            .ok_or_else(|| OnboardingError::NotOnQuestion {
                step: self.step.to_string(),
            })
    }

    /// Advance the wizard.
    ///
    /// A question step only advances once it has an answer. Confirming the
    /// last question classifies the answers and completes onboarding.
    pub fn next(&mut self) -> Result<Advance, OnboardingError> {
        let next = self.step.next().ok_or(OnboardingError::AlreadyComplete)?;

        if let OnboardingStep::Question(n) = self.step
            && self.selected(n).is_none()
        {
            return Err(OnboardingError::NoAnswerSelected { question: n });
        }

        if next.is_terminal() {
            let answers: Vec<RiskAnswer> = self.selected.iter().flatten().copied().collect();
            let profile = RiskAnswers::try_from(answers)?.classify();
            self.step = next;
            self.profile = Some(profile);
            return Ok(Advance::Completed(profile));
        }

        self.step = next;
        Ok(Advance::Step(next))
    }

    /// Step back one screen, keeping earlier selections. No-op on Welcome.
    pub fn back(&mut self) -> OnboardingStep {
        if let Some(prev) = self.step.previous() {
            self.step = prev;
        }
        self.step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_walks_all_steps() {
        let expected = [
            OnboardingStep::Question(1),
            OnboardingStep::Question(2),
            OnboardingStep::Question(3),
            OnboardingStep::Complete,
        ];
        let mut current = OnboardingStep::Welcome;
        for expected_next in expected {
            let next = current.next().unwrap();
            assert_eq!(next, expected_next);
            current = next;
        }
        assert!(current.next().is_none());
    }

    #[test]
    fn previous_stops_at_welcome_and_complete() {
        assert_eq!(OnboardingStep::Welcome.previous(), None);
        assert_eq!(
            OnboardingStep::Question(1).previous(),
            Some(OnboardingStep::Welcome)
        );
        assert_eq!(
            OnboardingStep::Question(3).previous(),
            Some(OnboardingStep::Question(2))
        );
        assert_eq!(OnboardingStep::Complete.previous(), None);
    }

    #[test]
    fn cannot_advance_without_answer() {
        let mut state = OnboardingState::new();
        assert_eq!(
            state.next().unwrap(),
            Advance::Step(OnboardingStep::Question(1))
        );
        assert_eq!(
            state.next().unwrap_err(),
            OnboardingError::NoAnswerSelected { question: 1 }
        );
        assert_eq!(state.step, OnboardingStep::Question(1));
    }

    #[test]
    fn select_requires_question_step() {
        let mut state = OnboardingState::new();
        assert!(matches!(
            state.select(1),
            Err(OnboardingError::NotOnQuestion { .. })
        ));
    }

    #[test]
    fn select_rejects_out_of_range_option() {
        let mut state = OnboardingState::new();
        state.next().unwrap();
        assert_eq!(
            state.select(4).unwrap_err(),
            OnboardingError::InvalidOption {
                option: 4,
                available: 3
            }
        );
        assert_eq!(
            state.select(0).unwrap_err(),
            OnboardingError::InvalidOption {
                option: 0,
                available: 3
            }
        );
    }

    #[test]
    fn completes_with_classified_profile() {
        let mut state = OnboardingState::new();
        state.next().unwrap();
        for position in [3, 3, 1] {
            state.select(position).unwrap();
            state.next().unwrap();
        }
        assert_eq!(state.step, OnboardingStep::Complete);
        assert_eq!(state.profile(), Some(RiskProfile::Growth));
        assert_eq!(state.next().unwrap_err(), OnboardingError::AlreadyComplete);
        assert_eq!(state.select(1).unwrap_err(), OnboardingError::AlreadyComplete);
    }

    #[test]
    fn one_of_each_completes_balanced() {
        let mut state = OnboardingState::new();
        state.next().unwrap();
        let mut last = None;
        for position in [1, 2, 3] {
            state.select(position).unwrap();
            last = Some(state.next().unwrap());
        }
        assert_eq!(last, Some(Advance::Completed(RiskProfile::Balanced)));
    }

    #[test]
    fn back_keeps_selections_and_reselect_overwrites() {
        let mut state = OnboardingState::new();
        state.next().unwrap();
        state.select(1).unwrap();
        state.next().unwrap();
        assert_eq!(state.back(), OnboardingStep::Question(1));
        assert_eq!(state.selected(1), Some(RiskAnswer::Conservative));

        state.select_answer(RiskAnswer::Growth).unwrap();
        assert_eq!(state.selected(1), Some(RiskAnswer::Growth));

        assert_eq!(state.back(), OnboardingStep::Welcome);
        assert_eq!(state.back(), OnboardingStep::Welcome);
    }

    #[test]
    fn progress_index_counts_welcome() {
        let mut state = OnboardingState::new();
        assert_eq!(state.total_steps(), 4);
        assert_eq!(state.step.index(), 0);
        state.next().unwrap();
        assert_eq!(state.step.index(), 1);
    }
}
