//! Risk profiling: questionnaire answers and the classifier that turns
//! them into a coarse investor category.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ProfileError;

/// Number of questions in the risk questionnaire.
pub const ANSWER_COUNT: usize = 3;

/// One answer to a risk question. Every question offers exactly one option
/// per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskAnswer {
    Conservative,
    Balanced,
    Growth,
}

impl RiskAnswer {
    pub const ALL: [RiskAnswer; 3] = [Self::Conservative, Self::Balanced, Self::Growth];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Conservative => "conservative",
            Self::Balanced => "balanced",
            Self::Growth => "growth",
        }
    }
}

impl fmt::Display for RiskAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskAnswer {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "conservative" => Ok(Self::Conservative),
            "balanced" => Ok(Self::Balanced),
            "growth" => Ok(Self::Growth),
            other => Err(ProfileError::UnknownAnswer(other.to_string())),
        }
    }
}

/// Investor risk category, derived once at the end of onboarding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskProfile {
    Conservative,
    #[default]
    Balanced,
    Growth,
}

impl RiskProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Conservative => "conservative",
            Self::Balanced => "balanced",
            Self::Growth => "growth",
        }
    }

    /// Title-case label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Conservative => "Conservative",
            Self::Balanced => "Balanced",
            Self::Growth => "Growth",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Conservative => "You prefer capital preservation with stable returns",
            Self::Balanced => "You seek moderate growth with manageable risk",
            Self::Growth => "You aim for higher returns and accept market volatility",
        }
    }
}

impl fmt::Display for RiskProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskProfile {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "conservative" => Ok(Self::Conservative),
            "balanced" => Ok(Self::Balanced),
            "growth" => Ok(Self::Growth),
            other => Err(ProfileError::UnknownProfile(other.to_string())),
        }
    }
}

/// A complete questionnaire: exactly one answer per question, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<RiskAnswer>", into = "Vec<RiskAnswer>")]
pub struct RiskAnswers([RiskAnswer; ANSWER_COUNT]);

impl RiskAnswers {
    pub fn new(answers: [RiskAnswer; ANSWER_COUNT]) -> Self {
        Self(answers)
    }

    /// Parse raw tokens, rejecting unknown tokens and wrong lengths.
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<Self, ProfileError> {
        let answers = tokens
            .iter()
            .map(|t| t.as_ref().parse::<RiskAnswer>())
            .collect::<Result<Vec<_>, _>>()?;
        Self::try_from(answers)
    }

    pub fn as_slice(&self) -> &[RiskAnswer] {
        &self.0
    }

    fn count(&self, answer: RiskAnswer) -> usize {
        self.0.iter().filter(|a| **a == answer).count()
    }

    /// Majority classification.
    ///
    /// Two or more conservative answers win first, then two or more growth
    /// answers; every other combination, including one of each, is balanced.
    pub fn classify(&self) -> RiskProfile {
        if self.count(RiskAnswer::Conservative) >= 2 {
            RiskProfile::Conservative
        } else if self.count(RiskAnswer::Growth) >= 2 {
            RiskProfile::Growth
        } else {
            RiskProfile::Balanced
        }
    }
}

impl TryFrom<Vec<RiskAnswer>> for RiskAnswers {
    type Error = ProfileError;

    fn try_from(answers: Vec<RiskAnswer>) -> Result<Self, Self::Error> {
        let actual = answers.len();
        let answers: [RiskAnswer; ANSWER_COUNT] =
            answers
                .try_into()
                .map_err(|_| ProfileError::WrongAnswerCount {
                    expected: ANSWER_COUNT,
                    actual,
                })?;
        Ok(Self(answers))
    }
}

impl From<RiskAnswers> for Vec<RiskAnswer> {
    fn from(answers: RiskAnswers) -> Self {
        answers.0.to_vec()
    }
}

/// Token-level entry point: three answer tokens in, one profile token out.
pub fn classify_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<RiskProfile, ProfileError> {
    Ok(RiskAnswers::from_tokens(tokens)?.classify())
}
