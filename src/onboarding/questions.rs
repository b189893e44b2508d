//! The fixed risk questionnaire.

use serde::Serialize;

use crate::profile::RiskAnswer;

/// One selectable option of a question.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct QuestionOption {
    pub label: &'static str,
    pub value: RiskAnswer,
    pub description: &'static str,
}

/// A questionnaire question with one option per answer category.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Question {
    pub id: usize,
    pub question: &'static str,
    pub options: [QuestionOption; 3],
}

impl Question {
    /// Option by 1-based position, as shown to the user.
    pub fn option(&self, position: usize) -> Option<&QuestionOption> {
        position.checked_sub(1).and_then(|i| self.options.get(i))
    }
}

pub const QUESTIONS: [Question; 3] = [
    Question {
        id: 1,
        question: "What is your main goal for investing?",
        options: [
            QuestionOption {
                label: "Protect my savings",
                value: RiskAnswer::Conservative,
                description: "Keep my money safe from inflation",
            },
            QuestionOption {
                label: "Steady growth",
                value: RiskAnswer::Balanced,
                description: "Grow my wealth with moderate risk",
            },
            QuestionOption {
                label: "Maximize returns",
                value: RiskAnswer::Growth,
                description: "I'm okay with ups and downs for higher gains",
            },
        ],
    },
    Question {
        id: 2,
        question: "How would you react if your investment dropped 15%?",
        options: [
            QuestionOption {
                label: "Sell immediately",
                value: RiskAnswer::Conservative,
                description: "I can't afford to lose money",
            },
            QuestionOption {
                label: "Wait and see",
                value: RiskAnswer::Balanced,
                description: "Give it time to recover",
            },
            QuestionOption {
                label: "Buy more",
                value: RiskAnswer::Growth,
                description: "It's a chance to invest at lower prices",
            },
        ],
    },
    Question {
        id: 3,
        question: "When do you plan to use this money?",
        options: [
            QuestionOption {
                label: "Within 1 year",
                value: RiskAnswer::Conservative,
                description: "I might need it soon",
            },
            QuestionOption {
                label: "1-5 years",
                value: RiskAnswer::Balanced,
                description: "Medium-term goals",
            },
            QuestionOption {
                label: "5+ years",
                value: RiskAnswer::Growth,
                description: "Long-term wealth building",
            },
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_question_offers_each_category_once() {
        for q in &QUESTIONS {
            for answer in RiskAnswer::ALL {
                let matching = q.options.iter().filter(|o| o.value == answer).count();
                assert_eq!(matching, 1, "question {} / {answer}", q.id);
            }
        }
    }

    #[test]
    fn option_positions_are_one_based() {
        let q = &QUESTIONS[0];
        assert!(q.option(0).is_none());
        assert_eq!(q.option(1).unwrap().label, "Protect my savings");
        assert_eq!(q.option(3).unwrap().value, RiskAnswer::Growth);
        assert!(q.option(4).is_none());
    }
}
