use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::QuestionId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionSetError {
    #[error("a survey needs at least one question")]
    Empty,

    #[error("duplicate question id {0}")]
    DuplicateId(QuestionId),

    #[error("rating range for question {id} is inverted ({min} > {max})")]
    InvalidRange { id: QuestionId, min: i32, max: i32 },
}

/// How a question is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionKind {
    /// Bounded slider over `[min, max]`.
    Rating { min: i32, max: i32 },
    /// Free-form text.
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    id: QuestionId,
    prompt: String,
    kind: QuestionKind,
}

impl Question {
    #[must_use]
    pub fn rating(id: u32, prompt: impl Into<String>, min: i32, max: i32) -> Self {
        Self {
            id: QuestionId::new(id),
            prompt: prompt.into(),
            kind: QuestionKind::Rating { min, max },
        }
    }

    #[must_use]
    pub fn text(id: u32, prompt: impl Into<String>) -> Self {
        Self {
            id: QuestionId::new(id),
            prompt: prompt.into(),
            kind: QuestionKind::Text,
        }
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn kind(&self) -> QuestionKind {
        self.kind
    }
}

/// Fixed, ordered list of questions shown by one survey.
///
/// Cheap to clone; the questions are shared and never mutated after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSet {
    questions: Arc<[Question]>,
}

impl QuestionSet {
    /// Validate and freeze a list of questions.
    ///
    /// # Errors
    ///
    /// Returns `QuestionSetError` if the list is empty, repeats an id, or
    /// declares a rating range whose minimum exceeds its maximum.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuestionSetError> {
        if questions.is_empty() {
            return Err(QuestionSetError::Empty);
        }

        let mut seen = HashSet::with_capacity(questions.len());
        for question in &questions {
            if !seen.insert(question.id) {
                return Err(QuestionSetError::DuplicateId(question.id));
            }
            if let QuestionKind::Rating { min, max } = question.kind {
                if min > max {
                    return Err(QuestionSetError::InvalidRange {
                        id: question.id,
                        min,
                        max,
                    });
                }
            }
        }

        Ok(Self {
            questions: questions.into(),
        })
    }

    /// The five-question customer survey shipped with the app.
    #[must_use]
    pub fn customer_survey() -> Self {
        let questions: Vec<Question> = vec![
            Question::rating(1, "How satisfied are you with our products?", 1, 5),
            Question::rating(
                2,
                "How fair are the prices compared to similar retailers?",
                1,
                5,
            ),
            Question::rating(
                3,
                "How satisfied are you with the value for money of your purchase?",
                1,
                5,
            ),
            Question::rating(
                4,
                "On a scale of 1-10 how would you recommend us to your friends and family?",
                1,
                10,
            ),
            Question::text(5, "What could we do to improve our service?"),
        ];
        Self {
            questions: questions.into(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false for a validated set; kept for clippy's `len_without_is_empty`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Question at a 1-based position, matching the progress indicator.
    #[must_use]
    pub fn at_position(&self, position: usize) -> Option<&Question> {
        position
            .checked_sub(1)
            .and_then(|index| self.questions.get(index))
    }

    #[must_use]
    pub fn find(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|question| question.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: QuestionId) -> bool {
        self.find(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Question] {
        &self.questions
    }
}
