use serde::{Deserialize, Serialize};

use crate::model::QuestionId;

/// The recorded response for one question.
///
/// Ratings are kept as text, exactly as the slider reports them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub question_id: QuestionId,
    #[serde(rename = "answer")]
    pub value: String,
}

impl Answer {
    #[must_use]
    pub fn new(question_id: QuestionId, value: impl Into<String>) -> Self {
        Self {
            question_id,
            value: value.into(),
        }
    }
}

/// Ordered answers for a session, at most one per question.
///
/// Order is first-touch order; editing an answer keeps its slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSheet {
    answers: Vec<Answer>,
}

impl AnswerSheet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a sheet from stored answers, keeping the last value seen for a
    /// repeated question id.
    #[must_use]
    pub fn from_answers(answers: Vec<Answer>) -> Self {
        let mut sheet = Self::new();
        for answer in answers {
            sheet.upsert(answer.question_id, answer.value);
        }
        sheet
    }

    /// Insert or replace the answer for `question_id`.
    pub fn upsert(&mut self, question_id: QuestionId, value: impl Into<String>) {
        let value = value.into();
        match self
            .answers
            .iter_mut()
            .find(|answer| answer.question_id == question_id)
        {
            Some(existing) => existing.value = value,
            None => self.answers.push(Answer { question_id, value }),
        }
    }

    #[must_use]
    pub fn get(&self, question_id: QuestionId) -> Option<&str> {
        self.answers
            .iter()
            .find(|answer| answer.question_id == question_id)
            .map(|answer| answer.value.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Answer] {
        &self.answers
    }

    pub fn iter(&self) -> impl Iterator<Item = &Answer> {
        self.answers.iter()
    }
}
