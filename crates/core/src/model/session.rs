use serde::{Deserialize, Serialize};

use crate::model::{Answer, AnswerSheet};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    #[default]
    InProgress,
    Completed,
}

impl SessionStatus {
    #[must_use]
    pub fn is_completed(self) -> bool {
        matches!(self, SessionStatus::Completed)
    }
}

/// The value stored under a session key.
///
/// Serializes as `{"answers": [...], "status": "IN_PROGRESS" | "COMPLETED"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub answers: Vec<Answer>,
    #[serde(default)]
    pub status: SessionStatus,
}

impl SessionRecord {
    #[must_use]
    pub fn new(answers: &AnswerSheet, status: SessionStatus) -> Self {
        Self {
            answers: answers.as_slice().to_vec(),
            status,
        }
    }

    #[must_use]
    pub fn in_progress(answers: &AnswerSheet) -> Self {
        Self::new(answers, SessionStatus::InProgress)
    }

    #[must_use]
    pub fn completed(answers: &AnswerSheet) -> Self {
        Self::new(answers, SessionStatus::Completed)
    }
}
