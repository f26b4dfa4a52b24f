//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;
use survey_core::model::QuestionId;

/// Errors emitted by the survey controller.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SurveyError {
    #[error("question {0} is not part of this survey")]
    UnknownQuestion(QuestionId),
    #[error("the survey is being submitted")]
    SubmitPending,
    #[error(transparent)]
    Storage(#[from] StorageError),
}
