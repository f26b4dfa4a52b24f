use thiserror::Error;

use crate::model::QuestionSetError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    QuestionSet(#[from] QuestionSetError),
}
