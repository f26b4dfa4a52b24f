use std::sync::Arc;
use std::time::Duration;

use storage::repository::{SessionRepository, SessionStore};
use survey_core::model::{QuestionSet, SessionId};
use tracing::info;

use super::controller::{SurveyController, THANK_YOU_RESET_DELAY};
use crate::Clock;
use crate::error::SurveyError;

/// Opens survey sessions against a store.
///
/// Each `open_session` call is one "page load": a fresh time-based key and a
/// load of whatever happens to be stored under it.
#[derive(Clone)]
pub struct SurveyService {
    clock: Clock,
    questions: QuestionSet,
    store: SessionStore,
    reset_after: Duration,
}

impl SurveyService {
    #[must_use]
    pub fn new(
        clock: Clock,
        questions: QuestionSet,
        sessions: Arc<dyn SessionRepository>,
    ) -> Self {
        Self {
            clock,
            questions,
            store: SessionStore::new(sessions),
            reset_after: THANK_YOU_RESET_DELAY,
        }
    }

    #[must_use]
    pub fn with_reset_delay(mut self, reset_after: Duration) -> Self {
        self.reset_after = reset_after;
        self
    }

    #[must_use]
    pub fn questions(&self) -> &QuestionSet {
        &self.questions
    }

    #[must_use]
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Key for a session opened now: `session_<epoch-millis>`.
    #[must_use]
    pub fn next_session_id(&self) -> SessionId {
        SessionId::from_epoch_millis(self.clock.epoch_millis())
    }

    /// Create a controller for a new session and load its stored answers.
    ///
    /// # Errors
    ///
    /// Returns `SurveyError::Storage` if the store cannot be read.
    pub async fn open_session(&self) -> Result<SurveyController, SurveyError> {
        self.open_session_with_id(self.next_session_id()).await
    }

    /// Same as `open_session` with a caller-chosen key.
    ///
    /// # Errors
    ///
    /// Returns `SurveyError::Storage` if the store cannot be read.
    pub async fn open_session_with_id(
        &self,
        session_id: SessionId,
    ) -> Result<SurveyController, SurveyError> {
        let mut controller =
            SurveyController::new(self.questions.clone(), session_id, self.store.clone())
                .with_reset_delay(self.reset_after);
        controller.hydrate().await?;
        info!(
            session = %controller.session_id(),
            questions = self.questions.len(),
            "survey session opened"
        );
        Ok(controller)
    }
}
