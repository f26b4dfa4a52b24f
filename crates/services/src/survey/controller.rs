use std::time::Duration;

use storage::repository::SessionStore;
use survey_core::model::{
    AnswerSheet, Navigation, Question, QuestionId, QuestionSet, Screen, SessionId, SessionRecord,
    SessionStatus,
};
use tracing::{debug, info, warn};

use super::progress::SurveyProgress;
use crate::error::SurveyError;

/// How long the thank-you screen stays up before returning to welcome.
pub const THANK_YOU_RESET_DELAY: Duration = Duration::from_secs(5);

/// The user's answer to "submit the survey?".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitDecision {
    Accepted,
    Declined,
}

impl From<bool> for SubmitDecision {
    fn from(confirmed: bool) -> Self {
        if confirmed {
            Self::Accepted
        } else {
            Self::Declined
        }
    }
}

/// Result of a submit attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FinalizeOutcome {
    /// Moved to the thank-you screen. The caller arms exactly one reset
    /// timer for `reset_after`.
    Completed { reset_after: Duration },
    /// The user declined; nothing changed.
    Declined,
    /// Submit is only offered on the last question.
    NotAvailable,
}

/// First half of a submit: either a write to perform or a final answer.
#[derive(Clone, Debug)]
pub enum FinalizeStep {
    Save(PendingSave),
    Done(FinalizeOutcome),
}

/// A snapshot write for one session key.
///
/// Produced synchronously by the controller so UI code can mutate state under
/// a short borrow and await the write afterwards. Commit saves in the order
/// they were produced to keep last-write-wins meaningful.
#[derive(Clone, Debug)]
pub struct PendingSave {
    store: SessionStore,
    session_id: SessionId,
    record: SessionRecord,
}

impl PendingSave {
    #[must_use]
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    #[must_use]
    pub fn record(&self) -> &SessionRecord {
        &self.record
    }

    /// Write the snapshot to the session store.
    ///
    /// # Errors
    ///
    /// Returns `SurveyError::Storage` if the write fails.
    pub async fn commit(self) -> Result<(), SurveyError> {
        self.store
            .save(&self.session_id, &self.record)
            .await
            .map_err(|err| {
                warn!(session = %self.session_id, error = %err, "failed to persist survey answers");
                SurveyError::from(err)
            })
    }
}

/// Drives one survey run: navigation, answers and persistence.
///
/// Questions and the session key are injected so independent controllers
/// can coexist. All transitions are synchronous; only writes are async.
#[derive(Clone, Debug)]
pub struct SurveyController {
    questions: QuestionSet,
    session_id: SessionId,
    store: SessionStore,
    answers: AnswerSheet,
    navigation: Navigation,
    reset_after: Duration,
    submitting: bool,
}

impl SurveyController {
    #[must_use]
    pub fn new(questions: QuestionSet, session_id: SessionId, store: SessionStore) -> Self {
        let navigation = Navigation::new(questions.len());
        Self {
            questions,
            session_id,
            store,
            answers: AnswerSheet::new(),
            navigation,
            reset_after: THANK_YOU_RESET_DELAY,
            submitting: false,
        }
    }

    #[must_use]
    pub fn with_reset_delay(mut self, reset_after: Duration) -> Self {
        self.reset_after = reset_after;
        self
    }

    /// Load whatever was stored for this session key.
    ///
    /// Returns the number of answers restored.
    ///
    /// # Errors
    ///
    /// Returns `SurveyError::Storage` if the store cannot be read. Missing or
    /// unparsable values are not errors.
    pub async fn hydrate(&mut self) -> Result<usize, SurveyError> {
        let answers = self.store.load(&self.session_id).await?;
        self.answers = AnswerSheet::from_answers(answers);
        debug!(session = %self.session_id, restored = self.answers.len(), "hydrated survey");
        Ok(self.answers.len())
    }

    // ─── Accessors ─────────────────────────────────────────────────────────────

    #[must_use]
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    #[must_use]
    pub fn questions(&self) -> &QuestionSet {
        &self.questions
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerSheet {
        &self.answers
    }

    #[must_use]
    pub fn navigation(&self) -> Navigation {
        self.navigation
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.navigation.screen()
    }

    /// True between `begin_finalize` handing out the completion write and
    /// `complete` or `abort_finalize`. Input is locked meanwhile.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    #[must_use]
    pub fn reset_after(&self) -> Duration {
        self.reset_after
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        match self.navigation.screen() {
            Screen::Question(position) => self.questions.at_position(position),
            Screen::Welcome | Screen::ThankYou => None,
        }
    }

    /// Stored value for `question_id`, used to hydrate inputs.
    #[must_use]
    pub fn answer_for(&self, question_id: QuestionId) -> Option<&str> {
        self.answers.get(question_id)
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        if self.navigation.is_completed() {
            SessionStatus::Completed
        } else {
            SessionStatus::InProgress
        }
    }

    #[must_use]
    pub fn progress(&self) -> SurveyProgress {
        SurveyProgress {
            position: self.navigation.current_index(),
            total: self.navigation.total(),
            answered: self.answers.len(),
            is_complete: self.navigation.is_completed(),
        }
    }

    // ─── Transitions ───────────────────────────────────────────────────────────

    /// Welcome -> first question.
    pub fn start(&mut self) -> bool {
        if self.submitting {
            return false;
        }
        let moved = self.navigation.start();
        if moved {
            debug!(session = %self.session_id, "survey started");
        }
        moved
    }

    /// Next question; no-op on the last one.
    pub fn advance(&mut self) -> bool {
        if self.submitting {
            return false;
        }
        let moved = self.navigation.advance();
        if moved {
            debug!(position = self.navigation.current_index(), "advanced");
        }
        moved
    }

    /// Previous question; no-op on the first one.
    pub fn retreat(&mut self) -> bool {
        if self.submitting {
            return false;
        }
        let moved = self.navigation.retreat();
        if moved {
            debug!(position = self.navigation.current_index(), "retreated");
        }
        moved
    }

    /// Upsert an answer in memory and return the write that persists it.
    ///
    /// Any string is accepted, including an empty one.
    ///
    /// # Errors
    ///
    /// Returns `SurveyError::UnknownQuestion` if `question_id` is not part of
    /// the question set and `SurveyError::SubmitPending` while a submit is
    /// being written.
    pub fn apply_answer(
        &mut self,
        question_id: QuestionId,
        value: impl Into<String>,
    ) -> Result<PendingSave, SurveyError> {
        if self.submitting {
            return Err(SurveyError::SubmitPending);
        }
        if !self.questions.contains(question_id) {
            return Err(SurveyError::UnknownQuestion(question_id));
        }
        self.answers.upsert(question_id, value);
        Ok(self.pending(SessionRecord::in_progress(&self.answers)))
    }

    /// Upsert an answer and persist the whole answer list.
    ///
    /// The in-memory answer is kept even if the write fails.
    ///
    /// # Errors
    ///
    /// Returns `SurveyError::UnknownQuestion` for foreign ids and
    /// `SurveyError::Storage` if the write fails.
    pub async fn record_answer(
        &mut self,
        question_id: QuestionId,
        value: impl Into<String>,
    ) -> Result<(), SurveyError> {
        self.apply_answer(question_id, value)?.commit().await
    }

    /// Decide what a submit attempt needs without changing state.
    #[must_use]
    pub fn prepare_finalize(&self, decision: SubmitDecision) -> FinalizeStep {
        if self.submitting || !self.navigation.can_submit() {
            return FinalizeStep::Done(FinalizeOutcome::NotAvailable);
        }
        match decision {
            SubmitDecision::Declined => FinalizeStep::Done(FinalizeOutcome::Declined),
            SubmitDecision::Accepted => {
                FinalizeStep::Save(self.pending(SessionRecord::completed(&self.answers)))
            }
        }
    }

    /// Start a submit: hand out the completion write and lock input until
    /// `complete` or `abort_finalize` is called.
    pub fn begin_finalize(&mut self, decision: SubmitDecision) -> FinalizeStep {
        let step = self.prepare_finalize(decision);
        if matches!(step, FinalizeStep::Save(_)) {
            self.submitting = true;
        }
        step
    }

    /// The completion write failed: unlock input, stay on the last question.
    pub fn abort_finalize(&mut self) {
        if self.submitting {
            self.submitting = false;
            debug!(session = %self.session_id, "submit aborted");
        }
    }

    /// Enter the thank-you screen after the completion write succeeded.
    pub fn complete(&mut self) -> FinalizeOutcome {
        self.submitting = false;
        if !self.navigation.complete() {
            return FinalizeOutcome::NotAvailable;
        }
        info!(
            session = %self.session_id,
            answers = self.answers.len(),
            "survey completed"
        );
        FinalizeOutcome::Completed {
            reset_after: self.reset_after,
        }
    }

    /// Submit the survey if the user confirmed.
    ///
    /// The completion record is written before the screen changes, so a
    /// failed write leaves the controller untouched.
    ///
    /// # Errors
    ///
    /// Returns `SurveyError::Storage` if the completion write fails.
    pub async fn finalize(
        &mut self,
        decision: SubmitDecision,
    ) -> Result<FinalizeOutcome, SurveyError> {
        match self.begin_finalize(decision) {
            FinalizeStep::Done(outcome) => Ok(outcome),
            FinalizeStep::Save(save) => match save.commit().await {
                Ok(()) => Ok(self.complete()),
                Err(err) => {
                    self.abort_finalize();
                    Err(err)
                }
            },
        }
    }

    /// Timer callback: thank-you -> welcome.
    pub fn reset_after_thank_you(&mut self) -> bool {
        let reset = self.navigation.reset();
        if reset {
            debug!(session = %self.session_id, "returned to welcome");
        }
        reset
    }

    fn pending(&self, record: SessionRecord) -> PendingSave {
        PendingSave {
            store: self.store.clone(),
            session_id: self.session_id.clone(),
            record,
        }
    }
}
