mod controller;
mod progress;
mod workflow;

// Public API of the survey subsystem.
pub use crate::error::SurveyError;
pub use controller::{
    FinalizeOutcome, FinalizeStep, PendingSave, SubmitDecision, SurveyController,
    THANK_YOU_RESET_DELAY,
};
pub use progress::SurveyProgress;
pub use workflow::SurveyService;
