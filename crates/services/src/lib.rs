#![forbid(unsafe_code)]

pub mod error;
pub mod survey;

pub use survey_core::Clock;

pub use error::SurveyError;
pub use survey::{
    FinalizeOutcome, FinalizeStep, PendingSave, SubmitDecision, SurveyController, SurveyProgress,
    SurveyService, THANK_YOU_RESET_DELAY,
};
