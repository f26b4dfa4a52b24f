mod confirm;
mod question;
mod state;
mod survey;
mod thank_you;
mod welcome;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use confirm::ConfirmSubmitModal;
pub use question::QuestionScreen;
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use survey::SurveyView;
pub use thank_you::ThankYouScreen;
pub use welcome::WelcomeScreen;
