use services::{SubmitDecision, SurveyController};
use survey_core::model::{Question, QuestionId, QuestionKind, Screen};

/// User intents emitted by the survey screens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SurveyIntent {
    Start,
    Answer { question_id: QuestionId, value: String },
    Next,
    Previous,
    /// Opens the confirmation step; only meaningful on the last question.
    RequestSubmit,
    Decide(SubmitDecision),
}

/// Input control chosen by the question kind, pre-filled from the stored answer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputVm {
    Rating { min: i32, max: i32, value: String },
    Text { value: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub id: QuestionId,
    pub position: usize,
    pub total: usize,
    pub prompt: String,
    pub input: InputVm,
    pub can_go_back: bool,
    pub is_last: bool,
    /// A submit is being written; every control is disabled.
    pub locked: bool,
}

impl QuestionVm {
    /// Progress line shown above the input, e.g. `2/5: How fair ...`.
    #[must_use]
    pub fn heading(&self) -> String {
        format!("{}/{}: {}", self.position, self.total, self.prompt)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SurveyScreenVm {
    Welcome,
    Question(QuestionVm),
    ThankYou,
}

/// Value a range input shows before the user touches it: the midpoint.
#[must_use]
pub fn default_rating(min: i32, max: i32) -> i32 {
    min + (max - min) / 2
}

fn map_input(question: &Question, stored: Option<&str>) -> InputVm {
    match question.kind() {
        QuestionKind::Rating { min, max } => InputVm::Rating {
            min,
            max,
            value: stored.map_or_else(|| default_rating(min, max).to_string(), str::to_owned),
        },
        QuestionKind::Text => InputVm::Text {
            value: stored.unwrap_or_default().to_owned(),
        },
    }
}

#[must_use]
pub fn map_survey_screen(controller: &SurveyController) -> SurveyScreenVm {
    let navigation = controller.navigation();
    match navigation.screen() {
        Screen::Welcome => SurveyScreenVm::Welcome,
        Screen::ThankYou => SurveyScreenVm::ThankYou,
        Screen::Question(position) => {
            let Some(question) = controller.questions().at_position(position) else {
                return SurveyScreenVm::Welcome;
            };
            SurveyScreenVm::Question(QuestionVm {
                id: question.id(),
                position,
                total: navigation.total(),
                prompt: question.prompt().to_owned(),
                input: map_input(question, controller.answer_for(question.id())),
                can_go_back: navigation.can_retreat(),
                is_last: navigation.is_last_question(),
                locked: controller.is_submitting(),
            })
        }
    }
}
