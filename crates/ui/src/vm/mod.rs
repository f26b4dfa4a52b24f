mod survey_vm;

pub use survey_vm::{
    InputVm, QuestionVm, SurveyIntent, SurveyScreenVm, default_rating, map_survey_screen,
};
