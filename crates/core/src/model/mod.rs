mod answer;
mod ids;
mod navigation;
mod question;
mod session;

pub use answer::{Answer, AnswerSheet};
pub use ids::{QuestionId, SessionId};
pub use navigation::{Navigation, Screen};
pub use question::{Question, QuestionKind, QuestionSet, QuestionSetError};
pub use session::{SessionRecord, SessionStatus};
