use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use dioxus::prelude::*;
use services::SubmitDecision;
use storage::repository::{InMemoryRepository, SessionRepository, SessionStore, StorageError};
use survey_core::model::{Answer, QuestionId, Screen, SessionId, SessionStatus};

use super::test_harness::{ViewHarness, setup_view_harness, setup_view_harness_with_reset};
use crate::views::{QuestionScreen, ThankYouScreen, WelcomeScreen};
use crate::vm::{InputVm, QuestionVm, SurveyIntent};

fn render_component(root: fn() -> Element) -> String {
    let mut dom = VirtualDom::new(root);
    dom.rebuild_in_place();
    dioxus_ssr::render(&dom)
}

fn stored_session_id(harness: &ViewHarness) -> SessionId {
    harness
        .handles
        .controller()
        .peek()
        .as_ref()
        .map(|survey| survey.session_id().clone())
        .expect("controller loaded")
}

fn walk_to_last_question(harness: &mut ViewHarness) {
    harness.dispatch(SurveyIntent::Start);
    for _ in 1..5 {
        harness.dispatch(SurveyIntent::Next);
    }
}

async fn loaded_harness(repo: &InMemoryRepository) -> ViewHarness {
    let mut harness = setup_view_harness(Arc::new(repo.clone()));
    harness.rebuild();
    harness.drive_async().await;
    harness
}

fn current_screen(harness: &ViewHarness) -> Screen {
    harness
        .handles
        .controller()
        .peek()
        .as_ref()
        .map(services::SurveyController::screen)
        .expect("controller loaded")
}

#[test]
fn welcome_screen_renders_title_and_start() {
    fn Root() -> Element {
        rsx! { WelcomeScreen { on_start: |()| {} } }
    }
    let html = render_component(Root);
    assert!(html.contains("Welcome to our Customer Survey"), "{html}");
    assert!(html.contains("Start Survey"), "{html}");
}

#[test]
fn thank_you_screen_has_no_controls() {
    fn Root() -> Element {
        rsx! { ThankYouScreen {} }
    }
    let html = render_component(Root);
    assert!(html.contains("Thank you for your feedback!"), "{html}");
    assert!(html.contains("You will be redirected shortly..."), "{html}");
    assert!(!html.contains("<button"), "{html}");
}

#[test]
fn text_question_renders_textarea_and_submit() {
    fn Root() -> Element {
        let question = QuestionVm {
            id: QuestionId::new(5),
            position: 5,
            total: 5,
            prompt: "What could we do to improve our service?".to_string(),
            input: InputVm::Text {
                value: "faster delivery".to_string(),
            },
            can_go_back: true,
            is_last: true,
            locked: false,
        };
        rsx! {
            QuestionScreen {
                question,
                on_answer: |_value: String| {},
                on_previous: |()| {},
                on_next: |()| {},
                on_submit: |()| {},
            }
        }
    }
    let html = render_component(Root);
    assert!(html.contains("5/5: What could we do to improve our service?"), "{html}");
    assert!(html.contains("<textarea"), "{html}");
    assert!(html.contains("faster delivery"), "{html}");
    assert!(html.contains("Submit"), "{html}");
    assert!(!html.contains(">Next<"), "{html}");
}

#[test]
fn rating_question_renders_bounded_range() {
    fn Root() -> Element {
        let question = QuestionVm {
            id: QuestionId::new(4),
            position: 4,
            total: 5,
            prompt: "Recommend us?".to_string(),
            input: InputVm::Rating {
                min: 1,
                max: 10,
                value: "5".to_string(),
            },
            can_go_back: true,
            is_last: false,
            locked: false,
        };
        rsx! {
            QuestionScreen {
                question,
                on_answer: |_value: String| {},
                on_previous: |()| {},
                on_next: |()| {},
                on_submit: |()| {},
            }
        }
    }
    let html = render_component(Root);
    assert!(html.contains("range"), "{html}");
    assert!(html.contains("max=\"10\""), "{html}");
    assert!(html.contains("Next"), "{html}");
    assert!(!html.contains(">Submit<"), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn survey_view_starts_on_welcome() {
    let repo = InMemoryRepository::new();
    let harness = loaded_harness(&repo).await;
    let html = harness.render();
    assert!(html.contains("Welcome to our Customer Survey"), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn survey_view_walks_questions() {
    let repo = InMemoryRepository::new();
    let mut harness = loaded_harness(&repo).await;

    harness.dispatch(SurveyIntent::Start);
    let html = harness.render();
    assert!(
        html.contains("1/5: How satisfied are you with our products?"),
        "{html}"
    );

    harness.dispatch(SurveyIntent::Previous);
    assert_eq!(current_screen(&harness), Screen::Question(1));

    harness.dispatch(SurveyIntent::Next);
    assert_eq!(current_screen(&harness), Screen::Question(2));
    let html = harness.render();
    assert!(html.contains("2/5:"), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn answers_are_persisted_in_order() {
    let repo = InMemoryRepository::new();
    let mut harness = loaded_harness(&repo).await;
    harness.dispatch(SurveyIntent::Start);

    for value in ["2", "4"] {
        harness.dispatch(SurveyIntent::Answer {
            question_id: QuestionId::new(1),
            value: value.to_string(),
        });
    }
    harness.drive_async().await;

    let session_id = stored_session_id(&harness);
    let stored = harness.service.store().load(&session_id).await.unwrap();
    assert_eq!(stored, vec![Answer::new(QuestionId::new(1), "4")]);
}

#[tokio::test(flavor = "current_thread")]
async fn submit_asks_for_confirmation() {
    let repo = InMemoryRepository::new();
    let mut harness = loaded_harness(&repo).await;
    walk_to_last_question(&mut harness);
    assert_eq!(current_screen(&harness), Screen::Question(5));

    harness.dispatch(SurveyIntent::RequestSubmit);
    let html = harness.render();
    assert!(
        html.contains("Are you sure you want to submit the survey?"),
        "{html}"
    );

    harness.dispatch(SurveyIntent::Decide(SubmitDecision::Declined));
    harness.drive_async().await;
    let html = harness.render();
    assert!(!html.contains("Are you sure"), "{html}");
    assert_eq!(current_screen(&harness), Screen::Question(5));

    harness.dispatch(SurveyIntent::RequestSubmit);
    harness.dispatch(SurveyIntent::Decide(SubmitDecision::Accepted));
    harness.drive_async().await;
    assert_eq!(current_screen(&harness), Screen::ThankYou);
    let html = harness.render();
    assert!(html.contains("Thank you for your feedback!"), "{html}");

    let session_id = stored_session_id(&harness);
    let record = SessionStore::new(Arc::new(repo))
        .load_record(&session_id)
        .await
        .unwrap()
        .expect("stored record");
    assert_eq!(record.status, SessionStatus::Completed);
}

#[tokio::test(flavor = "current_thread")]
async fn request_submit_is_ignored_before_last_question() {
    let repo = InMemoryRepository::new();
    let mut harness = loaded_harness(&repo).await;
    harness.dispatch(SurveyIntent::Start);
    harness.dispatch(SurveyIntent::RequestSubmit);
    let html = harness.render();
    assert!(!html.contains("Are you sure"), "{html}");
}

struct FailingRepo;

#[async_trait::async_trait]
impl SessionRepository for FailingRepo {
    async fn get_value(&self, _key: &SessionId) -> Result<Option<String>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn put_value(&self, _key: &SessionId, _value: String) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn survey_view_renders_error_state() {
    let mut harness = setup_view_harness(Arc::new(FailingRepo));
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Something went wrong"), "missing error in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
}

#[test]
fn locked_question_shows_pending_submit() {
    fn Root() -> Element {
        let question = QuestionVm {
            id: QuestionId::new(5),
            position: 5,
            total: 5,
            prompt: "What could we do to improve our service?".to_string(),
            input: InputVm::Text {
                value: String::new(),
            },
            can_go_back: true,
            is_last: true,
            locked: true,
        };
        rsx! {
            QuestionScreen {
                question,
                on_answer: |_value: String| {},
                on_previous: |()| {},
                on_next: |()| {},
                on_submit: |()| {},
            }
        }
    }
    let html = render_component(Root);
    assert!(html.contains("Submitting..."), "{html}");
    assert!(html.contains("disabled"), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn input_during_submit_cannot_undo_completion() {
    let repo = InMemoryRepository::new();
    let mut harness = loaded_harness(&repo).await;
    walk_to_last_question(&mut harness);

    harness.dispatch(SurveyIntent::RequestSubmit);
    harness.dispatch(SurveyIntent::Decide(SubmitDecision::Accepted));
    let html = harness.render();
    assert!(html.contains("Submitting..."), "{html}");

    // Nothing below may run before the completion write lands.
    harness.dispatch(SurveyIntent::Answer {
        question_id: QuestionId::new(5),
        value: "late edit".to_string(),
    });
    harness.dispatch(SurveyIntent::Previous);
    harness.dispatch(SurveyIntent::RequestSubmit);
    assert_eq!(current_screen(&harness), Screen::Question(5));
    let html = harness.render();
    assert!(!html.contains("Are you sure"), "{html}");

    harness.drive_async().await;
    assert_eq!(current_screen(&harness), Screen::ThankYou);

    let record = SessionStore::new(Arc::new(repo))
        .load_record(&stored_session_id(&harness))
        .await
        .unwrap()
        .expect("stored record");
    assert_eq!(record.status, SessionStatus::Completed);
    assert!(record.answers.is_empty());
}

/// Counts writes so tests can tell how many submits reached storage.
#[derive(Default)]
struct CountingRepo {
    inner: InMemoryRepository,
    writes: AtomicUsize,
}

#[async_trait::async_trait]
impl SessionRepository for CountingRepo {
    async fn get_value(&self, key: &SessionId) -> Result<Option<String>, StorageError> {
        self.inner.get_value(key).await
    }

    async fn put_value(&self, key: &SessionId, value: String) -> Result<(), StorageError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.put_value(key, value).await
    }
}

#[tokio::test(flavor = "current_thread")]
async fn thank_you_returns_to_welcome_after_delay() {
    let repo = Arc::new(CountingRepo::default());
    let mut harness = setup_view_harness_with_reset(repo.clone(), Duration::from_millis(20));
    harness.rebuild();
    harness.drive_async().await;
    walk_to_last_question(&mut harness);

    harness.dispatch(SurveyIntent::RequestSubmit);
    harness.dispatch(SurveyIntent::Decide(SubmitDecision::Accepted));
    // A repeated confirmation while the first is pending must not queue a second submit.
    harness.dispatch(SurveyIntent::Decide(SubmitDecision::Accepted));

    for _ in 0..5 {
        if current_screen(&harness) == Screen::Welcome {
            break;
        }
        harness.drive_async().await;
    }

    assert_eq!(current_screen(&harness), Screen::Welcome);
    let html = harness.render();
    assert!(html.contains("Welcome to our Customer Survey"), "{html}");
    assert_eq!(repo.writes.load(Ordering::SeqCst), 1);

    let navigation = harness
        .handles
        .controller()
        .peek()
        .as_ref()
        .map(services::SurveyController::navigation)
        .expect("controller loaded");
    assert!(!navigation.is_thank_you());
    assert!(!navigation.is_completed());

    let record = SessionStore::new(repo.clone())
        .load_record(&stored_session_id(&harness))
        .await
        .unwrap()
        .expect("stored record");
    assert_eq!(record.status, SessionStatus::Completed);
}
