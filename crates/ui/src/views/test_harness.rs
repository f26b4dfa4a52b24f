use std::sync::Arc;
use std::time::Duration;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use services::{SurveyService, THANK_YOU_RESET_DELAY};
use storage::repository::SessionRepository;
use survey_core::model::QuestionSet;
use survey_core::time::fixed_clock;

use crate::context::{UiApp, build_app_context};
use crate::views::SurveyView;
use crate::views::survey::SurveyTestHandles;

#[derive(Clone)]
struct TestApp {
    survey_service: Arc<SurveyService>,
}

impl UiApp for TestApp {
    fn survey_service(&self) -> Arc<SurveyService> {
        Arc::clone(&self.survey_service)
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    handles: SurveyTestHandles,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewHarnessRoot(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.handles.clone());
    rsx! { SurveyView {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub service: Arc<SurveyService>,
    pub handles: SurveyTestHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        for _ in 0..4 {
            let _ = tokio::time::timeout(
                std::time::Duration::from_millis(50),
                self.dom.wait_for_work(),
            )
            .await;
            self.dom.render_immediate(&mut NoOpMutations);
            self.dom.process_events();
        }
    }

    /// Dispatch an intent inside the dom's runtime, then flush.
    pub fn dispatch(&mut self, intent: crate::vm::SurveyIntent) {
        let dispatch = self.handles.dispatch();
        self.dom.in_runtime(|| dispatch.call(intent));
        drive_dom(&mut self.dom);
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(sessions: Arc<dyn SessionRepository>) -> ViewHarness {
    setup_view_harness_with_reset(sessions, THANK_YOU_RESET_DELAY)
}

pub fn setup_view_harness_with_reset(
    sessions: Arc<dyn SessionRepository>,
    reset_after: Duration,
) -> ViewHarness {
    let service = Arc::new(
        SurveyService::new(fixed_clock(), QuestionSet::customer_survey(), sessions)
            .with_reset_delay(reset_after),
    );
    let handles = SurveyTestHandles::default();
    let app = Arc::new(TestApp {
        survey_service: Arc::clone(&service),
    });

    let dom = VirtualDom::new_with_props(
        ViewHarnessRoot,
        ViewHarnessProps {
            app,
            handles: handles.clone(),
        },
    );

    ViewHarness {
        dom,
        service,
        handles,
    }
}
