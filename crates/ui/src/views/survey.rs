use dioxus::prelude::*;
use futures::StreamExt;
use services::{FinalizeOutcome, FinalizeStep, PendingSave, SurveyController, SurveyError};
use tracing::{debug, warn};

use crate::context::AppContext;
use crate::views::confirm::ConfirmSubmitModal;
use crate::views::question::QuestionScreen;
use crate::views::thank_you::ThankYouScreen;
use crate::views::welcome::WelcomeScreen;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{SurveyIntent, SurveyScreenVm, map_survey_screen};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

/// Writes handed to the persistence task, committed strictly in order.
enum PersistJob {
    Answer(PendingSave),
    Submit(PendingSave),
}

#[component]
pub fn SurveyView() -> Element {
    let ctx = use_context::<AppContext>();
    let survey = ctx.survey_service();

    let controller = use_signal(|| None::<SurveyController>);
    let confirming = use_signal(|| false);
    let notice = use_signal(|| None::<ViewError>);

    let resource = use_resource(move || {
        let survey = survey.clone();
        let mut controller = controller;
        async move {
            let opened = survey
                .open_session()
                .await
                .map_err(|_| ViewError::Unknown)?;
            controller.set(Some(opened));
            Ok::<_, ViewError>(())
        }
    });

    let persist = use_coroutine(move |mut rx: UnboundedReceiver<PersistJob>| {
        let mut controller = controller;
        let mut notice = notice;
        async move {
            while let Some(job) = rx.next().await {
                match job {
                    PersistJob::Answer(save) => {
                        if save.commit().await.is_err() {
                            notice.set(Some(ViewError::SaveFailed));
                        } else if notice() == Some(ViewError::SaveFailed) {
                            notice.set(None);
                        }
                    }
                    PersistJob::Submit(save) => {
                        if save.commit().await.is_err() {
                            if let Some(survey) = controller.write().as_mut() {
                                survey.abort_finalize();
                            }
                            notice.set(Some(ViewError::SubmitFailed));
                            continue;
                        }
                        notice.set(None);
                        let outcome = controller.write().as_mut().map(SurveyController::complete);
                        if let Some(FinalizeOutcome::Completed { reset_after }) = outcome {
                            spawn(async move {
                                tokio::time::sleep(reset_after).await;
                                if let Some(survey) = controller.write().as_mut() {
                                    survey.reset_after_thank_you();
                                }
                            });
                        }
                    }
                }
            }
        }
    });

    let dispatch_intent = use_callback(move |intent: SurveyIntent| {
        let mut controller = controller;
        let mut confirming = confirming;

        match intent {
            SurveyIntent::Start => {
                if let Some(survey) = controller.write().as_mut() {
                    survey.start();
                }
            }
            SurveyIntent::Next => {
                if let Some(survey) = controller.write().as_mut() {
                    survey.advance();
                }
            }
            SurveyIntent::Previous => {
                if let Some(survey) = controller.write().as_mut() {
                    survey.retreat();
                }
            }
            SurveyIntent::Answer { question_id, value } => {
                let applied = controller
                    .write()
                    .as_mut()
                    .map(|survey| survey.apply_answer(question_id, value));
                match applied {
                    Some(Ok(save)) => persist.send(PersistJob::Answer(save)),
                    Some(Err(SurveyError::SubmitPending)) => debug!("answer ignored during submit"),
                    Some(Err(err)) => warn!(error = %err, "answer rejected"),
                    None => {}
                }
            }
            SurveyIntent::RequestSubmit => {
                let can_submit = controller
                    .read()
                    .as_ref()
                    .is_some_and(|survey| {
                        survey.navigation().can_submit() && !survey.is_submitting()
                    });
                if can_submit {
                    confirming.set(true);
                }
            }
            SurveyIntent::Decide(decision) => {
                confirming.set(false);
                // Locks input now; the write itself runs in the persistence task.
                let step = controller
                    .write()
                    .as_mut()
                    .map(|survey| survey.begin_finalize(decision));
                match step {
                    Some(FinalizeStep::Save(save)) => persist.send(PersistJob::Submit(save)),
                    Some(FinalizeStep::Done(outcome)) => debug!(?outcome, "submit not taken"),
                    None => {}
                }
            }
        }
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<SurveyTestHandles>() {
                handles.register(dispatch_intent, controller);
            }
        }
    }

    let state = view_state_from_resource(&resource);
    let screen = controller.read().as_ref().map(map_survey_screen);

    rsx! {
        div { class: "survey-page",
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let mut resource = resource;
                            resource.restart();
                        },
                        "Retry"
                    }
                },
                ViewState::Ready(()) => match screen {
                    None => rsx! {
                        p { "Loading..." }
                    },
                    Some(SurveyScreenVm::Welcome) => rsx! {
                        WelcomeScreen {
                            on_start: move |()| dispatch_intent.call(SurveyIntent::Start),
                        }
                    },
                    Some(SurveyScreenVm::ThankYou) => rsx! {
                        ThankYouScreen {}
                    },
                    Some(SurveyScreenVm::Question(question)) => {
                        let question_id = question.id;
                        rsx! {
                            QuestionScreen {
                                question,
                                on_answer: move |value: String| {
                                    dispatch_intent.call(SurveyIntent::Answer { question_id, value });
                                },
                                on_previous: move |()| dispatch_intent.call(SurveyIntent::Previous),
                                on_next: move |()| dispatch_intent.call(SurveyIntent::Next),
                                on_submit: move |()| dispatch_intent.call(SurveyIntent::RequestSubmit),
                            }
                            if confirming() {
                                ConfirmSubmitModal {
                                    on_decide: move |decision| {
                                        dispatch_intent.call(SurveyIntent::Decide(decision));
                                    },
                                }
                            }
                        }
                    }
                },
            }
            if let Some(err) = notice() {
                p { class: "survey-notice", "{err.message()}" }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct SurveyTestHandles {
    dispatch: Rc<RefCell<Option<Callback<SurveyIntent>>>>,
    controller: Rc<RefCell<Option<Signal<Option<SurveyController>>>>>,
}

#[cfg(test)]
impl SurveyTestHandles {
    pub(crate) fn register(
        &self,
        dispatch: Callback<SurveyIntent>,
        controller: Signal<Option<SurveyController>>,
    ) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.controller.borrow_mut() = Some(controller);
    }

    pub(crate) fn dispatch(&self) -> Callback<SurveyIntent> {
        (*self.dispatch.borrow()).expect("survey dispatch registered")
    }

    pub(crate) fn controller(&self) -> Signal<Option<SurveyController>> {
        (*self.controller.borrow()).expect("survey controller registered")
    }
}
