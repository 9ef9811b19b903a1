use std::sync::Arc;

use dioxus::prelude::*;

use tutor_core::model::RawAnswer;

use crate::context::AppContext;
use crate::views::state::{FlowEvent, ProblemFlow};

/// The single view of the app: request a problem, answer it, read the
/// feedback. All state lives in one `ProblemFlow` signal; the handlers only
/// dispatch events and spawn the HTTP calls, and rendering is a pure
/// function of the latest snapshot.
#[component]
pub fn ProblemView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut flow = use_signal(ProblemFlow::default);

    let generate_api = ctx.api();
    let on_generate = move |_| {
        if flow.read().loading_problem {
            return;
        }
        let api = Arc::clone(&generate_api);
        flow.write().apply(FlowEvent::GenerateRequested);
        spawn(async move {
            match api.generate_problem().await {
                Ok(session) => flow.write().apply(FlowEvent::GenerateSucceeded(session)),
                Err(err) => flow.write().apply(FlowEvent::GenerateFailed(err.to_string())),
            }
        });
    };

    let submit_api = ctx.api();
    let on_submit = move |_| {
        let (can_submit, session_id, answer_text) = {
            let current = flow.read();
            (
                current.can_submit(),
                current.session.as_ref().map(|s| s.id),
                current.answer_text.clone(),
            )
        };
        if !can_submit {
            return;
        }
        let Some(session_id) = session_id else {
            return;
        };

        let api = Arc::clone(&submit_api);
        flow.write().apply(FlowEvent::SubmitRequested);
        spawn(async move {
            // The answer goes over the wire raw; the server does the
            // coercion and grading.
            match api
                .submit_answer(session_id, RawAnswer::from(answer_text))
                .await
            {
                Ok(submission) => flow.write().apply(FlowEvent::SubmitSucceeded {
                    feedback: submission.feedback_text,
                    is_correct: submission.is_correct,
                }),
                Err(err) => flow.write().apply(FlowEvent::SubmitFailed(err.to_string())),
            }
        });
    };

    let view = flow();
    rsx! {
        main { class: "page",
            div { class: "card",
                h1 { class: "title", "Math Problem Generator" }

                button {
                    class: "btn btn-generate",
                    r#type: "button",
                    disabled: view.loading_problem,
                    onclick: on_generate,
                    if view.loading_problem { "Generating..." } else { "Generate New Problem" }
                }

                if let Some(session) = view.session.as_ref() {
                    div { class: "problem-block",
                        p { class: "block-label", "Problem:" }
                        p { class: "problem-text", "{session.problem_text}" }
                    }

                    div { class: "answer-block",
                        label { class: "block-label", r#for: "answer", "Your Answer:" }
                        input {
                            id: "answer",
                            class: "answer-input",
                            r#type: "number",
                            placeholder: "Enter your answer",
                            value: "{view.answer_text}",
                            oninput: move |evt| {
                                flow.write().apply(FlowEvent::AnswerEdited(evt.value()));
                            },
                        }
                    }

                    button {
                        class: "btn btn-submit",
                        r#type: "button",
                        disabled: view.loading_submit,
                        onclick: on_submit,
                        if view.loading_submit { "Submitting..." } else { "Submit Answer" }
                    }
                }

                if let Some(feedback) = view.feedback.as_ref() {
                    div {
                        class: if view.is_correct == Some(true) {
                            "feedback feedback-correct"
                        } else {
                            "feedback feedback-incorrect"
                        },
                        p { "{feedback}" }
                    }
                }

                if let Some(error) = view.error.as_ref() {
                    div { class: "error-block",
                        p { "{error}" }
                    }
                }
            }
        }
    }
}
