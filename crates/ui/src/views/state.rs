use tutor_core::api::SessionBody;

/// Client-side state for the problem flow.
///
/// Everything the view renders lives in this record, and only
/// [`ProblemFlow::apply`] mutates it. The two loading flags are
/// independent: a generate may start while a submit is still in flight.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProblemFlow {
    pub session: Option<SessionBody>,
    pub answer_text: String,
    pub feedback: Option<String>,
    pub is_correct: Option<bool>,
    pub loading_problem: bool,
    pub loading_submit: bool,
    pub error: Option<String>,
}

/// Discrete events driving the flow. Requested/Succeeded/Failed triples for
/// the two async actions, plus local input editing.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowEvent {
    GenerateRequested,
    GenerateSucceeded(SessionBody),
    GenerateFailed(String),
    AnswerEdited(String),
    SubmitRequested,
    SubmitSucceeded { feedback: String, is_correct: bool },
    SubmitFailed(String),
}

impl ProblemFlow {
    /// Submit is possible only with an active session, a non-blank answer,
    /// and no submit already in flight.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.session.is_some() && !self.answer_text.trim().is_empty() && !self.loading_submit
    }

    pub fn apply(&mut self, event: FlowEvent) {
        match event {
            FlowEvent::GenerateRequested => {
                self.error = None;
                self.feedback = None;
                self.is_correct = None;
                self.answer_text.clear();
                self.loading_problem = true;
            }
            FlowEvent::GenerateSucceeded(session) => {
                self.session = Some(session);
                self.loading_problem = false;
            }
            FlowEvent::GenerateFailed(message) => {
                self.error = Some(message);
                self.loading_problem = false;
            }
            FlowEvent::AnswerEdited(text) => {
                self.answer_text = text;
            }
            FlowEvent::SubmitRequested => {
                self.error = None;
                self.loading_submit = true;
            }
            FlowEvent::SubmitSucceeded {
                feedback,
                is_correct,
            } => {
                self.feedback = Some(feedback);
                self.is_correct = Some(is_correct);
                self.loading_submit = false;
            }
            FlowEvent::SubmitFailed(message) => {
                self.error = Some(message);
                self.loading_submit = false;
            }
        }
    }
}
