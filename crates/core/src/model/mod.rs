mod answer;
mod ids;
mod session;
mod submission;

pub use answer::RawAnswer;
pub use ids::{ParseIdError, SessionId, SubmissionId};
pub use session::{ProblemSession, SessionError};
pub use submission::Submission;
