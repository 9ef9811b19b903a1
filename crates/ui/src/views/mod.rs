pub mod problem;
pub mod state;

pub use problem::ProblemView;
pub use state::{FlowEvent, ProblemFlow};
