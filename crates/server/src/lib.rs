#![forbid(unsafe_code)]

pub mod error;
pub mod routes;

pub use routes::{AppState, router};
