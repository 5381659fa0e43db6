// Labeling session
// Explicit context object for a manual labeling pass

pub mod label;

pub use label::{LabelSession, SessionError};
