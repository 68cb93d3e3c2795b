//! Bus consumers for the Court Service.

pub mod handler;

pub use handler::{handle_event, IntakeResult, SubmissionIntakeHandler};
