//! The wire envelope exchanged between the bridge and an editor, and the checks an inbound message must pass.

mod envelope;
mod validation;

pub use envelope::{EditorMessage, EditorPayload, EditorStatus};
pub use validation::{Environment, Rejection, validate_window_message};
