use crate::messages::prelude::*;

/// Implements a message handler struct for a separate message enum.
/// - The first generic argument (`M`) is that message enum type, representing a message variant to be matched and handled in `process_message()`.
/// - The second generic argument (`D`) is the type of data that can be passed along by the caller to `process_message()`.
pub trait MessageHandler<M, D> {
	fn process_message(&mut self, message: M, responses: &mut VecDeque<Message>, data: D);
}

/// Shorthand for queueing any child message as a response.
pub trait Responses {
	fn add(&mut self, message: impl Into<Message>);
}

impl Responses for VecDeque<Message> {
	fn add(&mut self, message: impl Into<Message>) {
		self.push_back(message.into());
	}
}
