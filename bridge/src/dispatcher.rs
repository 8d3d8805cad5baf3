use crate::config::{BridgeSettings, ReporterSettings};
use crate::messages::prelude::*;

#[derive(Debug, Default)]
pub struct Dispatcher {
	message_queues: Vec<VecDeque<Message>>,
	pub responses: Vec<FrontendMessage>,
	pub message_handlers: DispatcherMessageHandlers,
}

#[derive(Debug, Default)]
pub struct DispatcherMessageHandlers {
	pub bridge_message_handler: BridgeMessageHandler,
	pub reporter_message_handler: ReporterMessageHandler,
}

impl Dispatcher {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_settings(bridge: BridgeSettings, reporter: ReporterSettings) -> Self {
		Self {
			message_handlers: DispatcherMessageHandlers {
				bridge_message_handler: BridgeMessageHandler::new(bridge),
				reporter_message_handler: ReporterMessageHandler::new(reporter),
			},
			..Default::default()
		}
	}

	// If the deepest queues (higher index in queues list) are now empty (after being popped from) then remove them
	fn cleanup_queues(&mut self) {
		while self.message_queues.last().is_some_and(VecDeque::is_empty) {
			self.message_queues.pop();
		}
	}

	/// Runs the message and, depth-first, every message it produces, collecting the `FrontendMessage`s into `responses` in the order they were produced.
	pub fn handle_message<T: Into<Message>>(&mut self, message: T) {
		self.message_queues.push(VecDeque::from([message.into()]));

		while let Some(message) = self.message_queues.last_mut().and_then(VecDeque::pop_front) {
			self.log_message(&message);

			// Create a new queue for the child messages
			let mut queue = VecDeque::new();

			// Process the action by forwarding it to the relevant message handler, or saving the FrontendMessage to be carried out by the host
			match message {
				Message::NoOp => {}
				Message::Bridge(message) => {
					self.message_handlers.bridge_message_handler.process_message(message, &mut queue, ());
				}
				Message::Frontend(message) => {
					// `FrontendMessage`s are saved and will be handed to the host after the message queue is done being processed
					self.responses.push(message);
				}
				Message::Reporter(message) => {
					self.message_handlers.reporter_message_handler.process_message(message, &mut queue, ());
				}
			}

			// If there are child messages, append the queue to the list of queues
			if !queue.is_empty() {
				self.message_queues.push(queue);
			}

			self.cleanup_queues();
		}
	}

	fn log_message(&self, message: &Message) {
		let depth = self.message_queues.len().saturating_sub(1);
		log::trace!("{}Message: {message:?}", "│ ".repeat(depth));
	}
}
