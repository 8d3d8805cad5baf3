use crate::config::{BridgeSettings, ReporterSettings};
use crate::dispatcher::Dispatcher;
use crate::messages::prelude::*;

/// The platform-independent backend of one window: turns messages describing what happened into `FrontendMessage`s describing what the host should do.
pub struct Application {
	pub dispatcher: Dispatcher,
}

impl Application {
	pub fn new() -> Self {
		Self { dispatcher: Dispatcher::new() }
	}

	pub fn with_settings(bridge: BridgeSettings, reporter: ReporterSettings) -> Self {
		Self {
			dispatcher: Dispatcher::with_settings(bridge, reporter),
		}
	}

	pub fn handle_message<T: Into<Message>>(&mut self, message: T) -> Vec<FrontendMessage> {
		self.dispatcher.handle_message(message);

		std::mem::take(&mut self.dispatcher.responses)
	}

	pub fn bridge(&self) -> &BridgeMessageHandler {
		&self.dispatcher.message_handlers.bridge_message_handler
	}

	pub fn reporter(&self) -> &ReporterMessageHandler {
		&self.dispatcher.message_handlers.reporter_message_handler
	}

	pub fn reporter_mut(&mut self) -> &mut ReporterMessageHandler {
		&mut self.dispatcher.message_handlers.reporter_message_handler
	}
}

impl Default for Application {
	fn default() -> Self {
		Self::new()
	}
}
