use crate::application::Application;
use crate::config::{BridgeSettings, ReporterSettings};
use crate::messages::prelude::*;
use crate::protocol::{EditorMessage, EditorPayload};

/// The browser primitives the editor side needs.
pub trait ReporterHost {
	/// Which windows exist right now to receive the result.
	fn available_targets(&self) -> AvailableTargets;
	/// Delivery is fire-and-forget, so failures are for the host to log.
	fn post_message(&mut self, target: ReportTarget, message: &EditorMessage, target_origin: &str);
}

/// Lives inside an editor for the whole editor session and reports its result to the window that launched it, at most once.
pub struct Reporter<H: ReporterHost> {
	host: H,
	application: Application,
}

impl<H: ReporterHost> Reporter<H> {
	pub fn new(host: H, settings: ReporterSettings) -> Self {
		Self {
			host,
			application: Application::with_settings(BridgeSettings::default(), settings),
		}
	}

	/// Posts the result to the opener. Does nothing, apart from logging, if a result was already sent or there is no window to send it to.
	pub fn send_result(&mut self, payload: EditorPayload) {
		let AvailableTargets { opener, parent } = self.host.available_targets();

		self.dispatch(ReporterMessage::UpdateTargets { opener, parent });
		self.dispatch(ReporterMessage::SendResult { payload });
	}

	pub fn is_message_sent(&self) -> bool {
		self.application.reporter().is_message_sent()
	}

	pub fn editor_id(&self) -> &str {
		self.application.reporter().editor_id()
	}

	#[cfg(any(test, feature = "test-hooks"))]
	pub fn reset_sent_flag_for_tests(&mut self) {
		self.application.reporter_mut().reset_sent_flag();
	}

	pub fn host(&self) -> &H {
		&self.host
	}

	pub fn host_mut(&mut self) -> &mut H {
		&mut self.host
	}

	fn dispatch(&mut self, message: impl Into<Message>) {
		for response in self.application.handle_message(message) {
			match response {
				FrontendMessage::TriggerPostMessage { target, message, target_origin } => self.host.post_message(target, &message, &target_origin),
				response => log::error!("The reporter cannot carry out {response:?}"),
			}
		}
	}
}
