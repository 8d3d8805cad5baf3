use crate::config::ReporterSettings;
use crate::consts::ANY_TARGET_ORIGIN;
use crate::messages::prelude::*;
use crate::protocol::{EditorMessage, EditorPayload, EditorStatus};

/// The editor side of the launch protocol. Posts at most one result per editor session.
#[derive(Debug, Default)]
pub struct ReporterMessageHandler {
	settings: ReporterSettings,
	targets: AvailableTargets,
	state: ReporterState,
}

impl ReporterMessageHandler {
	pub fn new(settings: ReporterSettings) -> Self {
		Self { settings, ..Default::default() }
	}

	pub fn editor_id(&self) -> &str {
		&self.settings.editor_id
	}

	pub fn state(&self) -> ReporterState {
		self.state
	}

	pub fn is_message_sent(&self) -> bool {
		self.state == ReporterState::Sent
	}

	/// Re-arms the reporter so a harness can run several sessions in one process.
	#[cfg(any(test, feature = "test-hooks"))]
	pub fn reset_sent_flag(&mut self) {
		self.state = ReporterState::Armed;
	}

	fn log_sent(&self, payload: &EditorPayload) {
		let editor_id = self.editor_id();
		match payload.status {
			EditorStatus::Success => log::info!("[{editor_id}] Success sent: {}", payload.preview),
			EditorStatus::Cancel => log::info!("[{editor_id}] Cancel sent"),
		}
	}
}

impl MessageHandler<ReporterMessage, ()> for ReporterMessageHandler {
	fn process_message(&mut self, message: ReporterMessage, responses: &mut VecDeque<Message>, _: ()) {
		match message {
			ReporterMessage::UpdateTargets { opener, parent } => {
				self.targets = AvailableTargets { opener, parent };
			}
			ReporterMessage::SendResult { payload } => {
				if self.state == ReporterState::Sent {
					log::warn!("[{}] A result was already sent in this session, ignoring", self.editor_id());
					return;
				}

				let Some(target) = self.targets.resolve(self.settings.fall_back_to_parent) else {
					log::warn!("[{}] No opener window to send the result to", self.editor_id());
					return;
				};

				self.log_sent(&payload);
				responses.add(FrontendMessage::TriggerPostMessage {
					target,
					message: EditorMessage::new(self.editor_id(), payload),
					target_origin: ANY_TARGET_ORIGIN.to_string(),
				});
				self.state = ReporterState::Sent;
			}
		}
	}
}
