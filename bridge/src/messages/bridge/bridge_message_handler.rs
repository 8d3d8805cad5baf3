use crate::config::{BridgeSettings, EditorConfig};
use crate::consts::NEW_WINDOW_TARGET;
use crate::messages::prelude::*;
use crate::protocol::validate_window_message;

/// The caller side of the launch protocol: owns at most one pending invocation and resolves it exactly once,
/// either with the first valid result or with a timeout, whichever event is processed first.
#[derive(Debug, Default)]
pub struct BridgeMessageHandler {
	settings: BridgeSettings,
	pending: Option<PendingInvocation>,
	state: InvocationState,
}

#[derive(Debug)]
struct PendingInvocation {
	id: InvocationId,
	config: EditorConfig,
}

impl BridgeMessageHandler {
	pub fn new(settings: BridgeSettings) -> Self {
		Self { settings, ..Default::default() }
	}

	pub fn settings(&self) -> &BridgeSettings {
		&self.settings
	}

	pub fn state(&self) -> InvocationState {
		self.state
	}

	pub fn pending_invocation(&self) -> Option<InvocationId> {
		self.pending.as_ref().map(|pending| pending.id)
	}

	/// Ends the pending invocation if it is the given one, so that only the first of the racing events takes effect.
	fn take_pending(&mut self, invocation: InvocationId) -> Option<PendingInvocation> {
		self.pending.take_if(|pending| pending.id == invocation)
	}
}

impl MessageHandler<BridgeMessage, ()> for BridgeMessageHandler {
	fn process_message(&mut self, message: BridgeMessage, responses: &mut VecDeque<Message>, _: ()) {
		match message {
			BridgeMessage::Open { invocation, config, timeout } => {
				if let Some(pending) = &self.pending {
					log::warn!("Not opening editor \"{}\" as invocation {invocation} because invocation {} is still pending", config.id, pending.id);
					return;
				}

				let timeout = timeout.unwrap_or(self.settings.response_timeout);
				log::debug!("Opening editor \"{}\" at {} as invocation {invocation}, waiting {timeout:?} for its result", config.id, config.prod_origin);

				responses.add(FrontendMessage::TriggerOpenWindow {
					url: config.prod_origin.clone(),
					target: NEW_WINDOW_TARGET.to_string(),
				});
				responses.add(FrontendMessage::TriggerAttachMessageListener { invocation });
				responses.add(FrontendMessage::TriggerStartTimeout {
					invocation,
					milliseconds: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
				});

				self.pending = Some(PendingInvocation { id: invocation, config });
				self.state = InvocationState::Pending;
			}
			BridgeMessage::ReceiveWindowMessage { invocation, origin, data } => {
				let Some(pending) = self.pending.as_ref().filter(|pending| pending.id == invocation) else {
					log::trace!("Ignoring a window message from {origin} since invocation {invocation} is no longer pending");
					return;
				};

				let payload = match validate_window_message(&origin, &data, &pending.config, self.settings.environment) {
					Ok(payload) => payload,
					Err(rejection) => {
						log::debug!("Ignoring a window message from {origin} while waiting on editor \"{}\": {rejection}", pending.config.id);
						return;
					}
				};

				let Some(pending) = self.take_pending(invocation) else { return };
				log::debug!("Editor \"{}\" reported a {:?} result for invocation {invocation}", pending.config.id, payload.status);

				responses.add(FrontendMessage::TriggerClearTimeout { invocation });
				responses.add(FrontendMessage::TriggerDetachMessageListener { invocation });
				responses.add(FrontendMessage::ResolveEditorResult { invocation, payload });
				self.state = InvocationState::Resolved;
			}
			BridgeMessage::TimeoutElapsed { invocation } => {
				let Some(pending) = self.take_pending(invocation) else {
					log::trace!("Ignoring the elapsed timeout of invocation {invocation} since it is no longer pending");
					return;
				};
				log::debug!("Editor \"{}\" did not report a result for invocation {invocation} in time", pending.config.id);

				// The timer has already fired, but clearing it lets the host release its callback
				responses.add(FrontendMessage::TriggerClearTimeout { invocation });
				responses.add(FrontendMessage::TriggerDetachMessageListener { invocation });
				responses.add(FrontendMessage::ResolveEditorTimeout { invocation });
				self.state = InvocationState::Expired;
			}
		}
	}
}
