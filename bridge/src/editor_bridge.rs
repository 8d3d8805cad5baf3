use crate::application::Application;
use crate::config::{BridgeSettings, EditorConfig, ReporterSettings};
use crate::error::BridgeError;
use crate::messages::prelude::*;
use crate::protocol::EditorPayload;
use futures::channel::oneshot;
use futures::future::{FutureExt, LocalBoxFuture};
use serde_json::Value;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

/// The browser primitives the caller side needs. Implementations carry out each call right away and report back through
/// [`EditorBridge::receive_window_message`] and [`EditorBridge::timeout_elapsed`].
pub trait BridgeHost {
	fn open_window(&mut self, url: &str, target: &str);
	/// Starts forwarding every cross-window message to the bridge, tagged with the invocation.
	fn attach_message_listener(&mut self, invocation: InvocationId);
	fn detach_message_listener(&mut self, invocation: InvocationId);
	fn start_timeout(&mut self, invocation: InvocationId, timeout: Duration);
	fn clear_timeout(&mut self, invocation: InvocationId);
}

struct InvocationCallbacks {
	invocation: InvocationId,
	on_result: Box<dyn FnOnce(EditorPayload)>,
	on_error: Box<dyn FnOnce()>,
}

/// Opens editors and hands their result to the caller exactly once, or reports that none arrived in time.
pub struct EditorBridge<H: BridgeHost> {
	host: H,
	application: Application,
	callbacks: Option<InvocationCallbacks>,
	next_invocation: u64,
}

impl<H: BridgeHost> EditorBridge<H> {
	pub fn new(host: H, settings: BridgeSettings) -> Self {
		Self {
			host,
			application: Application::with_settings(settings, ReporterSettings::default()),
			callbacks: None,
			next_invocation: 0,
		}
	}

	/// Opens the editor and waits for its result for the bridge's configured timeout.
	///
	/// `on_result` receives the first valid result, and `on_error` is called if none arrives before the timeout. At most one of them is ever called.
	pub fn open(&mut self, config: EditorConfig, on_result: impl FnOnce(EditorPayload) + 'static, on_error: impl FnOnce() + 'static) -> Result<InvocationId, BridgeError> {
		self.open_with_timeout(config, None, on_result, on_error)
	}

	/// Like [`Self::open`], optionally waiting for a different duration than the bridge's configured timeout.
	pub fn open_with_timeout(
		&mut self,
		config: EditorConfig,
		timeout: Option<Duration>,
		on_result: impl FnOnce(EditorPayload) + 'static,
		on_error: impl FnOnce() + 'static,
	) -> Result<InvocationId, BridgeError> {
		config.validate()?;
		if let Some(pending) = self.pending_invocation() {
			return Err(BridgeError::InvocationPending(pending));
		}

		self.next_invocation += 1;
		let invocation = InvocationId(self.next_invocation);

		self.callbacks = Some(InvocationCallbacks {
			invocation,
			on_result: Box::new(on_result),
			on_error: Box::new(on_error),
		});
		self.dispatch(BridgeMessage::Open { invocation, config, timeout });

		Ok(invocation)
	}

	/// Opens the editor and returns a future of its result, which fails with [`BridgeError::TimedOut`] if none arrives in time
	/// or with [`BridgeError::Abandoned`] if the bridge is dropped first.
	pub fn open_deferred(&mut self, config: EditorConfig) -> Result<LocalBoxFuture<'static, Result<EditorPayload, BridgeError>>, BridgeError> {
		let (sender, receiver) = oneshot::channel();
		let result_sender = Rc::new(Cell::new(Some(sender)));
		let error_sender = result_sender.clone();

		let editor_id = config.id.clone();
		let timed_out = BridgeError::TimedOut(editor_id.clone());

		self.open(
			config,
			move |payload| {
				if let Some(sender) = result_sender.take() {
					let _ = sender.send(Ok(payload));
				}
			},
			move || {
				if let Some(sender) = error_sender.take() {
					let _ = sender.send(Err(timed_out));
				}
			},
		)?;

		Ok(async move { receiver.await.unwrap_or(Err(BridgeError::Abandoned(editor_id))) }.boxed_local())
	}

	/// Hands over a cross-window message caught by the listener attached for the invocation.
	pub fn receive_window_message(&mut self, invocation: InvocationId, origin: &str, data: Value) {
		self.dispatch(BridgeMessage::ReceiveWindowMessage {
			invocation,
			origin: origin.to_string(),
			data,
		});
	}

	pub fn timeout_elapsed(&mut self, invocation: InvocationId) {
		self.dispatch(BridgeMessage::TimeoutElapsed { invocation });
	}

	pub fn state(&self) -> InvocationState {
		self.application.bridge().state()
	}

	pub fn pending_invocation(&self) -> Option<InvocationId> {
		self.application.bridge().pending_invocation()
	}

	pub fn is_pending(&self) -> bool {
		self.pending_invocation().is_some()
	}

	pub fn settings(&self) -> &BridgeSettings {
		self.application.bridge().settings()
	}

	pub fn host(&self) -> &H {
		&self.host
	}

	pub fn host_mut(&mut self) -> &mut H {
		&mut self.host
	}

	fn dispatch(&mut self, message: impl Into<Message>) {
		for response in self.application.handle_message(message) {
			self.execute(response);
		}
	}

	fn execute(&mut self, message: FrontendMessage) {
		match message {
			FrontendMessage::TriggerOpenWindow { url, target } => self.host.open_window(&url, &target),
			FrontendMessage::TriggerAttachMessageListener { invocation } => self.host.attach_message_listener(invocation),
			FrontendMessage::TriggerDetachMessageListener { invocation } => self.host.detach_message_listener(invocation),
			FrontendMessage::TriggerStartTimeout { invocation, milliseconds } => self.host.start_timeout(invocation, Duration::from_millis(milliseconds)),
			FrontendMessage::TriggerClearTimeout { invocation } => self.host.clear_timeout(invocation),
			FrontendMessage::ResolveEditorResult { invocation, payload } => {
				if let Some(callbacks) = self.take_callbacks(invocation) {
					(callbacks.on_result)(payload);
				}
			}
			FrontendMessage::ResolveEditorTimeout { invocation } => {
				if let Some(callbacks) = self.take_callbacks(invocation) {
					(callbacks.on_error)();
				}
			}
			FrontendMessage::TriggerPostMessage { .. } => log::error!("The editor bridge cannot carry out {message:?}"),
		}
	}

	fn take_callbacks(&mut self, invocation: InvocationId) -> Option<InvocationCallbacks> {
		self.callbacks.take_if(|callbacks| callbacks.invocation == invocation)
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::config::EditorRegistry;
	use crate::protocol::Environment;
	use crate::test_utils::{HostCall, Outcome, OutcomeRecorder, RecordingBridgeHost, envelope, event_config, init_logger};
	use pretty_assertions::assert_eq;
	use serde_json::json;

	const EVENT_ORIGIN: &str = "https://e.example";

	fn bridge() -> EditorBridge<RecordingBridgeHost> {
		init_logger();
		EditorBridge::new(RecordingBridgeHost::default(), BridgeSettings::default())
	}

	fn open(bridge: &mut EditorBridge<RecordingBridgeHost>, recorder: &OutcomeRecorder) -> InvocationId {
		bridge.open(event_config(), recorder.on_result(), recorder.on_error()).unwrap()
	}

	#[test]
	fn valid_message_resolves_with_its_payload() {
		let mut bridge = bridge();
		let recorder = OutcomeRecorder::default();
		let invocation = open(&mut bridge, &recorder);

		bridge.receive_window_message(invocation, EVENT_ORIGIN, envelope("event"));

		assert_eq!(recorder.outcomes(), vec![Outcome::Result(EditorPayload::success("Launch", "https://x/y"))]);
		assert_eq!(
			bridge.host().calls,
			vec![
				HostCall::OpenWindow {
					url: EVENT_ORIGIN.to_string(),
					target: "_blank".to_string()
				},
				HostCall::AttachMessageListener(invocation),
				HostCall::StartTimeout(invocation, Duration::from_secs(10)),
				HostCall::ClearTimeout(invocation),
				HostCall::DetachMessageListener(invocation),
			]
		);
		assert_eq!(bridge.state(), InvocationState::Resolved);
		assert!(!bridge.is_pending());
	}

	#[test]
	fn only_the_first_valid_message_is_delivered() {
		let mut bridge = bridge();
		let recorder = OutcomeRecorder::default();
		let invocation = open(&mut bridge, &recorder);

		let mut second = envelope("event");
		second["payload"]["preview"] = json!("Second");

		bridge.receive_window_message(invocation, EVENT_ORIGIN, json!({ "source": "react-devtools-bridge" }));
		bridge.receive_window_message(invocation, EVENT_ORIGIN, json!("editor-message"));
		bridge.receive_window_message(invocation, EVENT_ORIGIN, envelope("event"));
		bridge.receive_window_message(invocation, EVENT_ORIGIN, second);
		bridge.timeout_elapsed(invocation);

		assert_eq!(recorder.outcomes(), vec![Outcome::Result(EditorPayload::success("Launch", "https://x/y"))]);
	}

	#[test]
	fn foreign_origin_is_ignored_until_the_timeout() {
		let mut bridge = bridge();
		let recorder = OutcomeRecorder::default();
		let invocation = open(&mut bridge, &recorder);

		bridge.receive_window_message(invocation, "https://evil.example", envelope("event"));
		assert!(recorder.outcomes().is_empty());
		assert!(bridge.is_pending());

		bridge.timeout_elapsed(invocation);
		assert_eq!(recorder.outcomes(), vec![Outcome::Error]);
		assert!(bridge.host().calls.ends_with(&[HostCall::ClearTimeout(invocation), HostCall::DetachMessageListener(invocation)]));
	}

	#[test]
	fn late_messages_after_the_timeout_are_inert() {
		let mut bridge = bridge();
		let recorder = OutcomeRecorder::default();
		let invocation = open(&mut bridge, &recorder);

		bridge.timeout_elapsed(invocation);
		bridge.receive_window_message(invocation, EVENT_ORIGIN, envelope("event"));
		bridge.timeout_elapsed(invocation);

		assert_eq!(recorder.outcomes(), vec![Outcome::Error]);
		assert_eq!(bridge.state(), InvocationState::Expired);
	}

	#[test]
	fn mismatched_editor_id_is_ignored() {
		let mut bridge = bridge();
		let recorder = OutcomeRecorder::default();
		let invocation = open(&mut bridge, &recorder);

		bridge.receive_window_message(invocation, EVENT_ORIGIN, envelope("portfolio"));

		assert!(recorder.outcomes().is_empty());
		assert_eq!(bridge.state(), InvocationState::Pending);
	}

	#[test]
	fn whichever_event_is_processed_first_wins() {
		let mut bridge = bridge();

		let message_first = OutcomeRecorder::default();
		let invocation = open(&mut bridge, &message_first);
		bridge.receive_window_message(invocation, EVENT_ORIGIN, envelope("event"));
		bridge.timeout_elapsed(invocation);
		assert_eq!(message_first.outcomes(), vec![Outcome::Result(EditorPayload::success("Launch", "https://x/y"))]);

		let timeout_first = OutcomeRecorder::default();
		let invocation = open(&mut bridge, &timeout_first);
		bridge.timeout_elapsed(invocation);
		bridge.receive_window_message(invocation, EVENT_ORIGIN, envelope("event"));
		assert_eq!(timeout_first.outcomes(), vec![Outcome::Error]);
	}

	#[test]
	fn cancel_is_delivered_as_a_result() {
		let mut bridge = bridge();
		let recorder = OutcomeRecorder::default();
		let invocation = open(&mut bridge, &recorder);

		let mut cancel = envelope("event");
		cancel["payload"] = json!({ "status": "cancel", "preview": "", "link": "" });
		bridge.receive_window_message(invocation, EVENT_ORIGIN, cancel);

		assert_eq!(recorder.outcomes(), vec![Outcome::Result(EditorPayload::cancel())]);
	}

	#[test]
	fn second_open_while_pending_is_rejected() {
		let mut bridge = bridge();
		let first = OutcomeRecorder::default();
		let invocation = open(&mut bridge, &first);

		let second = OutcomeRecorder::default();
		let rejected = bridge.open(event_config(), second.on_result(), second.on_error());
		assert_eq!(rejected, Err(BridgeError::InvocationPending(invocation)));

		// The first invocation is undisturbed
		bridge.receive_window_message(invocation, EVENT_ORIGIN, envelope("event"));
		assert_eq!(first.outcomes().len(), 1);
		assert!(second.outcomes().is_empty());
		assert_eq!(bridge.host().calls.iter().filter(|call| matches!(call, HostCall::OpenWindow { .. })).count(), 1);
	}

	#[test]
	fn invalid_config_opens_nothing() {
		let mut bridge = bridge();
		let recorder = OutcomeRecorder::default();
		let config = EditorConfig {
			id: String::new(),
			prod_origin: EVENT_ORIGIN.to_string(),
			dev_origins_pattern: None,
		};

		assert!(matches!(bridge.open(config, recorder.on_result(), recorder.on_error()), Err(BridgeError::InvalidConfig(_))));
		assert!(bridge.host().calls.is_empty());
		assert_eq!(bridge.state(), InvocationState::Idle);
	}

	#[test]
	fn stale_timeout_does_not_affect_the_next_invocation() {
		let mut bridge = bridge();
		let first = OutcomeRecorder::default();
		let first_invocation = open(&mut bridge, &first);
		bridge.receive_window_message(first_invocation, EVENT_ORIGIN, envelope("event"));

		let second = OutcomeRecorder::default();
		let second_invocation = open(&mut bridge, &second);
		assert_ne!(first_invocation, second_invocation);

		bridge.timeout_elapsed(first_invocation);
		assert!(second.outcomes().is_empty());
		assert!(bridge.is_pending());
	}

	#[test]
	fn per_invocation_timeout_reaches_the_host() {
		let mut bridge = bridge();
		let recorder = OutcomeRecorder::default();
		let invocation = bridge.open_with_timeout(event_config(), Some(Duration::from_secs(3)), recorder.on_result(), recorder.on_error()).unwrap();

		assert!(bridge.host().calls.contains(&HostCall::StartTimeout(invocation, Duration::from_secs(3))));
	}

	#[test]
	fn development_origins_need_a_development_environment() {
		init_logger();
		let registry = EditorRegistry::toolmuse_defaults();
		let config = registry.get("event").unwrap();

		for (environment, accepted) in [(Environment::Development, true), (Environment::Production, false)] {
			let mut bridge = EditorBridge::new(RecordingBridgeHost::default(), BridgeSettings { environment, ..Default::default() });
			let recorder = OutcomeRecorder::default();
			let invocation = bridge.open(config.clone(), recorder.on_result(), recorder.on_error()).unwrap();

			bridge.receive_window_message(invocation, "http://localhost:5174", envelope("event"));
			assert_eq!(recorder.outcomes().len(), usize::from(accepted), "{environment:?}");
		}
	}

	#[test]
	fn deferred_result() {
		let mut bridge = bridge();
		let result = bridge.open_deferred(event_config()).unwrap();
		let invocation = bridge.pending_invocation().unwrap();

		bridge.receive_window_message(invocation, EVENT_ORIGIN, envelope("event"));

		assert_eq!(futures::executor::block_on(result), Ok(EditorPayload::success("Launch", "https://x/y")));
	}

	#[test]
	fn deferred_timeout() {
		let mut bridge = bridge();
		let result = bridge.open_deferred(event_config()).unwrap();
		let invocation = bridge.pending_invocation().unwrap();

		bridge.timeout_elapsed(invocation);

		assert_eq!(futures::executor::block_on(result), Err(BridgeError::TimedOut("event".to_string())));
	}

	#[test]
	fn deferred_result_of_a_dropped_bridge() {
		let mut bridge = bridge();
		let result = bridge.open_deferred(event_config()).unwrap();

		drop(bridge);

		assert_eq!(futures::executor::block_on(result), Err(BridgeError::Abandoned("event".to_string())));
	}
}
