use crate::config::EditorConfig;
use crate::editor_bridge::BridgeHost;
use crate::messages::prelude::*;
use crate::protocol::{EditorMessage, EditorPayload};
use crate::reporter::ReporterHost;
use serde_json::{Value, json};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

pub fn init_logger() {
	let _ = env_logger::builder().is_test(true).try_init();
}

/// The editor of the protocol's worked examples, served from `https://e.example`.
pub fn event_config() -> EditorConfig {
	EditorConfig {
		id: "event".to_string(),
		prod_origin: "https://e.example".to_string(),
		dev_origins_pattern: None,
	}
}

/// A well-formed successful result envelope from the given editor.
pub fn envelope(editor_id: &str) -> Value {
	json!({
		"type": "editor-message",
		"editorId": editor_id,
		"version": "1.0",
		"payload": { "status": "success", "preview": "Launch", "link": "https://x/y" }
	})
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HostCall {
	OpenWindow { url: String, target: String },
	AttachMessageListener(InvocationId),
	DetachMessageListener(InvocationId),
	StartTimeout(InvocationId, Duration),
	ClearTimeout(InvocationId),
}

/// Records what the bridge asked of the browser. Events are fed back by the test itself.
#[derive(Debug, Default)]
pub struct RecordingBridgeHost {
	pub calls: Vec<HostCall>,
}

impl BridgeHost for RecordingBridgeHost {
	fn open_window(&mut self, url: &str, target: &str) {
		self.calls.push(HostCall::OpenWindow {
			url: url.to_string(),
			target: target.to_string(),
		});
	}

	fn attach_message_listener(&mut self, invocation: InvocationId) {
		self.calls.push(HostCall::AttachMessageListener(invocation));
	}

	fn detach_message_listener(&mut self, invocation: InvocationId) {
		self.calls.push(HostCall::DetachMessageListener(invocation));
	}

	fn start_timeout(&mut self, invocation: InvocationId, timeout: Duration) {
		self.calls.push(HostCall::StartTimeout(invocation, timeout));
	}

	fn clear_timeout(&mut self, invocation: InvocationId) {
		self.calls.push(HostCall::ClearTimeout(invocation));
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PostedMessage {
	pub target: ReportTarget,
	pub message: EditorMessage,
	pub target_origin: String,
}

#[derive(Debug, Default)]
pub struct RecordingReporterHost {
	pub targets: AvailableTargets,
	pub posted: Vec<PostedMessage>,
}

impl RecordingReporterHost {
	pub fn new(targets: AvailableTargets) -> Self {
		Self { targets, posted: Vec::new() }
	}
}

impl ReporterHost for RecordingReporterHost {
	fn available_targets(&self) -> AvailableTargets {
		self.targets
	}

	fn post_message(&mut self, target: ReportTarget, message: &EditorMessage, target_origin: &str) {
		self.posted.push(PostedMessage {
			target,
			message: message.clone(),
			target_origin: target_origin.to_string(),
		});
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
	Result(EditorPayload),
	Error,
}

/// Hands out `on_result` and `on_error` callbacks that record every call, in order.
#[derive(Clone, Debug, Default)]
pub struct OutcomeRecorder(Rc<RefCell<Vec<Outcome>>>);

impl OutcomeRecorder {
	pub fn on_result(&self) -> impl FnOnce(EditorPayload) + use<> {
		let outcomes = self.0.clone();
		move |payload| outcomes.borrow_mut().push(Outcome::Result(payload))
	}

	pub fn on_error(&self) -> impl FnOnce() + use<> {
		let outcomes = self.0.clone();
		move || outcomes.borrow_mut().push(Outcome::Error)
	}

	pub fn outcomes(&self) -> Vec<Outcome> {
		self.0.borrow().clone()
	}
}
