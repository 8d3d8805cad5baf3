use crate::config::{BridgeSettings, EditorRegistry};
use crate::editor_bridge::{BridgeHost, EditorBridge};
use crate::error::BridgeError;
use crate::messages::prelude::*;
use crate::protocol::EditorPayload;
use std::cell::RefCell;
use std::rc::Rc;

/// A published artifact, remembered along with the editor that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditorResult {
	pub editor_id: String,
	pub payload: EditorPayload,
}

/// The landing site's editor launcher: opens registered editors by id and keeps the latest published result.
pub struct Workspace<H: BridgeHost> {
	registry: EditorRegistry,
	bridge: EditorBridge<H>,
	last_result: Rc<RefCell<Option<EditorResult>>>,
}

impl<H: BridgeHost> Workspace<H> {
	pub fn new(host: H, registry: EditorRegistry, settings: BridgeSettings) -> Self {
		Self {
			registry,
			bridge: EditorBridge::new(host, settings),
			last_result: Rc::default(),
		}
	}

	pub fn open_editor(&mut self, editor_id: &str) -> Result<InvocationId, BridgeError> {
		let Some(config) = self.registry.get(editor_id) else {
			log::warn!("No config for editor: {editor_id}");
			return Err(BridgeError::UnknownEditor(editor_id.to_string()));
		};

		let last_result = self.last_result.clone();
		let result_editor_id = editor_id.to_string();
		let error_editor_id = editor_id.to_string();

		self.bridge.open(
			config.clone(),
			move |payload| {
				// Cancelling leaves the previous result on display
				if payload.is_success() {
					*last_result.borrow_mut() = Some(EditorResult { editor_id: result_editor_id, payload });
				}
			},
			move || log::error!("{error_editor_id} editor timeout or error"),
		)
	}

	pub fn last_result(&self) -> Option<EditorResult> {
		self.last_result.borrow().clone()
	}

	pub fn registry(&self) -> &EditorRegistry {
		&self.registry
	}

	pub fn bridge(&self) -> &EditorBridge<H> {
		&self.bridge
	}

	pub fn bridge_mut(&mut self) -> &mut EditorBridge<H> {
		&mut self.bridge
	}
}
