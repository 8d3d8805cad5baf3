use crate::consts::{EDITOR_MESSAGE_TYPE, PROTOCOL_VERSION};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorStatus {
	Success,
	Cancel,
}

/// The result an editor reports when the user publishes or cancels.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EditorPayload {
	pub status: EditorStatus,
	/// Short human-readable description of the produced artifact, such as its headline
	pub preview: String,
	/// Where the produced artifact can be viewed
	pub link: String,
}

impl EditorPayload {
	pub fn success(preview: impl Into<String>, link: impl Into<String>) -> Self {
		Self {
			status: EditorStatus::Success,
			preview: preview.into(),
			link: link.into(),
		}
	}

	pub fn cancel() -> Self {
		Self {
			status: EditorStatus::Cancel,
			preview: String::new(),
			link: String::new(),
		}
	}

	pub fn is_success(&self) -> bool {
		self.status == EditorStatus::Success
	}
}

/// The envelope posted from an editor window to the window that opened it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorMessage {
	#[serde(rename = "type")]
	pub message_type: String,
	pub editor_id: String,
	pub version: String,
	pub payload: EditorPayload,
}

impl EditorMessage {
	/// Wraps a payload in an envelope stamped with the protocol's message type and version.
	pub fn new(editor_id: impl Into<String>, payload: EditorPayload) -> Self {
		Self {
			message_type: EDITOR_MESSAGE_TYPE.to_string(),
			editor_id: editor_id.into(),
			version: PROTOCOL_VERSION.to_string(),
			payload,
		}
	}
}
