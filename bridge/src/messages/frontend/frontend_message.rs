use crate::messages::prelude::*;
use crate::protocol::{EditorMessage, EditorPayload};
use serde::{Deserialize, Serialize};

/// Commands for the host environment (normally the browser), produced by the message handlers and carried out by a host.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum FrontendMessage {
	// Trigger prefix: cause a browser API to do something
	TriggerAttachMessageListener {
		invocation: InvocationId,
	},
	TriggerClearTimeout {
		invocation: InvocationId,
	},
	TriggerDetachMessageListener {
		invocation: InvocationId,
	},
	TriggerOpenWindow {
		url: String,
		target: String,
	},
	TriggerPostMessage {
		target: ReportTarget,
		message: EditorMessage,
		#[serde(rename = "targetOrigin")]
		target_origin: String,
	},
	TriggerStartTimeout {
		invocation: InvocationId,
		milliseconds: u64,
	},

	// Resolve prefix: hand the outcome of an invocation to whoever opened the editor
	ResolveEditorResult {
		invocation: InvocationId,
		payload: EditorPayload,
	},
	ResolveEditorTimeout {
		invocation: InvocationId,
	},
}
