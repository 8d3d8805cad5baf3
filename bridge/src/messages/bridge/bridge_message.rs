use crate::config::EditorConfig;
use crate::messages::prelude::*;
use serde_json::Value;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum BridgeMessage {
	Open {
		invocation: InvocationId,
		config: EditorConfig,
		/// Overrides the bridge's configured response timeout for this invocation
		timeout: Option<Duration>,
	},
	ReceiveWindowMessage {
		invocation: InvocationId,
		origin: String,
		data: Value,
	},
	TimeoutElapsed {
		invocation: InvocationId,
	},
}
