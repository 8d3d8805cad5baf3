use crate::protocol::EditorPayload;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum ReporterMessage {
	/// Which windows the editor could currently report to, as seen by the host just before sending
	UpdateTargets {
		opener: bool,
		parent: bool,
	},
	SendResult {
		payload: EditorPayload,
	},
}
