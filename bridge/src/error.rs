use crate::messages::bridge::utility_types::InvocationId;
use origin_pattern::PatternError;
use thiserror::Error;

/// Problems with an editor's launch configuration.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
	#[error("An editor config must have a non-empty id")]
	EmptyId,

	#[error("Editor \"{id}\" must have a non-empty production origin")]
	EmptyOrigin { id: String },

	#[error("Editor \"{id}\" has the production origin \"{origin}\", which is not a serialized origin like \"https://editor.example\"")]
	NotAnOrigin { id: String, origin: String },

	#[error("Invalid development origins pattern:\n{0}")]
	DevOriginsPattern(#[from] PatternError),

	#[error("An editor with the id \"{0}\" is already registered")]
	DuplicateEditor(String),

	#[error("Failed to read editor configs:\n{0}")]
	Json(String),
}

/// The error type used by the editor bridge.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BridgeError {
	#[error("Invalid editor config:\n{0}")]
	InvalidConfig(#[from] ConfigError),

	#[error("Editor invocation {0} is still pending")]
	InvocationPending(InvocationId),

	#[error("No editor config is registered for \"{0}\"")]
	UnknownEditor(String),

	#[error("Editor \"{0}\" did not report a result before the timeout")]
	TimedOut(String),

	#[error("The bridge was dropped before editor \"{0}\" reported a result")]
	Abandoned(String),
}

macro_rules! derive_from {
	($type:ty, $kind:ident) => {
		impl From<$type> for ConfigError {
			fn from(error: $type) -> Self {
				ConfigError::$kind(format!("{error}"))
			}
		}
	};
}

derive_from!(serde_json::Error, Json);
