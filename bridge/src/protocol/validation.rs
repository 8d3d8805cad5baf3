use crate::config::EditorConfig;
use crate::consts::{DEVELOPMENT_HOSTNAMES, EDITOR_MESSAGE_TYPE, PROTOCOL_VERSION};
use crate::protocol::{EditorMessage, EditorPayload};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Whether the caller's own page is served from a local development host, which additionally allows an editor's development origins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Environment {
	#[default]
	Production,
	Development,
}

impl Environment {
	pub fn from_hostname(hostname: &str) -> Self {
		let hostname = hostname.to_ascii_lowercase();
		if DEVELOPMENT_HOSTNAMES.contains(&hostname.as_str()) {
			Environment::Development
		} else {
			Environment::Production
		}
	}

	pub fn is_development(self) -> bool {
		self == Environment::Development
	}
}

/// Why an inbound window message was ignored. Only ever logged, since unrelated cross-window traffic is expected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Rejection {
	#[error("the message data is not an object")]
	NotAnObject,

	#[error("the origin \"{0}\" is not allowed")]
	DisallowedOrigin(String),

	#[error("the message type {0} is not \"{expected}\"", expected = EDITOR_MESSAGE_TYPE)]
	UnexpectedType(String),

	#[error("the message does not have the envelope's shape: {0}")]
	Malformed(String),

	#[error("the message is from editor \"{found}\" but \"{expected}\" was opened")]
	EditorMismatch { expected: String, found: String },

	#[error("the protocol version \"{0}\" is not \"{expected}\"", expected = PROTOCOL_VERSION)]
	VersionMismatch(String),
}

/// Checks a cross-window message against the editor that was opened, in order: the data is an object, the sender's origin is allowed,
/// then the envelope has the expected type, editor id, and version. Returns the payload of a message that passes every check.
pub fn validate_window_message(origin: &str, data: &Value, config: &EditorConfig, environment: Environment) -> Result<EditorPayload, Rejection> {
	if !data.is_object() {
		return Err(Rejection::NotAnObject);
	}

	if !config.allows_origin(origin, environment) {
		return Err(Rejection::DisallowedOrigin(origin.to_string()));
	}

	match data.get("type") {
		Some(Value::String(message_type)) if message_type == EDITOR_MESSAGE_TYPE => {}
		Some(other) => return Err(Rejection::UnexpectedType(other.to_string())),
		None => return Err(Rejection::UnexpectedType("(missing)".to_string())),
	}

	let message = EditorMessage::deserialize(data).map_err(|error| Rejection::Malformed(error.to_string()))?;

	if message.editor_id != config.id {
		return Err(Rejection::EditorMismatch {
			expected: config.id.clone(),
			found: message.editor_id,
		});
	}

	if message.version != PROTOCOL_VERSION {
		return Err(Rejection::VersionMismatch(message.version));
	}

	Ok(message.payload)
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::test_utils::{envelope, event_config};
	use serde_json::json;

	const EVENT_ORIGIN: &str = "https://e.example";

	#[test]
	fn accepts_a_valid_envelope_from_the_production_origin() {
		let payload = validate_window_message(EVENT_ORIGIN, &envelope("event"), &event_config(), Environment::Production).unwrap();

		assert_eq!(payload, EditorPayload::success("Launch", "https://x/y"));
	}

	#[test]
	fn rejects_non_objects() {
		for data in [Value::Null, json!("editor-message"), json!(42), json!([envelope("event")])] {
			assert_eq!(validate_window_message(EVENT_ORIGIN, &data, &event_config(), Environment::Production), Err(Rejection::NotAnObject));
		}
	}

	#[test]
	fn rejects_foreign_origins() {
		let rejection = validate_window_message("https://evil.example", &envelope("event"), &event_config(), Environment::Production);

		assert_eq!(rejection, Err(Rejection::DisallowedOrigin("https://evil.example".to_string())));
	}

	#[test]
	fn origin_is_checked_before_the_envelope() {
		let rejection = validate_window_message("https://evil.example", &json!({ "type": "something-else" }), &event_config(), Environment::Production);

		assert!(matches!(rejection, Err(Rejection::DisallowedOrigin(_))));
	}

	#[test]
	fn development_origins_need_the_development_environment() {
		let config = event_config().with_dev_origins_pattern("http://localhost:*").unwrap();

		assert!(validate_window_message("http://localhost:5174", &envelope("event"), &config, Environment::Development).is_ok());
		assert!(matches!(
			validate_window_message("http://localhost:5174", &envelope("event"), &config, Environment::Production),
			Err(Rejection::DisallowedOrigin(_))
		));
		assert!(validate_window_message(EVENT_ORIGIN, &envelope("event"), &config, Environment::Development).is_ok());
	}

	#[test]
	fn rejects_unrelated_message_types() {
		let data = json!({ "source": "react-devtools-content-script", "payload": {} });
		assert_eq!(
			validate_window_message(EVENT_ORIGIN, &data, &event_config(), Environment::Production),
			Err(Rejection::UnexpectedType("(missing)".to_string()))
		);

		let mut data = envelope("event");
		data["type"] = json!("editor-ready");
		assert!(matches!(
			validate_window_message(EVENT_ORIGIN, &data, &event_config(), Environment::Production),
			Err(Rejection::UnexpectedType(_))
		));
	}

	#[test]
	fn rejects_mismatched_editor_ids() {
		assert_eq!(
			validate_window_message(EVENT_ORIGIN, &envelope("portfolio"), &event_config(), Environment::Production),
			Err(Rejection::EditorMismatch {
				expected: "event".to_string(),
				found: "portfolio".to_string()
			})
		);
	}

	#[test]
	fn rejects_other_protocol_versions() {
		let mut data = envelope("event");
		data["version"] = json!("2.0");

		assert_eq!(
			validate_window_message(EVENT_ORIGIN, &data, &event_config(), Environment::Production),
			Err(Rejection::VersionMismatch("2.0".to_string()))
		);
	}

	#[test]
	fn rejects_malformed_payloads() {
		let mut data = envelope("event");
		data["payload"]["status"] = json!("published");
		assert!(matches!(validate_window_message(EVENT_ORIGIN, &data, &event_config(), Environment::Production), Err(Rejection::Malformed(_))));

		let mut data = envelope("event");
		data["editorId"] = json!(7);
		assert!(matches!(validate_window_message(EVENT_ORIGIN, &data, &event_config(), Environment::Production), Err(Rejection::Malformed(_))));
	}

	#[test]
	fn recognizes_development_hostnames() {
		assert_eq!(Environment::from_hostname("localhost"), Environment::Development);
		assert_eq!(Environment::from_hostname("LOCALHOST"), Environment::Development);
		assert_eq!(Environment::from_hostname("127.0.0.1"), Environment::Development);
		assert_eq!(Environment::from_hostname("toolmuse.vercel.app"), Environment::Production);
	}
}
