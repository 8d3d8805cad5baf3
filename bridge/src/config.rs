use crate::consts::{DEFAULT_EDITOR_ID, EDITOR_ID_BUILD_ENV, EDITOR_RESPONSE_TIMEOUT_MILLISECONDS};
use crate::error::ConfigError;
use crate::protocol::Environment;
use origin_pattern::{Origin, OriginPattern};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Describes one launchable editor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
	/// Unique per editor kind, and echoed back by the editor in every envelope
	pub id: String,
	/// The origin hosting the editor in production, which is also the URL the editor is opened at
	pub prod_origin: String,
	/// Further origins accepted only while the caller itself runs in a development environment
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub dev_origins_pattern: Option<OriginPattern>,
}

impl EditorConfig {
	pub fn new(id: impl Into<String>, prod_origin: impl Into<String>) -> Result<Self, ConfigError> {
		let config = Self {
			id: id.into(),
			prod_origin: prod_origin.into(),
			dev_origins_pattern: None,
		};
		config.validate()?;
		Ok(config)
	}

	pub fn with_dev_origins_pattern(mut self, pattern: &str) -> Result<Self, ConfigError> {
		self.dev_origins_pattern = Some(pattern.parse()?);
		Ok(self)
	}

	/// The production origin is compared verbatim against what browsers report, so it must already be in serialized form (no path or trailing slash).
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.id.is_empty() {
			return Err(ConfigError::EmptyId);
		}
		if self.prod_origin.is_empty() {
			return Err(ConfigError::EmptyOrigin { id: self.id.clone() });
		}
		if !Origin::is_serialized(&self.prod_origin) {
			return Err(ConfigError::NotAnOrigin {
				id: self.id.clone(),
				origin: self.prod_origin.clone(),
			});
		}
		Ok(())
	}

	/// The production origin is always allowed. Development origins are allowed only in the development environment.
	pub fn allows_origin(&self, origin: &str, environment: Environment) -> bool {
		if origin == self.prod_origin {
			return true;
		}

		environment.is_development() && self.dev_origins_pattern.as_ref().is_some_and(|pattern| pattern.matches(origin))
	}
}

/// The editors a caller knows how to launch, keyed by id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditorRegistry {
	editors: BTreeMap<String, EditorConfig>,
}

impl EditorRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// The editors launched from the Toolmuse workspace section.
	pub fn toolmuse_defaults() -> Self {
		let localhost = "http://localhost:*".parse::<OriginPattern>().ok();
		let editors = [
			("event", "https://event-editor-six.vercel.app"),
			("blog", "https://toolmuse-6iw2-b9juyr7gh-overheardais-projects.vercel.app"),
		];

		let editors = editors
			.into_iter()
			.map(|(id, prod_origin)| {
				let config = EditorConfig {
					id: id.to_string(),
					prod_origin: prod_origin.to_string(),
					dev_origins_pattern: localhost.clone(),
				};
				(config.id.clone(), config)
			})
			.collect();

		Self { editors }
	}

	/// Reads a JSON array of editor configs, validating each and rejecting duplicate ids.
	pub fn from_json(json: &str) -> Result<Self, ConfigError> {
		let configs: Vec<EditorConfig> = serde_json::from_str(json)?;

		let mut registry = Self::new();
		for config in configs {
			registry.insert(config)?;
		}
		Ok(registry)
	}

	pub fn insert(&mut self, config: EditorConfig) -> Result<(), ConfigError> {
		config.validate()?;

		if self.editors.contains_key(&config.id) {
			return Err(ConfigError::DuplicateEditor(config.id));
		}
		self.editors.insert(config.id.clone(), config);
		Ok(())
	}

	pub fn get(&self, id: &str) -> Option<&EditorConfig> {
		self.editors.get(id)
	}

	pub fn ids(&self) -> impl Iterator<Item = &str> {
		self.editors.keys().map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.editors.len()
	}

	pub fn is_empty(&self) -> bool {
		self.editors.is_empty()
	}
}

/// Settings of the caller side, shared by every invocation of one bridge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BridgeSettings {
	/// How long to wait for a valid result unless an invocation overrides it
	pub response_timeout: Duration,
	pub environment: Environment,
}

impl Default for BridgeSettings {
	fn default() -> Self {
		Self {
			response_timeout: Duration::from_millis(EDITOR_RESPONSE_TIMEOUT_MILLISECONDS),
			environment: Environment::default(),
		}
	}
}

/// Settings of the editor side.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReporterSettings {
	pub editor_id: String,
	/// Post to the parent frame when there is no opener, for editors embedded in an iframe instead of opened in a window
	pub fall_back_to_parent: bool,
}

impl ReporterSettings {
	/// Uses the given editor id, falling back to the one baked in at build time and then to the default id.
	pub fn new(editor_id: Option<String>) -> Self {
		let editor_id = editor_id
			.filter(|id| !id.is_empty())
			.unwrap_or_else(|| EDITOR_ID_BUILD_ENV.filter(|id| !id.is_empty()).unwrap_or(DEFAULT_EDITOR_ID).to_string());

		Self { editor_id, fall_back_to_parent: false }
	}
}

impl Default for ReporterSettings {
	fn default() -> Self {
		Self::new(None)
	}
}
