//
// The editor side, exported to JS as the `Reporter` class.
//
use crate::helpers::{js_error, to_js_value};
use js_sys::Object;
use toolmuse_bridge::messages::prelude::{AvailableTargets, ReportTarget};
use toolmuse_bridge::{EditorMessage, EditorPayload, Reporter, ReporterHost, ReporterSettings};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Window, window};

/// Posts through the current window's `opener` or `parent`.
pub struct WebReporterHost {
	window: Option<Window>,
}

impl WebReporterHost {
	fn opener(&self) -> Option<Window> {
		let opener = self.window.as_ref()?.opener().ok()?;
		if opener.is_null() || opener.is_undefined() {
			return None;
		}
		// A cross-origin opener is a proxy from another realm, which fails `instanceof Window`
		Some(opener.unchecked_into())
	}

	fn parent(&self) -> Option<Window> {
		let window = self.window.as_ref()?;
		let parent = window.parent().ok()??;

		// The top-level window is its own parent
		(!Object::is(parent.as_ref(), window.as_ref())).then_some(parent)
	}
}

impl ReporterHost for WebReporterHost {
	fn available_targets(&self) -> AvailableTargets {
		AvailableTargets {
			opener: self.opener().is_some(),
			parent: self.parent().is_some(),
		}
	}

	fn post_message(&mut self, target: ReportTarget, message: &EditorMessage, target_origin: &str) {
		let recipient = match target {
			ReportTarget::Opener => self.opener(),
			ReportTarget::Parent => self.parent(),
		};
		let Some(recipient) = recipient else {
			log::warn!("The {target:?} window went away before the result could be posted");
			return;
		};

		let result = to_js_value(message).and_then(|message| recipient.post_message(&message, target_origin));
		if let Err(error) = result {
			log::error!("Failed to post the editor result: {error:?}");
		}
	}
}

#[wasm_bindgen(js_name = Reporter)]
pub struct ReporterHandle {
	reporter: Reporter<WebReporterHost>,
}

#[wasm_bindgen(js_class = Reporter)]
impl ReporterHandle {
	/// Creates the reporter for this editor session. Without an `editorId`, the id baked in at build time is used.
	/// With `fallBackToParent`, an editor embedded in an iframe reports to its parent when it has no opener.
	#[wasm_bindgen(constructor)]
	pub fn new(editor_id: Option<String>, fall_back_to_parent: Option<bool>) -> Self {
		let mut settings = ReporterSettings::new(editor_id);
		settings.fall_back_to_parent = fall_back_to_parent.unwrap_or_default();

		let host = WebReporterHost { window: window() };
		Self {
			reporter: Reporter::new(host, settings),
		}
	}

	/// Sends `{ status, preview, link }` to the window that opened this editor, once per session.
	/// Only throws if the payload does not have that shape.
	#[wasm_bindgen(js_name = sendResult)]
	pub fn send_result(&mut self, payload: JsValue) -> Result<(), JsValue> {
		let payload: EditorPayload = serde_wasm_bindgen::from_value(payload).map_err(|error| js_error(format!("Invalid editor result: {error}")))?;
		self.reporter.send_result(payload);
		Ok(())
	}

	#[wasm_bindgen(js_name = isMessageSent)]
	pub fn is_message_sent(&self) -> bool {
		self.reporter.is_message_sent()
	}

	#[wasm_bindgen(js_name = editorId)]
	pub fn editor_id(&self) -> String {
		self.reporter.editor_id().to_string()
	}

	#[cfg(feature = "test-hooks")]
	#[wasm_bindgen(js_name = resetSentFlagForTests)]
	pub fn reset_sent_flag_for_tests(&mut self) {
		self.reporter.reset_sent_flag_for_tests();
	}
}
