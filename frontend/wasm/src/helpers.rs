use crate::HAS_CRASHED;
use serde::Serialize;
use std::fmt::Display;
use std::panic;
use wasm_bindgen::prelude::*;

/// When a panic occurs, log the error to the JS console before the backend dies
pub fn panic_hook(info: &panic::PanicHookInfo<'_>) {
	// Skip if we have already panicked
	if HAS_CRASHED.with(|cell| cell.replace(true)) {
		return;
	}
	log::error!("{info}");
}

/// The JavaScript `Error` type
#[wasm_bindgen]
extern "C" {
	#[derive(Clone, Debug)]
	pub type Error;

	#[wasm_bindgen(constructor)]
	pub fn new(msg: &str) -> Error;
}

/// Wraps any Rust error in a JS `Error` so it can be thrown or used to reject a promise.
pub fn js_error(error: impl Display) -> JsValue {
	Error::new(&error.to_string()).into()
}

/// Converts to a plain JS object, with maps as objects rather than `Map`s, so it can be posted across windows and read like JSON.
pub fn to_js_value(value: &impl Serialize) -> Result<JsValue, JsValue> {
	value.serialize(&serde_wasm_bindgen::Serializer::json_compatible()).map_err(js_error)
}

/// Logging to the JS console
#[wasm_bindgen]
extern "C" {
	#[wasm_bindgen(js_namespace = console)]
	fn log(msg: &str, format: &str);
	#[wasm_bindgen(js_namespace = console)]
	fn info(msg: &str, format: &str);
	#[wasm_bindgen(js_namespace = console)]
	fn warn(msg: &str, format: &str);
	#[wasm_bindgen(js_namespace = console)]
	fn error(msg: &str, format: &str);
}

#[derive(Default)]
pub struct WasmLog;

impl log::Log for WasmLog {
	fn enabled(&self, metadata: &log::Metadata) -> bool {
		metadata.level() <= log::max_level()
	}

	fn log(&self, record: &log::Record) {
		if !self.enabled(record.metadata()) {
			return;
		}

		let (log, name, color): (fn(&str, &str), &str, &str) = match record.level() {
			log::Level::Trace => (log, "trace", "color:plum"),
			log::Level::Debug => (log, "debug", "color:cyan"),
			log::Level::Warn => (warn, "warn", "color:goldenrod"),
			log::Level::Info => (info, "info", "color:mediumseagreen"),
			log::Level::Error => (error, "error", "color:red"),
		};
		let msg = &format!("%c{name}\t{}", record.args());
		log(msg, color)
	}

	fn flush(&self) {}
}
