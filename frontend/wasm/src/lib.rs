pub mod editor_bridge_api;
pub mod helpers;
pub mod reporter_api;

use helpers::{Error, WasmLog};
use std::cell::Cell;
use wasm_bindgen::prelude::*;

pub static LOGGER: WasmLog = WasmLog;
thread_local! { pub static HAS_CRASHED: Cell<bool> = const { Cell::new(false) } }

/// Initialize the backend
#[wasm_bindgen(start)]
pub fn init() {
	std::panic::set_hook(Box::new(helpers::panic_hook));

	// Another logger may already be installed when several wasm modules share a page
	if log::set_logger(&LOGGER).is_ok() {
		log::set_max_level(log::LevelFilter::Info);
	}
}

/// Changes how much is logged to the console, one of `"off"`, `"error"`, `"warn"`, `"info"`, `"debug"`, or `"trace"`.
#[wasm_bindgen(js_name = setLogVerbosity)]
pub fn set_log_verbosity(verbosity: &str) -> Result<(), JsValue> {
	let level = verbosity.parse::<log::LevelFilter>().map_err(|_| Error::new(&format!("Unknown log verbosity \"{verbosity}\"")))?;
	log::set_max_level(level);
	Ok(())
}
