//
// The caller side, exported to JS as the `EditorBridge` class.
// The browser's `window.open`, `message` events, and `setTimeout` are wired to the
// platform-independent bridge through `WebBridgeHost`.
//
use crate::helpers::{js_error, to_js_value};
use serde_json::Value;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;
use toolmuse_bridge::messages::prelude::InvocationId;
use toolmuse_bridge::{BridgeHost, BridgeSettings, EditorBridge, EditorConfig, EditorPayload, Environment};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{MessageEvent, Window, window};

type SharedBridge = Rc<RefCell<EditorBridge<WebBridgeHost>>>;
type WeakBridge = Weak<RefCell<EditorBridge<WebBridgeHost>>>;

struct MessageListener {
	invocation: InvocationId,
	closure: Closure<dyn FnMut(MessageEvent)>,
}

struct Timer {
	invocation: InvocationId,
	handle: i32,
	// Kept alive until the timer is cleared or replaced
	_closure: Closure<dyn FnMut()>,
}

/// Carries out the bridge's requests with the browser APIs of the current window.
pub struct WebBridgeHost {
	bridge: WeakBridge,
	window: Option<Window>,
	listener: Option<MessageListener>,
	timer: Option<Timer>,
}

impl WebBridgeHost {
	fn new(bridge: WeakBridge) -> Self {
		let window = window();
		if window.is_none() {
			log::error!("No global `window` exists, so editors cannot be opened");
		}

		Self {
			bridge,
			window,
			listener: None,
			timer: None,
		}
	}
}

impl BridgeHost for WebBridgeHost {
	fn open_window(&mut self, url: &str, target: &str) {
		let Some(window) = &self.window else { return };

		match window.open_with_url_and_target(url, target) {
			Ok(Some(_)) => {}
			Ok(None) => log::warn!("The browser did not open {url}, it may have blocked the popup"),
			Err(error) => log::error!("Failed to open {url}: {error:?}"),
		}
	}

	fn attach_message_listener(&mut self, invocation: InvocationId) {
		let Some(window) = &self.window else { return };

		let bridge = self.bridge.clone();
		let closure = Closure::<dyn FnMut(MessageEvent)>::new(move |event: MessageEvent| {
			// Data that does not convert (such as a transferred port) can never be an envelope
			let data = serde_wasm_bindgen::from_value::<Value>(event.data()).unwrap_or(Value::Null);
			let origin = event.origin();
			with_bridge(&bridge, |bridge| bridge.receive_window_message(invocation, &origin, data));
		});

		if let Err(error) = window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref()) {
			log::error!("Failed to listen for window messages: {error:?}");
			return;
		}
		self.listener = Some(MessageListener { invocation, closure });
	}

	fn detach_message_listener(&mut self, invocation: InvocationId) {
		let Some(listener) = self.listener.take_if(|listener| listener.invocation == invocation) else { return };
		let Some(window) = &self.window else { return };

		if let Err(error) = window.remove_event_listener_with_callback("message", listener.closure.as_ref().unchecked_ref()) {
			log::error!("Failed to stop listening for window messages: {error:?}");
		}
	}

	fn start_timeout(&mut self, invocation: InvocationId, timeout: Duration) {
		let Some(window) = &self.window else { return };

		let bridge = self.bridge.clone();
		let closure = Closure::<dyn FnMut()>::new(move || with_bridge(&bridge, |bridge| bridge.timeout_elapsed(invocation)));

		let delay = timeout.as_millis().min(i32::MAX as u128) as i32;
		match window.set_timeout_with_callback_and_timeout_and_arguments_0(closure.as_ref().unchecked_ref(), delay) {
			Ok(handle) => {
				self.timer = Some(Timer {
					invocation,
					handle,
					_closure: closure,
				})
			}
			Err(error) => log::error!("Failed to call `setTimeout`: {error:?}"),
		}
	}

	fn clear_timeout(&mut self, invocation: InvocationId) {
		let Some(timer) = self.timer.take_if(|timer| timer.invocation == invocation) else { return };
		if let Some(window) = &self.window {
			window.clear_timeout_with_handle(timer.handle);
		}
	}
}

// The browser keeps calling a registered listener or timer after its closure is freed, so both are unregistered when the bridge goes away
impl Drop for WebBridgeHost {
	fn drop(&mut self) {
		let Some(window) = &self.window else { return };

		if let Some(listener) = self.listener.take() {
			log::debug!("Detaching the window message listener of invocation {} since the editor bridge was dropped", listener.invocation);
			if let Err(error) = window.remove_event_listener_with_callback("message", listener.closure.as_ref().unchecked_ref()) {
				log::error!("Failed to stop listening for window messages: {error:?}");
			}
		}
		if let Some(timer) = self.timer.take() {
			window.clear_timeout_with_handle(timer.handle);
		}
	}
}

/// Provides access to the bridge from a browser event, unless the bridge is gone or already busy.
fn with_bridge(bridge: &WeakBridge, callback: impl FnOnce(&mut EditorBridge<WebBridgeHost>)) {
	let Some(shared) = bridge.upgrade() else { return };
	let Ok(mut guard) = shared.try_borrow_mut() else {
		log::error!("Failed to borrow the editor bridge");
		return;
	};
	callback(&mut guard);
}

/// Calls a JS callback from a microtask, after the bridge has finished handling the event, so the callback may use the bridge again.
fn call_later(callback: js_sys::Function, argument: Option<JsValue>) {
	wasm_bindgen_futures::spawn_local(async move {
		let result = match argument {
			Some(argument) => callback.call1(&JsValue::NULL, &argument),
			None => callback.call0(&JsValue::NULL),
		};
		if let Err(error) = result {
			log::error!("An editor bridge callback threw an error: {error:?}");
		}
	});
}

fn config_from_js(config: JsValue) -> Result<EditorConfig, JsValue> {
	serde_wasm_bindgen::from_value(config).map_err(|error| js_error(format!("Invalid editor config: {error}")))
}

#[wasm_bindgen(js_name = EditorBridge)]
pub struct EditorBridgeHandle {
	bridge: SharedBridge,
}

#[wasm_bindgen(js_class = EditorBridge)]
impl EditorBridgeHandle {
	/// Creates a bridge waiting `timeoutMilliseconds` (10 seconds if omitted) for each editor's result.
	/// Development origins are allowed when this page itself is served from a local development host.
	#[wasm_bindgen(constructor)]
	pub fn new(timeout_milliseconds: Option<u32>) -> Self {
		let mut settings = BridgeSettings::default();
		if let Some(milliseconds) = timeout_milliseconds {
			settings.response_timeout = Duration::from_millis(milliseconds.into());
		}
		if let Some(hostname) = window().and_then(|window| window.location().hostname().ok()) {
			settings.environment = Environment::from_hostname(&hostname);
		}
		log::debug!("Editor bridge environment: {:?}", settings.environment);

		let bridge = Rc::new_cyclic(|weak| RefCell::new(EditorBridge::new(WebBridgeHost::new(weak.clone()), settings)));
		Self { bridge }
	}

	/// Opens the editor described by `config` (`{ id, prodOrigin, devOriginsPattern? }`). Calls `onResult(payload)` with the first valid result,
	/// or `onError()` if none arrives in time. Throws if the config is invalid or another editor is still pending.
	pub fn open(&self, config: JsValue, on_result: js_sys::Function, on_error: js_sys::Function) -> Result<(), JsValue> {
		let config = config_from_js(config)?;
		let mut bridge = self.bridge.try_borrow_mut().map_err(js_error)?;

		let on_result = move |payload: EditorPayload| match to_js_value(&payload) {
			Ok(payload) => call_later(on_result, Some(payload)),
			Err(error) => log::error!("Failed to convert the editor result: {error:?}"),
		};
		let on_error = move || call_later(on_error, None);

		bridge.open(config, on_result, on_error).map(|_| ()).map_err(js_error)
	}

	/// Like `open`, but returns a promise of the result that rejects if none arrives in time.
	#[wasm_bindgen(js_name = openAsync)]
	pub fn open_async(&self, config: JsValue) -> Result<js_sys::Promise, JsValue> {
		let config = config_from_js(config)?;
		let result = self.bridge.try_borrow_mut().map_err(js_error)?.open_deferred(config).map_err(js_error)?;

		Ok(wasm_bindgen_futures::future_to_promise(async move {
			let payload = result.await.map_err(js_error)?;
			to_js_value(&payload)
		}))
	}

	/// One of `"idle"`, `"pending"`, `"resolved"`, or `"expired"`.
	pub fn state(&self) -> Result<String, JsValue> {
		let bridge = self.bridge.try_borrow().map_err(js_error)?;
		Ok(bridge.state().as_str().to_string())
	}

	#[wasm_bindgen(js_name = isPending)]
	pub fn is_pending(&self) -> Result<bool, JsValue> {
		let bridge = self.bridge.try_borrow().map_err(js_error)?;
		Ok(bridge.is_pending())
	}
}
