//! Browser bindings (WASM only).
//!
//! Connects the router's host-independent seams to the real DOM:
//!
//! - [`BrowserHistory`] implements [`History`] over `window.history`
//! - [`EventListener`] owns a DOM listener and detaches it on drop
//! - `web_sys::Node` / `web_sys::MouseEvent` implement [`DomNode`] / [`ClickEvent`]

use serde_json::Value;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, EventTarget, MouseEvent, Node, Window};

use crate::error::RouterError;
use crate::history::{History, HistoryState};
use crate::link::{ClickEvent, DomNode};

fn js_error(err: JsValue) -> String {
	err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

/// [`History`] backed by `window.history` and `window.location`.
#[derive(Debug, Clone)]
pub struct BrowserHistory {
	window: Window,
}

impl BrowserHistory {
	/// Binds to the global `window`.
	///
	/// # Errors
	///
	/// Returns [`RouterError::Unavailable`] outside a browser window context.
	pub fn new() -> Result<Self, RouterError> {
		web_sys::window()
			.map(|window| Self { window })
			.ok_or(RouterError::Unavailable("window"))
	}

	fn history(&self) -> Result<web_sys::History, RouterError> {
		self.window
			.history()
			.map_err(|_| RouterError::Unavailable("history"))
	}
}

impl History for BrowserHistory {
	fn location(&self) -> Result<String, RouterError> {
		let location = self.window.location();
		let pathname = location
			.pathname()
			.map_err(|_| RouterError::Unavailable("location"))?;
		let search = location
			.search()
			.map_err(|_| RouterError::Unavailable("location"))?;
		Ok(format!("{}{}", pathname, search))
	}

	fn push_state(
		&self,
		state: &HistoryState,
		title: Option<&str>,
		url: &str,
	) -> Result<(), RouterError> {
		self.history()?
			.push_state_with_url(&state_to_js(state)?, title.unwrap_or(""), Some(url))
			.map_err(|e| RouterError::History(js_error(e)))
	}

	fn replace_state(
		&self,
		state: &HistoryState,
		title: Option<&str>,
		url: &str,
	) -> Result<(), RouterError> {
		self.history()?
			.replace_state_with_url(&state_to_js(state)?, title.unwrap_or(""), Some(url))
			.map_err(|e| RouterError::History(js_error(e)))
	}
}

/// Converts a history state into a plain JS object.
pub fn state_to_js(state: &HistoryState) -> Result<JsValue, RouterError> {
	let json = serde_json::to_string(state).map_err(|e| RouterError::State(e.to_string()))?;
	js_sys::JSON::parse(&json).map_err(|e| RouterError::State(js_error(e)))
}

/// Reads a `popstate` payload back as JSON.
///
/// Returns `None` for `null`/`undefined` and for values that do not survive
/// `JSON.stringify`.
pub fn state_from_js(value: &JsValue) -> Option<Value> {
	if value.is_null() || value.is_undefined() {
		return None;
	}
	let text: String = js_sys::JSON::stringify(value).ok()?.into();
	serde_json::from_str(&text).ok()
}

/// An attached DOM event listener.
///
/// The closure stays registered for as long as the handle lives; dropping the
/// handle removes it from the target.
pub struct EventListener {
	target: EventTarget,
	event_type: &'static str,
	capture: bool,
	closure: Closure<dyn FnMut(Event)>,
}

impl EventListener {
	/// Attaches `handler` to `target` for `event_type`.
	///
	/// With `capture` set the listener runs during the capture phase, ahead of
	/// any handler registered on the event's target.
	pub fn new<F>(
		target: &EventTarget,
		event_type: &'static str,
		capture: bool,
		handler: F,
	) -> Result<Self, RouterError>
	where
		F: FnMut(Event) + 'static,
	{
		let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
		target
			.add_event_listener_with_callback_and_bool(
				event_type,
				closure.as_ref().unchecked_ref(),
				capture,
			)
			.map_err(|e| RouterError::Listener {
				event_type,
				reason: js_error(e),
			})?;

		Ok(Self {
			target: target.clone(),
			event_type,
			capture,
			closure,
		})
	}

	/// Returns the DOM event type.
	pub fn event_type(&self) -> &'static str {
		self.event_type
	}
}

impl Drop for EventListener {
	fn drop(&mut self) {
		let _ = self.target.remove_event_listener_with_callback_and_bool(
			self.event_type,
			self.closure.as_ref().unchecked_ref(),
			self.capture,
		);
	}
}

impl std::fmt::Debug for EventListener {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("EventListener")
			.field("event_type", &self.event_type)
			.field("capture", &self.capture)
			.finish()
	}
}

impl DomNode for Node {
	fn node_name(&self) -> String {
		Node::node_name(self)
	}

	fn parent_node(&self) -> Option<Self> {
		Node::parent_node(self)
	}

	fn attribute(&self, name: &str) -> Option<String> {
		self.dyn_ref::<Element>()
			.and_then(|element| element.get_attribute(name))
	}
}

impl ClickEvent for MouseEvent {
	type Node = Node;

	fn meta_key(&self) -> bool {
		MouseEvent::meta_key(self)
	}

	fn ctrl_key(&self) -> bool {
		MouseEvent::ctrl_key(self)
	}

	fn shift_key(&self) -> bool {
		MouseEvent::shift_key(self)
	}

	fn default_prevented(&self) -> bool {
		let event: &Event = self.as_ref();
		event.default_prevented()
	}

	fn target(&self) -> Option<Node> {
		let event: &Event = self.as_ref();
		event
			.target()
			.and_then(|target| target.dyn_into::<Node>().ok())
	}

	fn prevent_default(&self) {
		let event: &Event = self.as_ref();
		event.prevent_default();
	}
}
