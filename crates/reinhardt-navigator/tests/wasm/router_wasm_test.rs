//! Browser tests for the navigator's DOM bindings
//!
//! Run with `wasm-pack test --headless --chrome crates/reinhardt-navigator`.

#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;

use reinhardt_navigator::browser::{state_from_js, state_to_js};
use reinhardt_navigator::{BrowserHistory, History, HistoryState, Router, RouterContext};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

type Log = Rc<RefCell<Vec<String>>>;

fn document() -> web_sys::Document {
	web_sys::window().unwrap().document().unwrap()
}

fn append_anchor(href: &str) -> web_sys::Element {
	let anchor = document().create_element("a").unwrap();
	anchor.set_attribute("href", href).unwrap();
	let label = document().create_element("span").unwrap();
	anchor.append_child(&label).unwrap();
	document().body().unwrap().append_child(&anchor).unwrap();
	label
}

fn click(target: &web_sys::Element) -> bool {
	let init = web_sys::MouseEventInit::new();
	init.set_bubbles(true);
	init.set_cancelable(true);
	let event = web_sys::MouseEvent::new_with_mouse_event_init_dict("click", &init).unwrap();
	target.dispatch_event(&event).unwrap();
	event.default_prevented()
}

fn recording_router(log: &Log) -> Router {
	let l = Rc::clone(log);
	Router::builder()
		.route("/nav-test/{id}", move |cxt: &RouterContext| {
			l.borrow_mut()
				.push(cxt.params.get("id").unwrap_or_default().to_string());
		})
		.build()
		.unwrap()
}

#[wasm_bindgen_test]
fn test_browser_history_round_trip() {
	let history = BrowserHistory::new().unwrap();
	let state = HistoryState::new("/nav-test/7?x=1").with_data("scroll", 3);

	history.push_state(&state, None, "/nav-test/7?x=1").unwrap();

	assert_eq!(history.location().unwrap(), "/nav-test/7?x=1");
	let raw = web_sys::window().unwrap().history().unwrap().state().unwrap();
	let value = state_from_js(&raw).unwrap();
	assert_eq!(HistoryState::from_value(&value), Some(state));
}

#[wasm_bindgen_test]
fn test_state_conversion_skips_null() {
	assert!(state_from_js(&wasm_bindgen::JsValue::NULL).is_none());
	assert!(state_from_js(&wasm_bindgen::JsValue::UNDEFINED).is_none());

	let js = state_to_js(&HistoryState::new("/x")).unwrap();
	assert!(js.is_object());
}

#[wasm_bindgen_test]
fn test_click_on_in_app_link_is_intercepted() {
	let log: Log = Rc::default();
	let router = recording_router(&log);
	router.start().unwrap();

	let label = append_anchor("/nav-test/5");
	assert!(click(&label));
	assert_eq!(*log.borrow(), vec!["5"]);
	assert_eq!(
		BrowserHistory::new().unwrap().location().unwrap(),
		"/nav-test/5"
	);

	router.stop();
}

#[wasm_bindgen_test]
fn test_external_link_is_left_alone() {
	let log: Log = Rc::default();
	let router = recording_router(&log);
	router.start().unwrap();

	let label = append_anchor("https://example.com/nav-test/5");
	// Stop the browser from leaving the test page
	let guard = wasm_bindgen::closure::Closure::<dyn FnMut(web_sys::Event)>::new(
		|event: web_sys::Event| event.prevent_default(),
	);
	document()
		.add_event_listener_with_callback("click", guard.as_ref().unchecked_ref())
		.unwrap();

	click(&label);
	assert!(log.borrow().is_empty());

	document()
		.remove_event_listener_with_callback("click", guard.as_ref().unchecked_ref())
		.unwrap();
	router.stop();
}

#[wasm_bindgen_test]
fn test_stopped_router_ignores_clicks() {
	let log: Log = Rc::default();
	let router = recording_router(&log);
	router.start().unwrap();
	router.stop();

	let label = append_anchor("/nav-test/9");
	let guard = wasm_bindgen::closure::Closure::<dyn FnMut(web_sys::Event)>::new(
		|event: web_sys::Event| event.prevent_default(),
	);
	document()
		.add_event_listener_with_callback("click", guard.as_ref().unchecked_ref())
		.unwrap();

	click(&label);
	assert!(log.borrow().is_empty());

	document()
		.remove_event_listener_with_callback("click", guard.as_ref().unchecked_ref())
		.unwrap();
}
