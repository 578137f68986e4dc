//! History stack abstraction.
//!
//! The router only needs three things from the browser's history: the current
//! location, `pushState` and `replaceState`. [`History`] captures that contract
//! so the same dispatch engine runs against the real `window.history` on WASM
//! (see `BrowserHistory`) and against [`MemoryHistory`] everywhere else.

use std::cell::RefCell;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::RouterError;

/// Payload stored in a history entry.
///
/// Always carries the entry's `url`; any other keys survive a round trip
/// through the browser untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryState {
	/// URL of the entry (path plus query string).
	pub url: String,
	/// Application data stored alongside the url.
	#[serde(flatten)]
	pub data: Map<String, Value>,
}

impl HistoryState {
	/// Creates a state for `url` with no extra data.
	pub fn new(url: impl Into<String>) -> Self {
		Self {
			url: url.into(),
			data: Map::new(),
		}
	}

	/// Adds an application data entry.
	pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.data.insert(key.into(), value.into());
		self
	}

	/// Returns an application data entry.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.data.get(key)
	}

	/// Recognizes a state payload read back from a history entry.
	///
	/// Returns `None` unless the value is an object with a string `url`.
	pub fn from_value(value: &Value) -> Option<Self> {
		match value.get("url") {
			Some(Value::String(_)) => serde_json::from_value(value.clone()).ok(),
			_ => None,
		}
	}

	/// Converts the state to a JSON value.
	pub fn to_value(&self) -> Result<Value, RouterError> {
		serde_json::to_value(self).map_err(|e| RouterError::State(e.to_string()))
	}
}

/// The browser history operations the router depends on.
pub trait History {
	/// Returns the current location as `pathname + search`.
	fn location(&self) -> Result<String, RouterError>;

	/// Adds a new entry on top of the stack (`history.pushState`).
	fn push_state(
		&self,
		state: &HistoryState,
		title: Option<&str>,
		url: &str,
	) -> Result<(), RouterError>;

	/// Overwrites the current entry (`history.replaceState`).
	fn replace_state(
		&self,
		state: &HistoryState,
		title: Option<&str>,
		url: &str,
	) -> Result<(), RouterError>;
}

/// One entry of a [`MemoryHistory`] stack.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
	/// The entry URL.
	pub url: String,
	/// The stored state, if any was written.
	pub state: Option<HistoryState>,
	/// The title passed with the state.
	pub title: Option<String>,
}

#[derive(Debug)]
struct MemoryStack {
	entries: Vec<HistoryEntry>,
	index: usize,
}

/// An in-memory history stack for non-browser hosts and tests.
///
/// Mirrors browser semantics: pushing discards any forward entries, and
/// [`back`](Self::back) / [`forward`](Self::forward) move the cursor and return
/// the state a `popstate` event would carry.
#[derive(Debug)]
pub struct MemoryHistory {
	stack: RefCell<MemoryStack>,
}

impl Default for MemoryHistory {
	fn default() -> Self {
		Self::new("/")
	}
}

impl MemoryHistory {
	/// Creates a stack with a single stateless entry at `url`.
	pub fn new(url: impl Into<String>) -> Self {
		Self {
			stack: RefCell::new(MemoryStack {
				entries: vec![HistoryEntry {
					url: url.into(),
					state: None,
					title: None,
				}],
				index: 0,
			}),
		}
	}

	/// Returns the entry under the cursor.
	pub fn current(&self) -> HistoryEntry {
		let stack = self.stack.borrow();
		stack.entries[stack.index].clone()
	}

	/// Returns every entry, oldest first.
	pub fn entries(&self) -> Vec<HistoryEntry> {
		self.stack.borrow().entries.clone()
	}

	/// Returns the number of entries.
	pub fn len(&self) -> usize {
		self.stack.borrow().entries.len()
	}

	/// Always false: a history stack holds at least one entry.
	pub fn is_empty(&self) -> bool {
		false
	}

	/// Moves one entry back, returning the popstate payload.
	///
	/// Returns `None` at the start of the stack. The inner `Option` is the
	/// entry's state, which is `None` for entries never written by the router.
	pub fn back(&self) -> Option<Option<Value>> {
		let mut stack = self.stack.borrow_mut();
		if stack.index == 0 {
			return None;
		}
		stack.index -= 1;
		Some(Self::state_value(&stack.entries[stack.index]))
	}

	/// Moves one entry forward, returning the popstate payload.
	pub fn forward(&self) -> Option<Option<Value>> {
		let mut stack = self.stack.borrow_mut();
		if stack.index + 1 >= stack.entries.len() {
			return None;
		}
		stack.index += 1;
		Some(Self::state_value(&stack.entries[stack.index]))
	}

	fn state_value(entry: &HistoryEntry) -> Option<Value> {
		entry.state.as_ref().and_then(|s| s.to_value().ok())
	}
}

impl History for MemoryHistory {
	fn location(&self) -> Result<String, RouterError> {
		Ok(self.current().url)
	}

	fn push_state(
		&self,
		state: &HistoryState,
		title: Option<&str>,
		url: &str,
	) -> Result<(), RouterError> {
		let mut stack = self.stack.borrow_mut();
		let next = stack.index + 1;
		stack.entries.truncate(next);
		stack.entries.push(HistoryEntry {
			url: url.to_string(),
			state: Some(state.clone()),
			title: title.map(str::to_string),
		});
		stack.index = next;
		Ok(())
	}

	fn replace_state(
		&self,
		state: &HistoryState,
		title: Option<&str>,
		url: &str,
	) -> Result<(), RouterError> {
		let mut stack = self.stack.borrow_mut();
		let index = stack.index;
		stack.entries[index] = HistoryEntry {
			url: url.to_string(),
			state: Some(state.clone()),
			title: title.map(str::to_string),
		};
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_state_serializes_flat() {
		let state = HistoryState::new("/a/5?tab=1").with_data("scroll", 120);
		let value = state.to_value().unwrap();

		assert_eq!(value, json!({ "url": "/a/5?tab=1", "scroll": 120 }));
	}

	#[rstest]
	#[case(json!(null))]
	#[case(json!({}))]
	#[case(json!({ "url": 5 }))]
	#[case(json!("/a"))]
	fn test_state_from_unrecognized_value(#[case] value: Value) {
		assert!(HistoryState::from_value(&value).is_none());
	}

	#[rstest]
	fn test_state_from_value_keeps_extra_keys() {
		let state = HistoryState::from_value(&json!({ "url": "/a/5", "tab": "x" })).unwrap();

		assert_eq!(state.url, "/a/5");
		assert_eq!(state.get("tab"), Some(&json!("x")));
	}

	#[rstest]
	fn test_memory_push_and_replace() {
		let history = MemoryHistory::new("/");

		history
			.push_state(&HistoryState::new("/a"), None, "/a")
			.unwrap();
		history
			.replace_state(&HistoryState::new("/b"), Some("B"), "/b")
			.unwrap();

		assert_eq!(history.len(), 2);
		let current = history.current();
		assert_eq!(current.url, "/b");
		assert_eq!(current.title.as_deref(), Some("B"));
		assert_eq!(history.location().unwrap(), "/b");
	}

	#[rstest]
	fn test_memory_back_forward() {
		let history = MemoryHistory::new("/");
		history
			.push_state(&HistoryState::new("/a"), None, "/a")
			.unwrap();

		// The initial entry was never written, so its popstate carries no state
		assert_eq!(history.back(), Some(None));
		assert_eq!(history.back(), None);

		let state = history.forward().unwrap().unwrap();
		assert_eq!(state, json!({ "url": "/a" }));
		assert_eq!(history.forward(), None);
	}

	#[rstest]
	fn test_memory_push_discards_forward_entries() {
		let history = MemoryHistory::new("/");
		history
			.push_state(&HistoryState::new("/a"), None, "/a")
			.unwrap();
		history
			.push_state(&HistoryState::new("/b"), None, "/b")
			.unwrap();
		history.back();
		history
			.push_state(&HistoryState::new("/c"), None, "/c")
			.unwrap();

		let urls: Vec<_> = history.entries().into_iter().map(|e| e.url).collect();
		assert_eq!(urls, vec!["/", "/a", "/c"]);
	}
}
