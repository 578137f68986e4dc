//! Navigation context.

use crate::error::RouterError;
use crate::history::{History, HistoryState};
use crate::params::RouteParams;
use crate::route::Route;

/// The anchor click that started a navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkClick {
	/// The anchor's raw `href` attribute.
	pub href: String,
	/// The anchor's `id` attribute, if it has one.
	pub anchor_id: Option<String>,
}

/// Describes one navigation, from the URL it targets to the route it matched.
///
/// A context is created per navigation and becomes the router's current
/// context only after it has been dispatched to a matching route.
#[derive(Debug, Clone)]
pub struct RouterContext {
	/// The raw URL, including any query string.
	pub url: String,
	/// The URL without its query string.
	pub path: String,
	/// The payload written to (or read from) the history entry.
	pub state: HistoryState,
	/// Parameters captured by the matched route.
	pub params: RouteParams,
	/// The matched route, once resolved.
	pub route: Option<Route>,
	/// Path of the context this navigation replaced.
	pub prevpath: Option<String>,
	/// Path of the navigation that is replacing this context.
	pub nextpath: Option<String>,
	/// Whether to overwrite the current history entry instead of pushing.
	pub replace: bool,
	/// True only for the router's initial dispatch.
	pub init: bool,
	/// Title passed to the History API.
	pub title: Option<String>,
	/// The click that triggered this navigation, if any.
	pub click: Option<LinkClick>,
}

impl RouterContext {
	/// Creates a context for `url`.
	///
	/// The given state (or a fresh one) always has its `url` overwritten with
	/// `url`, so the history entry can be turned back into a context later.
	pub fn new(url: impl Into<String>, state: Option<HistoryState>) -> Self {
		let url = url.into();
		let path = url.split('?').next().unwrap_or_default().to_string();

		let mut state = state.unwrap_or_default();
		state.url = url.clone();

		Self {
			url,
			path,
			state,
			params: RouteParams::new(),
			route: None,
			prevpath: None,
			nextpath: None,
			replace: false,
			init: false,
			title: None,
			click: None,
		}
	}

	/// Rebuilds a context from a history entry's payload.
	pub fn from_state(state: HistoryState) -> Self {
		let url = state.url.clone();
		Self::new(url, Some(state))
	}

	/// Returns the path; an alias of [`path`](Self::path) kept for `location`
	/// parity.
	pub fn pathname(&self) -> &str {
		&self.path
	}

	/// Returns the query string without the leading `?`, if present.
	pub fn query(&self) -> Option<&str> {
		self.url.split_once('?').map(|(_, query)| query)
	}

	/// Writes this context into the current history entry.
	///
	/// Replaces the entry in place; no new entry is created.
	pub fn save(&self, history: &dyn History) -> Result<(), RouterError> {
		history.replace_state(&self.state, self.title.as_deref(), &self.url)
	}

	/// Writes this context as a new history entry.
	pub(crate) fn push(&self, history: &dyn History) -> Result<(), RouterError> {
		history.push_state(&self.state, self.title.as_deref(), &self.url)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::history::MemoryHistory;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case("/a/5", "/a/5", None)]
	#[case("/a/5?tab=info", "/a/5", Some("tab=info"))]
	#[case("/search?q=a?b", "/search", Some("q=a?b"))]
	#[case("?only=query", "", Some("only=query"))]
	fn test_path_split(#[case] url: &str, #[case] path: &str, #[case] query: Option<&str>) {
		let cxt = RouterContext::new(url, None);
		assert_eq!(cxt.path, path);
		assert_eq!(cxt.pathname(), path);
		assert_eq!(cxt.query(), query);
	}

	#[rstest]
	fn test_new_context_defaults() {
		let cxt = RouterContext::new("/a", None);
		assert!(cxt.route.is_none());
		assert!(cxt.params.is_empty());
		assert!(!cxt.replace);
		assert!(!cxt.init);
		assert_eq!(cxt.state.url, "/a");
	}

	#[rstest]
	fn test_state_url_is_forced() {
		let state = HistoryState::new("/stale").with_data("scroll", 10);
		let cxt = RouterContext::new("/fresh", Some(state));

		assert_eq!(cxt.state.url, "/fresh");
		assert_eq!(cxt.state.get("scroll"), Some(&json!(10)));
	}

	#[rstest]
	fn test_from_state() {
		let state = HistoryState::new("/a/5?x=1").with_data("k", "v");
		let cxt = RouterContext::from_state(state);

		assert_eq!(cxt.url, "/a/5?x=1");
		assert_eq!(cxt.path, "/a/5");
		assert_eq!(cxt.state.get("k"), Some(&json!("v")));
	}

	#[rstest]
	fn test_save_replaces_in_place() {
		let history = MemoryHistory::new("/start");
		let mut cxt = RouterContext::new("/start?x=1", None);
		cxt.title = Some("Start".to_string());

		cxt.save(&history).unwrap();

		assert_eq!(history.len(), 1);
		let entry = history.current();
		assert_eq!(entry.url, "/start?x=1");
		assert_eq!(entry.title.as_deref(), Some("Start"));
		assert_eq!(entry.state.unwrap().url, "/start?x=1");
	}
}
