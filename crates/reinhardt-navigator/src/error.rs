//! Error types for the navigator.
//!
//! Dispatch itself never fails: unmatched routes and duplicate URLs are
//! silently ignored. These errors cover the edges where the router talks to
//! something that can refuse (pattern compilation, the History API, history
//! state decoding, typed parameter extraction).

use thiserror::Error;

/// Error type for typed path parameter extraction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
	/// No parameter with this name was captured.
	#[error("Missing path parameter: {0}")]
	Missing(String),
	/// Failed to parse a parameter value.
	#[error("Failed to parse parameter '{name}' value '{raw_value}' as {param_type}: {reason}")]
	ParseError {
		/// Name of the parameter that failed to parse.
		name: String,
		/// Expected type name.
		param_type: &'static str,
		/// Raw string value that failed to parse.
		raw_value: String,
		/// Error message from parsing.
		reason: String,
	},
}

/// Error type for router operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
	/// The route pattern could not be compiled.
	#[error("Invalid route pattern '{pattern}': {reason}")]
	InvalidPattern {
		/// The offending pattern.
		pattern: String,
		/// Why compilation was rejected.
		reason: String,
	},
	/// A History API call (`pushState` / `replaceState`) failed.
	#[error("History update failed: {0}")]
	History(String),
	/// A history state payload could not be converted.
	#[error("Invalid history state: {0}")]
	State(String),
	/// A browser global (`window`, `history`, `location`) is unavailable.
	#[error("Browser API unavailable: {0}")]
	Unavailable(&'static str),
	/// Attaching a DOM event listener failed.
	#[error("Failed to attach '{event_type}' listener: {reason}")]
	Listener {
		/// The DOM event type.
		event_type: &'static str,
		/// The reason reported by the browser.
		reason: String,
	},
}

impl RouterError {
	pub(crate) fn invalid_pattern(pattern: &str, reason: impl Into<String>) -> Self {
		Self::InvalidPattern {
			pattern: pattern.to_string(),
			reason: reason.into(),
		}
	}
}
