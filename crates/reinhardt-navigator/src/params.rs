//! Captured path parameters.
//!
//! [`RouteParams`] keeps parameters in the order their placeholders appear in
//! the pattern, and offers typed extraction similar to the server-side
//! `Path<T>` extractor.
//!
//! ```ignore
//! let route = Route::new("/users/{id}", RouteHandler::simple(|cxt| {
//!     let id: i64 = cxt.params.get_as("id").unwrap_or_default();
//!     Completion::Ready
//! }))?;
//! ```

use std::collections::HashMap;
use std::str::FromStr;

use crate::error::PathError;

/// Ordered mapping of placeholder name to captured value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
	entries: Vec<(String, String)>,
}

impl RouteParams {
	/// Creates an empty parameter set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the captured value for `name`.
	///
	/// If a name appears twice in a pattern, the first capture wins.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.entries
			.iter()
			.find(|(key, _)| key == name)
			.map(|(_, value)| value.as_str())
	}

	/// Parses the captured value for `name` into `T`.
	///
	/// # Errors
	///
	/// Returns [`PathError::Missing`] if nothing was captured under `name`, or
	/// [`PathError::ParseError`] if the value does not parse.
	pub fn get_as<T>(&self, name: &str) -> Result<T, PathError>
	where
		T: FromStr,
		T::Err: std::fmt::Display,
	{
		let raw = self
			.get(name)
			.ok_or_else(|| PathError::Missing(name.to_string()))?;

		raw.parse::<T>().map_err(|e| PathError::ParseError {
			name: name.to_string(),
			param_type: std::any::type_name::<T>(),
			raw_value: raw.to_string(),
			reason: e.to_string(),
		})
	}

	/// Iterates `(name, value)` pairs in placeholder order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.entries
			.iter()
			.map(|(name, value)| (name.as_str(), value.as_str()))
	}

	/// Returns the parameter names in placeholder order.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.entries.iter().map(|(name, _)| name.as_str())
	}

	/// Returns the number of parameters.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns whether there are no parameters.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Converts into an unordered map.
	pub fn into_map(self) -> HashMap<String, String> {
		self.entries.into_iter().collect()
	}
}

impl FromIterator<(String, String)> for RouteParams {
	fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
		Self {
			entries: iter.into_iter().collect(),
		}
	}
}

impl<'a> FromIterator<(&'a str, &'a str)> for RouteParams {
	fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
		iter.into_iter()
			.map(|(name, value)| (name.to_string(), value.to_string()))
			.collect()
	}
}

impl IntoIterator for RouteParams {
	type Item = (String, String);
	type IntoIter = std::vec::IntoIter<(String, String)>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.into_iter()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn sample() -> RouteParams {
		[("org", "acme"), ("id", "42")].into_iter().collect()
	}

	#[rstest]
	fn test_get_and_order() {
		let params = sample();
		assert_eq!(params.get("org"), Some("acme"));
		assert_eq!(params.get("missing"), None);
		assert_eq!(params.names().collect::<Vec<_>>(), vec!["org", "id"]);
	}

	#[rstest]
	fn test_get_as_parses() {
		let id: i64 = sample().get_as("id").unwrap();
		assert_eq!(id, 42);
	}

	#[rstest]
	fn test_get_as_parse_error() {
		let err = sample().get_as::<u32>("org").unwrap_err();
		assert!(matches!(err, PathError::ParseError { ref raw_value, .. } if raw_value == "acme"));
	}

	#[rstest]
	fn test_get_as_missing() {
		let err = sample().get_as::<u32>("page").unwrap_err();
		assert_eq!(err, PathError::Missing("page".to_string()));
	}

	#[rstest]
	fn test_into_map() {
		let map = sample().into_map();
		assert_eq!(map.len(), 2);
		assert_eq!(map.get("id").map(String::as_str), Some("42"));
	}
}
