//! Route pattern compilation.
//!
//! Patterns use `{name}` placeholders:
//! - `/users/` - literal text, matched case-insensitively
//! - `/users/{id}` - one placeholder
//! - `/users/{id}/posts/{post}` - several placeholders, captured in order
//!
//! # Matching Behavior
//!
//! Every placeholder compiles to `(.*)`, which matches **any characters,
//! including `/` and the empty string**. The compiled regex is anchored at the
//! end of the path only. There is no start anchor, so `/{page}` also matches
//! `/a/5` and `/users` matches `/admin/users`. Route order therefore decides
//! overlapping matches: register specific patterns before general ones.

use crate::error::RouterError;
use crate::params::RouteParams;

/// Maximum allowed length for a route pattern string in bytes.
const MAX_PATTERN_LENGTH: usize = 1024;

/// Maximum allowed number of path segments in a route pattern.
const MAX_PATH_SEGMENTS: usize = 32;

/// Maximum allowed size for a compiled pattern regex (in bytes).
const MAX_REGEX_SIZE: usize = 1 << 20; // 1 MiB

/// A compiled route pattern.
#[derive(Debug, Clone)]
pub struct RoutePattern {
	/// The raw pattern string.
	pattern: String,
	/// Compiled regex pattern.
	regex: regex::Regex,
	/// Parameter names in order.
	param_names: Vec<String>,
}

impl RoutePattern {
	/// Compiles a pattern string.
	///
	/// # Errors
	///
	/// Returns [`RouterError::InvalidPattern`] if:
	/// - the pattern exceeds 1024 bytes
	/// - the pattern has more than 32 path segments
	/// - a `{` placeholder is never closed
	/// - the compiled regex exceeds its size limit
	pub fn new(pattern: &str) -> Result<Self, RouterError> {
		if pattern.len() > MAX_PATTERN_LENGTH {
			return Err(RouterError::invalid_pattern(
				pattern,
				format!(
					"length {} exceeds maximum allowed length of {} bytes",
					pattern.len(),
					MAX_PATTERN_LENGTH
				),
			));
		}

		let segment_count = pattern.split('/').count();
		if segment_count > MAX_PATH_SEGMENTS {
			return Err(RouterError::invalid_pattern(
				pattern,
				format!(
					"{} path segments, exceeding maximum of {}",
					segment_count, MAX_PATH_SEGMENTS
				),
			));
		}

		let (regex_str, param_names) = Self::compile_pattern(pattern)?;

		let regex = regex::RegexBuilder::new(&regex_str)
			.case_insensitive(true)
			.size_limit(MAX_REGEX_SIZE)
			.build()
			.map_err(|e| RouterError::invalid_pattern(pattern, e.to_string()))?;

		Ok(Self {
			pattern: pattern.to_string(),
			regex,
			param_names,
		})
	}

	/// Compiles a pattern string into a regex and extracts parameter names.
	fn compile_pattern(pattern: &str) -> Result<(String, Vec<String>), RouterError> {
		let mut regex_str = String::with_capacity(pattern.len() + 8);
		let mut param_names = Vec::new();
		let mut literal = String::new();
		let mut rest = pattern;

		while let Some(open) = rest.find('{') {
			let after = &rest[open + 1..];
			let close = after
				.find('}')
				.ok_or_else(|| RouterError::invalid_pattern(pattern, "unterminated placeholder"))?;

			literal.push_str(&rest[..open]);

			let name = &after[..close];
			if name.is_empty() {
				// `{}` names nothing and stays literal text
				literal.push_str("{}");
			} else {
				regex_str.push_str(&regex::escape(&literal));
				literal.clear();
				regex_str.push_str("(.*)");
				param_names.push(name.to_string());
			}

			rest = &after[close + 1..];
		}

		literal.push_str(rest);
		regex_str.push_str(&regex::escape(&literal));
		regex_str.push('$');

		Ok((regex_str, param_names))
	}

	/// Returns the raw pattern string.
	pub fn pattern(&self) -> &str {
		&self.pattern
	}

	/// Returns the parameter names in declaration order.
	pub fn param_names(&self) -> &[String] {
		&self.param_names
	}

	/// Checks if this pattern matches the given path.
	pub fn is_match(&self, path: &str) -> bool {
		self.regex.is_match(path)
	}

	/// Attempts to match a path, returning the captured parameters.
	///
	/// Returns `None` if the path does not match. Each placeholder name maps to
	/// its captured substring, in placeholder order.
	pub fn matches(&self, path: &str) -> Option<RouteParams> {
		let caps = self.regex.captures(path)?;

		let params: RouteParams = self
			.param_names
			.iter()
			.enumerate()
			.map(|(i, name)| {
				let value = caps.get(i + 1).map(|m| m.as_str()).unwrap_or_default();
				(name.clone(), value.to_string())
			})
			.collect();

		Some(params)
	}
}

impl PartialEq for RoutePattern {
	fn eq(&self, other: &Self) -> bool {
		self.pattern == other.pattern
	}
}

impl Eq for RoutePattern {}

impl std::fmt::Display for RoutePattern {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.pattern)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_literal_pattern() {
		let pattern = RoutePattern::new("/users").unwrap();
		assert!(pattern.param_names().is_empty());
		assert!(pattern.is_match("/users"));
		assert!(!pattern.is_match("/users/42"));
		assert_eq!(pattern.matches("/users").unwrap().len(), 0);
	}

	#[rstest]
	fn test_single_param() {
		let pattern = RoutePattern::new("/users/{id}").unwrap();
		let params = pattern.matches("/users/42").unwrap();

		assert_eq!(params.get("id"), Some("42"));
		assert_eq!(pattern.param_names(), &["id"]);
	}

	#[rstest]
	fn test_param_may_be_empty() {
		let pattern = RoutePattern::new("/users/{id}").unwrap();
		let params = pattern.matches("/users/").unwrap();

		assert_eq!(params.get("id"), Some(""));
	}

	#[rstest]
	fn test_param_spans_slashes() {
		let pattern = RoutePattern::new("/files/{path}").unwrap();
		let params = pattern.matches("/files/css/site/main.css").unwrap();

		assert_eq!(params.get("path"), Some("css/site/main.css"));
	}

	#[rstest]
	fn test_multiple_params_in_order() {
		let pattern = RoutePattern::new("/users/{user}/posts/{post}").unwrap();
		let params = pattern.matches("/users/7/posts/99").unwrap();

		let pairs: Vec<_> = params.iter().collect();
		assert_eq!(pairs, vec![("user", "7"), ("post", "99")]);
	}

	#[rstest]
	#[case("/USERS/42")]
	#[case("/Users/42")]
	#[case("/users/42")]
	fn test_case_insensitive(#[case] path: &str) {
		let pattern = RoutePattern::new("/users/{id}").unwrap();
		assert!(pattern.is_match(path));
	}

	#[rstest]
	fn test_no_start_anchor() {
		let pattern = RoutePattern::new("/users").unwrap();
		assert!(pattern.is_match("/admin/users"));
	}

	#[rstest]
	fn test_end_anchor() {
		let pattern = RoutePattern::new("/users").unwrap();
		assert!(!pattern.is_match("/users/extra"));
	}

	#[rstest]
	fn test_special_chars_escaped() {
		let pattern = RoutePattern::new("/api/v1.0").unwrap();
		assert!(pattern.is_match("/api/v1.0"));
		assert!(!pattern.is_match("/api/v1X0"));
	}

	#[rstest]
	fn test_empty_braces_are_literal() {
		let pattern = RoutePattern::new("/raw/{}").unwrap();
		assert!(pattern.param_names().is_empty());
		assert!(pattern.is_match("/raw/{}"));
	}

	#[rstest]
	fn test_unterminated_placeholder_rejected() {
		let result = RoutePattern::new("/users/{id");
		assert!(matches!(result, Err(RouterError::InvalidPattern { .. })));
	}

	#[rstest]
	fn test_pattern_rejects_excessive_length() {
		// Arrange
		let long_pattern = "/".to_string() + &"a".repeat(1025);

		// Act
		let result = RoutePattern::new(&long_pattern);

		// Assert
		let err = result.unwrap_err();
		assert!(err.to_string().contains("exceeds maximum allowed length"));
	}

	#[rstest]
	fn test_pattern_rejects_excessive_segments() {
		// Arrange
		let segments: Vec<&str> = (0..35).map(|_| "seg").collect();
		let pattern = format!("/{}/", segments.join("/"));

		// Act
		let result = RoutePattern::new(&pattern);

		// Assert
		assert!(result.unwrap_err().to_string().contains("exceeding maximum"));
	}

	#[rstest]
	fn test_pattern_display_and_equality() {
		let p1 = RoutePattern::new("/users/{id}").unwrap();
		let p2 = RoutePattern::new("/users/{id}").unwrap();
		let p3 = RoutePattern::new("/users/{user_id}").unwrap();

		assert_eq!(format!("{}", p1), "/users/{id}");
		assert_eq!(p1, p2);
		assert_ne!(p1, p3);
	}
}
