//! Route definitions.

use std::rc::Rc;

use crate::error::RouterError;
use crate::handler::{HandlerFn, RouteHandler};
use crate::params::RouteParams;
use crate::pattern::RoutePattern;

/// A registered URL pattern paired with its load/unload behavior.
///
/// Routes are immutable once built and cheap to clone; a route is identified
/// by its raw pattern string.
#[derive(Clone)]
pub struct Route {
	inner: Rc<RouteInner>,
}

struct RouteInner {
	pattern: RoutePattern,
	handler: RouteHandler,
}

impl Route {
	/// Creates a new route.
	///
	/// # Errors
	///
	/// Returns [`RouterError::InvalidPattern`] if the pattern cannot be compiled.
	pub fn new(pattern: &str, handler: impl Into<RouteHandler>) -> Result<Self, RouterError> {
		Ok(Self {
			inner: Rc::new(RouteInner {
				pattern: RoutePattern::new(pattern)?,
				handler: handler.into(),
			}),
		})
	}

	/// Returns the raw pattern string.
	pub fn url(&self) -> &str {
		self.inner.pattern.pattern()
	}

	/// Returns the compiled pattern.
	pub fn pattern(&self) -> &RoutePattern {
		&self.inner.pattern
	}

	/// Returns the parameter names in declaration order.
	pub fn param_names(&self) -> &[String] {
		self.inner.pattern.param_names()
	}

	/// Returns the route handler.
	pub fn handler(&self) -> &RouteHandler {
		&self.inner.handler
	}

	/// Returns the load function.
	pub fn load(&self) -> &HandlerFn {
		self.inner.handler.load()
	}

	/// Returns the unload function, if the route defines one.
	pub fn unload(&self) -> Option<&HandlerFn> {
		self.inner.handler.unload()
	}

	/// Checks whether `path` matches this route.
	pub fn test(&self, path: &str) -> bool {
		self.inner.pattern.is_match(path)
	}

	/// Extracts the parameters of `path`, or `None` if it does not match.
	pub fn params(&self, path: &str) -> Option<RouteParams> {
		self.inner.pattern.matches(path)
	}
}

impl PartialEq for Route {
	fn eq(&self, other: &Self) -> bool {
		self.url() == other.url()
	}
}

impl Eq for Route {}

impl std::fmt::Debug for Route {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Route")
			.field("pattern", &self.url())
			.field("param_names", &self.param_names())
			.field("has_unload", &self.unload().is_some())
			.finish()
	}
}
