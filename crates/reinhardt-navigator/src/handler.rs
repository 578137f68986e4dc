//! Load/unload handler abstractions.
//!
//! A route is entered through its load handler and left through its optional
//! unload handler. Both receive the navigation's [`RouterContext`] and report
//! how they complete:
//!
//! - [`Completion::Ready`] - finished synchronously, the queue advances at once
//! - [`Completion::Pending`] - the queue waits for the future before advancing
//!
//! ```ignore
//! use reinhardt_navigator::{Completion, RouteHandler};
//!
//! let handler = RouteHandler::load_unload(
//!     |cxt| {
//!         let url = cxt.url.clone();
//!         Completion::pending(async move { fetch_page(url).await; })
//!     },
//!     |_cxt| Completion::Ready,
//! );
//! ```

use std::rc::Rc;

use futures::FutureExt;
use futures::future::LocalBoxFuture;

use crate::context::RouterContext;

/// Shared handler function invoked with the navigation context.
pub type HandlerFn = Rc<dyn Fn(&RouterContext) -> Completion>;

/// Outcome of a load or unload handler.
pub enum Completion {
	/// The handler finished synchronously.
	Ready,
	/// The handler is still running; the action queue awaits this future.
	Pending(LocalBoxFuture<'static, ()>),
}

impl Completion {
	/// Wraps a future as a pending completion.
	pub fn pending<F>(future: F) -> Self
	where
		F: Future<Output = ()> + 'static,
	{
		Self::Pending(future.boxed_local())
	}

	/// Returns true if the handler finished synchronously.
	pub fn is_ready(&self) -> bool {
		matches!(self, Self::Ready)
	}
}

impl From<()> for Completion {
	fn from(_: ()) -> Self {
		Self::Ready
	}
}

impl std::fmt::Debug for Completion {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Ready => f.write_str("Completion::Ready"),
			Self::Pending(_) => f.write_str("Completion::Pending(..)"),
		}
	}
}

/// An object that can be entered and left, such as a page controller.
///
/// Adapt it into a route handler with [`RouteHandler::lifecycle`].
pub trait PageLifecycle {
	/// Called when a navigation enters the route.
	fn load(&self, cxt: &RouterContext) -> Completion;

	/// Called when a navigation leaves the route.
	fn unload(&self, _cxt: &RouterContext) -> Completion {
		Completion::Ready
	}
}

/// The handler attached to a route.
#[derive(Clone)]
pub enum RouteHandler {
	/// A plain load function; leaving the route runs nothing.
	Simple(HandlerFn),
	/// Separate functions for entering and leaving the route.
	LoadUnload {
		/// Runs when the route is entered.
		load: HandlerFn,
		/// Runs when the route is left.
		unload: HandlerFn,
	},
}

impl RouteHandler {
	/// Creates a handler from a load function.
	///
	/// The closure may return `()` or a [`Completion`].
	pub fn simple<F, R>(load: F) -> Self
	where
		F: Fn(&RouterContext) -> R + 'static,
		R: Into<Completion>,
	{
		Self::Simple(Rc::new(move |cxt: &RouterContext| -> Completion { load(cxt).into() }))
	}

	/// Creates a handler from separate load and unload functions.
	pub fn load_unload<L, LR, U, UR>(load: L, unload: U) -> Self
	where
		L: Fn(&RouterContext) -> LR + 'static,
		LR: Into<Completion>,
		U: Fn(&RouterContext) -> UR + 'static,
		UR: Into<Completion>,
	{
		Self::LoadUnload {
			load: Rc::new(move |cxt: &RouterContext| -> Completion { load(cxt).into() }),
			unload: Rc::new(move |cxt: &RouterContext| -> Completion { unload(cxt).into() }),
		}
	}

	/// Adapts a [`PageLifecycle`] object.
	pub fn lifecycle<T>(page: Rc<T>) -> Self
	where
		T: PageLifecycle + 'static,
	{
		let unload_page = Rc::clone(&page);
		Self::LoadUnload {
			load: Rc::new(move |cxt: &RouterContext| page.load(cxt)),
			unload: Rc::new(move |cxt: &RouterContext| unload_page.unload(cxt)),
		}
	}

	/// Returns the load function.
	pub fn load(&self) -> &HandlerFn {
		match self {
			Self::Simple(load) => load,
			Self::LoadUnload { load, .. } => load,
		}
	}

	/// Returns the unload function, if any.
	pub fn unload(&self) -> Option<&HandlerFn> {
		match self {
			Self::Simple(_) => None,
			Self::LoadUnload { unload, .. } => Some(unload),
		}
	}
}

impl std::fmt::Debug for RouteHandler {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Simple(_) => f.write_str("RouteHandler::Simple"),
			Self::LoadUnload { .. } => f.write_str("RouteHandler::LoadUnload"),
		}
	}
}

impl<F, R> From<F> for RouteHandler
where
	F: Fn(&RouterContext) -> R + 'static,
	R: Into<Completion>,
{
	fn from(load: F) -> Self {
		Self::simple(load)
	}
}
