//! The navigation router.
//!
//! A [`Router`] owns the route table, the current [`RouterContext`] and the
//! [`ActionQueue`] that runs load/unload handlers. Navigations come from three
//! places:
//!
//! - explicit calls ([`Router::navigate`], [`Router::push`], [`Router::replace`])
//! - intercepted anchor clicks ([`Router::handle_click`])
//! - browser back/forward ([`Router::handle_popstate`])
//!
//! ```text
//! navigate ──▶ navigate event ──▶ history push/replace ──┐
//! click ─────▶ resolve route ──▶ navigate ───────────────┤
//! popstate ──────────────────────────────────────────────┴─▶ dispatch
//!                                                             │
//!                       unload(outgoing) ─▶ load(incoming) ◀──┘
//! ```
//!
//! ```ignore
//! use reinhardt_navigator::{Completion, Router, RouterContext};
//!
//! let router = Router::builder()
//!     .route("/", |_cxt: &RouterContext| render_home())
//!     .route("/users/{id}", |cxt: &RouterContext| {
//!         let id = cxt.params.get("id").unwrap_or_default().to_string();
//!         Completion::pending(async move { load_user(id).await })
//!     })
//!     .build()?;
//!
//! router.start()?;
//! router.push("/users/42")?;
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde_json::Value;

use crate::context::{LinkClick, RouterContext};
use crate::error::RouterError;
use crate::events::RouterEvents;
use crate::handler::RouteHandler;
use crate::history::{History, HistoryState};
use crate::link::{ClickEvent, DomNode, find_anchor, link_href};
use crate::params::RouteParams;
use crate::queue::{ActionQueue, RouteAction, Spawner};
use crate::route::Route;
use crate::{debug_log, error_log, info_log};

#[cfg(target_arch = "wasm32")]
use crate::browser::EventListener;

/// Hook that may adjust a context before it is committed.
pub type ContextHook = Rc<dyn Fn(&mut RouterContext)>;

/// Options for [`Router::navigate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigateOptions {
	/// Overwrite the current history entry instead of pushing a new one.
	pub replace: bool,
}

impl NavigateOptions {
	/// Options for a `replaceState` navigation.
	pub fn replace() -> Self {
		Self { replace: true }
	}
}

struct RouterInner {
	routes: RefCell<Vec<Route>>,
	context: RefCell<Option<RouterContext>>,
	queue: ActionQueue,
	history: Rc<dyn History>,
	events: RouterEvents,
	before_navigate: Option<ContextHook>,
	before_load: Option<ContextHook>,
	intercept_links: bool,
	listen_popstate: bool,
	listening: Cell<bool>,
	#[cfg(target_arch = "wasm32")]
	listeners: RefCell<Vec<EventListener>>,
}

/// Client-side navigation router.
///
/// `Router` is a handle: clones share the same route table, history and
/// queue. All methods take `&self` and may be called from inside handlers.
#[derive(Clone)]
pub struct Router {
	inner: Rc<RouterInner>,
}

impl std::fmt::Debug for Router {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Router")
			.field("routes", &self.route_count())
			.field("current", &self.current().map(|cxt| cxt.url))
			.field("listening", &self.is_listening())
			.field("queue", &self.inner.queue)
			.finish()
	}
}

impl Router {
	/// Starts building a router.
	pub fn builder() -> RouterBuilder {
		RouterBuilder::new()
	}

	/// Creates a router with the default configuration and no routes.
	pub fn new() -> Result<Self, RouterError> {
		Self::builder().build()
	}

	/// Creates a router from an ordered route table.
	///
	/// Routes are registered in iteration order, which is also match order.
	pub fn from_routes<I, P, H>(table: I) -> Result<Self, RouterError>
	where
		I: IntoIterator<Item = (P, H)>,
		P: Into<String>,
		H: Into<RouteHandler>,
	{
		Self::builder().routes(table).build()
	}

	/// Appends a route. It takes part in every later lookup.
	pub fn route(&self, pattern: &str, handler: impl Into<RouteHandler>) -> Result<(), RouterError> {
		let route = Route::new(pattern, handler)?;
		self.inner.routes.borrow_mut().push(route);
		Ok(())
	}

	/// Starts routing from the current location.
	///
	/// Rewrites the current history entry with the router's state, begins
	/// handling clicks and `popstate` and dispatches the initial context. On
	/// WASM this also attaches the document listeners.
	pub fn start(&self) -> Result<(), RouterError> {
		let url = self.inner.history.location()?;
		let mut cxt = RouterContext::new(url, None);
		cxt.init = true;
		cxt.save(&*self.inner.history)?;

		#[cfg(target_arch = "wasm32")]
		self.attach_listeners()?;
		self.inner.listening.set(true);

		info_log!("router started at {}", cxt.url);
		self.dispatch(cxt);
		Ok(())
	}

	/// Stops handling clicks and `popstate`.
	///
	/// The route table and current context are kept; [`start`](Self::start)
	/// resumes routing.
	pub fn stop(&self) {
		self.inner.listening.set(false);
		#[cfg(target_arch = "wasm32")]
		self.inner.listeners.borrow_mut().clear();
		debug_log!("router stopped");
	}

	/// Navigates to `url`.
	pub fn navigate(&self, url: &str, options: NavigateOptions) -> Result<(), RouterError> {
		let mut cxt = RouterContext::new(url, None);
		cxt.replace = options.replace;
		self.navigate_context(cxt)
	}

	/// Navigates to `url`, adding a history entry.
	pub fn push(&self, url: &str) -> Result<(), RouterError> {
		self.navigate(url, NavigateOptions::default())
	}

	/// Navigates to `url`, replacing the current history entry.
	pub fn replace(&self, url: &str) -> Result<(), RouterError> {
		self.navigate(url, NavigateOptions::replace())
	}

	/// Navigates with a prepared context.
	///
	/// Fires the cancelable navigate event, runs the `before_navigate` hook,
	/// writes the history entry and dispatches. Navigating to the current URL
	/// does nothing.
	pub fn navigate_context(&self, mut cxt: RouterContext) -> Result<(), RouterError> {
		if !self.inner.events.trigger_navigate(&cxt) {
			debug_log!("navigation to {} cancelled", cxt.url);
			return Ok(());
		}

		if let Some(hook) = &self.inner.before_navigate {
			hook(&mut cxt);
		}

		let unchanged = self
			.inner
			.context
			.borrow()
			.as_ref()
			.is_some_and(|current| current.url == cxt.url);
		if unchanged {
			debug_log!("already at {}", cxt.url);
			return Ok(());
		}

		if cxt.replace {
			cxt.save(&*self.inner.history)?;
		} else {
			cxt.push(&*self.inner.history)?;
		}

		self.dispatch(cxt);
		Ok(())
	}

	/// Runs the transition to `cxt` without touching history.
	///
	/// Leaving a route with an unload handler always queues that unload, even
	/// if nothing matches `cxt`. When a route matches, its load is queued and
	/// `cxt` becomes the current context.
	///
	/// The current context is updated after the load is queued. A synchronous
	/// load handler that navigates elsewhere therefore leaves the current
	/// context at `cxt` while history already holds the redirect target; the
	/// redirect's own load still runs once the handler returns.
	pub fn dispatch(&self, mut cxt: RouterContext) {
		let outgoing = self.inner.context.borrow().clone();

		if let Some(prev) = &outgoing
			&& let Some(unload) = prev.route.as_ref().and_then(Route::unload)
		{
			let mut leaving = prev.clone();
			leaving.nextpath = Some(cxt.path.clone());
			self.inner
				.queue
				.execute(RouteAction::unload(Rc::clone(unload), leaving));
		}

		let route = match cxt.route.clone() {
			Some(route) => route,
			None => match self.find_route(&cxt.path) {
				Some(route) => route,
				None => {
					debug_log!("no route matches {}", cxt.path);
					return;
				}
			},
		};

		cxt.params = route.params(&cxt.path).unwrap_or_else(RouteParams::new);
		cxt.prevpath = outgoing.map(|prev| prev.path);
		cxt.route = Some(route.clone());

		if let Some(hook) = &self.inner.before_load {
			hook(&mut cxt);
		}

		debug_log!("dispatching {} to {}", cxt.url, route.url());
		self.inner
			.queue
			.execute(RouteAction::load(Rc::clone(route.load()), cxt.clone()));
		*self.inner.context.borrow_mut() = Some(cxt);
	}

	/// Returns the first registered route matching `path`.
	pub fn find_route(&self, path: &str) -> Option<Route> {
		self.inner
			.routes
			.borrow()
			.iter()
			.find(|route| route.test(path))
			.cloned()
	}

	/// Handles a document click.
	///
	/// Returns true if the click was an in-app link the router took over, in
	/// which case its default action has been prevented.
	pub fn handle_click<E: ClickEvent>(&self, event: &E) -> bool {
		if !self.inner.intercept_links || !self.inner.listening.get() {
			return false;
		}
		if event.has_modifier() || event.default_prevented() {
			return false;
		}

		let Some(anchor) = event.target().and_then(find_anchor) else {
			return false;
		};
		let Some(href) = link_href(&anchor) else {
			return false;
		};

		let mut cxt = RouterContext::new(href.clone(), None);
		let Some(route) = self.find_route(&cxt.path) else {
			debug_log!("no route for {}, leaving click to the browser", href);
			return false;
		};
		cxt.route = Some(route);
		cxt.click = Some(LinkClick {
			href,
			anchor_id: anchor.attribute("id"),
		});

		event.prevent_default();
		if let Err(err) = self.navigate_context(cxt) {
			error_log!("link navigation failed: {}", err);
		}
		true
	}

	/// Handles a `popstate` event carrying `state`.
	///
	/// Entries the router did not write (no state, or no string `url`) are
	/// ignored. Returns true if the state was dispatched.
	pub fn handle_popstate(&self, state: Option<&Value>) -> bool {
		if !self.inner.listen_popstate || !self.inner.listening.get() {
			return false;
		}
		let Some(state) = state.and_then(HistoryState::from_value) else {
			debug_log!("ignoring popstate without router state");
			return false;
		};

		self.dispatch(RouterContext::from_state(state));
		true
	}

	/// Returns a copy of the current context.
	///
	/// This is the last context passed to [`dispatch`](Self::dispatch) that
	/// matched a route, which can lag behind history when a load handler
	/// redirects synchronously.
	pub fn current(&self) -> Option<RouterContext> {
		self.inner.context.borrow().clone()
	}

	/// Returns the number of registered routes.
	pub fn route_count(&self) -> usize {
		self.inner.routes.borrow().len()
	}

	/// Returns true between [`start`](Self::start) and [`stop`](Self::stop).
	pub fn is_listening(&self) -> bool {
		self.inner.listening.get()
	}

	/// Returns true when no handler is running or queued.
	pub fn is_idle(&self) -> bool {
		self.inner.queue.is_idle()
	}

	/// Returns the router's event registry.
	pub fn events(&self) -> &RouterEvents {
		&self.inner.events
	}

	/// Returns the history backend.
	pub fn history(&self) -> Rc<dyn History> {
		Rc::clone(&self.inner.history)
	}

	#[cfg(target_arch = "wasm32")]
	fn attach_listeners(&self) -> Result<(), RouterError> {
		use wasm_bindgen::JsCast;
		use web_sys::{MouseEvent, PopStateEvent};

		let window = web_sys::window().ok_or(RouterError::Unavailable("window"))?;
		let mut listeners = Vec::new();

		// Weak handles: the listeners live inside the router they call back into
		if self.inner.intercept_links {
			let weak = Rc::downgrade(&self.inner);
			listeners.push(EventListener::new(&window, "click", true, move |event| {
				if let (Some(inner), Ok(event)) = (weak.upgrade(), event.dyn_into::<MouseEvent>()) {
					Router { inner }.handle_click(&event);
				}
			})?);
		}

		if self.inner.listen_popstate {
			let weak = Rc::downgrade(&self.inner);
			listeners.push(EventListener::new(&window, "popstate", false, move |event| {
				if let (Some(inner), Ok(event)) = (weak.upgrade(), event.dyn_into::<PopStateEvent>()) {
					let state = crate::browser::state_from_js(&event.state());
					Router { inner }.handle_popstate(state.as_ref());
				}
			})?);
		}

		*self.inner.listeners.borrow_mut() = listeners;
		Ok(())
	}
}

/// Builder for [`Router`].
pub struct RouterBuilder {
	routes: Vec<(String, RouteHandler)>,
	history: Option<Rc<dyn History>>,
	spawner: Option<Spawner>,
	before_navigate: Option<ContextHook>,
	before_load: Option<ContextHook>,
	intercept_links: bool,
	listen_popstate: bool,
}

impl Default for RouterBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for RouterBuilder {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RouterBuilder")
			.field("routes", &self.routes.len())
			.field("intercept_links", &self.intercept_links)
			.field("listen_popstate", &self.listen_popstate)
			.finish()
	}
}

impl RouterBuilder {
	/// Creates a builder with link interception and `popstate` handling on.
	pub fn new() -> Self {
		Self {
			routes: Vec::new(),
			history: None,
			spawner: None,
			before_navigate: None,
			before_load: None,
			intercept_links: true,
			listen_popstate: true,
		}
	}

	/// Adds a route.
	pub fn route(mut self, pattern: &str, handler: impl Into<RouteHandler>) -> Self {
		self.routes.push((pattern.to_string(), handler.into()));
		self
	}

	/// Adds every route of an ordered table.
	pub fn routes<I, P, H>(mut self, table: I) -> Self
	where
		I: IntoIterator<Item = (P, H)>,
		P: Into<String>,
		H: Into<RouteHandler>,
	{
		self.routes.extend(
			table
				.into_iter()
				.map(|(pattern, handler)| (pattern.into(), handler.into())),
		);
		self
	}

	/// Sets the history backend.
	///
	/// Defaults to the browser's `window.history` on WASM and to a
	/// [`MemoryHistory`](crate::history::MemoryHistory) at `/` elsewhere.
	pub fn history<H: History + 'static>(mut self, history: Rc<H>) -> Self {
		self.history = Some(history);
		self
	}

	/// Sets the executor for pending handler futures.
	pub fn spawner(mut self, spawner: Spawner) -> Self {
		self.spawner = Some(spawner);
		self
	}

	/// Runs `hook` on every navigation that survived the navigate event, before
	/// history is written.
	pub fn before_navigate<F>(mut self, hook: F) -> Self
	where
		F: Fn(&mut RouterContext) + 'static,
	{
		self.before_navigate = Some(Rc::new(hook));
		self
	}

	/// Runs `hook` on every matched context, right before its load is queued.
	pub fn before_load<F>(mut self, hook: F) -> Self
	where
		F: Fn(&mut RouterContext) + 'static,
	{
		self.before_load = Some(Rc::new(hook));
		self
	}

	/// Enables or disables anchor click interception.
	pub fn intercept_links(mut self, enabled: bool) -> Self {
		self.intercept_links = enabled;
		self
	}

	/// Enables or disables `popstate` handling.
	pub fn listen_popstate(mut self, enabled: bool) -> Self {
		self.listen_popstate = enabled;
		self
	}

	/// Builds the router.
	///
	/// # Errors
	///
	/// Returns [`RouterError::InvalidPattern`] for the first route that fails
	/// to compile, or [`RouterError::Unavailable`] if the default browser
	/// history cannot be reached.
	pub fn build(self) -> Result<Router, RouterError> {
		let routes = self
			.routes
			.iter()
			.map(|(pattern, handler)| Route::new(pattern, handler.clone()))
			.collect::<Result<Vec<_>, _>>()?;

		let history = match self.history {
			Some(history) => history,
			None => default_history()?,
		};

		let events = RouterEvents::new();
		let queue = ActionQueue::new(events.clone(), self.spawner);

		Ok(Router {
			inner: Rc::new(RouterInner {
				routes: RefCell::new(routes),
				context: RefCell::new(None),
				queue,
				history,
				events,
				before_navigate: self.before_navigate,
				before_load: self.before_load,
				intercept_links: self.intercept_links,
				listen_popstate: self.listen_popstate,
				listening: Cell::new(false),
				#[cfg(target_arch = "wasm32")]
				listeners: RefCell::new(Vec::new()),
			}),
		})
	}
}

#[cfg(target_arch = "wasm32")]
fn default_history() -> Result<Rc<dyn History>, RouterError> {
	Ok(Rc::new(crate::browser::BrowserHistory::new()?))
}

#[cfg(not(target_arch = "wasm32"))]
fn default_history() -> Result<Rc<dyn History>, RouterError> {
	Ok(Rc::new(crate::history::MemoryHistory::default()))
}
