//! Router notifications.
//!
//! The router announces three events to outside listeners:
//!
//! | Event | Fired | Listener |
//! |-------|-------|----------|
//! | [`EventKind::Navigate`] | before a navigation touches history | `Fn(&RouterContext) -> bool`, `false` cancels |
//! | [`EventKind::Loaded`] | after a load handler completes | `Fn(&RouterContext)` |
//! | [`EventKind::Unloaded`] | after an unload handler completes | `Fn(&RouterContext)` |
//!
//! Every registration returns a [`Listener`] handle that can pause, resume, or
//! dispose of it. Dropping the handle keeps the listener registered.
//!
//! ```ignore
//! let guard = router.events().on_navigate(|cxt| !cxt.path.starts_with("/admin"));
//! let log = router.events().on_loaded(|cxt| info_log!("loaded {}", cxt.url));
//!
//! log.pause();
//! guard.dispose();
//! ```

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::context::RouterContext;

/// The notifications the router emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
	/// A navigation is about to happen; listeners may cancel it.
	Navigate,
	/// A route's load handler completed.
	Loaded,
	/// A route's unload handler completed.
	Unloaded,
}

impl EventKind {
	/// Returns the DOM-style event name.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Navigate => "navigate",
			Self::Loaded => "route:loaded",
			Self::Unloaded => "route:unloaded",
		}
	}
}

impl std::fmt::Display for EventKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

type NavigateFn = Rc<dyn Fn(&RouterContext) -> bool>;
type NotifyFn = Rc<dyn Fn(&RouterContext)>;

#[derive(Clone)]
enum Receiver {
	Navigate(NavigateFn),
	Notify(NotifyFn),
}

#[derive(Debug, Default)]
struct ListenerState {
	paused: Cell<bool>,
	disposed: Cell<bool>,
}

impl ListenerState {
	fn is_active(&self) -> bool {
		!self.paused.get() && !self.disposed.get()
	}
}

struct Registration {
	kind: EventKind,
	receiver: Receiver,
	state: Rc<ListenerState>,
}

type Registry = RefCell<Vec<Registration>>;

/// Listener registry shared by a router and its action queue.
#[derive(Clone, Default)]
pub struct RouterEvents {
	registrations: Rc<Registry>,
}

impl std::fmt::Debug for RouterEvents {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RouterEvents")
			.field("navigate", &self.listener_count(EventKind::Navigate))
			.field("loaded", &self.listener_count(EventKind::Loaded))
			.field("unloaded", &self.listener_count(EventKind::Unloaded))
			.finish()
	}
}

impl RouterEvents {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a navigate listener. Returning `false` cancels the navigation.
	pub fn on_navigate<F>(&self, listener: F) -> Listener
	where
		F: Fn(&RouterContext) -> bool + 'static,
	{
		self.register(EventKind::Navigate, Receiver::Navigate(Rc::new(listener)))
	}

	/// Registers a listener for completed load handlers.
	pub fn on_loaded<F>(&self, listener: F) -> Listener
	where
		F: Fn(&RouterContext) + 'static,
	{
		self.register(EventKind::Loaded, Receiver::Notify(Rc::new(listener)))
	}

	/// Registers a listener for completed unload handlers.
	pub fn on_unloaded<F>(&self, listener: F) -> Listener
	where
		F: Fn(&RouterContext) + 'static,
	{
		self.register(EventKind::Unloaded, Receiver::Notify(Rc::new(listener)))
	}

	fn register(&self, kind: EventKind, receiver: Receiver) -> Listener {
		let state = Rc::new(ListenerState::default());
		self.registrations.borrow_mut().push(Registration {
			kind,
			receiver,
			state: Rc::clone(&state),
		});
		Listener {
			state,
			registry: Rc::downgrade(&self.registrations),
		}
	}

	/// Removes every listener of `kind`, returning how many were removed.
	pub fn off(&self, kind: EventKind) -> usize {
		let mut registrations = self.registrations.borrow_mut();
		let before = registrations.len();
		registrations.retain(|r| {
			let keep = r.kind != kind;
			if !keep {
				r.state.disposed.set(true);
			}
			keep
		});
		before - registrations.len()
	}

	/// Returns the number of registered (possibly paused) listeners of `kind`.
	pub fn listener_count(&self, kind: EventKind) -> usize {
		self.registrations
			.borrow()
			.iter()
			.filter(|r| r.kind == kind)
			.count()
	}

	/// Fires the cancelable navigate event.
	///
	/// Every active listener runs; returns `false` if any of them cancelled.
	pub fn trigger_navigate(&self, cxt: &RouterContext) -> bool {
		let mut proceed = true;
		for (state, receiver) in self.snapshot(EventKind::Navigate) {
			if !state.is_active() {
				continue;
			}
			if let Receiver::Navigate(listener) = receiver {
				proceed &= listener(cxt);
			}
		}
		proceed
	}

	/// Fires a notification event to every active listener of `kind`.
	///
	/// Navigate listeners fired this way cannot cancel anything.
	pub fn trigger(&self, kind: EventKind, cxt: &RouterContext) {
		for (state, receiver) in self.snapshot(kind) {
			if !state.is_active() {
				continue;
			}
			match receiver {
				Receiver::Navigate(listener) => {
					listener(cxt);
				}
				Receiver::Notify(listener) => listener(cxt),
			}
		}
	}

	// Listeners may register or dispose others while running, so fire from a
	// copy and re-check each listener's state right before calling it.
	fn snapshot(&self, kind: EventKind) -> Vec<(Rc<ListenerState>, Receiver)> {
		self.registrations
			.borrow()
			.iter()
			.filter(|r| r.kind == kind)
			.map(|r| (Rc::clone(&r.state), r.receiver.clone()))
			.collect()
	}
}

/// Handle to one registered listener.
#[derive(Debug)]
pub struct Listener {
	state: Rc<ListenerState>,
	registry: Weak<Registry>,
}

impl Listener {
	/// Stops delivering events until [`resume`](Self::resume) is called.
	pub fn pause(&self) {
		self.state.paused.set(true);
	}

	/// Resumes delivery after [`pause`](Self::pause).
	pub fn resume(&self) {
		self.state.paused.set(false);
	}

	/// Returns true while paused.
	pub fn is_paused(&self) -> bool {
		self.state.paused.get()
	}

	/// Returns true once disposed (directly or through [`RouterEvents::off`]).
	pub fn is_disposed(&self) -> bool {
		self.state.disposed.get()
	}

	/// Unregisters the listener. Further calls are no-ops.
	pub fn dispose(&self) {
		if self.state.disposed.replace(true) {
			return;
		}
		if let Some(registry) = self.registry.upgrade() {
			registry
				.borrow_mut()
				.retain(|r| !Rc::ptr_eq(&r.state, &self.state));
		}
	}
}
