//! Serialized load/unload execution.
//!
//! Every handler invocation goes through a single FIFO [`ActionQueue`]. At most
//! one handler runs at a time: a handler that returns
//! [`Completion::Pending`] holds the queue until its future settles, and
//! navigations issued meanwhile wait their turn instead of being dropped.
//!
//! ```text
//! execute(unload /a) ─┐
//! execute(load /b)  ──┼─▶ [unload /a] ─▶ [load /b] ─▶ [load /c] ─▶ idle
//! execute(load /c)  ──┘        ▲ each action starts after the previous settles
//! ```

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use futures::future::LocalBoxFuture;
use futures::task::{LocalSpawn, LocalSpawnExt};

use crate::context::RouterContext;
use crate::events::{EventKind, RouterEvents};
use crate::handler::{Completion, HandlerFn};
use crate::{debug_log, error_log};

/// Executor used to drive pending handler futures.
pub type Spawner = Rc<dyn LocalSpawn>;

/// Which side of a transition an action runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
	/// Entering a route.
	Load,
	/// Leaving a route.
	Unload,
}

impl ActionKind {
	/// The event fired when an action of this kind completes.
	pub fn completion_event(&self) -> EventKind {
		match self {
			Self::Load => EventKind::Loaded,
			Self::Unload => EventKind::Unloaded,
		}
	}
}

/// One queued handler invocation.
pub struct RouteAction {
	/// Load or unload.
	pub kind: ActionKind,
	/// The handler to call.
	pub handler: HandlerFn,
	/// The context passed to the handler.
	pub context: RouterContext,
}

impl RouteAction {
	/// Creates a load action.
	pub fn load(handler: HandlerFn, context: RouterContext) -> Self {
		Self {
			kind: ActionKind::Load,
			handler,
			context,
		}
	}

	/// Creates an unload action.
	pub fn unload(handler: HandlerFn, context: RouterContext) -> Self {
		Self {
			kind: ActionKind::Unload,
			handler,
			context,
		}
	}
}

impl std::fmt::Debug for RouteAction {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RouteAction")
			.field("kind", &self.kind)
			.field("url", &self.context.url)
			.finish()
	}
}

#[derive(Default)]
struct QueueState {
	pending: VecDeque<RouteAction>,
	executing: bool,
}

struct QueueInner {
	state: RefCell<QueueState>,
	events: RouterEvents,
	spawner: Option<Spawner>,
}

/// Single-flight FIFO queue of route actions.
///
/// Cloning yields another handle to the same queue.
#[derive(Clone)]
pub struct ActionQueue {
	inner: Rc<QueueInner>,
}

impl std::fmt::Debug for ActionQueue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let state = self.inner.state.borrow();
		f.debug_struct("ActionQueue")
			.field("pending", &state.pending.len())
			.field("executing", &state.executing)
			.finish()
	}
}

impl ActionQueue {
	/// Creates an idle queue.
	///
	/// Pending futures are handed to `spawner`. Without one, WASM builds use
	/// `wasm_bindgen_futures::spawn_local` and native builds drive each future
	/// to completion inline.
	pub fn new(events: RouterEvents, spawner: Option<Spawner>) -> Self {
		Self {
			inner: Rc::new(QueueInner {
				state: RefCell::new(QueueState::default()),
				events,
				spawner,
			}),
		}
	}

	/// Appends an action, draining immediately if the queue is idle.
	pub fn execute(&self, action: RouteAction) {
		let start = {
			let mut state = self.inner.state.borrow_mut();
			state.pending.push_back(action);
			!state.executing
		};

		if start {
			self.fire_next();
		}
	}

	/// Returns the number of actions waiting to start.
	pub fn len(&self) -> usize {
		self.inner.state.borrow().pending.len()
	}

	/// Returns true if no action is waiting.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Returns true if no handler is running and nothing is waiting.
	pub fn is_idle(&self) -> bool {
		let state = self.inner.state.borrow();
		!state.executing && state.pending.is_empty()
	}

	// A synchronous action is announced only after everything queued behind it
	// has run, so notifications for a synchronous chain arrive innermost first.
	// A pending action is announced as soon as its future settles, before the
	// queue moves on.
	fn fire_next(&self) {
		let mut settled = Vec::new();

		loop {
			let action = {
				let mut state = self.inner.state.borrow_mut();
				match state.pending.pop_front() {
					Some(action) => {
						state.executing = true;
						action
					}
					None => {
						state.executing = false;
						break;
					}
				}
			};

			debug_log!("running {:?} for {}", action.kind, action.context.url);

			// No borrow is held here: handlers may enqueue more actions.
			match (action.handler)(&action.context) {
				Completion::Ready => settled.push(action),
				Completion::Pending(future) => {
					if !self.await_pending(action, future) {
						break;
					}
				}
			}
		}

		for action in settled.iter().rev() {
			self.complete(action);
		}
	}

	/// Hands a pending action to the executor.
	///
	/// Returns true when draining should continue in the caller: the future
	/// already settled inline (native builds with no spawner), or it could not
	/// be spawned at all. A future that fails to spawn is dropped and its
	/// action never announces completion.
	fn await_pending(&self, action: RouteAction, future: LocalBoxFuture<'static, ()>) -> bool {
		let Some(spawner) = self.inner.spawner.clone() else {
			return self.run_default(action, future);
		};

		let queue = self.clone();
		let task = async move {
			future.await;
			queue.complete(&action);
			queue.fire_next();
		};

		match spawner.spawn_local(task) {
			Ok(()) => false,
			Err(err) => {
				error_log!("failed to spawn pending route action: {}", err);
				true
			}
		}
	}

	#[cfg(target_arch = "wasm32")]
	fn run_default(&self, action: RouteAction, future: LocalBoxFuture<'static, ()>) -> bool {
		let queue = self.clone();
		wasm_bindgen_futures::spawn_local(async move {
			future.await;
			queue.complete(&action);
			queue.fire_next();
		});
		false
	}

	// Runs the future on the calling thread. A nested executor would panic, so
	// draining resumes in the caller's loop rather than from inside the future.
	#[cfg(not(target_arch = "wasm32"))]
	fn run_default(&self, action: RouteAction, future: LocalBoxFuture<'static, ()>) -> bool {
		futures::executor::block_on(future);
		self.complete(&action);
		true
	}

	fn complete(&self, action: &RouteAction) {
		self.inner
			.events
			.trigger(action.kind.completion_event(), &action.context);
	}
}
