//! # reinhardt-navigator
//!
//! History API navigation for Reinhardt single-page applications.
//!
//! The navigator maps URLs to route handlers and keeps the address bar, the
//! browser history stack and the running page in sync:
//!
//! - **Patterns**: `/users/{id}` style routes, matched in registration order
//! - **Serialized handlers**: load/unload handlers run one at a time, and a
//!   handler returning a future holds later navigations until it settles
//! - **Link interception**: in-app `<a>` clicks become `pushState` navigations
//! - **Back/forward**: `popstate` entries written by the router are replayed
//! - **Events**: cancelable `navigate`, plus `route:loaded` / `route:unloaded`
//!
//! ## Example
//!
//! ```ignore
//! use reinhardt_navigator::{Completion, RouteHandler, Router, RouterContext};
//!
//! let router = Router::builder()
//!     .route("/", |_cxt: &RouterContext| show_home())
//!     .route(
//!         "/articles/{slug}",
//!         RouteHandler::load_unload(
//!             |cxt: &RouterContext| {
//!                 let slug = cxt.params.get("slug").unwrap_or_default().to_string();
//!                 Completion::pending(async move { render_article(slug).await })
//!             },
//!             |_cxt: &RouterContext| clear_article(),
//!         ),
//!     )
//!     .build()?;
//!
//! router.events().on_loaded(|cxt| info_log!("now at {}", cxt.url));
//! router.start()?;
//! ```
//!
//! ## Feature Flags
//!
//! - `debug-logs`: enables `debug_log!` dispatch traces in debug builds
//! - `testing`: exports synthetic DOM doubles in [`testing`]

#![warn(missing_docs)]

pub mod context;
pub mod error;
pub mod events;
pub mod handler;
pub mod history;
pub mod link;
pub mod logging;
pub mod params;
pub mod pattern;
pub mod queue;
pub mod route;
pub mod router;

#[cfg(target_arch = "wasm32")]
pub mod browser;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use context::{LinkClick, RouterContext};
pub use error::{PathError, RouterError};
pub use events::{EventKind, Listener, RouterEvents};
pub use handler::{Completion, HandlerFn, PageLifecycle, RouteHandler};
pub use history::{History, HistoryEntry, HistoryState, MemoryHistory};
pub use link::{ClickEvent, DomNode};
pub use params::RouteParams;
pub use pattern::RoutePattern;
pub use queue::{ActionKind, ActionQueue, RouteAction, Spawner};
pub use route::Route;
pub use router::{ContextHook, NavigateOptions, Router, RouterBuilder};

#[cfg(target_arch = "wasm32")]
pub use browser::{BrowserHistory, EventListener};

// Re-exported for the logging macros
#[doc(hidden)]
pub mod __private {
	#[cfg(not(target_arch = "wasm32"))]
	pub use tracing;
	#[cfg(target_arch = "wasm32")]
	pub use web_sys;
}
