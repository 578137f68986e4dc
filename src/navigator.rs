//! Client-side navigation for single-page applications
//!
//! This module provides access to reinhardt-navigator, a History API router
//! that runs route handlers one at a time and keeps the address bar in sync.
//!
//! ## Architecture
//!
//! - **Routes**: `{name}` patterns matched in registration order
//! - **Action Queue**: load/unload handlers run serially; async handlers hold the queue
//! - **Link Interception**: in-app anchor clicks become `pushState` navigations
//! - **History Replay**: back/forward re-dispatches entries the router wrote
//!
//! ## Example
//!
//! ```rust,ignore
//! use reinhardt::navigator::{Completion, RouteHandler, Router, RouterContext};
//!
//! let router = Router::builder()
//!     .route("/", |_cxt: &RouterContext| render_home())
//!     .route(
//!         "/posts/{id}",
//!         RouteHandler::load_unload(
//!             |cxt: &RouterContext| {
//!                 let id = cxt.params.get("id").unwrap_or_default().to_string();
//!                 Completion::pending(async move { render_post(id).await })
//!             },
//!             |_cxt: &RouterContext| clear_post(),
//!         ),
//!     )
//!     .build()?;
//!
//! router.start()?;
//! ```

pub use reinhardt_navigator::*;
