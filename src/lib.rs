//! # Reinhardt SPA
//!
//! Client-side building blocks for Reinhardt single-page applications.
//!
//! ## Feature Flags
//!
//! - `navigator` (default) - History API router ([`navigator`])
//! - `debug-logs` - Dispatch traces in debug builds
//! - `test-utils` - Synthetic DOM nodes and click events for native tests
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use reinhardt::navigator::{Router, RouterContext};
//!
//! let router = Router::from_routes([
//!     ("/users/{id}", |cxt: &RouterContext| show_user(cxt.params.get("id"))),
//! ])?;
//! router.start()?;
//! ```

#[cfg(feature = "navigator")]
pub mod navigator;

#[cfg(feature = "navigator")]
pub use reinhardt_navigator::{Router, RouterContext};
