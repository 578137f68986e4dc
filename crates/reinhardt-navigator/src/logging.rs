//! Logging macros for the navigator.
//!
//! The macros write to the browser console on WASM and emit `tracing` events
//! on native targets (SSR hosts, tests). All of them are no-ops in release
//! builds.
//!
//! | Macro | Debug Assertions | Feature Required | WASM | Non-WASM |
//! |-------|------------------|------------------|------|----------|
//! | `debug_log!` | Required | `debug-logs` | `console.debug` | `tracing::debug!` |
//! | `info_log!` | Required | None | `console.info` | `tracing::info!` |
//! | `warn_log!` | Required | None | `console.warn` | `tracing::warn!` |
//! | `error_log!` | Required | None | `console.error` | `tracing::error!` |
//!
//! ```ignore
//! use reinhardt_navigator::{debug_log, warn_log};
//!
//! debug_log!("dispatching {}", cxt.url);
//! warn_log!("history push failed: {}", err);
//! ```

/// Logs a dispatch trace (requires `debug-logs` feature + `debug_assertions`).
#[macro_export]
#[cfg(all(debug_assertions, feature = "debug-logs", target_arch = "wasm32"))]
macro_rules! debug_log {
	($($arg:tt)*) => {{
		$crate::__private::web_sys::console::debug_1(&format!($($arg)*).into());
	}};
}

/// Logs a dispatch trace (requires `debug-logs` feature + `debug_assertions`).
#[macro_export]
#[cfg(all(debug_assertions, feature = "debug-logs", not(target_arch = "wasm32")))]
macro_rules! debug_log {
	($($arg:tt)*) => {{
		$crate::__private::tracing::debug!(target: "reinhardt_navigator", $($arg)*);
	}};
}

/// No-op debug_log when conditions are not met
#[macro_export]
#[cfg(not(all(debug_assertions, feature = "debug-logs")))]
macro_rules! debug_log {
	($($arg:tt)*) => {{
		let _ = format_args!($($arg)*);
	}};
}

/// Logs an info message (requires `debug_assertions`).
#[macro_export]
#[cfg(all(debug_assertions, target_arch = "wasm32"))]
macro_rules! info_log {
	($($arg:tt)*) => {{
		$crate::__private::web_sys::console::info_1(&format!($($arg)*).into());
	}};
}

/// Logs an info message (requires `debug_assertions`).
#[macro_export]
#[cfg(all(debug_assertions, not(target_arch = "wasm32")))]
macro_rules! info_log {
	($($arg:tt)*) => {{
		$crate::__private::tracing::info!(target: "reinhardt_navigator", $($arg)*);
	}};
}

/// No-op info_log in release builds
#[macro_export]
#[cfg(not(debug_assertions))]
macro_rules! info_log {
	($($arg:tt)*) => {{
		let _ = format_args!($($arg)*);
	}};
}

/// Logs a warning (requires `debug_assertions`).
///
/// Used for recoverable problems such as a failed `history.pushState`.
#[macro_export]
#[cfg(all(debug_assertions, target_arch = "wasm32"))]
macro_rules! warn_log {
	($($arg:tt)*) => {{
		$crate::__private::web_sys::console::warn_1(&format!($($arg)*).into());
	}};
}

/// Logs a warning (requires `debug_assertions`).
#[macro_export]
#[cfg(all(debug_assertions, not(target_arch = "wasm32")))]
macro_rules! warn_log {
	($($arg:tt)*) => {{
		$crate::__private::tracing::warn!(target: "reinhardt_navigator", $($arg)*);
	}};
}

/// No-op warn_log in release builds
#[macro_export]
#[cfg(not(debug_assertions))]
macro_rules! warn_log {
	($($arg:tt)*) => {{
		let _ = format_args!($($arg)*);
	}};
}

/// Logs an error (requires `debug_assertions`).
#[macro_export]
#[cfg(all(debug_assertions, target_arch = "wasm32"))]
macro_rules! error_log {
	($($arg:tt)*) => {{
		$crate::__private::web_sys::console::error_1(&format!($($arg)*).into());
	}};
}

/// Logs an error (requires `debug_assertions`).
#[macro_export]
#[cfg(all(debug_assertions, not(target_arch = "wasm32")))]
macro_rules! error_log {
	($($arg:tt)*) => {{
		$crate::__private::tracing::error!(target: "reinhardt_navigator", $($arg)*);
	}};
}

/// No-op error_log in release builds
#[macro_export]
#[cfg(not(debug_assertions))]
macro_rules! error_log {
	($($arg:tt)*) => {{
		let _ = format_args!($($arg)*);
	}};
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use crate::{debug_log, error_log, info_log, warn_log};

	#[rstest]
	fn test_logging_macros_accept_format_args() {
		debug_log!("dispatch {} -> {}", "/a", "/b");
		info_log!("router started at {}", "/");
		warn_log!("history push failed: {:?}", Some("denied"));
		error_log!("spawn failed: {}", "executor gone");
	}

	#[rstest]
	fn test_logging_macros_plain_literal() {
		debug_log!("idle");
		info_log!("stopped");
		warn_log!("no state");
		error_log!("stalled");
	}

	// Disabled arms must still count their arguments as used
	#[rstest]
	#[deny(unused_variables)]
	fn test_logging_macros_use_bindings() {
		let url = "/a";
		let err = "denied";
		let kind = 1;
		let reason = String::from("gone");
		debug_log!("dispatch {}", url);
		info_log!("pushed {}", err);
		warn_log!("kind {:?}", kind);
		error_log!("failed: {reason}");
	}
}
