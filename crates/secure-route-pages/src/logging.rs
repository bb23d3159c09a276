//! Debug log side-channel for guarded routes.
//!
//! When a guarded route has debugging enabled it reports its render
//! decisions to a [`DebugLogger`]. Loggers are purely observational: they
//! return nothing, cannot fail, and never influence what gets rendered.
//!
//! ## Loggers
//!
//! | Logger | Output |
//! |--------|--------|
//! | [`TracingDebugLogger`] | `tracing` events under the `secure_route::debug` target |
//! | [`NoopDebugLogger`] | nothing |
//! | any `Fn(&DebugEntry<'_>)` | whatever the closure does |
//!
//! ## Example
//!
//! ```
//! use secure_route_pages::logging::{DebugEntry, DebugLogger, LogTheme};
//!
//! fn print_entry(entry: &DebugEntry<'_>) {
//!     println!("{}", entry);
//! }
//!
//! print_entry.log(&DebugEntry::new("SecureRoute", "render", "route guard passed", LogTheme::Testing));
//! ```

use std::fmt;

/// Display theme of a debug line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LogTheme {
	/// Plain output.
	#[default]
	Normal,
	/// Low-key diagnostic output.
	Testing,
	/// Highlighted output.
	Important,
	/// Failure output.
	Error,
}

impl LogTheme {
	/// Console style associated with the theme.
	pub fn console_style(self) -> &'static str {
		match self {
			Self::Normal => "",
			Self::Testing => "color: darkcyan; font-size: 0.7rem; font-style: italic;",
			Self::Important => {
				"color: green; font-size: 0.7rem; font-style: normal; font-weight: bold"
			}
			Self::Error => "color: red; font-size: 0.7rem; font-style: normal; font-weight: bold",
		}
	}
}

/// One debug line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebugEntry<'a> {
	/// Emitting component.
	pub class_name: &'a str,
	/// Emitting method.
	pub method: &'a str,
	/// Message text.
	pub message: &'a str,
	/// Display theme.
	pub theme: LogTheme,
}

impl<'a> DebugEntry<'a> {
	/// Creates an entry.
	pub fn new(class_name: &'a str, method: &'a str, message: &'a str, theme: LogTheme) -> Self {
		Self {
			class_name,
			method,
			message,
			theme,
		}
	}
}

impl fmt::Display for DebugEntry<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "[{} - {}] {}", self.class_name, self.method, self.message)
	}
}

/// Sink for debug lines.
pub trait DebugLogger {
	/// Records one entry.
	fn log(&self, entry: &DebugEntry<'_>);
}

impl<F> DebugLogger for F
where
	F: Fn(&DebugEntry<'_>),
{
	fn log(&self, entry: &DebugEntry<'_>) {
		self(entry)
	}
}

/// Forwards debug lines to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDebugLogger;

impl DebugLogger for TracingDebugLogger {
	fn log(&self, entry: &DebugEntry<'_>) {
		match entry.theme {
			LogTheme::Normal | LogTheme::Testing => {
				tracing::debug!(target: "secure_route::debug", "{}", entry)
			}
			LogTheme::Important => tracing::info!(target: "secure_route::debug", "{}", entry),
			LogTheme::Error => tracing::warn!(target: "secure_route::debug", "{}", entry),
		}
	}
}

/// Discards debug lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDebugLogger;

impl DebugLogger for NoopDebugLogger {
	fn log(&self, _entry: &DebugEntry<'_>) {}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::cell::RefCell;

	#[rstest]
	fn test_entry_format() {
		let entry = DebugEntry::new("EnhancedRoute", "render", "no route guard", LogTheme::Testing);
		assert_eq!(entry.to_string(), "[EnhancedRoute - render] no route guard");
	}

	#[derive(Default)]
	struct RecordingLogger {
		lines: RefCell<Vec<(String, LogTheme)>>,
	}

	impl DebugLogger for RecordingLogger {
		fn log(&self, entry: &DebugEntry<'_>) {
			self.lines
				.borrow_mut()
				.push((entry.to_string(), entry.theme));
		}
	}

	fn discard(_entry: &DebugEntry<'_>) {}

	#[rstest]
	fn test_custom_logger_receives_entry() {
		let logger = RecordingLogger::default();

		logger.log(&DebugEntry::new("SecureRoute", "render", "denied", LogTheme::Error));

		assert_eq!(
			logger.lines.into_inner(),
			vec![("[SecureRoute - render] denied".to_string(), LogTheme::Error)]
		);
	}

	#[rstest]
	fn test_fn_item_is_a_logger() {
		discard.log(&DebugEntry::new("SecureRoute", "render", "ignored", LogTheme::Normal));
	}

	#[rstest]
	#[case(LogTheme::Normal)]
	#[case(LogTheme::Testing)]
	#[case(LogTheme::Important)]
	#[case(LogTheme::Error)]
	fn test_builtin_loggers_accept_every_theme(#[case] theme: LogTheme) {
		let entry = DebugEntry::new("SecureRoute", "render", "message", theme);
		TracingDebugLogger.log(&entry);
		NoopDebugLogger.log(&entry);
	}

	#[rstest]
	fn test_console_styles() {
		assert_eq!(LogTheme::Normal.console_style(), "");
		assert!(LogTheme::Error.console_style().contains("color: red"));
	}
}
