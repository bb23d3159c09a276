//! Redirect navigation primitive.

use crate::component::{Component, ElementView, IntoView, View};

/// A redirect that navigates to another path when rendered.
///
/// Rendered as a refresh `<meta>` element; the host's client-side
/// navigation picks up `data-redirect`. A redirect without a target is a
/// caller misconfiguration and is rendered as-is, without a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
	to: Option<String>,
	replace: bool,
}

impl Redirect {
	/// Creates a new redirect.
	pub fn new(to: impl Into<String>) -> Self {
		Self::from_target(Some(to.into()))
	}

	/// Creates a redirect from a possibly undefined target.
	pub fn from_target(to: Option<String>) -> Self {
		Self { to, replace: true }
	}

	/// Sets whether to use replace navigation.
	pub fn replace(mut self, replace: bool) -> Self {
		self.replace = replace;
		self
	}

	/// Returns the destination path.
	pub fn to(&self) -> Option<&str> {
		self.to.as_deref()
	}

	/// Returns whether this is a replace navigation.
	pub fn is_replace(&self) -> bool {
		self.replace
	}
}

impl Component for Redirect {
	fn render(&self) -> View {
		let replace = if self.replace { "true" } else { "false" };
		match &self.to {
			Some(to) => ElementView::self_closing("meta")
				.attr("http-equiv", "refresh")
				.attr("content", format!("0;url={}", to))
				.attr("data-redirect", to.clone())
				.attr("data-replace", replace)
				.into_view(),
			None => ElementView::self_closing("meta")
				.attr("data-redirect", "")
				.attr("data-replace", replace)
				.into_view(),
		}
	}

	fn name() -> &'static str {
		"Redirect"
	}
}
