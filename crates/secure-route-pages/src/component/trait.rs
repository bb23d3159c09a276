//! Component trait definition.

use super::view::View;

/// Trait for reusable UI components.
///
/// # Example
///
/// ```
/// use secure_route_pages::component::{Component, ElementView, IntoView, View};
///
/// struct Greeting {
///     name: String,
/// }
///
/// impl Component for Greeting {
///     fn render(&self) -> View {
///         ElementView::new("div")
///             .attr("class", "greeting")
///             .child(View::text(format!("Hello, {}!", self.name)))
///             .into_view()
///     }
///
///     fn name() -> &'static str {
///         "Greeting"
///     }
/// }
/// ```
pub trait Component: 'static {
	/// Renders the component to a View.
	fn render(&self) -> View;

	/// Returns the component's name for debugging.
	fn name() -> &'static str
	where
		Self: Sized;
}
