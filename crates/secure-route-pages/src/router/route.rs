//! Passthrough route primitive.

use crate::component::{Component, View};
use std::fmt;
use std::rc::Rc;

/// Factory producing the view of a route.
pub type RouteComponent = Rc<dyn Fn() -> View>;

/// A host route definition, rendered unchanged on the passthrough outcome.
///
/// The matching props (`path`, `exact`, `strict`, `sensitive`) belong to the
/// host router and are carried through untouched.
#[derive(Clone)]
pub struct Route {
	path: Option<String>,
	name: Option<String>,
	exact: bool,
	strict: bool,
	sensitive: bool,
	component: RouteComponent,
}

impl fmt::Debug for Route {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Route")
			.field("path", &self.path)
			.field("name", &self.name)
			.field("exact", &self.exact)
			.field("strict", &self.strict)
			.field("sensitive", &self.sensitive)
			.finish_non_exhaustive()
	}
}

impl Route {
	/// Creates a route for the given path pattern.
	pub fn new<F>(path: impl Into<String>, component: F) -> Self
	where
		F: Fn() -> View + 'static,
	{
		Self::from_parts(Some(path.into()), Rc::new(component))
	}

	/// Creates a pathless route, matched by the host for every location.
	pub fn pathless<F>(component: F) -> Self
	where
		F: Fn() -> View + 'static,
	{
		Self::from_parts(None, Rc::new(component))
	}

	fn from_parts(path: Option<String>, component: RouteComponent) -> Self {
		Self {
			path,
			name: None,
			exact: false,
			strict: false,
			sensitive: false,
			component,
		}
	}

	/// Sets the route name used for reverse lookups by the host.
	pub fn named(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	/// Sets the exact-match flag.
	pub fn exact(mut self, exact: bool) -> Self {
		self.exact = exact;
		self
	}

	/// Sets the trailing-slash strictness flag.
	pub fn strict(mut self, strict: bool) -> Self {
		self.strict = strict;
		self
	}

	/// Sets the case-sensitivity flag.
	pub fn sensitive(mut self, sensitive: bool) -> Self {
		self.sensitive = sensitive;
		self
	}

	/// Returns a copy of this route rendering another component.
	pub fn with_component(&self, component: RouteComponent) -> Self {
		Self {
			component,
			..self.clone()
		}
	}

	/// Returns the path pattern.
	pub fn path(&self) -> Option<&str> {
		self.path.as_deref()
	}

	/// Returns the route name.
	pub fn route_name(&self) -> Option<&str> {
		self.name.as_deref()
	}

	/// Returns the exact-match flag.
	pub fn is_exact(&self) -> bool {
		self.exact
	}

	/// Returns the trailing-slash strictness flag.
	pub fn is_strict(&self) -> bool {
		self.strict
	}

	/// Returns the case-sensitivity flag.
	pub fn is_sensitive(&self) -> bool {
		self.sensitive
	}
}

impl Component for Route {
	fn render(&self) -> View {
		(self.component)()
	}

	fn name() -> &'static str {
		"Route"
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn dashboard_view() -> View {
		View::text("Dashboard")
	}

	#[test]
	fn test_route_props_are_carried() {
		let route = Route::new("/dashboard/", dashboard_view)
			.named("dashboard")
			.exact(true)
			.strict(true);

		assert_eq!(route.path(), Some("/dashboard/"));
		assert_eq!(route.route_name(), Some("dashboard"));
		assert!(route.is_exact());
		assert!(route.is_strict());
		assert!(!route.is_sensitive());
	}

	#[test]
	fn test_route_renders_component() {
		let route = Route::new("/dashboard/", dashboard_view);
		assert_eq!(route.render().render_to_string(), "Dashboard");
	}

	#[test]
	fn test_with_component_keeps_props() {
		let route = Route::new("/admin/", dashboard_view).exact(true);
		let swapped = route.with_component(Rc::new(|| View::text("Forbidden")));

		assert_eq!(swapped.path(), Some("/admin/"));
		assert!(swapped.is_exact());
		assert_eq!(swapped.render().render_to_string(), "Forbidden");
		assert_eq!(route.render().render_to_string(), "Dashboard");
	}

	#[test]
	fn test_pathless_route() {
		let route = Route::pathless(dashboard_view);
		assert!(route.path().is_none());
	}

	#[test]
	fn test_route_component_name() {
		assert_eq!(<Route as Component>::name(), "Route");
	}
}
