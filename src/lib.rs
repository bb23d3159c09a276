//! # Secure Route
//!
//! Guarded routes for client-side routers.
//!
//! A guarded route wraps a host route and asks a caller-supplied guard
//! whether it may be entered. Guards answer with a boolean right away, a
//! deferred completion, or a stream whose first emission decides. The route
//! then renders the requested content, a redirect, or a fallback component.
//!
//! ## Modules
//!
//! - [`core`]: the guard contract and result normalizer
//! - [`pages`]: the guarded route component, view primitives and settings
//!
//! ## Feature Flags
//!
//! - `core`: guard contract only
//! - `pages`: guarded route component (enables `core`)
//! - `full` (default): everything
//!
//! ## Quick Example
//!
//! ```rust
//! # #[cfg(feature = "pages")]
//! # {
//! use futures::executor::LocalPool;
//! use secure_route::prelude::*;
//!
//! let mut pool = LocalPool::new();
//! let mut route = GuardedRoute::secure(
//!     GuardedRouteProps::new(Route::new("/admin/", || View::text("Admin")))
//!         .route_guard(|| GuardResult::deferred(async { false }))
//!         .component_when_fail(|| View::text("Forbidden")),
//! );
//!
//! route.activate_on(&pool.spawner()).unwrap();
//! assert!(route.render().is_empty());
//!
//! pool.run_until_stalled();
//! assert_eq!(route.render().render_to_string(), "Forbidden");
//! # }
//! ```

#[cfg(feature = "core")]
pub mod core;
#[cfg(feature = "pages")]
pub mod pages;

#[cfg(feature = "core")]
pub use secure_route_core::{GuardError, GuardFailurePolicy, GuardResult, RouteGuard};

#[cfg(feature = "pages")]
pub use secure_route_pages::router::{GuardedRoute, GuardedRouteProps, RenderOutcome, Route};

/// Re-exports of the most commonly used items.
pub mod prelude {
	#[cfg(feature = "core")]
	pub use secure_route_core::{
		GuardError, GuardFailurePolicy, GuardResult, GuardResultKind, RouteGuard,
	};

	#[cfg(feature = "pages")]
	pub use secure_route_pages::prelude::*;
}
