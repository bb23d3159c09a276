//! Secure Route Pages - guarded routes for client-side routers
//!
//! Wraps a host route in a component that asks a guard whether the route
//! may be entered, then renders the route, a redirect, or a fallback
//! component. Guards may answer immediately, through a deferred completion,
//! or through the first emission of a stream.
//!
//! ## Architecture
//!
//! - [`component`]: view primitives ([`View`](component::View), [`Component`](component::Component))
//! - [`router`]: [`Route`](router::Route), [`Redirect`](router::Redirect),
//!   the outcome selector and [`GuardedRoute`](router::GuardedRoute)
//! - [`logging`]: the debug log side-channel
//! - [`settings`]: TOML-loadable route configuration
//! - [`error`]: error types
//!
//! ## Lifecycle
//!
//! The host activates the guarded route when it mounts, spawns the returned
//! guard task on its local executor (`wasm_bindgen_futures::spawn_local` in
//! the browser, a `LocalPool` in tests), renders, and re-renders when the
//! update callback fires. Deactivating or dropping the route discards any
//! answer still in flight.
//!
//! ```
//! use futures::executor::LocalPool;
//! use secure_route_pages::prelude::*;
//!
//! let mut pool = LocalPool::new();
//! let mut route = GuardedRoute::secure(
//!     GuardedRouteProps::new(Route::new("/account/", || View::text("Account")))
//!         .route_guard(|| GuardResult::first_of(futures::stream::iter([true, false]))),
//! );
//!
//! route.activate_on(&pool.spawner())?;
//! pool.run_until_stalled();
//! assert_eq!(route.render().render_to_string(), "Account");
//! # Ok::<(), GuardedRouteError>(())
//! ```

pub mod component;
pub mod error;
pub mod logging;
pub mod router;
pub mod settings;

pub use error::GuardedRouteError;
pub use settings::{GuardedRouteSettings, SettingsError};

/// Commonly used types.
pub mod prelude {
	pub use crate::component::{Component, ElementView, IntoView, View};
	pub use crate::error::GuardedRouteError;
	pub use crate::logging::{DebugEntry, DebugLogger, LogTheme, NoopDebugLogger, TracingDebugLogger};
	pub use crate::router::{
		GuardEvaluationState, GuardTask, GuardedRoute, GuardedRouteProps, Redirect, RenderOutcome,
		Route, RouteVariant,
	};
	pub use crate::settings::GuardedRouteSettings;
	pub use secure_route_core::{GuardError, GuardFailurePolicy, GuardResult, RouteGuard};
}
