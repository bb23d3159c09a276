//! Guarded client-side routing.
//!
//! This module wraps a host [`Route`] in a [`GuardedRoute`] that asks a
//! [`RouteGuard`](secure_route_core::RouteGuard) whether the route may be
//! entered and renders the route, a [`Redirect`], or a fallback component
//! depending on the answer.
//!
//! Path matching and history management stay with the host router; the
//! guarded route only decides what to render once the host activates it.

mod guarded;
mod outcome;
mod redirect;
mod route;

pub use guarded::{
	ActivationId, DEFAULT_FAIL_PATH, GuardTask, GuardedRoute, GuardedRouteProps, RouteVariant,
};
pub use outcome::{FailureTarget, GuardEvaluationState, GuardPhase, RenderOutcome, select_outcome};
pub use redirect::Redirect;
pub use route::{Route, RouteComponent};
