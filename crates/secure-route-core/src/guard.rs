//! The route guard contract.
//!
//! A guard answers one question, "should this route be entered?", and is
//! asked exactly once per route activation. Guards are owned by the caller
//! and shared with the guarded route through [`SharedRouteGuard`].

use crate::result::GuardResult;
use std::rc::Rc;

/// Anything that can decide whether a route may be entered.
///
/// Closures returning anything convertible into a [`GuardResult`] are guards:
///
/// ```
/// use secure_route_core::{GuardResult, RouteGuard};
///
/// let always = || true;
/// assert!(matches!(always.should_route(), GuardResult::Immediate(true)));
/// ```
pub trait RouteGuard {
	/// Evaluates the guard. Called once per activation, never retried.
	fn should_route(&self) -> GuardResult;
}

impl<F, R> RouteGuard for F
where
	F: Fn() -> R,
	R: Into<GuardResult>,
{
	fn should_route(&self) -> GuardResult {
		self().into()
	}
}

/// A guard shared between the caller and a guarded route.
pub type SharedRouteGuard = Rc<dyn RouteGuard>;

/// Wraps a guard for sharing.
pub fn shared<G: RouteGuard + 'static>(guard: G) -> SharedRouteGuard {
	Rc::new(guard)
}
