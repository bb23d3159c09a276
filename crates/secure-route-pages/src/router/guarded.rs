//! Guarded route component.
//!
//! A [`GuardedRoute`] evaluates its guard once per activation and renders
//! according to [`select_outcome`]. The host drives the lifecycle:
//!
//! 1. [`GuardedRoute::activate`] when the route becomes active (mount),
//!    spawning the returned [`GuardTask`] on its local executor,
//! 2. [`Component::render`] whenever it renders, and again when the
//!    [`on_update`](GuardedRoute::on_update) callback fires,
//! 3. [`GuardedRoute::deactivate`] (or drop) when the route goes away.
//!
//! Evaluation state lives in a slot shared with the guard task through a
//! weak reference. Each activation gets its own [`ActivationId`]; a
//! resolution is only applied while that activation is still live, so
//! answers arriving after teardown are dropped.

use super::outcome::{FailureTarget, GuardEvaluationState, RenderOutcome, select_outcome};
use super::redirect::Redirect;
use super::route::{Route, RouteComponent};
use crate::component::{Component, View};
use crate::error::GuardedRouteError;
use crate::logging::{DebugEntry, DebugLogger, LogTheme, TracingDebugLogger};
use crate::settings::GuardedRouteSettings;
use futures::future::{AbortHandle, Abortable, FutureExt, LocalBoxFuture};
use futures::task::{LocalSpawn, LocalSpawnExt};
use secure_route_core::{
	GuardFailurePolicy, Resolution, RouteGuard, SharedRouteGuard, normalize,
};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::rc::{Rc, Weak};
use std::task::{Context, Poll, ready};

/// Redirect target used by [`RouteVariant::Secure`] when none is configured.
pub const DEFAULT_FAIL_PATH: &str = "/";

/// Flavor of guarded route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteVariant {
	/// Redirects to the configured path, or renders the fallback component
	/// when one is set. Redirects to [`DEFAULT_FAIL_PATH`] by default.
	#[default]
	Secure,
	/// Redirect only. An unset redirect path stays undefined.
	Enhanced,
}

impl RouteVariant {
	/// Name used in debug output.
	pub fn class_name(self) -> &'static str {
		match self {
			Self::Secure => "SecureRoute",
			Self::Enhanced => "EnhancedRoute",
		}
	}
}

/// Configuration of a [`GuardedRoute`].
#[derive(Clone)]
pub struct GuardedRouteProps {
	route: Route,
	route_guard: Option<SharedRouteGuard>,
	redirect_to_path_when_fail: Option<String>,
	component_when_fail: Option<RouteComponent>,
	enable_debug: bool,
	variant: RouteVariant,
	failure_policy: GuardFailurePolicy,
	debug_logger: Rc<dyn DebugLogger>,
}

impl fmt::Debug for GuardedRouteProps {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("GuardedRouteProps")
			.field("route", &self.route)
			.field("has_route_guard", &self.route_guard.is_some())
			.field("redirect_to_path_when_fail", &self.redirect_to_path_when_fail)
			.field("has_component_when_fail", &self.component_when_fail.is_some())
			.field("enable_debug", &self.enable_debug)
			.field("variant", &self.variant)
			.field("failure_policy", &self.failure_policy)
			.finish_non_exhaustive()
	}
}

impl GuardedRouteProps {
	/// Creates props wrapping `route`, with no guard.
	pub fn new(route: Route) -> Self {
		Self {
			route,
			route_guard: None,
			redirect_to_path_when_fail: None,
			component_when_fail: None,
			enable_debug: false,
			variant: RouteVariant::default(),
			failure_policy: GuardFailurePolicy::default(),
			debug_logger: Rc::new(TracingDebugLogger),
		}
	}

	/// Sets the guard.
	pub fn route_guard<G: RouteGuard + 'static>(self, guard: G) -> Self {
		self.shared_route_guard(Rc::new(guard))
	}

	/// Sets a guard shared with the caller.
	pub fn shared_route_guard(mut self, guard: SharedRouteGuard) -> Self {
		self.route_guard = Some(guard);
		self
	}

	/// Sets the redirect target for denied routes.
	pub fn redirect_to_path_when_fail(mut self, path: impl Into<String>) -> Self {
		self.redirect_to_path_when_fail = Some(path.into());
		self
	}

	/// Sets the component rendered instead of redirecting ([`RouteVariant::Secure`] only).
	pub fn component_when_fail<F>(mut self, component: F) -> Self
	where
		F: Fn() -> View + 'static,
	{
		self.component_when_fail = Some(Rc::new(component));
		self
	}

	/// Toggles the debug log side-channel.
	pub fn enable_debug(mut self, enable: bool) -> Self {
		self.enable_debug = enable;
		self
	}

	/// Sets the route flavor.
	pub fn variant(mut self, variant: RouteVariant) -> Self {
		self.variant = variant;
		self
	}

	/// Sets how failed guard completions resolve.
	pub fn failure_policy(mut self, policy: GuardFailurePolicy) -> Self {
		self.failure_policy = policy;
		self
	}

	/// Replaces the debug logger.
	pub fn debug_logger<L: DebugLogger + 'static>(mut self, logger: L) -> Self {
		self.debug_logger = Rc::new(logger);
		self
	}

	/// Applies loaded settings. Keys the settings leave unset keep their current value.
	pub fn with_settings(mut self, settings: &GuardedRouteSettings) -> Self {
		if let Some(path) = &settings.redirect_to_path_when_fail {
			self.redirect_to_path_when_fail = Some(path.clone());
		}
		if let Some(enable) = settings.enable_debug {
			self.enable_debug = enable;
		}
		if let Some(variant) = settings.variant {
			self.variant = variant;
		}
		if let Some(policy) = settings.failure_policy {
			self.failure_policy = policy;
		}
		self
	}

	/// Returns the wrapped route.
	pub fn route(&self) -> &Route {
		&self.route
	}

	/// Returns whether a guard is configured.
	pub fn has_route_guard(&self) -> bool {
		self.route_guard.is_some()
	}

	/// Returns the route flavor.
	pub fn route_variant(&self) -> RouteVariant {
		self.variant
	}

	/// Resolves where a denied route goes for the configured variant.
	pub fn failure_target(&self) -> FailureTarget {
		match self.variant {
			RouteVariant::Secure => FailureTarget {
				redirect_to: Some(
					self.redirect_to_path_when_fail
						.clone()
						.unwrap_or_else(|| DEFAULT_FAIL_PATH.to_string()),
				),
				has_fallback_component: self.component_when_fail.is_some(),
			},
			RouteVariant::Enhanced => FailureTarget {
				redirect_to: self.redirect_to_path_when_fail.clone(),
				has_fallback_component: false,
			},
		}
	}
}

/// Identifier of one activation of a guarded route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActivationId(u64);

impl ActivationId {
	/// Returns the raw counter value.
	pub fn get(self) -> u64 {
		self.0
	}
}

impl fmt::Display for ActivationId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

type UpdateCallback = Rc<dyn Fn()>;

#[derive(Debug)]
struct Activation {
	id: ActivationId,
	live: bool,
	state: GuardEvaluationState,
}

impl Activation {
	fn accepts(&self, id: ActivationId) -> bool {
		self.live && self.id == id && self.state.has_guard() && !self.state.is_finished()
	}
}

struct ActivationSlot {
	activation: Activation,
	on_update: Option<UpdateCallback>,
}

/// Applies a guard answer if `id` is still the live activation.
///
/// Returns whether the answer was applied. Answers for dead, replaced or
/// already resolved activations are dropped without touching the slot.
fn apply_resolution(slot: &Weak<RefCell<ActivationSlot>>, id: ActivationId, allowed: bool) -> bool {
	let Some(slot) = slot.upgrade() else {
		tracing::trace!(activation = %id, "guarded route dropped, discarding guard result");
		return false;
	};

	let on_update = {
		let mut slot = slot.borrow_mut();
		if !slot.activation.accepts(id) {
			tracing::trace!(activation = %id, "activation no longer live, discarding guard result");
			return false;
		}
		slot.activation.state = GuardEvaluationState::resolved(allowed);
		slot.on_update.clone()
	};

	tracing::debug!(activation = %id, allowed, "route guard resolved");
	if let Some(on_update) = on_update {
		on_update();
	}
	true
}

/// In-flight guard evaluation of one activation.
///
/// Spawn it on the host's local executor. It completes once the guard
/// answers, or right away after the route is deactivated.
#[must_use = "the guard is only awaited while this task is polled"]
pub struct GuardTask {
	activation: ActivationId,
	inner: Abortable<LocalBoxFuture<'static, ()>>,
}

impl GuardTask {
	/// Returns the activation this task belongs to.
	pub fn activation(&self) -> ActivationId {
		self.activation
	}
}

impl Future for GuardTask {
	type Output = ();

	fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
		let this = self.get_mut();
		if ready!(this.inner.poll_unpin(cx)).is_err() {
			tracing::trace!(activation = %this.activation, "guard task aborted");
		}
		Poll::Ready(())
	}
}

impl fmt::Debug for GuardTask {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("GuardTask")
			.field("activation", &self.activation)
			.field("aborted", &self.inner.is_aborted())
			.finish()
	}
}

/// A route that consults a guard before rendering.
///
/// # Example
///
/// ```
/// use futures::executor::LocalPool;
/// use secure_route_core::GuardResult;
/// use secure_route_pages::component::{Component, View};
/// use secure_route_pages::router::{GuardedRoute, GuardedRouteProps, Route};
///
/// let mut pool = LocalPool::new();
/// let mut route = GuardedRoute::new(
///     GuardedRouteProps::new(Route::new("/admin/", || View::text("Admin")))
///         .route_guard(|| GuardResult::deferred(async { false }))
///         .redirect_to_path_when_fail("/login/"),
/// );
///
/// route.activate_on(&pool.spawner()).unwrap();
/// assert!(route.render().is_empty());
///
/// pool.run_until_stalled();
/// assert!(route.render().render_to_string().contains("url=/login/"));
/// ```
pub struct GuardedRoute {
	props: GuardedRouteProps,
	slot: Rc<RefCell<ActivationSlot>>,
	activations: u64,
	abort: Option<AbortHandle>,
}

impl fmt::Debug for GuardedRoute {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let slot = self.slot.borrow();
		f.debug_struct("GuardedRoute")
			.field("props", &self.props)
			.field("activation", &slot.activation)
			.finish_non_exhaustive()
	}
}

impl GuardedRoute {
	/// Creates an inactive guarded route.
	pub fn new(props: GuardedRouteProps) -> Self {
		let has_guard = props.has_route_guard();
		Self {
			props,
			slot: Rc::new(RefCell::new(ActivationSlot {
				activation: Activation {
					id: ActivationId(0),
					live: false,
					state: GuardEvaluationState::initial(has_guard),
				},
				on_update: None,
			})),
			activations: 0,
			abort: None,
		}
	}

	/// Creates a [`RouteVariant::Secure`] route.
	pub fn secure(props: GuardedRouteProps) -> Self {
		Self::new(props.variant(RouteVariant::Secure))
	}

	/// Creates a [`RouteVariant::Enhanced`] route.
	pub fn enhanced(props: GuardedRouteProps) -> Self {
		Self::new(props.variant(RouteVariant::Enhanced))
	}

	/// Registers the re-render request fired when an asynchronous answer is applied.
	pub fn on_update<F: Fn() + 'static>(&self, callback: F) {
		self.slot.borrow_mut().on_update = Some(Rc::new(callback));
	}

	/// Starts an activation and evaluates the guard.
	///
	/// Immediate answers are applied before this returns. Deferred and
	/// stream answers come back as a [`GuardTask`] for the host to spawn.
	/// Returns `None` without evaluating anything when the route has no
	/// guard or is already active.
	pub fn activate(&mut self) -> Option<GuardTask> {
		if self.is_active() {
			tracing::debug!(activation = %self.activation_id(), "guarded route already active");
			return None;
		}

		self.activations += 1;
		let id = ActivationId(self.activations);
		let has_guard = self.props.has_route_guard();
		self.slot.borrow_mut().activation = Activation {
			id,
			live: true,
			state: GuardEvaluationState::initial(has_guard),
		};

		let guard = self.props.route_guard.clone()?;
		let result = guard.should_route();
		tracing::debug!(activation = %id, kind = %result.kind(), "evaluating route guard");

		match normalize(result, self.props.failure_policy) {
			Resolution::Ready(allowed) => {
				let mut slot = self.slot.borrow_mut();
				slot.activation.state = GuardEvaluationState::resolved(allowed);
				None
			}
			Resolution::Pending(pending) => {
				let slot = Rc::downgrade(&self.slot);
				let (handle, registration) = AbortHandle::new_pair();
				self.abort = Some(handle);
				let work = async move {
					if let Some(allowed) = pending.await {
						apply_resolution(&slot, id, allowed);
					}
				}
				.boxed_local();
				Some(GuardTask {
					activation: id,
					inner: Abortable::new(work, registration),
				})
			}
		}
	}

	/// Activates and spawns the guard task on `spawner`.
	pub fn activate_on<S>(&mut self, spawner: &S) -> Result<(), GuardedRouteError>
	where
		S: LocalSpawn + ?Sized,
	{
		if let Some(task) = self.activate() {
			spawner.spawn_local(task)?;
		}
		Ok(())
	}

	/// Ends the current activation. Pending answers are discarded.
	pub fn deactivate(&mut self) {
		if let Some(handle) = self.abort.take() {
			handle.abort();
		}
		let mut slot = self.slot.borrow_mut();
		if slot.activation.live {
			slot.activation.live = false;
			tracing::debug!(activation = %slot.activation.id, "guarded route deactivated");
		}
	}

	/// Returns whether an activation is live.
	pub fn is_active(&self) -> bool {
		self.slot.borrow().activation.live
	}

	/// Returns the id of the current (or last) activation.
	pub fn activation_id(&self) -> ActivationId {
		self.slot.borrow().activation.id
	}

	/// Returns a snapshot of the evaluation state.
	pub fn state(&self) -> GuardEvaluationState {
		self.slot.borrow().activation.state
	}

	/// Returns the configuration.
	pub fn props(&self) -> &GuardedRouteProps {
		&self.props
	}

	/// Computes what the route renders right now.
	pub fn outcome(&self) -> RenderOutcome {
		select_outcome(&self.state(), &self.props.failure_target())
	}

	fn debug(&self, message: &str, theme: LogTheme) {
		if self.props.enable_debug {
			self.props.debug_logger.log(&DebugEntry::new(
				self.props.variant.class_name(),
				"render",
				message,
				theme,
			));
		}
	}

	fn log_outcome(&self, outcome: &RenderOutcome) {
		if !self.props.enable_debug {
			return;
		}
		match outcome {
			RenderOutcome::Passthrough if !self.props.has_route_guard() => self.debug(
				"no route guard to run, render normal <Route> directly.",
				LogTheme::Testing,
			),
			RenderOutcome::Passthrough => {
				self.debug("route guard passed, render <Route>.", LogTheme::Testing)
			}
			RenderOutcome::Redirect(to) => self.debug(
				&format!(
					"route guard fail, render <Redirect to={} />",
					to.as_deref().unwrap_or("undefined")
				),
				LogTheme::Error,
			),
			RenderOutcome::Fallback => self.debug(
				"route guard fail, render <Route> with component when fail.",
				LogTheme::Error,
			),
			RenderOutcome::Pending => {}
		}
	}
}

impl Component for GuardedRoute {
	fn render(&self) -> View {
		let outcome = self.outcome();
		self.log_outcome(&outcome);

		match outcome {
			RenderOutcome::Passthrough => self.props.route.render(),
			RenderOutcome::Redirect(to) => Redirect::from_target(to).render(),
			RenderOutcome::Fallback => match &self.props.component_when_fail {
				Some(component) => self.props.route.with_component(Rc::clone(component)).render(),
				None => View::Empty,
			},
			RenderOutcome::Pending => View::Empty,
		}
	}

	fn name() -> &'static str {
		"GuardedRoute"
	}
}

impl Drop for GuardedRoute {
	fn drop(&mut self) {
		self.deactivate();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use futures::executor::LocalPool;
	use rstest::{fixture, rstest};
	use secure_route_core::GuardResult;
	use std::cell::Cell;

	fn admin_view() -> View {
		View::text("Admin")
	}

	fn never_settles() -> GuardResult {
		GuardResult::first_of(futures::stream::pending())
	}

	#[fixture]
	fn admin_props() -> GuardedRouteProps {
		GuardedRouteProps::new(Route::new("/admin/", admin_view))
	}

	#[rstest]
	fn test_secure_failure_target_defaults_to_root(admin_props: GuardedRouteProps) {
		assert_eq!(
			admin_props.failure_target(),
			FailureTarget::redirect(DEFAULT_FAIL_PATH)
		);
	}

	#[rstest]
	fn test_enhanced_failure_target_keeps_undefined_path(admin_props: GuardedRouteProps) {
		let props = admin_props
			.variant(RouteVariant::Enhanced)
			.component_when_fail(|| View::text("ignored"));
		assert_eq!(props.failure_target(), FailureTarget::default());
	}

	#[rstest]
	fn test_secure_failure_target_with_fallback(admin_props: GuardedRouteProps) {
		let props = admin_props
			.redirect_to_path_when_fail("/login/")
			.component_when_fail(|| View::text("Forbidden"));
		assert_eq!(
			props.failure_target(),
			FailureTarget {
				redirect_to: Some("/login/".to_string()),
				has_fallback_component: true,
			}
		);
	}

	#[rstest]
	fn test_fallback_component_may_hold_local_state(admin_props: GuardedRouteProps) {
		let renders = Rc::new(Cell::new(0));
		let counter = Rc::clone(&renders);
		let mut route = GuardedRoute::new(admin_props.route_guard(|| false).component_when_fail(
			move || {
				counter.set(counter.get() + 1);
				View::text("Forbidden")
			},
		));
		let _ = route.activate();

		assert_eq!(route.render(), View::text("Forbidden"));
		assert_eq!(route.render(), View::text("Forbidden"));
		assert_eq!(renders.get(), 2);
	}

	#[rstest]
	fn test_late_resolution_after_deactivate_is_discarded(admin_props: GuardedRouteProps) {
		let mut route = GuardedRoute::new(admin_props.route_guard(never_settles));
		let _task = route.activate();
		let id = route.activation_id();
		let weak = Rc::downgrade(&route.slot);

		route.deactivate();

		assert!(!apply_resolution(&weak, id, true));
		assert_eq!(route.state(), GuardEvaluationState::awaiting());
	}

	#[rstest]
	fn test_resolution_for_replaced_activation_is_discarded(admin_props: GuardedRouteProps) {
		let calls = Rc::new(Cell::new(0));
		let mut route = GuardedRoute::new(admin_props.route_guard({
			let calls = Rc::clone(&calls);
			move || {
				calls.set(calls.get() + 1);
				never_settles()
			}
		}));
		let weak = Rc::downgrade(&route.slot);

		let _first = route.activate();
		let stale = route.activation_id();
		route.deactivate();
		let _second = route.activate();

		assert_eq!(calls.get(), 2);
		assert_ne!(route.activation_id(), stale);
		assert!(!apply_resolution(&weak, stale, false));
		assert_eq!(route.outcome(), RenderOutcome::Pending);
	}

	#[rstest]
	fn test_resolution_after_drop_is_discarded(admin_props: GuardedRouteProps) {
		let route = GuardedRoute::new(admin_props.route_guard(|| true));
		let weak = Rc::downgrade(&route.slot);
		drop(route);

		assert!(!apply_resolution(&weak, ActivationId(1), true));
	}

	#[rstest]
	fn test_second_resolution_is_ignored(admin_props: GuardedRouteProps) {
		let mut route = GuardedRoute::new(admin_props.route_guard(never_settles));
		let _task = route.activate();
		let id = route.activation_id();
		let weak = Rc::downgrade(&route.slot);

		assert!(apply_resolution(&weak, id, false));
		assert!(!apply_resolution(&weak, id, true));
		assert_eq!(route.state(), GuardEvaluationState::resolved(false));
	}

	#[rstest]
	fn test_update_callback_fires_once_per_resolution(admin_props: GuardedRouteProps) {
		let mut pool = LocalPool::new();
		let renders = Rc::new(Cell::new(0));
		let mut route =
			GuardedRoute::new(admin_props.route_guard(|| GuardResult::deferred(async { true })));
		route.on_update({
			let renders = Rc::clone(&renders);
			move || renders.set(renders.get() + 1)
		});

		route.activate_on(&pool.spawner()).unwrap();
		pool.run_until_stalled();

		assert_eq!(renders.get(), 1);
		assert_eq!(route.outcome(), RenderOutcome::Passthrough);
	}

	#[rstest]
	fn test_activation_ids_increase(admin_props: GuardedRouteProps) {
		let mut route = GuardedRoute::new(admin_props.route_guard(|| true));
		assert!(route.activate().is_none());
		let first = route.activation_id();
		route.deactivate();
		assert!(route.activate().is_none());
		assert!(route.activation_id() > first);
		assert_eq!(first.get(), 1);
	}

	#[rstest]
	fn test_variant_class_names() {
		assert_eq!(RouteVariant::Secure.class_name(), "SecureRoute");
		assert_eq!(RouteVariant::Enhanced.class_name(), "EnhancedRoute");
	}
}
