//! Outcome selection.
//!
//! [`select_outcome`] is a pure function of the evaluation state and the
//! failure configuration. Calling it repeatedly on the same inputs always
//! yields the same [`RenderOutcome`].

/// Per-activation guard evaluation record.
///
/// `finished` goes from `false` to `true` at most once per activation, and
/// `outcome` is only meaningful once `finished` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GuardEvaluationState {
	has_guard: bool,
	finished: bool,
	outcome: Option<bool>,
}

impl GuardEvaluationState {
	/// State of a route without a guard. Never finishes.
	pub const fn no_guard() -> Self {
		Self {
			has_guard: false,
			finished: false,
			outcome: None,
		}
	}

	/// State of a guarded route waiting for its guard.
	pub const fn awaiting() -> Self {
		Self {
			has_guard: true,
			finished: false,
			outcome: None,
		}
	}

	/// State of a guarded route whose guard answered.
	pub const fn resolved(allowed: bool) -> Self {
		Self {
			has_guard: true,
			finished: true,
			outcome: Some(allowed),
		}
	}

	/// Initial state for an activation.
	pub const fn initial(has_guard: bool) -> Self {
		if has_guard {
			Self::awaiting()
		} else {
			Self::no_guard()
		}
	}

	/// Returns whether a guard was supplied.
	pub fn has_guard(&self) -> bool {
		self.has_guard
	}

	/// Returns whether the guard answered.
	pub fn is_finished(&self) -> bool {
		self.finished
	}

	/// Returns the guard's answer, `None` until finished.
	pub fn outcome(&self) -> Option<bool> {
		if self.finished { self.outcome } else { None }
	}

	/// Returns the state machine phase.
	pub fn phase(&self) -> GuardPhase {
		match (self.has_guard, self.outcome()) {
			(false, _) => GuardPhase::NoGuard,
			(true, None) => GuardPhase::AwaitingResult,
			(true, Some(allowed)) => GuardPhase::Resolved(allowed),
		}
	}
}

/// Phase of the guarded route state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuardPhase {
	/// No guard supplied; terminal.
	NoGuard,
	/// Guard invoked, answer not yet delivered.
	AwaitingResult,
	/// Guard answered; terminal for this activation.
	Resolved(bool),
}

/// Where a denied route goes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FailureTarget {
	/// Redirect target. `None` is a caller misconfiguration passed through as-is.
	pub redirect_to: Option<String>,
	/// Whether a fallback component is configured. Takes priority over redirect.
	pub has_fallback_component: bool,
}

impl FailureTarget {
	/// Failure target redirecting to `path`.
	pub fn redirect(path: impl Into<String>) -> Self {
		Self {
			redirect_to: Some(path.into()),
			has_fallback_component: false,
		}
	}

	/// Failure target rendering the fallback component.
	pub fn fallback() -> Self {
		Self {
			redirect_to: None,
			has_fallback_component: true,
		}
	}
}

/// What a guarded route renders.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RenderOutcome {
	/// Render the requested route unchanged.
	Passthrough,
	/// Navigate to the given path.
	Redirect(Option<String>),
	/// Render the fallback component in place of the route.
	Fallback,
	/// Render nothing; the guard has not answered yet.
	Pending,
}

/// Maps an evaluation state to the outcome to render.
pub fn select_outcome(state: &GuardEvaluationState, target: &FailureTarget) -> RenderOutcome {
	match state.phase() {
		GuardPhase::NoGuard | GuardPhase::Resolved(true) => RenderOutcome::Passthrough,
		GuardPhase::AwaitingResult => RenderOutcome::Pending,
		GuardPhase::Resolved(false) if target.has_fallback_component => RenderOutcome::Fallback,
		GuardPhase::Resolved(false) => RenderOutcome::Redirect(target.redirect_to.clone()),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use rstest::rstest;

	fn both_configured() -> FailureTarget {
		FailureTarget {
			redirect_to: Some("/login".to_string()),
			has_fallback_component: true,
		}
	}

	#[rstest]
	#[case(GuardEvaluationState::no_guard(), FailureTarget::redirect("/login"), RenderOutcome::Passthrough)]
	#[case(GuardEvaluationState::awaiting(), FailureTarget::redirect("/login"), RenderOutcome::Pending)]
	#[case(GuardEvaluationState::resolved(true), FailureTarget::redirect("/login"), RenderOutcome::Passthrough)]
	#[case(
		GuardEvaluationState::resolved(false),
		FailureTarget::redirect("/login"),
		RenderOutcome::Redirect(Some("/login".to_string()))
	)]
	#[case(GuardEvaluationState::resolved(false), FailureTarget::fallback(), RenderOutcome::Fallback)]
	#[case(GuardEvaluationState::resolved(false), both_configured(), RenderOutcome::Fallback)]
	#[case(
		GuardEvaluationState::resolved(false),
		FailureTarget::default(),
		RenderOutcome::Redirect(None)
	)]
	fn test_outcome_table(
		#[case] state: GuardEvaluationState,
		#[case] target: FailureTarget,
		#[case] expected: RenderOutcome,
	) {
		assert_eq!(select_outcome(&state, &target), expected);
	}

	#[rstest]
	fn test_no_guard_ignores_failure_target() {
		assert_eq!(
			select_outcome(&GuardEvaluationState::no_guard(), &both_configured()),
			RenderOutcome::Passthrough
		);
	}

	#[rstest]
	#[case(GuardEvaluationState::no_guard(), GuardPhase::NoGuard)]
	#[case(GuardEvaluationState::awaiting(), GuardPhase::AwaitingResult)]
	#[case(GuardEvaluationState::resolved(false), GuardPhase::Resolved(false))]
	fn test_phase(#[case] state: GuardEvaluationState, #[case] expected: GuardPhase) {
		assert_eq!(state.phase(), expected);
	}

	#[rstest]
	fn test_outcome_hidden_until_finished() {
		assert_eq!(GuardEvaluationState::awaiting().outcome(), None);
		assert_eq!(GuardEvaluationState::resolved(true).outcome(), Some(true));
	}

	#[rstest]
	#[case(true, GuardEvaluationState::awaiting())]
	#[case(false, GuardEvaluationState::no_guard())]
	fn test_initial_state(#[case] has_guard: bool, #[case] expected: GuardEvaluationState) {
		assert_eq!(GuardEvaluationState::initial(has_guard), expected);
	}

	fn any_state() -> impl Strategy<Value = GuardEvaluationState> {
		prop_oneof![
			Just(GuardEvaluationState::no_guard()),
			Just(GuardEvaluationState::awaiting()),
			any::<bool>().prop_map(GuardEvaluationState::resolved),
		]
	}

	fn any_target() -> impl Strategy<Value = FailureTarget> {
		(proptest::option::of("/[a-z]{0,8}"), any::<bool>()).prop_map(
			|(redirect_to, has_fallback_component)| FailureTarget {
				redirect_to,
				has_fallback_component,
			},
		)
	}

	proptest! {
		#[test]
		fn prop_selection_is_repeatable(state in any_state(), target in any_target()) {
			let first = select_outcome(&state, &target);
			for _ in 0..3 {
				prop_assert_eq!(&select_outcome(&state, &target), &first);
			}
		}

		#[test]
		fn prop_unguarded_always_passes_through(target in any_target()) {
			prop_assert_eq!(
				select_outcome(&GuardEvaluationState::no_guard(), &target),
				RenderOutcome::Passthrough
			);
		}

		#[test]
		fn prop_fallback_beats_redirect(path in "/[a-z]{1,8}") {
			let target = FailureTarget {
				redirect_to: Some(path),
				has_fallback_component: true,
			};
			prop_assert_eq!(
				select_outcome(&GuardEvaluationState::resolved(false), &target),
				RenderOutcome::Fallback
			);
		}
	}
}
