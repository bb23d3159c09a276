//! Guard failure types.

use futures::channel::oneshot;
use serde::{Deserialize, Serialize};

/// Error produced by a deferred guard completion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GuardError {
	/// The guard's own check failed (network error, backend rejection, ...).
	#[error("Guard evaluation failed: {0}")]
	Failed(String),
	/// The producing side went away before settling.
	#[error("Guard completion was canceled before settling")]
	Canceled,
}

impl GuardError {
	/// Creates a failure with the given message.
	pub fn failed(message: impl Into<String>) -> Self {
		Self::Failed(message.into())
	}
}

impl From<oneshot::Canceled> for GuardError {
	fn from(_: oneshot::Canceled) -> Self {
		Self::Canceled
	}
}

/// What a failed deferred guard resolves to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardFailurePolicy {
	/// Treat the failure as a denial.
	#[default]
	Deny,
	/// Never resolve; the route stays pending.
	Stall,
}

impl GuardFailurePolicy {
	/// Maps a guard failure to a resolution, `None` meaning no resolution ever arrives.
	pub fn on_failure(self, error: &GuardError) -> Option<bool> {
		match self {
			Self::Deny => {
				tracing::warn!(%error, "route guard failed, treating as denied");
				Some(false)
			}
			Self::Stall => {
				tracing::warn!(%error, "route guard failed, route will stay pending");
				None
			}
		}
	}
}
