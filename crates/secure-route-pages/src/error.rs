//! Error types for guarded routes.

use futures::task::SpawnError;

/// Errors raised while driving a guarded route.
#[derive(Debug, thiserror::Error)]
pub enum GuardedRouteError {
	/// The host executor refused the guard task.
	#[error("Failed to spawn route guard task: {0}")]
	Spawn(#[from] SpawnError),
}
