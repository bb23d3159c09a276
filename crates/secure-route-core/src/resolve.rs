//! Result normalization.
//!
//! [`normalize`] turns any [`GuardResult`] into exactly one boolean:
//! immediately for [`GuardResult::Immediate`], or through a
//! [`PendingResolution`] future for the asynchronous shapes. Streams are
//! consulted for their first emission only and dropped afterwards.
//!
//! There is no retry, timeout or cancellation here. A guard source that
//! never settles keeps the pending future pending forever; dropping the
//! future is the only way out.

use crate::error::GuardFailurePolicy;
use crate::result::{GuardResult, GuardResultKind};
use futures::future::{FutureExt, LocalBoxFuture};
use futures::stream::StreamExt;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Outcome of normalizing a guard result.
#[derive(Debug)]
pub enum Resolution {
	/// Resolved synchronously.
	Ready(bool),
	/// Resolves when the guard source settles.
	Pending(PendingResolution),
}

impl Resolution {
	/// Returns the decision if it was available synchronously.
	pub fn ready(&self) -> Option<bool> {
		match self {
			Self::Ready(allowed) => Some(*allowed),
			Self::Pending(_) => None,
		}
	}
}

/// A guard decision still in flight.
///
/// Completes with `Some(decision)`, or with `None` when the source finished
/// without ever producing a usable decision (empty stream, failure under
/// [`GuardFailurePolicy::Stall`]). `None` means no resolution will arrive.
#[must_use = "a pending resolution does nothing unless polled"]
pub struct PendingResolution {
	kind: GuardResultKind,
	inner: LocalBoxFuture<'static, Option<bool>>,
}

impl PendingResolution {
	/// Returns the shape of the guard result being awaited.
	pub fn kind(&self) -> GuardResultKind {
		self.kind
	}
}

impl Future for PendingResolution {
	type Output = Option<bool>;

	fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
		self.get_mut().inner.poll_unpin(cx)
	}
}

impl fmt::Debug for PendingResolution {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("PendingResolution")
			.field("kind", &self.kind)
			.finish_non_exhaustive()
	}
}

/// Drives a guard result toward a single boolean.
pub fn normalize(result: GuardResult, policy: GuardFailurePolicy) -> Resolution {
	match result {
		GuardResult::Immediate(allowed) => Resolution::Ready(allowed),
		GuardResult::Deferred(future) => Resolution::Pending(PendingResolution {
			kind: GuardResultKind::Deferred,
			inner: async move {
				match future.await {
					Ok(allowed) => Some(allowed),
					Err(error) => policy.on_failure(&error),
				}
			}
			.boxed_local(),
		}),
		GuardResult::Stream(mut stream) => Resolution::Pending(PendingResolution {
			kind: GuardResultKind::Stream,
			inner: async move {
				let first = stream.next().await;
				// Unsubscribe: later emissions are never observed.
				drop(stream);
				if first.is_none() {
					tracing::debug!("route guard stream ended without emitting");
				}
				first
			}
			.boxed_local(),
		}),
	}
}

/// Normalizes and awaits a guard result.
pub async fn resolve(result: GuardResult, policy: GuardFailurePolicy) -> Option<bool> {
	match normalize(result, policy) {
		Resolution::Ready(allowed) => Some(allowed),
		Resolution::Pending(pending) => pending.await,
	}
}
