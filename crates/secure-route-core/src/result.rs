//! Guard result shapes.
//!
//! The shape of a guard's answer is fixed when the result is built, through
//! one of the adapter constructors on [`GuardResult`]. Consumers match on the
//! variant; nothing inspects runtime types.

use crate::error::GuardError;
use futures::channel::oneshot;
use futures::future::{FutureExt, LocalBoxFuture, TryFutureExt};
use futures::stream::{LocalBoxStream, Stream, StreamExt};
use std::fmt;
use std::future::Future;

/// Boxed one-shot guard completion.
pub type GuardFuture = LocalBoxFuture<'static, Result<bool, GuardError>>;

/// Boxed push stream of guard decisions. Only the first item is consulted.
pub type GuardStream = LocalBoxStream<'static, bool>;

/// The answer of a [`RouteGuard`](crate::RouteGuard).
pub enum GuardResult {
	/// Decision available right away.
	Immediate(bool),
	/// Decision delivered once by a deferred completion.
	Deferred(GuardFuture),
	/// Decision taken from the first emission of a stream.
	Stream(GuardStream),
}

impl GuardResult {
	/// Creates an immediate result.
	pub fn now(allowed: bool) -> Self {
		Self::Immediate(allowed)
	}

	/// Creates a deferred result from an infallible future.
	pub fn deferred<F>(future: F) -> Self
	where
		F: Future<Output = bool> + 'static,
	{
		Self::Deferred(future.map(Ok).boxed_local())
	}

	/// Creates a deferred result from a future that may fail.
	pub fn fallible<F>(future: F) -> Self
	where
		F: Future<Output = Result<bool, GuardError>> + 'static,
	{
		Self::Deferred(future.boxed_local())
	}

	/// Creates a deferred result settled through a oneshot channel.
	///
	/// Dropping the sender without sending settles with [`GuardError::Canceled`].
	pub fn from_receiver(receiver: oneshot::Receiver<bool>) -> Self {
		Self::fallible(receiver.map_err(GuardError::from))
	}

	/// Creates a result from the first emission of a stream.
	pub fn first_of<S>(stream: S) -> Self
	where
		S: Stream<Item = bool> + 'static,
	{
		Self::Stream(stream.boxed_local())
	}

	/// Returns the capability tag of this result.
	pub fn kind(&self) -> GuardResultKind {
		match self {
			Self::Immediate(_) => GuardResultKind::Immediate,
			Self::Deferred(_) => GuardResultKind::Deferred,
			Self::Stream(_) => GuardResultKind::Stream,
		}
	}
}

impl From<bool> for GuardResult {
	fn from(allowed: bool) -> Self {
		Self::Immediate(allowed)
	}
}

impl fmt::Debug for GuardResult {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Immediate(allowed) => f.debug_tuple("Immediate").field(allowed).finish(),
			Self::Deferred(_) => f.write_str("Deferred(..)"),
			Self::Stream(_) => f.write_str("Stream(..)"),
		}
	}
}

/// Capability tag of a [`GuardResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuardResultKind {
	/// Synchronous boolean.
	Immediate,
	/// One-shot deferred completion.
	Deferred,
	/// First emission of a stream.
	Stream,
}

impl fmt::Display for GuardResultKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Immediate => write!(f, "immediate"),
			Self::Deferred => write!(f, "deferred"),
			Self::Stream => write!(f, "stream"),
		}
	}
}
