//! Secure Route Core - guard contract and result normalization
//!
//! This crate holds the UI-independent half of secure-route: the contract a
//! caller implements to decide whether a route may be entered, and the logic
//! that turns any of the three result shapes into a single boolean.
//!
//! ## Modules
//!
//! - [`guard`]: the [`RouteGuard`] contract
//! - [`result`]: the [`GuardResult`] tagged union and its adapter constructors
//! - [`resolve`]: the normalizer driving a result to one boolean
//! - [`error`]: guard failure types and the failure policy
//!
//! ## Example
//!
//! ```
//! use futures::executor::block_on;
//! use secure_route_core::{GuardFailurePolicy, GuardResult, RouteGuard, resolve};
//!
//! let guard = || GuardResult::deferred(async { true });
//! let allowed = block_on(resolve(guard.should_route(), GuardFailurePolicy::Deny));
//! assert_eq!(allowed, Some(true));
//! ```

pub mod error;
pub mod guard;
pub mod resolve;
pub mod result;

pub use error::{GuardError, GuardFailurePolicy};
pub use guard::{RouteGuard, SharedRouteGuard, shared};
pub use resolve::{PendingResolution, Resolution, normalize, resolve};
pub use result::{GuardFuture, GuardResult, GuardResultKind, GuardStream};
