//! Guard contract and result normalization.
//!
//! This module provides access to the [`RouteGuard`] contract, the
//! [`GuardResult`] shapes and the normalizer driving them to one boolean.
//!
//! # Examples
//!
//! ```rust
//! use secure_route::core::{GuardFailurePolicy, GuardResult, resolve};
//!
//! let allowed = futures::executor::block_on(resolve(
//!     GuardResult::first_of(futures::stream::iter([true, false])),
//!     GuardFailurePolicy::Deny,
//! ));
//! assert_eq!(allowed, Some(true));
//! ```

pub use secure_route_core::*;
