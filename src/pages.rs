//! Guarded route component
//!
//! This module provides access to secure-route-pages: the guarded route
//! component, the passthrough `Route` and `Redirect` primitives, the
//! outcome selector, the debug log side-channel and TOML settings.
//!
//! ## Architecture
//!
//! - **Component System**: `View` trees rendered by components
//! - **Guarded Route**: once-per-activation guard evaluation with teardown-safe updates
//! - **Outcome Selection**: passthrough, redirect, fallback or pending
//! - **Settings**: route configuration loaded from TOML

// Re-export all secure-route-pages functionality
pub use secure_route_pages::*;
