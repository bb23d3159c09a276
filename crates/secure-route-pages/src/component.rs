//! Component System for secure-route-pages
//!
//! Minimal view primitives used by the guarded route to describe what it
//! renders. Hosts mount the resulting [`View`] tree however they like; the
//! string renderer exists for server-side rendering and tests.
//!
//! ## Usage
//!
//! ```
//! use secure_route_pages::component::{ElementView, IntoView};
//!
//! let view = ElementView::new("p").child("Welcome").into_view();
//! assert_eq!(view.render_to_string(), "<p>Welcome</p>");
//! ```

mod r#trait;
mod view;

pub use r#trait::Component;
pub use view::{ElementView, IntoView, View};
