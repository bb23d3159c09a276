//! View tree produced by the routing components.

use std::borrow::Cow;
use std::fmt;

/// What a component renders: an element, a text node or nothing at all.
///
/// The guarded route renders `Empty` while its guard is outstanding and
/// when the host supplied no fallback component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
	/// An element node.
	Element(ElementView),
	/// A text node.
	Text(Cow<'static, str>),
	/// Renders nothing.
	Empty,
}

/// An element node with ordered attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementView {
	tag: Cow<'static, str>,
	attrs: Vec<(Cow<'static, str>, Cow<'static, str>)>,
	children: Vec<View>,
	self_closing: bool,
}

impl ElementView {
	/// Creates an element that wraps child views.
	pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
		Self {
			tag: tag.into(),
			attrs: Vec::new(),
			children: Vec::new(),
			self_closing: false,
		}
	}

	/// Creates a childless element such as the `<meta>` a redirect emits.
	pub fn self_closing(tag: impl Into<Cow<'static, str>>) -> Self {
		Self {
			self_closing: true,
			..Self::new(tag)
		}
	}

	/// Adds an attribute. Attributes render in insertion order.
	pub fn attr(
		mut self,
		name: impl Into<Cow<'static, str>>,
		value: impl Into<Cow<'static, str>>,
	) -> Self {
		self.attrs.push((name.into(), value.into()));
		self
	}

	/// Appends a child view. Self-closing elements drop their children.
	pub fn child(mut self, child: impl IntoView) -> Self {
		if !self.self_closing {
			self.children.push(child.into_view());
		}
		self
	}

	pub fn tag_name(&self) -> &str {
		&self.tag
	}

	/// Looks up an attribute value by name.
	pub fn get_attr(&self, name: &str) -> Option<&str> {
		self.attrs
			.iter()
			.find(|(key, _)| key == name)
			.map(|(_, value)| value.as_ref())
	}

	pub fn is_self_closing(&self) -> bool {
		self.self_closing
	}
}

impl View {
	/// Creates a text view.
	pub fn text(content: impl Into<Cow<'static, str>>) -> Self {
		Self::Text(content.into())
	}

	pub fn empty() -> Self {
		Self::Empty
	}

	/// Returns whether this view renders nothing.
	pub fn is_empty(&self) -> bool {
		matches!(self, Self::Empty)
	}

	/// Renders the view as escaped markup, for server rendering and assertions.
	pub fn render_to_string(&self) -> String {
		self.to_string()
	}
}

impl fmt::Display for View {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			View::Element(element) => element.fmt(f),
			View::Text(text) => Escaped(text).fmt(f),
			View::Empty => Ok(()),
		}
	}
}

impl fmt::Display for ElementView {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "<{}", self.tag)?;
		for (name, value) in &self.attrs {
			write!(f, " {}=\"{}\"", name, Escaped(value))?;
		}
		if self.self_closing {
			return f.write_str(" />");
		}
		f.write_str(">")?;
		for child in &self.children {
			child.fmt(f)?;
		}
		write!(f, "</{}>", self.tag)
	}
}

/// Writes text with markup-significant characters replaced by entities.
struct Escaped<'a>(&'a str);

impl fmt::Display for Escaped<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut rest = self.0;
		while let Some(pos) = rest.find(['&', '<', '>', '"', '\'']) {
			f.write_str(&rest[..pos])?;
			let entity = match rest.as_bytes()[pos] {
				b'&' => "&amp;",
				b'<' => "&lt;",
				b'>' => "&gt;",
				b'"' => "&quot;",
				_ => "&#x27;",
			};
			f.write_str(entity)?;
			rest = &rest[pos + 1..];
		}
		f.write_str(rest)
	}
}

/// Types that can be converted into a [`View`].
pub trait IntoView {
	fn into_view(self) -> View;
}

impl IntoView for View {
	fn into_view(self) -> View {
		self
	}
}

impl IntoView for ElementView {
	fn into_view(self) -> View {
		View::Element(self)
	}
}

impl IntoView for &'static str {
	fn into_view(self) -> View {
		View::Text(Cow::Borrowed(self))
	}
}
