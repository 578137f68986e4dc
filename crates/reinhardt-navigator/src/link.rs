//! Anchor click interception.
//!
//! The router listens for clicks at the document root and decides whether a
//! click on (or inside) an `<a>` element is an in-app navigation. The DOM is
//! reached through two small traits so the decision logic runs on any host:
//! `web_sys::Node` / `web_sys::MouseEvent` implement them on WASM, and
//! synthetic doubles implement them in tests.

/// A node in the document tree.
pub trait DomNode: Sized {
	/// Returns the node name (`"A"`, `"SPAN"`, `"#text"`, ...).
	fn node_name(&self) -> String;

	/// Returns the parent node, or `None` at the root.
	fn parent_node(&self) -> Option<Self>;

	/// Returns an attribute value. Non-element nodes have no attributes.
	fn attribute(&self, name: &str) -> Option<String>;
}

/// A click event as seen by the router.
pub trait ClickEvent {
	/// Node type of the event target.
	type Node: DomNode;

	/// The Meta (Command) key was held.
	fn meta_key(&self) -> bool;

	/// The Control key was held.
	fn ctrl_key(&self) -> bool;

	/// The Shift key was held.
	fn shift_key(&self) -> bool;

	/// Another handler already called `preventDefault`.
	fn default_prevented(&self) -> bool;

	/// The node the click landed on.
	fn target(&self) -> Option<Self::Node>;

	/// Suppresses the browser's default navigation.
	fn prevent_default(&self);

	/// Returns true if a modifier key asks the browser to open a new tab or window.
	fn has_modifier(&self) -> bool {
		self.meta_key() || self.ctrl_key() || self.shift_key()
	}
}

/// Returns the nearest `<a>` element at or above `node`.
pub fn find_anchor<N: DomNode>(node: N) -> Option<N> {
	let mut current = Some(node);
	while let Some(node) = current {
		if node.node_name().eq_ignore_ascii_case("A") {
			return Some(node);
		}
		current = node.parent_node();
	}
	None
}

/// Returns true for hrefs the router must leave to the browser.
///
/// Anything carrying a scheme separator or a `mailto:` link points outside the
/// application.
pub fn is_external_href(href: &str) -> bool {
	href.contains("://") || href.contains("mailto:")
}

/// Returns the in-app href of an anchor, or `None` if the anchor should be
/// left to the browser.
pub fn link_href<N: DomNode>(anchor: &N) -> Option<String> {
	anchor
		.attribute("href")
		.filter(|href| !href.is_empty() && !is_external_href(href))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::SyntheticNode;
	use rstest::rstest;

	#[rstest]
	#[case("http://example.com/a", true)]
	#[case("https://example.com", true)]
	#[case("mailto:someone@example.com", true)]
	#[case("/a/5", false)]
	#[case("a/5?x=1", false)]
	#[case("#top", false)]
	fn test_is_external_href(#[case] href: &str, #[case] external: bool) {
		assert_eq!(is_external_href(href), external);
	}

	#[rstest]
	fn test_find_anchor_walks_up() {
		let anchor = SyntheticNode::anchor("/a/5");
		let span = SyntheticNode::element("SPAN").append_to(&anchor);
		let text = SyntheticNode::text().append_to(&span);

		let found = find_anchor(text).unwrap();
		assert_eq!(found.attribute("href").as_deref(), Some("/a/5"));
	}

	#[rstest]
	fn test_find_anchor_none_outside_links() {
		let div = SyntheticNode::element("DIV");
		let button = SyntheticNode::element("BUTTON").append_to(&div);
		assert!(find_anchor(button).is_none());
	}

	#[rstest]
	fn test_find_anchor_lowercase_node_name() {
		let anchor = SyntheticNode::element("a");
		assert!(find_anchor(anchor).is_some());
	}

	#[rstest]
	#[case(Some("/a/5"), Some("/a/5"))]
	#[case(Some(""), None)]
	#[case(None, None)]
	#[case(Some("https://example.com"), None)]
	#[case(Some("mailto:x@example.com"), None)]
	fn test_link_href(#[case] href: Option<&str>, #[case] expected: Option<&str>) {
		let anchor = SyntheticNode::element("A");
		if let Some(href) = href {
			anchor.set_attribute("href", href);
		}
		assert_eq!(link_href(&anchor).as_deref(), expected);
	}
}
