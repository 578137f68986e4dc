//! Synthetic DOM doubles for exercising click interception off the browser.
//!
//! Available in this crate's tests and, for downstream crates, behind the
//! `testing` feature.
//!
//! ```ignore
//! use reinhardt_navigator::testing::{SyntheticClick, SyntheticNode};
//!
//! let anchor = SyntheticNode::anchor("/users/42");
//! let label = SyntheticNode::element("SPAN").append_to(&anchor);
//! let click = SyntheticClick::on(label);
//!
//! assert!(router.handle_click(&click));
//! assert!(click.default_prevented());
//! ```

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::link::{ClickEvent, DomNode};

#[derive(Debug)]
struct NodeData {
	name: String,
	attributes: RefCell<HashMap<String, String>>,
	parent: RefCell<Option<SyntheticNode>>,
}

/// An in-memory DOM node. Clones share the same node.
#[derive(Debug, Clone)]
pub struct SyntheticNode {
	data: Rc<NodeData>,
}

impl SyntheticNode {
	/// Creates a detached element named `name`.
	pub fn element(name: impl Into<String>) -> Self {
		Self {
			data: Rc::new(NodeData {
				name: name.into(),
				attributes: RefCell::new(HashMap::new()),
				parent: RefCell::new(None),
			}),
		}
	}

	/// Creates a detached text node.
	pub fn text() -> Self {
		Self::element("#text")
	}

	/// Creates an `<a>` element with the given `href`.
	pub fn anchor(href: &str) -> Self {
		let node = Self::element("A");
		node.set_attribute("href", href);
		node
	}

	/// Sets an attribute.
	pub fn set_attribute(&self, name: &str, value: &str) {
		self.data
			.attributes
			.borrow_mut()
			.insert(name.to_string(), value.to_string());
	}

	/// Builder-style [`set_attribute`](Self::set_attribute).
	pub fn with_attribute(self, name: &str, value: &str) -> Self {
		self.set_attribute(name, value);
		self
	}

	/// Attaches this node under `parent` and returns it.
	pub fn append_to(self, parent: &SyntheticNode) -> Self {
		*self.data.parent.borrow_mut() = Some(parent.clone());
		self
	}
}

impl DomNode for SyntheticNode {
	fn node_name(&self) -> String {
		self.data.name.clone()
	}

	fn parent_node(&self) -> Option<Self> {
		self.data.parent.borrow().clone()
	}

	fn attribute(&self, name: &str) -> Option<String> {
		if self.data.name.starts_with('#') {
			return None;
		}
		self.data.attributes.borrow().get(name).cloned()
	}
}

/// A click event targeting a [`SyntheticNode`].
#[derive(Debug, Default)]
pub struct SyntheticClick {
	target: Option<SyntheticNode>,
	meta: bool,
	ctrl: bool,
	shift: bool,
	prevented: Cell<bool>,
}

impl SyntheticClick {
	/// Creates an unmodified click on `target`.
	pub fn on(target: SyntheticNode) -> Self {
		Self {
			target: Some(target),
			..Self::default()
		}
	}

	/// Holds the Meta key.
	pub fn with_meta(mut self) -> Self {
		self.meta = true;
		self
	}

	/// Holds the Control key.
	pub fn with_ctrl(mut self) -> Self {
		self.ctrl = true;
		self
	}

	/// Holds the Shift key.
	pub fn with_shift(mut self) -> Self {
		self.shift = true;
		self
	}

	/// Marks the event as already handled by someone else.
	pub fn prevented(self) -> Self {
		self.prevented.set(true);
		self
	}
}

impl ClickEvent for SyntheticClick {
	type Node = SyntheticNode;

	fn meta_key(&self) -> bool {
		self.meta
	}

	fn ctrl_key(&self) -> bool {
		self.ctrl
	}

	fn shift_key(&self) -> bool {
		self.shift
	}

	fn default_prevented(&self) -> bool {
		self.prevented.get()
	}

	fn target(&self) -> Option<SyntheticNode> {
		self.target.clone()
	}

	fn prevent_default(&self) {
		self.prevented.set(true);
	}
}
