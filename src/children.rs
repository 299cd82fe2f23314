use std::cell::RefCell;

use crate::edges::{connect, disconnect};
use crate::{same_node, Node, WeakNode};

/// Owned child list for container nodes.
///
/// Adding a child records the ownership edge child -> parent, so the
/// parent reloads when the child changes and deletion can find the
/// parent from the child. Removing drops both the strong handle and
/// the edge.
pub struct Children {
	this: WeakNode,
	items: RefCell<Vec<Node>>,
}

impl Children {
	/// `this` is the owning container, usually obtained through
	/// `Rc::new_cyclic`.
	pub fn new(this: WeakNode) -> Self {
		Children {
			this,
			items: RefCell::new(Vec::new()),
		}
	}

	pub fn contains(&self, node: &Node) -> bool {
		self.items.borrow().iter().any(|item| same_node(item, node))
	}

	pub fn len(&self) -> usize {
		self.items.borrow().len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.borrow().is_empty()
	}

	/// Adopts every item `accepts` lets through and that is not owned
	/// yet. Returns how many were adopted.
	pub fn add(&self, items: &[Node], accepts: impl Fn(&Node) -> bool) -> usize {
		let Some(parent) = self.this.upgrade() else {
			return 0;
		};

		let mut added = 0;
		for item in items {
			if !accepts(item) || self.contains(item) {
				continue;
			}
			self.items.borrow_mut().push(item.clone());
			connect(item, &parent);
			added += 1;
		}
		added
	}

	/// Releases every owned item among `items`. Returns how many were
	/// released.
	pub fn remove(&self, items: &[Node]) -> usize {
		let parent = self.this.upgrade();

		let mut removed = 0;
		for item in items {
			let taken = {
				let mut own = self.items.borrow_mut();
				own.iter()
					.position(|owned| same_node(owned, item))
					.map(|index| own.remove(index))
			};

			if let Some(taken) = taken {
				if let Some(parent) = &parent {
					disconnect(&taken, parent);
				}
				removed += 1;
			}
		}
		removed
	}
}

impl std::fmt::Debug for Children {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list()
			.entries(self.items.borrow().iter().map(|item| item.name().to_owned()))
			.finish()
	}
}
