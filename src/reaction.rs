use std::cell::Cell;
use std::rc::Rc;

use crate::{Dependable, Edges, Node};

/// A node whose reload is a closure.
///
/// Useful for views and inspectors that do not warrant a type of
/// their own.
#[derive(Clone)]
pub struct Reaction {
	pub(crate) body: Rc<ReactionBody>,
}

pub struct ReactionBody {
	name: &'static str,
	priority: Cell<i32>,
	reloads: Cell<usize>,
	func: Box<dyn Fn()>,
	edges: Edges,
}

impl Reaction {
	#[must_use]
	pub fn new(priority: i32, func: Box<dyn Fn()>) -> Self {
		Self::new_with_name("<unnamed>", priority, func)
	}

	#[must_use]
	pub fn new_with_name(name: &'static str, priority: i32, func: Box<dyn Fn()>) -> Self {
		Reaction {
			body: Rc::new(ReactionBody {
				name,
				priority: Cell::new(priority),
				reloads: Cell::new(0),
				func,
				edges: Edges::new(),
			}),
		}
	}

	/// Graph handle for this reaction. The reaction stays alive as
	/// long as any `Reaction` clone or strong `Node` exists.
	pub fn node(&self) -> Node {
		self.body.clone()
	}

	pub fn set_priority(&self, priority: i32) {
		self.body.priority.set(priority);
	}

	/// How many times the closure has run.
	pub fn reloads(&self) -> usize {
		self.body.reloads.get()
	}

	/// Runs the closure right away, outside of any propagation.
	pub fn reload(&self) {
		self.body.reload();
	}

	pub fn edges(&self) -> &Edges {
		&self.body.edges
	}
}

impl Dependable for ReactionBody {
	fn priority(&self) -> i32 {
		self.priority.get()
	}

	fn reload(&self) {
		self.reloads.set(self.reloads.get() + 1);
		(self.func)();
	}

	fn edges(&self) -> &Edges {
		&self.edges
	}

	fn name(&self) -> &str {
		self.name
	}
}

impl std::fmt::Debug for Reaction {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Reaction")
			.field("name", &self.body.name)
			.field("priority", &self.body.priority.get())
			.finish()
	}
}
