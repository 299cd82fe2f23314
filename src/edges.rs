use std::cell::RefCell;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::addr::WeakAddr;
use crate::Node;

type Halves = SmallVec<[WeakAddr; 4]>;

/// Per-node edge bookkeeping.
///
/// `listeners` are the nodes this one triggers, `dependencies` the
/// nodes that trigger this one. Both sides hold weak handles only.
#[derive(Default)]
pub struct Edges {
	inner: RefCell<EdgesInner>,
}

#[derive(Default)]
struct EdgesInner {
	listeners: Halves,
	dependencies: Halves,
}

fn prune(halves: &mut Halves) {
	halves.retain(|half| half.is_live());
}

fn live(halves: &mut Halves) -> SmallVec<[Node; 4]> {
	let mut out = SmallVec::with_capacity(halves.len());
	halves.retain(|half| match half.upgrade() {
		Some(node) => {
			out.push(node);
			true
		}
		None => false,
	});
	out
}

/// Pushes `node` unless a live entry for it already exists.
fn insert(halves: &mut Halves, node: &Node) -> bool {
	prune(halves);
	if halves.iter().any(|half| half.is(node)) {
		return false;
	}
	halves.push(WeakAddr::new(Rc::downgrade(node)));
	true
}

fn remove(halves: &mut Halves, node: &Node) -> bool {
	let found = halves.iter().any(|half| half.is(node));
	halves.retain(|half| half.is_live() && !half.is(node));
	found
}

impl Edges {
	pub fn new() -> Self {
		Self::default()
	}

	/// Live listeners, pruning dead entries on the way.
	pub fn listeners(&self) -> SmallVec<[Node; 4]> {
		live(&mut self.inner.borrow_mut().listeners)
	}

	/// Live dependencies, pruning dead entries on the way.
	pub fn dependencies(&self) -> SmallVec<[Node; 4]> {
		live(&mut self.inner.borrow_mut().dependencies)
	}

	pub fn listener_count(&self) -> usize {
		let mut inner = self.inner.borrow_mut();
		prune(&mut inner.listeners);
		inner.listeners.len()
	}

	pub fn dependency_count(&self) -> usize {
		let mut inner = self.inner.borrow_mut();
		prune(&mut inner.dependencies);
		inner.dependencies.len()
	}

	pub fn has_listener(&self, node: &Node) -> bool {
		let mut inner = self.inner.borrow_mut();
		prune(&mut inner.listeners);
		inner.listeners.iter().any(|half| half.is(node))
	}

	pub fn has_dependency(&self, node: &Node) -> bool {
		let mut inner = self.inner.borrow_mut();
		prune(&mut inner.dependencies);
		inner.dependencies.iter().any(|half| half.is(node))
	}

	/// No live edge in either direction.
	pub fn is_empty(&self) -> bool {
		self.listener_count() == 0 && self.dependency_count() == 0
	}

	fn add_listener(&self, node: &Node) -> bool {
		insert(&mut self.inner.borrow_mut().listeners, node)
	}

	fn add_dependency(&self, node: &Node) -> bool {
		insert(&mut self.inner.borrow_mut().dependencies, node)
	}

	fn remove_listener(&self, node: &Node) -> bool {
		remove(&mut self.inner.borrow_mut().listeners, node)
	}

	fn remove_dependency(&self, node: &Node) -> bool {
		remove(&mut self.inner.borrow_mut().dependencies, node)
	}

	fn take(&self) -> (Halves, Halves) {
		let mut inner = self.inner.borrow_mut();
		(
			std::mem::take(&mut inner.listeners),
			std::mem::take(&mut inner.dependencies),
		)
	}
}

impl std::fmt::Debug for Edges {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let inner = self.inner.borrow();
		f.debug_struct("Edges")
			.field("listeners", &inner.listeners.len())
			.field("dependencies", &inner.dependencies.len())
			.finish()
	}
}

/// Records `trigger -> listener`. Connecting an existing pair is a no-op.
pub fn connect(trigger: &Node, listener: &Node) {
	let added = trigger.edges().add_listener(listener);
	listener.edges().add_dependency(trigger);

	if added {
		tracing::trace!(
			trigger = trigger.name(),
			listener = listener.name(),
			"connect"
		);
	}
}

/// Removes `trigger -> listener` from both sides. Missing edges are ignored.
pub fn disconnect(trigger: &Node, listener: &Node) {
	let removed = trigger.edges().remove_listener(listener);
	listener.edges().remove_dependency(trigger);

	if removed {
		tracing::trace!(
			trigger = trigger.name(),
			listener = listener.name(),
			"disconnect"
		);
	}
}

/// Removes every edge touching `node`, in both directions.
pub fn disconnect_all(node: &Node) {
	let (listeners, dependencies) = node.edges().take();

	for half in listeners {
		if let Some(listener) = half.upgrade() {
			listener.edges().remove_dependency(node);
		}
	}

	for half in dependencies {
		if let Some(trigger) = half.upgrade() {
			trigger.edges().remove_listener(node);
		}
	}

	tracing::trace!(node = node.name(), "disconnect all");
}
