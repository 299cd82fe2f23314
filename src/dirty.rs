use std::collections::BTreeMap;
use std::rc::Rc;

use fxhash::FxHashSet;
use smallvec::SmallVec;

use crate::addr::{thin, WeakAddr};
use crate::Node;

/// Nodes awaiting reload, bucketed by priority.
///
/// Entries are weak: a node dropped while flagged is skipped, never
/// kept alive or reloaded. Each entry keeps its allocation reserved,
/// so the address key in `members` stays unique until drained.
///
/// Within a bucket nodes keep insertion order. That order is an
/// implementation detail: callers must not rely on how ties run.
#[derive(Default)]
pub struct DirtySet {
	buckets: BTreeMap<i32, SmallVec<[WeakAddr; 8]>>,
	members: FxHashSet<*const ()>,
}

impl DirtySet {
	pub fn new() -> Self {
		Self::default()
	}

	/// Entries awaiting reload, including any whose node has died since.
	pub fn len(&self) -> usize {
		self.members.len()
	}

	pub fn is_empty(&self) -> bool {
		self.members.is_empty()
	}

	pub fn contains(&self, node: &Node) -> bool {
		self.members.contains(&thin(node))
	}

	/// Returns `false` if the node was already present.
	pub fn insert(&mut self, node: &Node, priority: i32) -> bool {
		if !self.members.insert(thin(node)) {
			return false;
		}
		self.buckets
			.entry(priority)
			.or_default()
			.push(WeakAddr::new(Rc::downgrade(node)));
		true
	}

	/// Flags every live listener reachable from the current members.
	/// Dead entries met on the way are skipped, not flagged.
	pub fn close(&mut self) {
		let mut pending: Vec<Node> = self
			.buckets
			.values()
			.flatten()
			.filter_map(|half| half.upgrade())
			.collect();

		while let Some(node) = pending.pop() {
			for listener in node.edges().listeners() {
				let priority = listener.priority();
				if self.insert(&listener, priority) {
					pending.push(listener);
				}
			}
		}
	}

	/// Empties the set, yielding live nodes in ascending priority order.
	/// Each entry is resolved only when reached, so a node dropped by an
	/// earlier reload in the same pass is skipped.
	pub fn drain(&mut self) -> impl Iterator<Item = Node> {
		self.members.clear();
		std::mem::take(&mut self.buckets)
			.into_values()
			.flatten()
			.filter_map(|half| half.upgrade())
	}
}
