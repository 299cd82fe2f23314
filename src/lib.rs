//! An invalidation graph for layered model/view objects.
//!
//! Every participant is a [`Dependable`] node shared behind an [`Rc`].
//! Edges are recorded twice, once on the trigger (as a listener) and once
//! on the listener (as a dependency), and both halves are weak, so the
//! graph never keeps a node alive. Dead halves are pruned whenever a
//! traversal runs into them.
//!
//! After a mutation, [`Graph::flag`] the changed node and call
//! [`Graph::propagate`]: the graph computes everything downstream over
//! listener edges and reloads each affected node once, lowest priority
//! first.

pub mod macros;

mod addr;
mod children;
mod config;
mod dirty;
mod edges;
mod error;
mod graph;
mod reaction;

use std::rc::{Rc, Weak};

pub use children::Children;
pub use config::GraphConfig;
pub use edges::{connect, disconnect, disconnect_all, Edges};
pub use error::GraphError;
pub use graph::Graph;
pub use reaction::Reaction;

/// Strong handle to a node. Application code owns these.
pub type Node = Rc<dyn Dependable>;

/// Non-owning handle to a node, as stored in edges.
pub type WeakNode = Weak<dyn Dependable>;

pub trait Dependable: 'static {
	/// Ordering key for the reload pass. Lower values are more
	/// foundational and reload first.
	fn priority(&self) -> i32;

	/// Called once per propagation pass when this node is dirty.
	/// Must be safe to call repeatedly.
	fn reload(&self);

	/// The edge record embedded in this node.
	fn edges(&self) -> &Edges;

	/// Capability query for ownership operations.
	fn as_container(&self) -> Option<&dyn Container> {
		None
	}

	fn name(&self) -> &str {
		"<unnamed>"
	}
}

/// A node that owns child nodes.
///
/// Ownership edges are recorded with the child as trigger and the
/// container as listener. Implementations are expected to maintain
/// those edges in `add_range`/`remove_range`; [`Children`] does this.
pub trait Container {
	fn accepts(&self, candidate: &Node) -> bool;

	fn contains(&self, candidate: &Node) -> bool;

	fn add_range(&self, items: &[Node]);

	fn remove_range(&self, items: &[Node]);
}

/// Identity comparison of two node handles.
#[inline]
pub fn same_node(a: &Node, b: &Node) -> bool {
	addr::thin(a) == addr::thin(b)
}
