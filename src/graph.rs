use std::cell::{Cell, RefCell};

use smallvec::SmallVec;

use crate::dirty::DirtySet;
use crate::edges::disconnect_all;
use crate::{GraphConfig, GraphError, Node};

/// Owner of the transient dirty set and of the reentrancy state.
///
/// A `Graph` is meant to live in whatever owns the world (a session
/// object) and to be shared with nodes that need to flag from inside
/// their `reload`.
///
/// `propagate` called while a reload pass is running, or inside
/// [`Graph::batch`], does not run immediately. It is recorded, and the
/// running pass (or the outermost batch) performs another full pass
/// once it finishes. Flags raised during a reload never join the pass
/// that is already reloading.
pub struct Graph {
	config: GraphConfig,
	dirty: RefCell<DirtySet>,
	reloading: Cell<bool>,
	batch_depth: Cell<usize>,
	deferred: Cell<bool>,
}

impl Default for Graph {
	fn default() -> Self {
		Graph::with_config(GraphConfig::default())
	}
}

struct Guard<'a> {
	reloading: &'a Cell<bool>,
}

impl<'a> Guard<'a> {
	fn enter(reloading: &'a Cell<bool>) -> Self {
		reloading.set(true);
		Guard { reloading }
	}
}

impl Drop for Guard<'_> {
	fn drop(&mut self) {
		self.reloading.set(false);
	}
}

struct BatchGuard<'a> {
	depth: &'a Cell<usize>,
}

impl Drop for BatchGuard<'_> {
	fn drop(&mut self) {
		self.depth.set(self.depth.get() - 1);
	}
}

impl Graph {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_config(config: GraphConfig) -> Self {
		Graph {
			config,
			dirty: RefCell::new(DirtySet::new()),
			reloading: Cell::new(false),
			batch_depth: Cell::new(0),
			deferred: Cell::new(false),
		}
	}

	pub fn config(&self) -> &GraphConfig {
		&self.config
	}

	/// Marks `node` for reload by the next propagation.
	///
	/// The priority is read now; `priority` must not call back into
	/// the graph.
	pub fn flag(&self, node: &Node) {
		let priority = node.priority();
		if self.dirty.borrow_mut().insert(node, priority) {
			tracing::trace!(node = node.name(), priority, "flag");
		}
	}

	pub fn is_dirty(&self, node: &Node) -> bool {
		self.dirty.borrow().contains(node)
	}

	/// Number of flagged nodes awaiting the next pass.
	pub fn pending(&self) -> usize {
		self.dirty.borrow().len()
	}

	/// `true` while reload callbacks are running.
	pub fn is_propagating(&self) -> bool {
		self.reloading.get()
	}

	pub fn in_batch(&self) -> bool {
		self.batch_depth.get() > 0
	}

	/// Runs `func`, holding back propagation until the outermost batch
	/// returns, then propagates once.
	pub fn batch<R>(&self, func: impl FnOnce() -> R) -> Result<R, GraphError> {
		let is_root = self.batch_depth.get() == 0;
		let out = {
			self.batch_depth.set(self.batch_depth.get() + 1);
			let _guard = BatchGuard {
				depth: &self.batch_depth,
			};
			func()
		};

		if is_root {
			self.propagate()?;
		}

		Ok(out)
	}

	/// Reloads every flagged node and everything downstream of it, once
	/// each, in ascending priority order. The dirty set is empty
	/// afterwards, apart from flags raised by the reloads themselves.
	pub fn propagate(&self) -> Result<(), GraphError> {
		if self.reloading.get() || self.in_batch() {
			tracing::trace!("propagate deferred");
			self.deferred.set(true);
			return Ok(());
		}

		let mut passes = 0;
		loop {
			self.deferred.set(false);

			let mut dirty = std::mem::take(&mut *self.dirty.borrow_mut());
			dirty.close();

			if dirty.is_empty() {
				break;
			}
			passes += 1;

			tracing::debug!(pass = passes, nodes = dirty.len(), "reload pass");

			let guard = Guard::enter(&self.reloading);
			for node in dirty.drain() {
				tracing::trace!(node = node.name(), "reload");
				node.reload();
			}
			std::mem::drop(guard);

			if !self.deferred.get() {
				break;
			}

			if passes >= self.config.max_propagation_passes {
				let discarded = std::mem::take(&mut *self.dirty.borrow_mut());
				tracing::error!(passes, discarded = discarded.len(), "propagation did not settle");
				return Err(GraphError::PropagationLimit { passes });
			}
		}

		Ok(())
	}

	/// Removes `node` from every container that owns it and from the
	/// graph, letting remaining listeners observe the removal first.
	///
	/// An ownership cycle that keeps re-adopting the node is reported
	/// as [`GraphError::OwnershipCycle`]; the node is still taken out
	/// of the graph in that case.
	pub fn delete(&self, node: &Node) -> Result<(), GraphError> {
		let span = tracing::debug_span!("delete", node = node.name());
		let _enter = span.enter();

		if let Some(container) = node.as_container() {
			let owned: SmallVec<[Node; 4]> = node
				.edges()
				.dependencies()
				.into_iter()
				.filter(|child| container.contains(child))
				.collect();

			if !owned.is_empty() {
				tracing::debug!(children = owned.len(), "release owned children");
				container.remove_range(&owned);
			}
		}

		let detached = self.detach_from_owners(node);

		// Listeners are collected now, while the node still has edges,
		// in case the pass itself gets deferred.
		self.flag(node);
		self.dirty.borrow_mut().close();
		let propagated = self.propagate();

		disconnect_all(node);

		detached.and(propagated)
	}

	fn detach_from_owners(&self, node: &Node) -> Result<(), GraphError> {
		let single = [node.clone()];
		let mut passes = 0;

		loop {
			let owners = node.edges().listeners();
			let before = owners.len();
			passes += 1;

			for owner in &owners {
				if let Some(container) = owner.as_container() {
					container.remove_range(&single);
				}
			}

			// Nothing left to detach once no listener remains.
			let after = node.edges().listener_count();
			if after == before || after == 0 {
				break;
			}

			if passes >= self.config.max_delete_passes {
				tracing::error!(passes, owners = before, "ownership did not settle");
				return Err(GraphError::OwnershipCycle {
					node: node.name().to_owned(),
					passes,
				});
			}
		}

		let still_owned = node
			.edges()
			.listeners()
			.iter()
			.filter(|owner| owner.as_container().map_or(false, |c| c.contains(node)))
			.count();
		if still_owned > 0 {
			tracing::warn!(passes, owners = still_owned, "node settled while still owned");
		}

		tracing::debug!(passes, "detached from owners");
		Ok(())
	}
}

impl std::fmt::Debug for Graph {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Graph")
			.field("config", &self.config)
			.field("pending", &self.pending())
			.field("reloading", &self.reloading.get())
			.field("batch_depth", &self.batch_depth.get())
			.finish()
	}
}
