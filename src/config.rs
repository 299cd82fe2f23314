/// Limits that keep a misbehaving object model from hanging the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphConfig {
	/// Upper bound on ownership-detach passes in [`Graph::delete`](crate::Graph::delete).
	/// An acyclic model needs at most one pass per owner plus one. The
	/// first pass always runs; zero behaves like one.
	pub max_delete_passes: usize,
	/// Upper bound on back-to-back propagation passes triggered by
	/// deferred `propagate` calls made from inside `reload`. The first
	/// pass always runs; zero behaves like one.
	pub max_propagation_passes: usize,
}

impl Default for GraphConfig {
	fn default() -> Self {
		GraphConfig {
			max_delete_passes: 64,
			max_propagation_passes: 256,
		}
	}
}

impl GraphConfig {
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn max_delete_passes(mut self, passes: usize) -> Self {
		self.max_delete_passes = passes;
		self
	}

	#[must_use]
	pub fn max_propagation_passes(mut self, passes: usize) -> Self {
		self.max_propagation_passes = passes;
		self
	}
}
