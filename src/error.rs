use thiserror::Error;

/// Defects in the surrounding object model detected by the graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
	#[error("deleting `{node}` did not settle after {passes} ownership passes; containers keep re-adopting it")]
	OwnershipCycle { node: String, passes: usize },

	#[error("propagation did not settle after {passes} passes; reload keeps re-flagging the graph")]
	PropagationLimit { passes: usize },
}
