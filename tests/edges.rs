use dependable::{connect, disconnect, disconnect_all, same_node, Graph};

mod mock;

use mock::{Log, Record};

#[test]
fn connect_is_idempotent() {
	let log = Log::default();
	let a = Record::new("a", 1, &log);
	let b = Record::new("b", 2, &log);

	connect(&a, &b);
	connect(&a, &b);

	assert_eq!(a.edges().listener_count(), 1);
	assert_eq!(b.edges().dependency_count(), 1);
	assert_eq!(a.edges().dependency_count(), 0);
	assert!(same_node(&a.edges().listeners()[0], &b));
	assert!(same_node(&b.edges().dependencies()[0], &a));
}

#[test]
fn disconnect_removes_both_halves() {
	let log = Log::default();
	let a = Record::new("a", 1, &log);
	let b = Record::new("b", 2, &log);

	connect(&a, &b);
	disconnect(&a, &b);

	assert!(!a.edges().has_listener(&b));
	assert!(!b.edges().has_dependency(&a));

	// Missing edges are fine, in either direction.
	disconnect(&a, &b);
	disconnect(&b, &a);
	assert!(a.edges().is_empty());
}

#[test]
fn disconnect_all_clears_the_opposite_sides() {
	let log = Log::default();
	let hub = Record::new("hub", 2, &log);
	let source = Record::new("source", 1, &log);
	let view = Record::new("view", 3, &log);
	let other = Record::new("other", 3, &log);

	connect(&source, &hub);
	connect(&hub, &view);
	connect(&source, &other);

	disconnect_all(&hub);

	assert!(hub.edges().is_empty());
	assert!(!source.edges().has_listener(&hub));
	assert!(!view.edges().has_dependency(&hub));
	assert!(source.edges().has_listener(&other));
}

#[test]
fn self_edge_is_supported() {
	let log = Log::default();
	let a = Record::new("a", 1, &log);
	connect(&a, &a);

	assert!(a.edges().has_listener(&a));
	assert!(a.edges().has_dependency(&a));

	let graph = Graph::new();
	graph.flag(&a);
	graph.propagate().unwrap();
	assert_eq!(*log.borrow(), vec!["a"]);

	disconnect_all(&a);
	assert!(a.edges().is_empty());
}

#[test]
fn dead_halves_are_pruned_lazily() {
	let log = Log::default();
	let model = Record::new("model", 1, &log);
	let view = Record::new("view", 2, &log);
	let source = Record::new("source", 0, &log);

	connect(&model, &view);
	connect(&source, &model);

	drop(view);
	drop(source);

	assert_eq!(model.edges().listener_count(), 0);
	assert_eq!(model.edges().dependency_count(), 0);
	assert!(model.edges().listeners().is_empty());
}

#[test]
fn reconnect_after_listener_died() {
	let log = Log::default();
	let model = Record::new("model", 1, &log);
	let stale = Record::new("stale", 2, &log);
	connect(&model, &stale);
	drop(stale);

	let fresh = Record::new("fresh", 2, &log);
	connect(&model, &fresh);

	assert_eq!(model.edges().listener_count(), 1);
	assert!(model.edges().has_listener(&fresh));
}

#[test]
fn disconnect_tolerates_dead_halves() {
	let log = Log::default();
	let a = Record::new("a", 1, &log);
	let b = Record::new("b", 2, &log);
	let gone = Record::new("gone", 2, &log);
	let kept = Record::new("kept", 2, &log);

	connect(&a, &gone);
	connect(&a, &b);
	connect(&a, &kept);
	drop(gone);

	disconnect(&a, &b);

	assert_eq!(a.edges().listener_count(), 1);
	assert!(a.edges().has_listener(&kept));
	assert!(!b.edges().has_dependency(&a));
}
