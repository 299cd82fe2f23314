#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::{Arc, Mutex, MutexGuard};

use dependable::{Children, Container, Dependable, Edges, Node, WeakNode};
use mockall::*;

#[automock]
pub trait Spy {
	fn reloaded(&self, name: &'static str);
}

#[derive(Clone)]
pub struct SharedMock(Arc<Mutex<MockSpy>>);

impl SharedMock {
	pub fn new() -> SharedMock {
		SharedMock(Arc::new(Mutex::new(MockSpy::new())))
	}

	pub fn get<'a>(&'a self) -> MutexGuard<'a, MockSpy> {
		return self.0.lock().unwrap();
	}
}

pub type Log = Rc<RefCell<Vec<&'static str>>>;

pub fn init_tracing() {
	let _ = tracing_subscriber::fmt()
		.with_test_writer()
		.with_max_level(tracing_subscriber::filter::LevelFilter::TRACE)
		.try_init();
}

pub fn count(log: &Log, name: &str) -> usize {
	log.borrow().iter().filter(|entry| **entry == name).count()
}

pub fn position(log: &Log, name: &str) -> usize {
	log.borrow()
		.iter()
		.position(|entry| *entry == name)
		.unwrap_or_else(|| panic!("`{}` never reloaded", name))
}

/// A plain data record.
pub struct Record {
	name: &'static str,
	priority: i32,
	edges: Edges,
	log: Log,
}

impl Record {
	pub fn new(name: &'static str, priority: i32, log: &Log) -> Node {
		Rc::new(Record {
			name,
			priority,
			edges: Edges::new(),
			log: log.clone(),
		})
	}
}

impl Dependable for Record {
	fn priority(&self) -> i32 {
		self.priority
	}

	fn reload(&self) {
		self.log.borrow_mut().push(self.name);
	}

	fn edges(&self) -> &Edges {
		&self.edges
	}

	fn name(&self) -> &str {
		self.name
	}
}

/// A container of lower-priority nodes. On release it hands the
/// released node to every folder in `rehome`.
pub struct Folder {
	name: &'static str,
	priority: i32,
	edges: Edges,
	children: Children,
	rehome: RefCell<Vec<Weak<Folder>>>,
	log: Log,
}

impl Folder {
	pub fn new(name: &'static str, priority: i32, log: &Log) -> Rc<Folder> {
		Rc::new_cyclic(|this: &Weak<Folder>| Folder {
			name,
			priority,
			edges: Edges::new(),
			children: Children::new(this.clone() as WeakNode),
			rehome: RefCell::new(Vec::new()),
			log: log.clone(),
		})
	}

	pub fn node(self: &Rc<Self>) -> Node {
		self.clone()
	}

	pub fn rehome_to(&self, other: &Rc<Folder>) {
		self.rehome.borrow_mut().push(Rc::downgrade(other));
	}

	pub fn len(&self) -> usize {
		self.children.len()
	}
}

impl Dependable for Folder {
	fn priority(&self) -> i32 {
		self.priority
	}

	fn reload(&self) {
		self.log.borrow_mut().push(self.name);
	}

	fn edges(&self) -> &Edges {
		&self.edges
	}

	fn as_container(&self) -> Option<&dyn Container> {
		Some(self as &dyn Container)
	}

	fn name(&self) -> &str {
		self.name
	}
}

impl Container for Folder {
	fn accepts(&self, candidate: &Node) -> bool {
		candidate.priority() < self.priority
	}

	fn contains(&self, candidate: &Node) -> bool {
		self.children.contains(candidate)
	}

	fn add_range(&self, items: &[Node]) {
		self.children.add(items, |item| self.accepts(item));
	}

	fn remove_range(&self, items: &[Node]) {
		for item in items {
			if self.children.remove(std::slice::from_ref(item)) == 0 {
				continue;
			}

			let targets: Vec<Rc<Folder>> = self
				.rehome
				.borrow()
				.iter()
				.filter_map(|target| target.upgrade())
				.collect();

			for target in targets {
				target.add_range(std::slice::from_ref(item));
			}
		}
	}
}
