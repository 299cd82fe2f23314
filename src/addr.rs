use std::ops::Deref;
use std::rc::{Rc, Weak};

use crate::{Dependable, Node, WeakNode};

/// Thin data pointer of a node. Vtable pointers are not
/// stable across codegen units, so identity ignores them.
#[inline]
pub(crate) fn thin(node: &Node) -> *const () {
	Rc::as_ptr(node) as *const ()
}

#[inline]
pub(crate) fn thin_weak(node: &WeakNode) -> *const () {
	Weak::as_ptr(node) as *const ()
}

/// Non-owning edge half. The allocation stays reserved while
/// any weak handle exists, so the address cannot be reused
/// by another node until this entry is pruned.
pub struct WeakAddr {
	ptr: WeakNode,
}

impl WeakAddr {
	pub fn new(ptr: WeakNode) -> Self {
		WeakAddr { ptr }
	}

	pub fn is(&self, node: &Node) -> bool {
		thin_weak(&self.ptr) == thin(node)
	}

	pub fn is_live(&self) -> bool {
		self.ptr.strong_count() > 0
	}
}

impl Deref for WeakAddr {
	type Target = Weak<dyn Dependable>;
	fn deref(&self) -> &Self::Target {
		&self.ptr
	}
}
