//! The [`EntryTree`], a store of values (usually [`EntryMapping`][mapping::EntryMapping]s) keyed by [`Entry`].

use indexmap::{IndexMap, IndexSet};
use duke::tree::entry::Entry;

pub mod mapping;
pub mod mappings_diff;

/// A tree of entries, where each node may hold a value.
///
/// The shape of the tree follows the containment of the entries: fields, methods and inner classes are children of
/// the class containing them, and top level classes are the roots. The order in which values are inserted has no
/// influence on the shape.
///
/// Nodes are stored in an arena keyed by their entry. Children are stored as keys into that arena, so the tree is the
/// only owner of its nodes.
///
/// A node exists as long as it or one of its descendants holds a value. Nodes without a value only exist to connect
/// their descendants to a root.
#[derive(Debug, Clone)]
pub struct EntryTree<V> {
	roots: IndexSet<Entry>,
	nodes: IndexMap<Entry, EntryTreeNode<V>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntryTreeNode<V> {
	value: Option<V>,
	children: IndexSet<Entry>,
}

impl<V> EntryTreeNode<V> {
	fn new() -> EntryTreeNode<V> {
		EntryTreeNode {
			value: None,
			children: IndexSet::new(),
		}
	}

	pub fn value(&self) -> Option<&V> {
		self.value.as_ref()
	}

	pub fn has_value(&self) -> bool {
		self.value.is_some()
	}

	/// The entries of the children, in insertion order.
	pub fn children(&self) -> impl Iterator<Item=&Entry> {
		self.children.iter()
	}

	fn is_dead(&self) -> bool {
		self.value.is_none() && self.children.is_empty()
	}
}

impl<V> Default for EntryTree<V> {
	fn default() -> Self {
		EntryTree {
			roots: IndexSet::new(),
			nodes: IndexMap::new(),
		}
	}
}

impl<V> EntryTree<V> {
	pub fn new() -> EntryTree<V> {
		EntryTree::default()
	}

	/// Stores `value` at `entry`, returning the previous value.
	///
	/// Missing nodes for the classes containing `entry` are created on the way.
	pub fn insert(&mut self, entry: Entry, value: V) -> Option<V> {
		self.node_or_insert(&entry).value.replace(value)
	}

	fn node_or_insert(&mut self, entry: &Entry) -> &mut EntryTreeNode<V> {
		if !self.nodes.contains_key(entry) {
			match entry.parent() {
				Some(parent) => {
					self.node_or_insert(&parent).children.insert(entry.clone());
				},
				None => {
					self.roots.insert(entry.clone());
				},
			}
		}

		self.nodes.entry(entry.clone())
			.or_insert_with(EntryTreeNode::new)
	}

	/// Removes the value at `entry`, returning it.
	///
	/// Nodes that are left with neither a value nor children are removed, walking up towards the root.
	pub fn remove(&mut self, entry: &Entry) -> Option<V> {
		let value = self.nodes.get_mut(entry)?.value.take();
		self.prune(entry);
		value
	}

	fn prune(&mut self, entry: &Entry) {
		if !self.nodes.get(entry).is_some_and(EntryTreeNode::is_dead) {
			return;
		}

		self.nodes.shift_remove(entry);

		match entry.parent() {
			Some(parent) => {
				if let Some(parent_node) = self.nodes.get_mut(&parent) {
					parent_node.children.shift_remove(entry);
				}
				self.prune(&parent);
			},
			None => {
				self.roots.shift_remove(entry);
			},
		}
	}

	/// Gets the value stored exactly at `entry`.
	///
	/// This doesn't look at the classes containing `entry`, see the
	/// [`Translator`][crate::translator::Translator] for that.
	pub fn get(&self, entry: &Entry) -> Option<&V> {
		self.nodes.get(entry)?.value.as_ref()
	}

	pub fn find_node(&self, entry: &Entry) -> Option<&EntryTreeNode<V>> {
		self.nodes.get(entry)
	}

	pub fn contains(&self, entry: &Entry) -> bool {
		self.nodes.contains_key(entry)
	}

	/// The entries of the children of the node for `entry`, empty if there's no such node.
	pub fn children(&self, entry: &Entry) -> impl Iterator<Item=&Entry> {
		self.nodes.get(entry)
			.into_iter()
			.flat_map(EntryTreeNode::children)
	}

	/// The entries of all nodes without a parent. These are always classes.
	pub fn root_entries(&self) -> impl Iterator<Item=&Entry> {
		self.roots.iter()
	}

	/// The entries of all nodes, at any depth.
	///
	/// No particular order is promised, consumers that need one must sort.
	pub fn all_entries(&self) -> impl Iterator<Item=&Entry> {
		self.nodes.keys()
	}

	/// All entries holding a value, together with that value.
	pub fn values(&self) -> impl Iterator<Item=(&Entry, &V)> {
		self.nodes.iter()
			.filter_map(|(entry, node)| node.value.as_ref().map(|value| (entry, value)))
	}

	/// The number of nodes, including the ones without a value.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
}

impl<V> Extend<(Entry, V)> for EntryTree<V> {
	fn extend<T: IntoIterator<Item=(Entry, V)>>(&mut self, iter: T) {
		for (entry, value) in iter {
			self.insert(entry, value);
		}
	}
}

impl<V> FromIterator<(Entry, V)> for EntryTree<V> {
	fn from_iter<T: IntoIterator<Item=(Entry, V)>>(iter: T) -> Self {
		let mut tree = EntryTree::new();
		tree.extend(iter);
		tree
	}
}
