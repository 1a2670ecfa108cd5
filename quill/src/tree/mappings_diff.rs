use indexmap::IndexMap;
use duke::tree::entry::Entry;
use crate::tree::EntryTree;

mod action;

pub use action::Action;

/// The changes between two versions of an [`EntryTree`].
///
/// Writers that can update existing files in place may use this to only touch what changed. Writers that always
/// produce the whole file, like the Tiny v1 writer, ignore it.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingDelta<V> {
	changes: IndexMap<Entry, Action<V>>,
}

impl<V> Default for MappingDelta<V> {
	fn default() -> Self {
		MappingDelta { changes: IndexMap::new() }
	}
}

impl<V> MappingDelta<V> {
	/// A delta without any changes.
	pub fn empty() -> MappingDelta<V> {
		MappingDelta::default()
	}

	/// A delta adding every value of `tree`, as if it was created from an empty tree.
	pub fn added(tree: &EntryTree<V>) -> MappingDelta<V>
	where
		V: Clone,
	{
		let changes = tree.values()
			.map(|(entry, value)| (entry.clone(), Action::Add(value.clone())))
			.collect();

		MappingDelta { changes }
	}

	/// Computes the changes needed to get from `before` to `after`.
	///
	/// Entries are ordered like they appear in `before`, followed by the ones only present in `after`.
	pub fn between(before: &EntryTree<V>, after: &EntryTree<V>) -> MappingDelta<V>
	where
		V: Clone + PartialEq,
	{
		let mut changes = IndexMap::new();

		for entry in before.all_entries().chain(after.all_entries()) {
			if changes.contains_key(entry) {
				continue;
			}

			let action = Action::of(before.get(entry).cloned(), after.get(entry).cloned());
			if action.is_diff() {
				changes.insert(entry.clone(), action);
			}
		}

		MappingDelta { changes }
	}

	/// Returns a delta that undoes this one.
	pub fn invert(self) -> MappingDelta<V> {
		let changes = self.changes.into_iter()
			.map(|(entry, action)| (entry, action.flip()))
			.collect();

		MappingDelta { changes }
	}

	/// Applies the changes to `tree`.
	///
	/// This only looks at the value after each action, it doesn't check that `tree` held the value before.
	pub fn apply_to(&self, tree: &mut EntryTree<V>)
	where
		V: Clone,
	{
		for (entry, action) in &self.changes {
			match action.after() {
				Some(value) => {
					tree.insert(entry.clone(), value.clone());
				},
				None => {
					tree.remove(entry);
				},
			}
		}
	}

	pub fn get(&self, entry: &Entry) -> Option<&Action<V>> {
		self.changes.get(entry)
	}

	pub fn changes(&self) -> impl Iterator<Item=(&Entry, &Action<V>)> {
		self.changes.iter()
	}

	pub fn len(&self) -> usize {
		self.changes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.changes.is_empty()
	}
}

#[cfg(test)]
mod testing {
	use anyhow::Result;
	use pretty_assertions::assert_eq;
	use duke::tree::class::ClassEntry;
	use duke::tree::entry::Entry;
	use duke::tree::field::FieldEntry;
	use crate::tree::EntryTree;
	use crate::tree::mappings_diff::{Action, MappingDelta};

	#[test]
	fn between() -> Result<()> {
		let a: Entry = ClassEntry::new("a")?.into();
		let b: Entry = ClassEntry::new("b")?.into();
		let c: Entry = ClassEntry::new("c")?.into();
		let f: Entry = FieldEntry::new(ClassEntry::new("a")?, "f", "I")?.into();

		let before: EntryTree<&str> = [(a.clone(), "A"), (b.clone(), "B"), (f.clone(), "F")].into_iter().collect();
		let after: EntryTree<&str> = [(a.clone(), "A2"), (c.clone(), "C"), (f.clone(), "F")].into_iter().collect();

		let delta = MappingDelta::between(&before, &after);

		let changes: Vec<_> = delta.changes().collect();
		assert_eq!(changes, [
			(&a, &Action::Edit("A", "A2")),
			(&b, &Action::Remove("B")),
			(&c, &Action::Add("C")),
		]);
		assert_eq!(delta.get(&f), None);

		let mut tree = before.clone();
		delta.apply_to(&mut tree);
		assert_eq!(MappingDelta::between(&tree, &after), MappingDelta::empty());

		let mut tree = after.clone();
		delta.invert().apply_to(&mut tree);
		assert_eq!(MappingDelta::between(&tree, &before), MappingDelta::empty());
		Ok(())
	}

	#[test]
	fn added() -> Result<()> {
		let f: Entry = FieldEntry::new(ClassEntry::new("a")?, "f", "I")?.into();
		let tree: EntryTree<u8> = [(f.clone(), 1)].into_iter().collect();

		let delta = MappingDelta::added(&tree);
		assert_eq!(delta.len(), 1);
		assert_eq!(delta.get(&f), Some(&Action::Add(1)));
		assert!(MappingDelta::<u8>::empty().is_empty());
		Ok(())
	}
}
