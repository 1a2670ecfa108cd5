//! Resolving entries to the entry that actually carries their mapping.
//!
//! A field or method referenced through a subclass is declared somewhere up in the class hierarchy, and only that
//! declaration is mapped. An [`EntryResolver`] finds it. The [`VoidEntryResolver`] doesn't know about any hierarchy
//! and returns every entry as is. The [`IndexEntryResolver`] uses an [`InheritanceIndex`].

use std::borrow::Cow;
use anyhow::{bail, Result};
use indexmap::{IndexMap, IndexSet};
use duke::tree::class::ClassEntry;
use duke::tree::entry::Entry;

pub trait EntryResolver {
	/// Returns the entry whose mapping applies to `entry`.
	fn resolve_first<'e>(&self, entry: &'e Entry) -> Cow<'e, Entry>;
}

impl<R: EntryResolver + ?Sized> EntryResolver for &R {
	fn resolve_first<'e>(&self, entry: &'e Entry) -> Cow<'e, Entry> {
		(**self).resolve_first(entry)
	}
}

/// A resolver that doesn't resolve anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct VoidEntryResolver;

impl EntryResolver for VoidEntryResolver {
	fn resolve_first<'e>(&self, entry: &'e Entry) -> Cow<'e, Entry> {
		Cow::Borrowed(entry)
	}
}

/// Knows the super classes of classes and which class declares which member.
#[derive(Debug, Clone, Default)]
pub struct InheritanceIndex {
	super_classes: IndexMap<ClassEntry, IndexSet<ClassEntry>>,
	declarations: IndexSet<Entry>,
}

impl InheritanceIndex {
	pub fn new() -> InheritanceIndex {
		InheritanceIndex::default()
	}

	/// Records `super_class` as a super class or an interface of `class`.
	pub fn add_super_class(&mut self, class: ClassEntry, super_class: ClassEntry) {
		self.super_classes.entry(class)
			.or_default()
			.insert(super_class);
	}

	/// Records that the owner of the field or method `entry` declares it.
	pub fn add_declaration(&mut self, entry: Entry) {
		self.declarations.insert(entry);
	}

	/// The direct super classes (and interfaces) of `class`, in insertion order.
	pub fn super_classes(&self, class: &ClassEntry) -> impl Iterator<Item=&ClassEntry> {
		self.super_classes.get(class)
			.into_iter()
			.flat_map(IndexSet::iter)
	}

	pub fn is_declared(&self, entry: &Entry) -> bool {
		self.declarations.contains(entry)
	}

	pub fn resolver(&self) -> IndexEntryResolver<'_> {
		IndexEntryResolver { index: self }
	}
}

/// Resolves inherited fields and methods to the closest class declaring them.
///
/// Classes are searched depth first, in the order their super classes were added to the [`InheritanceIndex`].
/// Entries that are declared where they are, or can't be found in any super class, resolve to themselves.
#[derive(Debug, Clone, Copy)]
pub struct IndexEntryResolver<'i> {
	index: &'i InheritanceIndex,
}

impl IndexEntryResolver<'_> {
	fn find_declaration(&self, entry: &Entry, class: &ClassEntry, visited: &mut IndexSet<ClassEntry>) -> Option<Entry> {
		for super_class in self.index.super_classes(class) {
			if !visited.insert(super_class.clone()) {
				continue;
			}

			let candidate = match entry {
				Entry::Class(_) => return None,
				Entry::Field(field) => Entry::Field(field.with_owner(super_class.clone())),
				Entry::Method(method) => Entry::Method(method.with_owner(super_class.clone())),
			};
			if self.index.is_declared(&candidate) {
				return Some(candidate);
			}

			if let Some(found) = self.find_declaration(entry, super_class, visited) {
				return Some(found);
			}
		}
		None
	}
}

impl EntryResolver for IndexEntryResolver<'_> {
	fn resolve_first<'e>(&self, entry: &'e Entry) -> Cow<'e, Entry> {
		let owner = match entry {
			Entry::Class(_) => return Cow::Borrowed(entry),
			Entry::Field(field) => field.owner(),
			Entry::Method(method) => method.owner(),
		};

		if self.index.is_declared(entry) {
			return Cow::Borrowed(entry);
		}

		let mut visited = IndexSet::new();
		visited.insert(owner.clone());

		match self.find_declaration(entry, owner, &mut visited) {
			Some(found) => Cow::Owned(found),
			None => Cow::Borrowed(entry),
		}
	}
}

/// Lazily produces the [`InheritanceIndex`] for writers that need one.
pub trait IndexSupplier {
	fn supply_index(&self) -> Result<Cow<'_, InheritanceIndex>>;
}

impl IndexSupplier for InheritanceIndex {
	fn supply_index(&self) -> Result<Cow<'_, InheritanceIndex>> {
		Ok(Cow::Borrowed(self))
	}
}

/// For callers that don't have an index. Asking it for one fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIndex;

impl IndexSupplier for NoIndex {
	fn supply_index(&self) -> Result<Cow<'_, InheritanceIndex>> {
		bail!("no inheritance index available")
	}
}
