use std::fmt::{Display, Formatter};
use crate::tree::class::ClassEntry;
use crate::tree::field::FieldEntry;
use crate::tree::method::MethodEntry;

/// Any symbol a mapping can be attached to.
///
/// Two entries are equal if they are the same kind of symbol and have equal owners, names and descriptors.
///
/// The derived ordering sorts classes before fields before methods, and uses the ordering of each kind within that.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Entry {
	Class(ClassEntry),
	Field(FieldEntry),
	Method(MethodEntry),
}

impl Entry {
	/// The current name of the symbol. See [`ClassEntry::name`] for what this means for classes.
	pub fn name(&self) -> &str {
		match self {
			Entry::Class(class) => class.name(),
			Entry::Field(field) => field.name(),
			Entry::Method(method) => method.name(),
		}
	}

	/// The class this entry is contained in.
	///
	/// For fields and methods this is the owner, for inner classes the outer class. Top level classes have none.
	pub fn containing_class(&self) -> Option<&ClassEntry> {
		match self {
			Entry::Class(class) => class.outer_class(),
			Entry::Field(field) => Some(field.owner()),
			Entry::Method(method) => Some(method.owner()),
		}
	}

	/// Same as [`Entry::containing_class`], but as an owned [`Entry`].
	pub fn parent(&self) -> Option<Entry> {
		self.containing_class().cloned().map(Entry::Class)
	}
}

impl Display for Entry {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Entry::Class(class) => Display::fmt(class, f),
			Entry::Field(field) => Display::fmt(field, f),
			Entry::Method(method) => Display::fmt(method, f),
		}
	}
}

impl From<ClassEntry> for Entry {
	fn from(value: ClassEntry) -> Self {
		Entry::Class(value)
	}
}

impl From<FieldEntry> for Entry {
	fn from(value: FieldEntry) -> Self {
		Entry::Field(value)
	}
}

impl From<MethodEntry> for Entry {
	fn from(value: MethodEntry) -> Self {
		Entry::Method(value)
	}
}
