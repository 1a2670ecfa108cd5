use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use anyhow::{anyhow, bail, Context, Result};
use crate::tree::class::ClassEntry;
use crate::tree::descriptor::FieldDescriptor;
use crate::tree::names::is_valid_unqualified_name;

/// Identifies a field by its owner, its name and its descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldEntry {
	owner: ClassEntry,
	name: String,
	desc: FieldDescriptor,
}

impl FieldEntry {
	pub fn new(owner: ClassEntry, name: &str, desc: &str) -> Result<FieldEntry> {
		let desc = FieldDescriptor::try_from(desc)
			.with_context(|| anyhow!("for field {name:?} in class {owner}"))?;
		FieldEntry::from_parts(owner, name, desc)
	}

	pub fn from_parts(owner: ClassEntry, name: &str, desc: FieldDescriptor) -> Result<FieldEntry> {
		if !is_valid_unqualified_name(name) {
			bail!("invalid field name {name:?} in class {owner}");
		}
		Ok(FieldEntry { owner, name: name.to_owned(), desc })
	}

	pub fn owner(&self) -> &ClassEntry {
		&self.owner
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn desc(&self) -> &FieldDescriptor {
		&self.desc
	}

	/// The same field, but declared in `owner`.
	pub fn with_owner(&self, owner: ClassEntry) -> FieldEntry {
		FieldEntry { owner, name: self.name.clone(), desc: self.desc.clone() }
	}
}

impl Display for FieldEntry {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}.{}:{}", self.owner, self.name, self.desc)
	}
}

impl PartialOrd for FieldEntry {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

/// Orders by name, then descriptor. The owner only breaks ties.
impl Ord for FieldEntry {
	fn cmp(&self, other: &Self) -> Ordering {
		self.name.cmp(&other.name)
			.then_with(|| self.desc.cmp(&other.desc))
			.then_with(|| self.owner.cmp(&other.owner))
	}
}
