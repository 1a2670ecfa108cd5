use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use anyhow::{anyhow, bail, Context, Result};
use crate::tree::class::ClassEntry;
use crate::tree::descriptor::MethodDescriptor;
use crate::tree::names::is_valid_method_name;

/// Identifies a method by its owner, its name and its descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodEntry {
	owner: ClassEntry,
	name: String,
	desc: MethodDescriptor,
}

impl MethodEntry {
	pub fn new(owner: ClassEntry, name: &str, desc: &str) -> Result<MethodEntry> {
		let desc = MethodDescriptor::try_from(desc)
			.with_context(|| anyhow!("for method {name:?} in class {owner}"))?;
		MethodEntry::from_parts(owner, name, desc)
	}

	pub fn from_parts(owner: ClassEntry, name: &str, desc: MethodDescriptor) -> Result<MethodEntry> {
		if !is_valid_method_name(name) {
			bail!("invalid method name {name:?} in class {owner}");
		}
		Ok(MethodEntry { owner, name: name.to_owned(), desc })
	}

	pub fn owner(&self) -> &ClassEntry {
		&self.owner
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn desc(&self) -> &MethodDescriptor {
		&self.desc
	}

	pub fn with_owner(&self, owner: ClassEntry) -> MethodEntry {
		MethodEntry { owner, name: self.name.clone(), desc: self.desc.clone() }
	}

	/// Constructors and static initializers can't be renamed.
	pub fn is_constructor(&self) -> bool {
		self.name == "<init>" || self.name == "<clinit>"
	}
}

impl Display for MethodEntry {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}.{}{}", self.owner, self.name, self.desc)
	}
}

impl PartialOrd for MethodEntry {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

/// Orders by name, then descriptor. The owner only breaks ties.
impl Ord for MethodEntry {
	fn cmp(&self, other: &Self) -> Ordering {
		self.name.cmp(&other.name)
			.then_with(|| self.desc.cmp(&other.desc))
			.then_with(|| self.owner.cmp(&other.owner))
	}
}
