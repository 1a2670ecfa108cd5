use duke::tree::entry::Entry;

/// A rename of an entry.
///
/// For top level classes the target name is the full name including the package, for everything else it's only the
/// simple name. This matches what [`Entry::name`] returns.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryMapping {
	target_name: String,
}

impl EntryMapping {
	pub fn new(target_name: impl Into<String>) -> EntryMapping {
		EntryMapping { target_name: target_name.into() }
	}

	/// Creates a mapping renaming `entry` to `target_name`, or `None` if that wouldn't change the name.
	pub fn renaming(entry: &Entry, target_name: &str) -> Option<EntryMapping> {
		if entry.name() == target_name {
			None
		} else {
			Some(EntryMapping::new(target_name))
		}
	}

	pub fn target_name(&self) -> &str {
		&self.target_name
	}

	/// Returns `true` if applying this mapping to `entry` changes its name.
	pub fn renames(&self, entry: &Entry) -> bool {
		self.target_name != entry.name()
	}
}
