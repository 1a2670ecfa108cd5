use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use anyhow::{bail, Result};
use crate::tree::names::{is_valid_class_name, is_valid_unqualified_name};

/// Identifies a class.
///
/// Inner classes keep their outer class, so `a/b/Outer$Inner` is stored as the class `Inner` inside of `a/b/Outer`.
/// The [name][ClassEntry::name] of a top level class is its full internal name, including the package. The name of
/// an inner class is only the part after the last `$`.
///
/// ```
/// use duke::tree::class::ClassEntry;
///
/// let class = ClassEntry::new("org/example/Outer$Inner")?;
/// assert_eq!(class.name(), "Inner");
/// assert_eq!(class.full_name(), "org/example/Outer$Inner");
/// assert_eq!(class.outer_class().map(ClassEntry::name), Some("org/example/Outer"));
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassEntry {
	outer: Option<Box<ClassEntry>>,
	name: String,
}

impl ClassEntry {
	/// Creates a class entry from a full internal name, splitting off inner classes at each `$`.
	pub fn new(full_name: &str) -> Result<ClassEntry> {
		if !is_valid_class_name(full_name) {
			bail!("invalid class name {full_name:?}");
		}
		Ok(Self::split(full_name))
	}

	fn split(full_name: &str) -> ClassEntry {
		match full_name.rsplit_once('$') {
			Some((outer, inner)) if !outer.is_empty() && !outer.ends_with('/') && !inner.is_empty() && !inner.contains('/') => {
				ClassEntry {
					outer: Some(Box::new(Self::split(outer))),
					name: inner.to_owned(),
				}
			},
			_ => ClassEntry {
				outer: None,
				name: full_name.to_owned(),
			},
		}
	}

	/// Creates an inner class of `outer`, where `name` is only the simple name.
	pub fn inner(outer: ClassEntry, name: &str) -> Result<ClassEntry> {
		if !is_valid_unqualified_name(name) {
			bail!("invalid inner class name {name:?} for outer class {outer}");
		}
		Ok(ClassEntry {
			outer: Some(Box::new(outer)),
			name: name.to_owned(),
		})
	}

	/// Creates either a top level class (if `outer` is `None`) or an inner class.
	pub fn from_parts(outer: Option<ClassEntry>, name: &str) -> Result<ClassEntry> {
		match outer {
			Some(outer) => ClassEntry::inner(outer, name),
			None => ClassEntry::new(name),
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn outer_class(&self) -> Option<&ClassEntry> {
		self.outer.as_deref()
	}

	pub fn is_inner_class(&self) -> bool {
		self.outer.is_some()
	}

	/// Returns the top level class this class is nested in, or itself.
	pub fn outermost_class(&self) -> &ClassEntry {
		match &self.outer {
			Some(outer) => outer.outermost_class(),
			None => self,
		}
	}

	/// The full internal name, like `a/b/Outer$Inner`.
	pub fn full_name(&self) -> String {
		let mut s = String::new();
		self.push_full_name(&mut s);
		s
	}

	fn push_full_name(&self, s: &mut String) {
		if let Some(outer) = &self.outer {
			outer.push_full_name(s);
			s.push('$');
		}
		s.push_str(&self.name);
	}

	/// The name without the package, for inner classes this is the same as [`ClassEntry::name`].
	pub fn simple_name(&self) -> &str {
		if self.outer.is_some() {
			&self.name
		} else {
			self.name.rsplit_once('/').map_or(self.name.as_str(), |(_, simple)| simple)
		}
	}

	/// The package of the outermost class, like `a/b` for `a/b/Outer$Inner`.
	pub fn package_name(&self) -> Option<&str> {
		self.outermost_class().name.rsplit_once('/').map(|(package, _)| package)
	}
}

impl Display for ClassEntry {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		if let Some(outer) = &self.outer {
			write!(f, "{outer}$")?;
		}
		f.write_str(&self.name)
	}
}

impl PartialOrd for ClassEntry {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

/// Orders by the full name, lexically.
impl Ord for ClassEntry {
	fn cmp(&self, other: &Self) -> Ordering {
		self.full_name().cmp(&other.full_name())
			.then_with(|| self.outer.cmp(&other.outer))
			.then_with(|| self.name.cmp(&other.name))
	}
}

impl TryFrom<&str> for ClassEntry {
	type Error = anyhow::Error;

	fn try_from(value: &str) -> Result<ClassEntry> {
		ClassEntry::new(value)
	}
}
