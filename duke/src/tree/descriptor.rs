use std::fmt::{Display, Formatter};
use std::iter::Peekable;
use std::str::Chars;
use anyhow::{anyhow, bail, Context, Result};
use crate::tree::names::is_valid_class_name;

// The grammar for descriptors is:
//   FieldDescriptor:
//     FieldType
//
//   MethodDescriptor:
//     "(" FieldType* ")" ReturnDescriptor
//
//   ReturnDescriptor:
//     FieldType | "V"
//
//   FieldType:
//     "B" | "C" | "D" | "F" | "I" | "J" | "S" | "Z" |
//     "L" ClassName ";" |
//     "[" FieldType
fn read_field_type(chars: &mut Peekable<Chars>) -> Result<()> {
	let mut array_dimension = 0usize;
	while chars.next_if_eq(&'[').is_some() {
		array_dimension += 1;
	}
	if array_dimension > 255 {
		bail!("array dimension of {array_dimension} is larger than the allowed 255");
	}

	match chars.next() {
		Some('B' | 'C' | 'D' | 'F' | 'I' | 'J' | 'S' | 'Z') => Ok(()),
		Some('L') => {
			let mut class_name = String::new();
			loop {
				match chars.next() {
					Some(';') => break,
					Some(char) => class_name.push(char),
					None => bail!("unexpected abrupt ending of descriptor"),
				}
			}

			if !is_valid_class_name(&class_name) {
				bail!("invalid class name {class_name:?} in descriptor");
			}
			Ok(())
		},
		Some(x) => bail!("unexpected char {x:?} in descriptor"),
		None => bail!("unexpected abrupt ending of descriptor"),
	}
}

fn check_end(chars: &mut Peekable<Chars>) -> Result<()> {
	let rest: String = chars.collect();
	if !rest.is_empty() {
		bail!("trailing characters {rest:?} after descriptor");
	}
	Ok(())
}

/// Replaces every class name referenced in a descriptor by the output of `f`.
///
/// The descriptor must already be valid, this doesn't check the grammar, it only looks at the `L...;` parts.
fn map_class_names(desc: &str, mut f: impl FnMut(&str) -> Result<String>) -> Result<String> {
	let mut s = String::with_capacity(desc.len());

	let mut iter = desc.chars();

	while let Some(ch) = iter.next() {
		s.push(ch);

		if ch == 'L' {
			let mut class_name = String::new();
			for ch in iter.by_ref() {
				if ch == ';' {
					break;
				}
				class_name.push(ch);
			}

			let new_class_name = f(&class_name)?;

			s.push_str(&new_class_name);
			s.push(';');
		}
	}

	Ok(s)
}

/// The descriptor of a field, for example `I` or `[Ljava/lang/String;`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldDescriptor(String);

impl FieldDescriptor {
	pub fn check_valid(s: &str) -> Result<()> {
		let mut chars = s.chars().peekable();
		read_field_type(&mut chars)?;
		check_end(&mut chars)
	}

	pub fn is_valid(s: &str) -> bool {
		Self::check_valid(s).is_ok()
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Returns a new descriptor where each class name was passed through `f`.
	///
	/// ```
	/// use duke::tree::descriptor::FieldDescriptor;
	///
	/// let desc = FieldDescriptor::try_from("[La/b;")?;
	/// let mapped = desc.map_class_names(|name| Ok(name.replace('a', "x")))?;
	/// assert_eq!(mapped.as_str(), "[Lx/b;");
	/// # Ok::<(), anyhow::Error>(())
	/// ```
	pub fn map_class_names(&self, f: impl FnMut(&str) -> Result<String>) -> Result<FieldDescriptor> {
		map_class_names(&self.0, f)
			.and_then(FieldDescriptor::try_from)
			.with_context(|| anyhow!("failed to map class names of field descriptor {self}"))
	}
}

impl TryFrom<String> for FieldDescriptor {
	type Error = anyhow::Error;

	fn try_from(value: String) -> Result<FieldDescriptor> {
		FieldDescriptor::check_valid(&value)
			.with_context(|| anyhow!("invalid field descriptor {value:?}"))?;
		Ok(FieldDescriptor(value))
	}
}

impl TryFrom<&str> for FieldDescriptor {
	type Error = anyhow::Error;

	fn try_from(value: &str) -> Result<FieldDescriptor> {
		FieldDescriptor::try_from(value.to_owned())
	}
}

impl Display for FieldDescriptor {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.0)
	}
}

/// The descriptor of a method, for example `()V` or `(ILjava/lang/Object;)[J`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MethodDescriptor(String);

impl MethodDescriptor {
	pub fn check_valid(s: &str) -> Result<()> {
		let mut chars = s.chars().peekable();

		if chars.next() != Some('(') {
			bail!("method descriptor must start with '('");
		}
		loop {
			match chars.peek() {
				Some(')') => break,
				Some(_) => read_field_type(&mut chars)?,
				None => bail!("unexpected abrupt ending of descriptor, missing ')'"),
			}
		}
		chars.next(); // the ')'

		if chars.next_if_eq(&'V').is_none() {
			read_field_type(&mut chars)?;
		}
		check_end(&mut chars)
	}

	pub fn is_valid(s: &str) -> bool {
		Self::check_valid(s).is_ok()
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Returns a new descriptor where each class name was passed through `f`.
	pub fn map_class_names(&self, f: impl FnMut(&str) -> Result<String>) -> Result<MethodDescriptor> {
		map_class_names(&self.0, f)
			.and_then(MethodDescriptor::try_from)
			.with_context(|| anyhow!("failed to map class names of method descriptor {self}"))
	}
}

impl TryFrom<String> for MethodDescriptor {
	type Error = anyhow::Error;

	fn try_from(value: String) -> Result<MethodDescriptor> {
		MethodDescriptor::check_valid(&value)
			.with_context(|| anyhow!("invalid method descriptor {value:?}"))?;
		Ok(MethodDescriptor(value))
	}
}

impl TryFrom<&str> for MethodDescriptor {
	type Error = anyhow::Error;

	fn try_from(value: &str) -> Result<MethodDescriptor> {
		MethodDescriptor::try_from(value.to_owned())
	}
}

impl Display for MethodDescriptor {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.0)
	}
}

#[cfg(test)]
mod testing {
	use anyhow::Result;
	use pretty_assertions::assert_eq;
	use crate::tree::descriptor::{FieldDescriptor, MethodDescriptor};

	#[test]
	fn map_field_desc() -> Result<()> {
		let desc = FieldDescriptor::try_from("[[LclassA2$innerA1;")?;
		let mapped = desc.map_class_names(|name| Ok(match name {
			"classA2$innerA1" => "classB2$innerB1".to_owned(),
			name => name.to_owned(),
		}))?;
		assert_eq!(mapped.as_str(), "[[LclassB2$innerB1;");

		let desc = FieldDescriptor::try_from("J")?;
		assert_eq!(desc.map_class_names(|_| Ok("unused".to_owned()))?, desc);
		Ok(())
	}

	#[test]
	fn map_method_desc() -> Result<()> {
		let desc = MethodDescriptor::try_from("([LclassA1;ILclassA2;)LclassA1;")?;
		let mapped = desc.map_class_names(|name| Ok(name.replace('A', "B")))?;
		assert_eq!(mapped.as_str(), "([LclassB1;ILclassB2;)LclassB1;");
		Ok(())
	}

	#[test]
	fn map_to_invalid_name_fails() -> Result<()> {
		let desc = FieldDescriptor::try_from("La;")?;
		assert!(desc.map_class_names(|_| Ok("a//b".to_owned())).is_err());
		Ok(())
	}

	#[test]
	fn array_dimension_limit() {
		let ok = format!("{}I", "[".repeat(255));
		let too_deep = format!("{}I", "[".repeat(256));
		assert!(FieldDescriptor::is_valid(&ok));
		assert!(!FieldDescriptor::is_valid(&too_deep));
	}
}
