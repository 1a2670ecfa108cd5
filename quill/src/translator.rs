//! Applying mappings to entries.

use anyhow::{anyhow, Context, Result};
use duke::tree::class::ClassEntry;
use duke::tree::descriptor::{FieldDescriptor, MethodDescriptor};
use duke::tree::entry::Entry;
use duke::tree::field::FieldEntry;
use duke::tree::method::MethodEntry;
use crate::resolver::{EntryResolver, VoidEntryResolver};
use crate::tree::EntryTree;
use crate::tree::mapping::EntryMapping;

/// Computes what an entry is called after renaming.
///
/// Translating never changes the mappings, and translating the same entry twice gives the same result.
pub trait Translator {
	fn translate_class(&self, class: &ClassEntry) -> Result<ClassEntry>;
	fn translate_field(&self, field: &FieldEntry) -> Result<FieldEntry>;
	fn translate_method(&self, method: &MethodEntry) -> Result<MethodEntry>;

	fn translate(&self, entry: &Entry) -> Result<Entry> {
		Ok(match entry {
			Entry::Class(class) => Entry::Class(self.translate_class(class)?),
			Entry::Field(field) => Entry::Field(self.translate_field(field)?),
			Entry::Method(method) => Entry::Method(self.translate_method(method)?),
		})
	}

	/// Translates a full internal class name, like the ones found in descriptors.
	fn translate_class_name(&self, name: &str) -> Result<String> {
		let class = ClassEntry::new(name)?;
		Ok(self.translate_class(&class)?.full_name())
	}

	fn translate_field_desc(&self, desc: &FieldDescriptor) -> Result<FieldDescriptor> {
		desc.map_class_names(|name| self.translate_class_name(name))
	}

	fn translate_method_desc(&self, desc: &MethodDescriptor) -> Result<MethodDescriptor> {
		desc.map_class_names(|name| self.translate_class_name(name))
	}
}

/// A [`Translator`] looking up renames in an [`EntryTree`].
///
/// A class is translated by translating its outer class (if any) and then replacing its own name, so with the
/// mappings `Outer -> A` and `Outer$Inner -> B` the class `Outer$Inner` becomes `A$B`. Fields and methods get their
/// owner and descriptor translated, their name only changes if they are mapped themselves.
#[derive(Debug, Clone, Copy)]
pub struct MappingTranslator<'a, R = VoidEntryResolver> {
	mappings: &'a EntryTree<EntryMapping>,
	resolver: R,
}

impl<'a> MappingTranslator<'a> {
	pub fn new(mappings: &'a EntryTree<EntryMapping>) -> MappingTranslator<'a> {
		MappingTranslator::with_resolver(mappings, VoidEntryResolver)
	}
}

impl<'a, R: EntryResolver> MappingTranslator<'a, R> {
	pub fn with_resolver(mappings: &'a EntryTree<EntryMapping>, resolver: R) -> MappingTranslator<'a, R> {
		MappingTranslator { mappings, resolver }
	}

	fn target_name(&self, entry: &Entry) -> Option<&'a str> {
		let resolved = self.resolver.resolve_first(entry);
		self.mappings.get(&resolved).map(EntryMapping::target_name)
	}
}

impl<R: EntryResolver> Translator for MappingTranslator<'_, R> {
	fn translate_class(&self, class: &ClassEntry) -> Result<ClassEntry> {
		let outer = class.outer_class()
			.map(|outer| self.translate_class(outer))
			.transpose()?;

		let name = self.target_name(&Entry::Class(class.clone()))
			.unwrap_or(class.name());

		ClassEntry::from_parts(outer, name)
			.with_context(|| anyhow!("failed to translate class {class}"))
	}

	fn translate_field(&self, field: &FieldEntry) -> Result<FieldEntry> {
		let owner = self.translate_class(field.owner())?;
		let name = self.target_name(&Entry::Field(field.clone()))
			.unwrap_or(field.name());
		let desc = self.translate_field_desc(field.desc())?;

		FieldEntry::from_parts(owner, name, desc)
			.with_context(|| anyhow!("failed to translate field {field}"))
	}

	fn translate_method(&self, method: &MethodEntry) -> Result<MethodEntry> {
		let owner = self.translate_class(method.owner())?;
		let name = self.target_name(&Entry::Method(method.clone()))
			.unwrap_or(method.name());
		let desc = self.translate_method_desc(method.desc())?;

		MethodEntry::from_parts(owner, name, desc)
			.with_context(|| anyhow!("failed to translate method {method}"))
	}
}
