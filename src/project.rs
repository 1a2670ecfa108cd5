//! Reading projects, json files listing classes with their members, and what they should be renamed to.
//!
//! ```json
//! {
//!   "classes": [
//!     {
//!       "name": "a",
//!       "deobf": "HelloWorld",
//!       "super_classes": ["java/lang/Object"],
//!       "fields": [ { "name": "b", "desc": "I", "deobf": "counter" } ],
//!       "methods": [ { "name": "c", "desc": "()V" } ],
//!       "classes": [ { "name": "d", "deobf": "Inner" } ]
//!     }
//!   ]
//! }
//! ```
//! Top level classes use their full name, nested classes only their simple name. Leaving out `deobf` (or giving the
//! current name) means the entry isn't renamed.
//!
//! The `super_classes` only feed the [`InheritanceIndex`] handed to the writer. Tiny v1 doesn't read it, so they never
//! change what gets written in that format.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use anyhow::{anyhow, bail, Context, Result};
use log::debug;
use serde::Deserialize;
use duke::tree::class::ClassEntry;
use duke::tree::entry::Entry;
use duke::tree::field::FieldEntry;
use duke::tree::method::MethodEntry;
use quill::resolver::InheritanceIndex;
use quill::tree::EntryTree;
use quill::tree::mapping::EntryMapping;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawProject {
	#[serde(default)]
	classes: Vec<RawClass>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawClass {
	name: String,
	#[serde(default)]
	deobf: Option<String>,
	#[serde(default)]
	super_classes: Vec<String>,
	#[serde(default)]
	fields: Vec<RawMember>,
	#[serde(default)]
	methods: Vec<RawMember>,
	#[serde(default)]
	classes: Vec<RawClass>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawMember {
	name: String,
	desc: String,
	#[serde(default)]
	deobf: Option<String>,
}

/// The renames of a project, together with what's known about its class hierarchy.
#[derive(Debug, Default)]
pub(crate) struct Project {
	pub(crate) mappings: EntryTree<EntryMapping>,
	pub(crate) index: InheritanceIndex,
}

pub(crate) fn read_file(path: &Path) -> Result<Project> {
	let file = File::open(path)
		.with_context(|| anyhow!("failed to open project file {path:?}"))?;

	read(BufReader::new(file))
		.with_context(|| anyhow!("failed to read project file {path:?}"))
}

pub(crate) fn read(reader: impl Read) -> Result<Project> {
	let raw: RawProject = serde_json::from_reader(reader)
		.context("failed to parse project json")?;

	let mut project = Project::default();
	for class in raw.classes {
		project.add_class(None, class)?;
	}

	debug!("read {} renamed entries", project.mappings.values().count());
	Ok(project)
}

impl Project {
	fn add_class(&mut self, outer: Option<&ClassEntry>, raw: RawClass) -> Result<()> {
		let class = match outer {
			Some(outer) => ClassEntry::inner(outer.clone(), &raw.name)?,
			None => ClassEntry::new(&raw.name)?,
		};

		for super_class in &raw.super_classes {
			let super_class = ClassEntry::new(super_class)
				.with_context(|| anyhow!("invalid super class of {class}"))?;
			self.index.add_super_class(class.clone(), super_class);
		}

		self.rename(class.clone().into(), raw.deobf.as_deref());

		for field in raw.fields {
			let entry: Entry = FieldEntry::new(class.clone(), &field.name, &field.desc)?.into();
			self.index.add_declaration(entry.clone());
			self.rename(entry, field.deobf.as_deref());
		}

		for method in raw.methods {
			let entry = MethodEntry::new(class.clone(), &method.name, &method.desc)?;
			if entry.is_constructor() && method.deobf.as_deref().is_some_and(|deobf| deobf != entry.name()) {
				bail!("can't rename {entry}, constructors keep their name");
			}
			let entry: Entry = entry.into();
			self.index.add_declaration(entry.clone());
			self.rename(entry, method.deobf.as_deref());
		}

		for inner in raw.classes {
			self.add_class(Some(&class), inner)
				.with_context(|| anyhow!("in class {class}"))?;
		}

		Ok(())
	}

	fn rename(&mut self, entry: Entry, deobf: Option<&str>) {
		if let Some(mapping) = deobf.and_then(|deobf| EntryMapping::renaming(&entry, deobf)) {
			self.mappings.insert(entry, mapping);
		}
	}
}
