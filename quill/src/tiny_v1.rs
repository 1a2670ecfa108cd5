//! Writing the Tiny v1 format.
//!
//! A Tiny v1 file is a header, followed by one line per renamed entry. All fields are separated by tabs:
//! ```txt
//! v1	<name of the obfuscated namespace>	<name of the deobfuscated namespace>
//! CLASS	<obfuscated full name>	<deobfuscated full name>
//! FIELD	<obfuscated owner>	<descriptor>	<field name>
//! METHOD	<obfuscated owner>	<descriptor>	<method name>
//! ```
//! Entries that aren't renamed don't get a line. A line that has already been written is never written again.

use std::io::{BufWriter, Write};
use std::path::Path;
use anyhow::{Context, Result};
use indexmap::IndexSet;
use log::{debug, trace, warn};
use tempfile::NamedTempFile;
use duke::tree::entry::Entry;
use crate::format::{Destination, MappingFormat, MappingsOption, MappingsOptions, MappingsWriter, WriteError};
use crate::progress::ProgressListener;
use crate::resolver::IndexSupplier;
use crate::translator::{MappingTranslator, Translator};
use crate::tree::EntryTree;
use crate::tree::mapping::EntryMapping;
use crate::tree::mappings_diff::MappingDelta;

const VERSION: &str = "v1";
const CLASS: &str = "CLASS";
const FIELD: &str = "FIELD";
const METHOD: &str = "METHOD";

/// The label of the obfuscated namespace, written into the header.
pub const NAME_OBF: MappingsOption = MappingsOption::new("nameObf", "");
/// The label of the deobfuscated namespace, written into the header.
pub const NAME_DEOBF: MappingsOption = MappingsOption::new("nameDeobf", "");

pub(crate) const OPTIONS: &[MappingsOption] = &[NAME_OBF, NAME_DEOBF];

/// Writes mappings into a single file, in the Tiny v1 format.
///
/// The writer doesn't hold any state, so one value can be used for any number of writes.
#[derive(Debug, Clone, Copy, Default)]
pub struct TinyV1Writer;

impl MappingsWriter for TinyV1Writer {
	fn format(&self) -> MappingFormat {
		MappingFormat::TinyV1
	}

	/// Writes to a uniquely named `.partial` file next to the destination first, and then replaces the destination
	/// with it. No other file is touched.
	///
	/// If anything fails, the destination keeps its old content and the `.partial` file is removed.
	fn write(
		&self,
		mappings: &EntryTree<EntryMapping>,
		_delta: &MappingDelta<EntryMapping>,
		destination: &Destination,
		progress: &mut dyn ProgressListener,
		options: &MappingsOptions,
		_index: &dyn IndexSupplier,
	) -> Result<(), WriteError> {
		self.format().check(destination, options)?;

		let path = destination.path();
		let io = |source: std::io::Error| WriteError::Io { path: path.to_owned(), source };

		let mut partial = partial_file(path).map_err(io)?;

		if let Err(e) = write(mappings, progress, options, partial.as_file_mut()) {
			if let Err(close) = partial.close() {
				warn!("failed to remove partially written mappings for {path:?}: {close}");
			}
			return Err(e.at_path(path));
		}

		partial.persist(path)
			.map_err(|e| io(e.error))?;

		debug!("wrote tiny v1 mappings to {path:?}");
		Ok(())
	}
}

/// Creates a new file in the directory of `path`, named like `path` with some random characters and `.partial` added.
fn partial_file(path: &Path) -> std::io::Result<NamedTempFile> {
	let dir = match path.parent() {
		Some(dir) if !dir.as_os_str().is_empty() => dir,
		_ => Path::new("."),
	};
	let name = path.file_name().unwrap_or_default();

	tempfile::Builder::new()
		.prefix(name)
		.suffix(".partial")
		.tempfile_in(dir)
}

/// Writes the mappings into a `String`, see [`write`][fn@write].
pub fn write_string(mappings: &EntryTree<EntryMapping>, options: &MappingsOptions) -> Result<String> {
	let vec = write_vec(mappings, options)?;
	String::from_utf8(vec).context("failed to convert written mappings to utf8")
}

/// Writes the mappings into a `Vec<u8>`, see [`write`][fn@write].
pub fn write_vec(mappings: &EntryTree<EntryMapping>, options: &MappingsOptions) -> Result<Vec<u8>> {
	let mut vec = Vec::new();
	write(mappings, &mut crate::progress::NoProgress, options, &mut vec)?;
	Ok(vec)
}

#[allow(clippy::tabs_in_doc_comments)]
/// Writes the mappings to the given writer, in the Tiny v1 format.
///
/// Top level classes are written sorted by their name. Below each class, first its fields, then its methods and last
/// its inner classes are written, each of them sorted.
///
/// This doesn't check the options, unknown ones are ignored. See [`MappingFormat::check`] for that.
///
/// ```
/// # use pretty_assertions::assert_eq;
/// use duke::tree::class::ClassEntry;
/// use duke::tree::field::FieldEntry;
/// use quill::format::MappingsOptions;
/// use quill::tree::EntryTree;
/// use quill::tree::mapping::EntryMapping;
///
/// let mut mappings = EntryTree::new();
/// mappings.insert(ClassEntry::new("a")?.into(), EntryMapping::new("HelloWorld"));
/// mappings.insert(FieldEntry::new(ClassEntry::new("a")?, "b", "I")?.into(), EntryMapping::new("counter"));
///
/// let options = MappingsOptions::new()
/// 	.with("nameObf", "left")
/// 	.with("nameDeobf", "right");
///
/// let written = quill::tiny_v1::write_string(&mappings, &options)?;
///
/// let output = "\
/// v1	left	right
/// CLASS	a	HelloWorld
/// FIELD	a	I	b
/// ";
///
/// assert_eq!(written, output);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn write(
	mappings: &EntryTree<EntryMapping>,
	progress: &mut dyn ProgressListener,
	options: &MappingsOptions,
	w: &mut impl Write,
) -> Result<(), WriteError> {
	// the buffering makes it much faster
	let mut w = BufWriter::new(w);
	let w = &mut w;

	let mut context = WriteContext {
		mappings,
		translator: MappingTranslator::new(mappings),
		written: IndexSet::new(),
	};

	context.write_line(w, format!("{VERSION}\t{}\t{}", options.get(&NAME_OBF), options.get(&NAME_DEOBF)))?;

	let mut roots: Vec<&Entry> = mappings.root_entries().collect();
	roots.sort_by_cached_key(|entry| entry.to_string());

	progress.init(roots.len(), "Writing classes");
	for (num_done, root) in roots.into_iter().enumerate() {
		progress.step(num_done, root.name());
		context.write_entry(w, root)?;
	}

	w.flush()?;

	debug!("wrote {} tiny v1 lines", context.written.len());
	Ok(())
}

/// The state of a single call to [`write`][fn@write].
struct WriteContext<'a> {
	mappings: &'a EntryTree<EntryMapping>,
	translator: MappingTranslator<'a>,
	written: IndexSet<String>,
}

impl<'a> WriteContext<'a> {
	fn write_entry(&mut self, w: &mut impl Write, entry: &Entry) -> Result<(), WriteError> {
		let mappings = self.mappings;
		let Some(node) = mappings.find_node(entry) else {
			return Ok(());
		};

		if node.value().is_some_and(|mapping| mapping.renames(entry)) {
			let line = self.line(entry)?;
			self.write_line(w, line)?;
		}

		let mut fields = Vec::new();
		let mut methods = Vec::new();
		let mut classes = Vec::new();
		for child in node.children() {
			match child {
				Entry::Field(_) => fields.push(child),
				Entry::Method(_) => methods.push(child),
				Entry::Class(_) => classes.push(child),
			}
		}
		fields.sort();
		methods.sort();
		classes.sort();

		for child in fields.into_iter().chain(methods).chain(classes) {
			self.write_entry(w, child)?;
		}

		Ok(())
	}

	fn line(&self, entry: &Entry) -> Result<String, WriteError> {
		Ok(match entry {
			Entry::Class(class) => {
				let translated = self.translator.translate_class(class)
					.map_err(|source| WriteError::Translate { entry: entry.clone(), source: source.into() })?;

				format!("{CLASS}\t{}\t{}", class.full_name(), translated.full_name())
			},
			Entry::Field(field) => format!("{FIELD}\t{}\t{}\t{}", field.owner().full_name(), field.desc(), field.name()),
			Entry::Method(method) => format!("{METHOD}\t{}\t{}\t{}", method.owner().full_name(), method.desc(), method.name()),
		})
	}

	fn write_line(&mut self, w: &mut impl Write, line: String) -> Result<(), WriteError> {
		if self.written.contains(&line) {
			trace!("not writing duplicate line {line:?}");
			return Ok(());
		}

		writeln!(w, "{line}")?;
		self.written.insert(line);
		Ok(())
	}
}
