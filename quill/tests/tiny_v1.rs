use std::fs;
use std::path::Path;
use anyhow::Result;
use pretty_assertions::assert_eq;
use duke::tree::class::ClassEntry;
use duke::tree::entry::Entry;
use duke::tree::field::FieldEntry;
use duke::tree::method::MethodEntry;
use quill::format::{Destination, MappingFormat, MappingsOptions, MappingsWriter, PathType, WriteError};
use quill::progress::NoProgress;
use quill::resolver::NoIndex;
use quill::tiny_v1::TinyV1Writer;
use quill::tree::EntryTree;
use quill::tree::mapping::EntryMapping;
use quill::tree::mappings_diff::MappingDelta;

fn write_to(mappings: &EntryTree<EntryMapping>, destination: &Destination, options: &MappingsOptions) -> Result<(), WriteError> {
	MappingFormat::TinyV1.write(mappings, &MappingDelta::added(mappings), destination, &mut NoProgress, options, &NoIndex)
}

fn labels() -> MappingsOptions {
	MappingsOptions::new()
		.with("nameObf", "left")
		.with("nameDeobf", "right")
}

fn dir_entries(dir: &Path) -> Result<Vec<String>> {
	let mut names = Vec::new();
	for entry in fs::read_dir(dir)? {
		names.push(entry?.file_name().to_string_lossy().into_owned());
	}
	names.sort();
	Ok(names)
}

fn hello_world() -> Result<EntryTree<EntryMapping>> {
	let mut mappings = EntryTree::new();
	mappings.insert(ClassEntry::new("a")?.into(), EntryMapping::new("HelloWorld"));
	mappings.insert(FieldEntry::new(ClassEntry::new("a")?, "b", "I")?.into(), EntryMapping::new("counter"));
	Ok(mappings)
}

#[test]
fn hello_world_scenario() -> Result<()> {
	let dir = tempfile::tempdir()?;
	let destination = Destination::file(dir.path().join("out.tiny"));

	write_to(&hello_world()?, &destination, &labels())?;

	assert_eq!(fs::read_to_string(destination.path())?, "v1\tleft\tright\nCLASS\ta\tHelloWorld\nFIELD\ta\tI\tb\n");
	assert_eq!(dir_entries(dir.path())?, ["out.tiny"]);
	Ok(())
}

#[test]
fn empty_tree_writes_only_the_header() -> Result<()> {
	let dir = tempfile::tempdir()?;
	let destination = Destination::file(dir.path().join("out.tiny"));

	write_to(&EntryTree::new(), &destination, &labels())?;

	assert_eq!(fs::read_to_string(destination.path())?, "v1\tleft\tright\n");
	Ok(())
}

#[test]
fn no_op_renames_are_not_written() -> Result<()> {
	let dir = tempfile::tempdir()?;
	let destination = Destination::file(dir.path().join("out.tiny"));

	let mut mappings = EntryTree::new();
	mappings.insert(ClassEntry::new("a")?.into(), EntryMapping::new("a"));
	mappings.insert(FieldEntry::new(ClassEntry::new("a")?, "b", "I")?.into(), EntryMapping::new("b"));
	mappings.insert(MethodEntry::new(ClassEntry::new("a")?, "c", "()V")?.into(), EntryMapping::new("run"));
	mappings.insert(ClassEntry::new("a$d")?.into(), EntryMapping::new("d"));

	write_to(&mappings, &destination, &labels())?;

	assert_eq!(fs::read_to_string(destination.path())?, "v1\tleft\tright\nMETHOD\ta\t()V\tc\n");
	Ok(())
}

#[test]
fn order_does_not_depend_on_insertion() -> Result<()> {
	let dir = tempfile::tempdir()?;

	let entries: Vec<(Entry, EntryMapping)> = vec![
		(ClassEntry::new("z/b")?.into(), EntryMapping::new("Zeta")),
		(MethodEntry::new(ClassEntry::new("a")?, "x", "(I)V")?.into(), EntryMapping::new("setValue")),
		(ClassEntry::new("a$b")?.into(), EntryMapping::new("Inner")),
		(FieldEntry::new(ClassEntry::new("a")?, "y", "J")?.into(), EntryMapping::new("value")),
		(ClassEntry::new("a")?.into(), EntryMapping::new("Outer")),
		(MethodEntry::new(ClassEntry::new("a")?, "x", "()I")?.into(), EntryMapping::new("getValue")),
		(FieldEntry::new(ClassEntry::new("a$b")?, "c", "La;")?.into(), EntryMapping::new("parent")),
	];

	let forward: EntryTree<_> = entries.iter().cloned().collect();
	let backward: EntryTree<_> = entries.iter().rev().cloned().collect();

	let first = Destination::file(dir.path().join("first.tiny"));
	let second = Destination::file(dir.path().join("second.tiny"));
	write_to(&forward, &first, &labels())?;
	write_to(&backward, &second, &labels())?;

	let expected = "\
v1\tleft\tright
CLASS\ta\tOuter
FIELD\ta\tJ\ty
METHOD\ta\t()I\tx
METHOD\ta\t(I)V\tx
CLASS\ta$b\tOuter$Inner
FIELD\ta$b\tLa;\tc
CLASS\tz/b\tZeta
";
	assert_eq!(fs::read_to_string(first.path())?, expected);
	assert_eq!(fs::read(first.path())?, fs::read(second.path())?);
	Ok(())
}

#[test]
fn identical_lines_are_written_once() -> Result<()> {
	let dir = tempfile::tempdir()?;
	let destination = Destination::file(dir.path().join("out.tiny"));

	// two different entries, both printed as the field f of a$b$c
	let split = ClassEntry::new("a$b$c")?;
	let joined = ClassEntry::inner(ClassEntry::new("a")?, "b$c")?;
	assert_ne!(split, joined);

	let mut mappings = EntryTree::new();
	mappings.insert(FieldEntry::new(split, "f", "I")?.into(), EntryMapping::new("x"));
	mappings.insert(FieldEntry::new(joined, "f", "I")?.into(), EntryMapping::new("x"));

	write_to(&mappings, &destination, &labels())?;

	assert_eq!(fs::read_to_string(destination.path())?, "v1\tleft\tright\nFIELD\ta$b$c\tI\tf\n");
	Ok(())
}

#[test]
fn sequential_writes_are_independent() -> Result<()> {
	let dir = tempfile::tempdir()?;
	let mappings = hello_world()?;
	let writer = TinyV1Writer;

	let mut contents = Vec::new();
	for name in ["one.tiny", "two.tiny"] {
		let destination = Destination::file(dir.path().join(name));
		writer.write(&mappings, &MappingDelta::empty(), &destination, &mut NoProgress, &labels(), &NoIndex)?;
		contents.push(fs::read_to_string(destination.path())?);
	}

	assert_eq!(contents[0], contents[1]);
	assert_eq!(contents[1].lines().count(), 3);
	Ok(())
}

#[test]
fn existing_destination_is_replaced() -> Result<()> {
	let dir = tempfile::tempdir()?;
	let destination = Destination::file(dir.path().join("out.tiny"));
	fs::write(destination.path(), "some old content that is much longer than the new one\n".repeat(10))?;

	write_to(&EntryTree::new(), &destination, &MappingsOptions::new())?;

	assert_eq!(fs::read_to_string(destination.path())?, "v1\t\t\n");
	Ok(())
}

#[test]
fn directory_layout_is_rejected() -> Result<()> {
	let dir = tempfile::tempdir()?;
	let destination = Destination::detect(dir.path());
	assert_eq!(destination.layout(), PathType::Directory);

	let result = write_to(&hello_world()?, &destination, &labels());

	assert!(matches!(result, Err(WriteError::UnsupportedLayout { format: MappingFormat::TinyV1, layout: PathType::Directory })));
	assert!(dir_entries(dir.path())?.is_empty());
	Ok(())
}

#[test]
fn unknown_options_are_rejected() -> Result<()> {
	let dir = tempfile::tempdir()?;
	let destination = Destination::file(dir.path().join("out.tiny"));

	let result = write_to(&hello_world()?, &destination, &labels().with("nameIntermediary", "x"));

	assert!(matches!(result, Err(WriteError::UnknownOption { key, .. }) if key == "nameIntermediary"));
	assert!(dir_entries(dir.path())?.is_empty());
	Ok(())
}

#[test]
fn missing_parent_directory_is_an_io_error() -> Result<()> {
	let dir = tempfile::tempdir()?;
	let path = dir.path().join("missing").join("out.tiny");

	let result = write_to(&hello_world()?, &Destination::file(&path), &labels());

	assert!(matches!(result, Err(WriteError::Io { path: error_path, .. }) if error_path == path));
	assert!(dir_entries(dir.path())?.is_empty());
	Ok(())
}

#[test]
fn other_partial_files_are_left_alone() -> Result<()> {
	let dir = tempfile::tempdir()?;
	let destination = Destination::file(dir.path().join("out.tiny"));
	let partial = dir.path().join("out.tiny.partial");
	fs::write(&partial, "precious\n")?;

	write_to(&hello_world()?, &destination, &labels())?;

	assert_eq!(fs::read_to_string(&partial)?, "precious\n");
	assert_eq!(fs::read_to_string(destination.path())?, "v1\tleft\tright\nCLASS\ta\tHelloWorld\nFIELD\ta\tI\tb\n");
	assert_eq!(dir_entries(dir.path())?, ["out.tiny", "out.tiny.partial"]);
	Ok(())
}

#[test]
fn failed_translation_keeps_the_old_file() -> Result<()> {
	let dir = tempfile::tempdir()?;
	let destination = Destination::file(dir.path().join("out.tiny"));
	fs::write(destination.path(), "old\n")?;

	// an inner class can't be renamed to a name with a package
	let mut mappings = EntryTree::new();
	mappings.insert(ClassEntry::new("a$b")?.into(), EntryMapping::new("pkg/Name"));

	let result = write_to(&mappings, &destination, &labels());

	assert!(matches!(result, Err(WriteError::Translate { entry: Entry::Class(ref class), .. }) if class.full_name() == "a$b"));
	assert_eq!(fs::read_to_string(destination.path())?, "old\n");
	assert_eq!(dir_entries(dir.path())?, ["out.tiny"]);
	Ok(())
}
