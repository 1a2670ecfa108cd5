//! The registry of mapping formats, and everything needed to ask one of them to write mappings.
//!
//! ```
//! use quill::format::{Destination, MappingFormat, MappingsOptions};
//! use quill::progress::NoProgress;
//! use quill::resolver::NoIndex;
//! use quill::tree::EntryTree;
//! use quill::tree::mappings_diff::MappingDelta;
//!
//! let dir = tempfile::tempdir()?;
//! let destination = Destination::file(dir.path().join("mappings.tiny"));
//! let options = MappingsOptions::default()
//! 	.with("nameObf", "official")
//! 	.with("nameDeobf", "named");
//!
//! MappingFormat::TinyV1.write(&EntryTree::new(), &MappingDelta::empty(), &destination, &mut NoProgress, &options, &NoIndex)?;
//!
//! assert_eq!(std::fs::read_to_string(destination.path())?, "v1\tofficial\tnamed\n");
//! # Ok::<(), anyhow::Error>(())
//! ```

use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use anyhow::{bail, Result};
use indexmap::IndexMap;
use thiserror::Error;
use duke::tree::entry::Entry;
use crate::progress::ProgressListener;
use crate::resolver::IndexSupplier;
use crate::tiny_v1::{self, TinyV1Writer};
use crate::tree::EntryTree;
use crate::tree::mapping::EntryMapping;
use crate::tree::mappings_diff::MappingDelta;

/// What kind of file system object mappings are written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathType {
	File,
	Directory,
}

impl PathType {
	/// An existing directory is a [`PathType::Directory`], anything else (including paths that don't exist yet) is a
	/// [`PathType::File`].
	pub fn of(path: &Path) -> PathType {
		if path.is_dir() {
			PathType::Directory
		} else {
			PathType::File
		}
	}
}

impl Display for PathType {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(match self {
			PathType::File => "file",
			PathType::Directory => "directory",
		})
	}
}

/// Where to write mappings to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
	path: PathBuf,
	layout: PathType,
}

impl Destination {
	pub fn new(path: impl Into<PathBuf>, layout: PathType) -> Destination {
		Destination { path: path.into(), layout }
	}

	pub fn file(path: impl Into<PathBuf>) -> Destination {
		Destination::new(path, PathType::File)
	}

	/// Uses [`PathType::of`] to figure out the layout.
	pub fn detect(path: impl Into<PathBuf>) -> Destination {
		let path = path.into();
		let layout = PathType::of(&path);
		Destination { path, layout }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	pub fn layout(&self) -> PathType {
		self.layout
	}
}

/// An option a format understands, together with the value used if it isn't given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappingsOption {
	key: &'static str,
	default: &'static str,
}

impl MappingsOption {
	pub const fn new(key: &'static str, default: &'static str) -> MappingsOption {
		MappingsOption { key, default }
	}

	pub fn key(&self) -> &'static str {
		self.key
	}

	pub fn default(&self) -> &'static str {
		self.default
	}
}

/// The options given to a writer, as key value pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingsOptions {
	values: IndexMap<String, String>,
}

impl MappingsOptions {
	pub fn new() -> MappingsOptions {
		MappingsOptions::default()
	}

	/// Sets `key` to `value`, returning the previous value.
	pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
		self.values.insert(key.into(), value.into())
	}

	pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> MappingsOptions {
		self.set(key, value);
		self
	}

	/// Gets the value for `option`, or its default if it wasn't set.
	pub fn get(&self, option: &MappingsOption) -> &str {
		self.values.get(option.key)
			.map_or(option.default, String::as_str)
	}

	pub fn keys(&self) -> impl Iterator<Item=&str> {
		self.values.keys().map(String::as_str)
	}

	/// Parses an option given as `key=value`. The value may be empty, and may contain more `=`.
	pub fn parse_pair(s: &str) -> Result<(String, String)> {
		match s.split_once('=') {
			Some(("", _)) => bail!("empty key in option {s:?}"),
			Some((key, value)) => Ok((key.to_owned(), value.to_owned())),
			None => bail!("option {s:?} isn't of the form key=value"),
		}
	}
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MappingsOptions {
	fn from_iter<T: IntoIterator<Item=(K, V)>>(iter: T) -> Self {
		let mut options = MappingsOptions::new();
		for (key, value) in iter {
			options.set(key, value);
		}
		options
	}
}

#[derive(Debug, Error)]
pub enum WriteError {
	#[error("failed to write mappings to {path:?}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("{format} mappings can't be written to a {layout}")]
	UnsupportedLayout {
		format: MappingFormat,
		layout: PathType,
	},
	#[error("{format} mappings don't have an option {key:?}")]
	UnknownOption {
		format: MappingFormat,
		key: String,
	},
	#[error("failed to translate {entry}")]
	Translate {
		entry: Entry,
		#[source]
		source: Box<dyn std::error::Error + Send + Sync>,
	},
	/// Writing to the output stream failed, where the stream isn't a known file.
	#[error(transparent)]
	Write(#[from] std::io::Error),
}

impl WriteError {
	/// Reports a failure of the output stream as a failure to write `path`. Other errors are kept as they are.
	pub(crate) fn at_path(self, path: &Path) -> WriteError {
		match self {
			WriteError::Write(source) => WriteError::Io { path: path.to_owned(), source },
			e => e,
		}
	}
}

/// A writer for one [`MappingFormat`].
pub trait MappingsWriter {
	fn format(&self) -> MappingFormat;

	/// Replaces whatever is at the destination with the mappings.
	///
	/// The `delta` describes what changed since the last write, and the `index` gives access to the class hierarchy.
	/// Writers that don't need them may ignore them.
	#[allow(clippy::too_many_arguments)]
	fn write(
		&self,
		mappings: &EntryTree<EntryMapping>,
		delta: &MappingDelta<EntryMapping>,
		destination: &Destination,
		progress: &mut dyn ProgressListener,
		options: &MappingsOptions,
		index: &dyn IndexSupplier,
	) -> Result<(), WriteError>;
}

/// All the formats mappings can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MappingFormat {
	TinyV1,
}

impl MappingFormat {
	pub const ALL: &'static [MappingFormat] = &[MappingFormat::TinyV1];

	pub fn name(self) -> &'static str {
		match self {
			MappingFormat::TinyV1 => "tiny-v1",
		}
	}

	pub fn from_name(name: &str) -> Option<MappingFormat> {
		MappingFormat::ALL.iter()
			.copied()
			.find(|format| format.name() == name)
	}

	pub fn options(self) -> &'static [MappingsOption] {
		match self {
			MappingFormat::TinyV1 => tiny_v1::OPTIONS,
		}
	}

	pub fn supported_path_types(self) -> &'static [PathType] {
		match self {
			MappingFormat::TinyV1 => &[PathType::File],
		}
	}

	pub fn supports(self, layout: PathType) -> bool {
		self.supported_path_types().contains(&layout)
	}

	pub fn writer(self) -> &'static dyn MappingsWriter {
		match self {
			MappingFormat::TinyV1 => &TinyV1Writer,
		}
	}

	/// Checks that the destination layout and all the options are supported, without touching the file system.
	pub fn check(self, destination: &Destination, options: &MappingsOptions) -> Result<(), WriteError> {
		if !self.supports(destination.layout()) {
			return Err(WriteError::UnsupportedLayout { format: self, layout: destination.layout() });
		}

		if let Some(key) = options.keys().find(|key| !self.options().iter().any(|option| option.key() == *key)) {
			return Err(WriteError::UnknownOption { format: self, key: key.to_owned() });
		}

		Ok(())
	}

	#[allow(clippy::too_many_arguments)]
	pub fn write(
		self,
		mappings: &EntryTree<EntryMapping>,
		delta: &MappingDelta<EntryMapping>,
		destination: &Destination,
		progress: &mut dyn ProgressListener,
		options: &MappingsOptions,
		index: &dyn IndexSupplier,
	) -> Result<(), WriteError> {
		self.writer().write(mappings, delta, destination, progress, options, index)
	}
}

impl Display for MappingFormat {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name())
	}
}
