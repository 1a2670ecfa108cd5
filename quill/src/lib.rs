//! Crate for storing renamings of java symbols, and writing them out as mapping files.
//!
//! Mappings live in an [`EntryTree`][tree::EntryTree], which mirrors how classes contain their fields, methods and
//! inner classes. A [`Translator`][translator::Translator] answers what a symbol is called after applying the
//! mappings, and the writers in [`format`] persist the tree. Currently the only format is Tiny v1, see [`tiny_v1`].

pub mod tree;
pub mod translator;
pub mod resolver;
pub mod progress;
pub mod format;
pub mod tiny_v1;
