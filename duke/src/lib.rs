//! Identifiers for the symbols of compiled java classes.
//!
//! The [`tree::entry::Entry`] type names a class, a field or a method. Entries are what mappings get attached to,
//! see the `quill` crate for that.

pub mod tree;
