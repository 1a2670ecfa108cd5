pub mod class;
pub mod descriptor;
pub mod entry;
pub mod field;
pub mod method;

mod names {
	/// Checks if a class name is valid according to JVMS 4.2.1.
	///
	/// Entries never name array classes, so unlike the JVMS this rejects names starting with `[`.
	pub(crate) fn is_valid_class_name(x: &str) -> bool {
		// a list of identifiers split by /
		// each identifier must be an unqualified name
		x.split('/').all(is_valid_unqualified_name)
	}

	/// Checks if a name is an unqualified name according to JVMS 4.2.2
	///
	/// This is used for field names and the names of inner classes.
	pub(crate) fn is_valid_unqualified_name(x: &str) -> bool {
		// must contain at least one unicode codepoint
		!x.is_empty() &&
			// must not contain any of . ; [ /
			x.chars().all(|c| !matches!(c, '.' | ';' | '[' | '/'))
	}

	/// Checks if a method name is valid according to JVMS 4.2.2
	pub(crate) fn is_valid_method_name(x: &str) -> bool {
		// either one of the special names or an unqualified name with special < > restriction
		x == "<init>" || x == "<clinit>" || (
			// must contain at least one unicode codepoint
			!x.is_empty() &&
				x.chars().all(|c| !matches!(c, '.' | ';' | '[' | '/' | '<' | '>'))
		)
	}

}
