use anyhow::Result;
use pretty_assertions::assert_eq;
use duke::tree::class::ClassEntry;
use duke::tree::field::FieldEntry;
use duke::tree::method::MethodEntry;

#[test]
fn valid_class_names() -> Result<()> {
	let valid_class_names = [
		"foo",
		"foo$bar",
		"java/lang/Object",
		"org/example/MyClassName",
		"org/example/Outer$Inner$Deeper",
	];

	for i in valid_class_names {
		let class = ClassEntry::new(i)?;
		assert_eq!(class.full_name(), i, "{:?} must survive splitting at '$'", i);
	}

	Ok(())
}

#[test]
fn invalid_class_names() {
	let invalid_class_names = [
		"",
		".",
		"/",
		";",
		"[",
		"a/",
		"/a",
		"[V",
		"L;",
		"//a",
		"a//",
		"a.b",
		"a;b",
		"a[b",
		"L;DV",
		"a//a",
		"[[[D",
	];

	for i in invalid_class_names {
		assert!(ClassEntry::new(i).is_err(), "{:?} is an invalid class name", i);
	}
}

#[test]
fn member_names() -> Result<()> {
	let owner = ClassEntry::new("a")?;

	assert!(FieldEntry::new(owner.clone(), "field", "I").is_ok());
	assert!(FieldEntry::new(owner.clone(), "", "I").is_err());
	assert!(FieldEntry::new(owner.clone(), "a.b", "I").is_err());
	assert!(FieldEntry::new(owner.clone(), "f", "V").is_err());

	assert!(MethodEntry::new(owner.clone(), "<init>", "()V")?.is_constructor());
	assert!(!MethodEntry::new(owner.clone(), "run", "()V")?.is_constructor());
	assert!(MethodEntry::new(owner.clone(), "<foo>", "()V").is_err());
	assert!(MethodEntry::new(owner, "run", "I").is_err());

	Ok(())
}
