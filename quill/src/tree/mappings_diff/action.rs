/// How the value stored at one entry changes.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Action<T> {
	/// There's no value, neither before nor after.
	#[default]
	None,
	Add(T),
	Remove(T),
	/// Replaces the first value with the second.
	Edit(T, T),
}

impl<T> Action<T> {
	/// The action that turns the value `before` into the value `after`.
	pub fn of(before: Option<T>, after: Option<T>) -> Action<T> {
		match (before, after) {
			(Some(before), Some(after)) => Action::Edit(before, after),
			(Some(before), None) => Action::Remove(before),
			(None, Some(after)) => Action::Add(after),
			(None, None) => Action::None,
		}
	}

	pub fn after(&self) -> Option<&T> {
		match self {
			Action::Add(after) | Action::Edit(_, after) => Some(after),
			Action::Remove(_) | Action::None => None,
		}
	}

	/// The action undoing this one.
	pub fn flip(self) -> Action<T> {
		match self {
			Action::Add(value) => Action::Remove(value),
			Action::Remove(value) => Action::Add(value),
			Action::Edit(before, after) => Action::Edit(after, before),
			Action::None => Action::None,
		}
	}
}

impl<T: PartialEq> Action<T> {
	/// Whether applying this action changes anything. Edits to an equal value don't.
	pub fn is_diff(&self) -> bool {
		match self {
			Action::None => false,
			Action::Edit(before, after) => before != after,
			Action::Add(_) | Action::Remove(_) => true,
		}
	}
}
