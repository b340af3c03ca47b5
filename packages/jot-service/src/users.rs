use std::{collections::BTreeSet, sync::Mutex};

/// Usernames seen at login, kept in memory only.
///
/// Works as an audit trail: it never gates access to notes.
#[derive(Debug, Default)]
pub struct UserRegistry {
	names: Mutex<BTreeSet<String>>,
}
impl UserRegistry {
	/// Returns `true` the first time a name is seen.
	pub fn register(&self, username: &str) -> bool {
		let mut names = self.names.lock().unwrap_or_else(|err| err.into_inner());

		names.insert(username.to_string())
	}

	pub fn snapshot(&self) -> Vec<String> {
		let names = self.names.lock().unwrap_or_else(|err| err.into_inner());

		names.iter().cloned().collect()
	}
}
