use std::fmt;

use crate::{Error, Result};

/// Caller identity taken verbatim from the `Authorization` header.
///
/// The token is never verified. It doubles as the ownership key of every note the caller creates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity(String);
impl Identity {
	pub fn resolve(raw: Option<&str>) -> Result<Self> {
		match raw.map(str::trim) {
			Some(token) if !token.is_empty() => Ok(Self(token.to_string())),
			_ => Err(Error::Unauthenticated { message: "Login required.".to_string() }),
		}
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl fmt::Display for Identity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

#[cfg(test)]
mod tests {
	use crate::{Error, Identity};

	#[test]
	fn takes_header_value_verbatim() {
		let identity = Identity::resolve(Some(" alice ")).expect("Expected identity.");

		assert_eq!(identity.as_str(), "alice");
		assert_eq!(
			Identity::resolve(Some("Bearer x")).expect("Expected identity.").as_str(),
			"Bearer x"
		);
	}

	#[test]
	fn missing_or_blank_is_unauthenticated() {
		for raw in [None, Some(""), Some("   ")] {
			let err = Identity::resolve(raw).expect_err("Expected Unauthenticated.");

			assert!(matches!(err, Error::Unauthenticated { .. }));
		}
	}
}
