use serde::{Deserialize, Serialize};

use crate::{Error, JotService, Result};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LoginRequest {
	pub username: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoginResponse {
	pub token: String,
	pub msg: String,
}

impl JotService {
	/// Issues the username back as the caller's token. Nothing is verified.
	pub fn login(&self, req: LoginRequest) -> Result<LoginResponse> {
		let username = match req.username.as_deref().map(str::trim) {
			Some(username) if !username.is_empty() => username.to_string(),
			_ =>
				return Err(Error::InvalidRequest {
					message: "username must be non-empty.".to_string(),
				}),
		};

		if self.users.register(&username) {
			tracing::info!(username = %username, "First login for user.");
		}

		let msg = format!("欢迎回来, {username}!");

		Ok(LoginResponse { token: username, msg })
	}
}
