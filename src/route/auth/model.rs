use askama::Template;
use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationError};

fn validate_username(username: &str) -> Result<(), ValidationError> {
	if username
		.chars()
		.any(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')))
	{
		let mut error = ValidationError::new("invalid_username");
		error.message = Some("Use only letters, digits and _ . - characters.".into());

		return Err(error);
	}

	Ok(())
}

/// A single user.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
	/// The unique identifier of the user, also used as the password salt.
	pub id: Uuid,
	/// The username that is displayed to the public and used in profile URLs.
	pub username: String,
	#[allow(dead_code)]
	pub email: String,
	/// The hashed password.
	pub password: Vec<u8>,
	/// The creation time of the user.
	#[allow(dead_code)]
	pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct LoginInput {
	#[serde(default)]
	#[validate(length(min = 1, message = "This field is required."))]
	pub username: String,
	#[serde(default)]
	#[validate(length(min = 1, message = "This field is required."))]
	pub password: String,
	/// Where to go after logging in.
	#[serde(default)]
	pub next: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct SignupInput {
	/// The username that is displayed to the public.
	#[serde(default)]
	#[validate(
		length(min = 3, max = 150, message = "Use between 3 and 150 characters."),
		custom(function = "validate_username")
	)]
	pub username: String,
	#[serde(default)]
	#[validate(email(message = "Enter a valid email address."))]
	pub email: String,
	#[serde(default)]
	#[validate(length(min = 8, max = 128, message = "Use between 8 and 128 characters."))]
	pub password: String,
}

#[derive(Deserialize, Validate)]
pub struct NextInput {
	pub next: Option<String>,
}

#[derive(Template)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
	pub viewer: Option<String>,
	pub username: String,
	pub next: String,
	pub errors: Vec<String>,
}

#[derive(Template)]
#[template(path = "auth/signup.html")]
pub struct SignupTemplate {
	pub viewer: Option<String>,
	pub username: String,
	pub email: String,
	pub username_errors: Vec<String>,
	pub email_errors: Vec<String>,
	pub password_errors: Vec<String>,
}

#[cfg(test)]
mod test {
	use validator::Validate;

	use super::SignupInput;

	#[test]
	fn test_signup_validation() {
		let input = SignupInput {
			username: "john.smith".into(),
			email: "john@smith.com".into(),
			password: "hunter2hunter".into(),
		};

		assert!(input.validate().is_ok());

		let input = SignupInput {
			username: "john smith".into(),
			email: "nope".into(),
			password: "short".into(),
		};

		let errors = input.validate().unwrap_err();
		let fields = errors.field_errors();

		assert!(fields.contains_key("username"));
		assert!(fields.contains_key("email"));
		assert!(fields.contains_key("password"));
	}
}
