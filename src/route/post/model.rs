pub use crate::route::model::Paginate;

use std::num::ParseIntError;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationError};

fn validate_text(text: &str) -> Result<(), ValidationError> {
	if text.trim().is_empty() {
		let mut error = ValidationError::new("required");
		error.message = Some("This field is required.".into());

		return Err(error);
	}

	Ok(())
}

/// A single post, created by a user.
///
/// The author and creation time are set once on insert and never change.
#[derive(Debug, Clone, Default, sqlx::FromRow)]
pub struct Post {
	/// The unique identifier of the post.
	pub id: i64,
	/// The user that created the post.
	pub author_id: Uuid,
	/// The body of the post.
	pub text: String,
	/// The group the post belongs to, if any.
	#[sqlx(rename = "group_id")]
	pub group: Option<i64>,
	/// The creation time of the post.
	pub created_at: DateTime<Utc>,
}

/// Submitted form input for [`Post`].
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PostForm {
	#[serde(default)]
	#[validate(custom(function = "validate_text"))]
	pub text: String,
	/// The raw `<select>` value, checked against the existing groups by the handler.
	#[serde(default, deserialize_with = "crate::route::model::empty_as_none")]
	pub group: Option<String>,
}

impl PostForm {
	/// The selected group id, `None` when the placeholder was chosen.
	pub fn group_id(&self) -> Result<Option<i64>, ParseIntError> {
		self.group.as_deref().map(str::parse).transpose()
	}
}

impl From<&Post> for PostForm {
	fn from(post: &Post) -> Self {
		Self {
			text: post.text.clone(),
			group: post.group.map(|id| id.to_string()),
		}
	}
}

/// A post joined with its author and group, as shown in listings.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PostCard {
	pub id: i64,
	pub text: String,
	pub created_at: DateTime<Utc>,
	pub author_id: Uuid,
	pub author_username: String,
	pub group_title: Option<String>,
	pub group_slug: Option<String>,
}
