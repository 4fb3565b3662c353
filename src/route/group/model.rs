use askama::Template;
use macros::form;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::pagination::Page;
use crate::route::post::model::PostCard;

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
	let mut error = ValidationError::new(code);
	error.message = Some(message.into());
	error
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
	let length = title.trim().chars().count();

	if length == 0 {
		return Err(invalid("required", "This field is required."));
	}

	if length > 200 {
		return Err(invalid("max_length", "Use at most 200 characters."));
	}

	Ok(())
}

/// A blank slug is filled in from the title, anything else must already be a slug.
fn validate_slug(slug: &str) -> Result<(), ValidationError> {
	if slug
		.chars()
		.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
	{
		return Ok(());
	}

	Err(invalid(
		"invalid_slug",
		"Enter a valid slug consisting of letters, numbers, underscores or hyphens.",
	))
}

/// A named category of posts.
#[form]
#[derive(Debug, Clone, Default, Deserialize, Validate, sqlx::FromRow)]
pub struct Group {
	/// The unique identifier of the group.
	#[serde(skip_deserializing)]
	pub id: i64,
	/// The name displayed at the top of the group page.
	#[serde(default)]
	#[validate(custom(function = "validate_title"))]
	pub title: String,
	/// The unique part of the group URL.
	#[serde(default)]
	#[validate(length(max = 200), custom(function = "validate_slug"))]
	pub slug: String,
	#[serde(default)]
	pub description: String,
}

impl GroupForm {
	/// The slug to store, derived from the title when none was given.
	pub fn resolved_slug(&self) -> String {
		let slug = self.slug.trim();

		if slug.is_empty() {
			slug::slugify(&self.title)
		} else {
			slug.to_owned()
		}
	}
}

#[derive(Template)]
#[template(path = "groups/group_list.html")]
pub struct GroupTemplate {
	pub viewer: Option<String>,
	pub group: Group,
	pub page: Page<PostCard>,
}

#[derive(Template)]
#[template(path = "groups/create_group.html")]
pub struct GroupFormTemplate {
	pub viewer: Option<String>,
	pub title: String,
	pub slug: String,
	pub description: String,
	pub title_errors: Vec<String>,
	pub slug_errors: Vec<String>,
}

#[cfg(test)]
mod test {
	use validator::Validate;

	use super::GroupForm;

	fn form(title: &str, slug: &str) -> GroupForm {
		GroupForm {
			title: title.into(),
			slug: slug.into(),
			description: String::new(),
		}
	}

	#[test]
	fn test_resolved_slug() {
		assert_eq!(form("Cats and Dogs", "").resolved_slug(), "cats-and-dogs");
		assert_eq!(form("Cats and Dogs", " pets ").resolved_slug(), "pets");
	}

	#[test]
	fn test_group_validation() {
		assert!(form("Cats", "").validate().is_ok());
		assert!(form("Cats", "cats_2").validate().is_ok());

		let errors = form("  ", "not a slug").validate().unwrap_err();
		let fields = errors.field_errors();

		assert!(fields.contains_key("title"));
		assert!(fields.contains_key("slug"));
	}
}
