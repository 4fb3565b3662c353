use crate::Database;

use super::model::{Group, GroupForm};

/// All groups, as offered when writing a post.
pub async fn fetch_all(database: &Database) -> Result<Vec<Group>, sqlx::Error> {
	sqlx::query_as::<_, Group>(r#"SELECT * FROM "group" ORDER BY title, id"#)
		.fetch_all(database)
		.await
}

pub async fn fetch_by_slug(database: &Database, slug: &str) -> Result<Option<Group>, sqlx::Error> {
	sqlx::query_as::<_, Group>(r#"SELECT * FROM "group" WHERE slug = ?"#)
		.bind(slug)
		.fetch_optional(database)
		.await
}

/// Inserts a new group under `slug`, returning its id.
pub async fn insert(database: &Database, form: &GroupForm, slug: &str) -> Result<i64, sqlx::Error> {
	sqlx::query_scalar(
		r#"
			INSERT INTO "group" (title, slug, description)
			VALUES (?, ?, ?)
			RETURNING id
		"#,
	)
	.bind(form.title.trim())
	.bind(slug)
	.bind(form.description.trim())
	.fetch_one(database)
	.await
}
