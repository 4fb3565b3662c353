use sqlx::{QueryBuilder, Sqlite};
use uuid::Uuid;

use crate::{
	pagination::{Page, Paginator, PER_PAGE},
	Database,
};

use super::model::PostCard;

const SELECT_CARD: &str = r#"
	SELECT
		post.id,
		post.text,
		post.created_at,
		post.author_id,
		"user".username AS author_username,
		"group".title AS group_title,
		"group".slug AS group_slug
	FROM post
	JOIN "user" ON "user".id = post.author_id
	LEFT JOIN "group" ON "group".id = post.group_id
"#;

/// Which posts a listing page shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostScope {
	All,
	Group(i64),
	Author(Uuid),
}

impl PostScope {
	fn push_filter(self, builder: &mut QueryBuilder<'_, Sqlite>) {
		match self {
			Self::All => {}
			Self::Group(group_id) => {
				builder.push(" WHERE post.group_id = ").push_bind(group_id);
			}
			Self::Author(author_id) => {
				builder.push(" WHERE post.author_id = ").push_bind(author_id);
			}
		}
	}
}

/// Fetches a single page of the posts in `scope`, newest first.
///
/// `page` is the raw requested page number, resolved leniently by [`Paginator::resolve`].
pub async fn fetch_page(
	database: &Database,
	scope: PostScope,
	page: Option<&str>,
) -> Result<Page<PostCard>, sqlx::Error> {
	let mut counter = QueryBuilder::new("SELECT COUNT(*) FROM post");
	scope.push_filter(&mut counter);

	let count: i64 = counter.build_query_scalar().fetch_one(database).await?;

	let paginator = Paginator::new(count, PER_PAGE);
	let number = paginator.resolve(page);

	let mut select = QueryBuilder::new(SELECT_CARD);
	scope.push_filter(&mut select);
	select
		.push(" ORDER BY post.created_at DESC, post.id DESC LIMIT ")
		.push_bind(paginator.limit())
		.push(" OFFSET ")
		.push_bind(paginator.offset(number));

	let posts = select
		.build_query_as::<PostCard>()
		.fetch_all(database)
		.await?;

	Ok(paginator.page(number, posts))
}

pub async fn fetch_card(database: &Database, post_id: i64) -> Result<Option<PostCard>, sqlx::Error> {
	let mut select = QueryBuilder::new(SELECT_CARD);
	select.push(" WHERE post.id = ").push_bind(post_id);

	select
		.build_query_as::<PostCard>()
		.fetch_optional(database)
		.await
}

pub async fn count_by_author(database: &Database, author_id: Uuid) -> Result<i64, sqlx::Error> {
	sqlx::query_scalar("SELECT COUNT(*) FROM post WHERE author_id = ?")
		.bind(author_id)
		.fetch_one(database)
		.await
}

pub async fn group_exists(database: &Database, group_id: i64) -> Result<bool, sqlx::Error> {
	let group = sqlx::query_scalar::<_, i64>(r#"SELECT id FROM "group" WHERE id = ?"#)
		.bind(group_id)
		.fetch_optional(database)
		.await?;

	Ok(group.is_some())
}

/// Inserts a new post, returning its id.
pub async fn insert(
	database: &Database,
	author_id: Uuid,
	text: &str,
	group_id: Option<i64>,
) -> Result<i64, sqlx::Error> {
	sqlx::query_scalar(
		r#"
			INSERT INTO post (text, created_at, author_id, group_id)
			VALUES (?, ?, ?, ?)
			RETURNING id
		"#,
	)
	.bind(text.trim())
	.bind(chrono::Utc::now())
	.bind(author_id)
	.bind(group_id)
	.fetch_one(database)
	.await
}

/// Updates the editable fields of a post owned by `author_id`.
///
/// Returns whether a post was updated.
pub async fn update(
	database: &Database,
	post_id: i64,
	author_id: Uuid,
	text: &str,
	group_id: Option<i64>,
) -> Result<bool, sqlx::Error> {
	let result = sqlx::query(
		r#"
			UPDATE post
			SET text = ?, group_id = ?
			WHERE id = ? AND author_id = ?
		"#,
	)
	.bind(text.trim())
	.bind(group_id)
	.bind(post_id)
	.bind(author_id)
	.execute(database)
	.await?;

	Ok(result.rows_affected() > 0)
}
