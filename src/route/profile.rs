use askama::Template;
use axum::{extract::State, http::StatusCode, response::Html, routing::get, Router};

use crate::{
	error,
	extract::{Path, Query, Session},
	pagination::Page,
	route::post::{
		model::{Paginate, PostCard},
		query::{fetch_page, PostScope},
	},
	view, AppState, Database,
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("There is no user called \"{0}\".")]
	UnknownUser(String),
}

pub type RouteError = error::RouteError<Error>;

impl error::ErrorShape for Error {
	fn status(&self) -> StatusCode {
		match self {
			Self::UnknownUser(..) => StatusCode::NOT_FOUND,
		}
	}
}

#[derive(Template)]
#[template(path = "posts/profile.html")]
pub struct ProfileTemplate {
	pub viewer: Option<String>,
	pub author: String,
	pub page: Page<PostCard>,
}

pub fn routes() -> Router<AppState> {
	Router::new().route("/profile/:username/", get(profile))
}

/// Lists the posts of a single author, newest first.
pub async fn profile(
	State(database): State<Database>,
	viewer: Option<Session>,
	Path(username): Path<String>,
	Query(paginate): Query<Paginate>,
) -> Result<Html<String>, RouteError> {
	let author_id = sqlx::query_scalar::<_, uuid::Uuid>(r#"SELECT id FROM "user" WHERE username = ?"#)
		.bind(&username)
		.fetch_optional(&database)
		.await?
		.ok_or_else(|| Error::UnknownUser(username.clone()))?;

	let page = fetch_page(&database, PostScope::Author(author_id), paginate.page()).await?;

	Ok(view::render(&ProfileTemplate {
		viewer: viewer.map(|session| session.user.username),
		author: username,
		page,
	})?)
}

#[cfg(test)]
mod test {
	use crate::test::*;

	#[sqlx::test]
	async fn test_profile_lists_author_posts(database: Database) {
		let app = app(database.clone());

		let author = create_user(&database, "author").await;
		let other = create_user(&database, "other").await;

		for i in 0..13 {
			create_post(&database, author, &format!("Test text {i}"), None).await;
		}

		create_post(&database, other, "Somebody else", None).await;

		let response = app.get("/profile/author/").await;

		assert_eq!(response.status_code(), StatusCode::OK);
		assert_eq!(count_cards(&response.text()), 10);
		assert!(response.text().contains("13 posts"));
		assert!(!response.text().contains("Somebody else"));

		let response = app.get("/profile/author/").add_query_param("page", 2).await;

		assert_eq!(count_cards(&response.text()), 3);

		// Anything that is not a page number shows the first page
		let response = app.get("/profile/author/").add_query_param("page", "last").await;

		assert_eq!(count_cards(&response.text()), 10);
	}

	#[sqlx::test]
	async fn test_profile_of_author_without_posts(database: Database) {
		let app = app(database.clone());

		create_user(&database, "quiet").await;

		let response = app.get("/profile/quiet/").await;

		assert_eq!(response.status_code(), StatusCode::OK);
		assert_eq!(count_cards(&response.text()), 0);
		assert!(response.text().contains("0 posts"));
	}

	#[sqlx::test]
	async fn test_unknown_profile(database: Database) {
		let app = app(database);

		let response = app.get("/profile/nobody/").await;

		assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
	}
}
