use axum::{http::StatusCode, routing::get, Router};

use crate::{error, AppState};

pub mod model;
pub mod query;
pub mod route;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("There is no group called \"{0}\".")]
	UnknownGroup(String),
}

pub type RouteError = error::RouteError<Error>;

pub fn routes() -> Router<AppState> {
	use route::*;

	Router::new()
		.route("/group/:slug/", get(group_posts))
		.route("/groups/new/", get(create_form).post(create_group))
}

impl error::ErrorShape for Error {
	fn status(&self) -> StatusCode {
		match self {
			Self::UnknownGroup(..) => StatusCode::NOT_FOUND,
		}
	}
}

#[cfg(test)]
mod test {
	use crate::test::*;

	#[sqlx::test]
	async fn test_group_posts_paginate(database: Database) {
		let app = app(database.clone());

		let author = create_user(&database, "author").await;
		let group = create_group(&database, "Test group", "test_group").await;

		for i in 0..13 {
			create_post(&database, author, &format!("Test text {i}"), Some(group)).await;
		}

		create_post(&database, author, "Not in the group", None).await;

		let response = app.get("/group/test_group/").await;

		assert_eq!(response.status_code(), StatusCode::OK);
		assert!(response.text().contains("Test group"));
		assert_eq!(count_cards(&response.text()), 10);

		let response = app.get("/group/test_group/").add_query_param("page", 2).await;

		assert_eq!(count_cards(&response.text()), 3);
		assert!(!response.text().contains("Not in the group"));
	}

	#[sqlx::test]
	async fn test_unknown_group(database: Database) {
		let app = app(database);

		let response = app.get("/group/nope/").await;

		assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
		assert!(response.text().contains("nope"));
	}

	#[sqlx::test]
	async fn test_create_group(database: Database) {
		let app = app(database.clone());

		let author = create_user(&database, "author").await;
		let cookie = login(&database, author).await;

		let response = app
			.post("/groups/new/")
			.add_header(header::COOKIE, cookie.clone())
			.form(&[
				("title", "Cats and Dogs"),
				("slug", ""),
				("description", "Pets"),
			])
			.await;

		assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
		assert_eq!(response.header("location"), "/group/cats-and-dogs/");

		let response = app.get("/group/cats-and-dogs/").await;

		assert_eq!(response.status_code(), StatusCode::OK);
		assert!(response.text().contains("Pets"));

		let response = app
			.post("/groups/new/")
			.add_header(header::COOKIE, cookie)
			.form(&[("title", "Other"), ("slug", "cats-and-dogs"), ("description", "")])
			.await;

		assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
		assert!(response.text().contains("already exists"));
	}
}
