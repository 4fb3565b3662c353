use axum::{http::StatusCode, routing::get, Router};

use crate::{error, AppState};

pub mod model;
pub mod query;
pub mod route;
pub mod view;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("There is no post with id {0}.")]
	UnknownPost(i64),
	#[error("Only the author of post {0} can edit it.")]
	NotAuthor(i64),
}

pub type RouteError = error::RouteError<Error>;

pub fn routes() -> Router<AppState> {
	use route::*;

	Router::new()
		.route("/", get(index))
		.route("/create/", get(create_form).post(create_post))
		.route("/posts/:post_id/", get(post_detail))
		.route("/posts/:post_id/edit/", get(edit_form).post(edit_post))
}

impl error::ErrorShape for Error {
	fn status(&self) -> StatusCode {
		match self {
			Self::UnknownPost(..) => StatusCode::NOT_FOUND,
			Self::NotAuthor(..) => StatusCode::FORBIDDEN,
		}
	}
}
