use axum::{http::StatusCode, response::Response, Router};

use crate::{view, AppState};

pub mod auth;
pub mod group;
pub mod model;
pub mod post;
pub mod profile;

/// All pages of the site.
pub fn routes() -> Router<AppState> {
	Router::new()
		.merge(post::routes())
		.merge(group::routes())
		.merge(profile::routes())
		.nest("/auth", auth::routes())
		.fallback(not_found)
}

async fn not_found() -> Response {
	view::render_error(
		StatusCode::NOT_FOUND,
		"The page you are looking for does not exist.".into(),
	)
}
