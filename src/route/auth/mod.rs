use axum::{http::StatusCode, routing::get, Router};

use crate::{error, AppState};

pub mod model;
pub mod route;

/// An error that can occur during authentication.
///
/// Note that the messages are presented to the client, so they should not contain
/// sensitive information.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Please enter a correct username and password.")]
	InvalidUsernameOrPassword,
	#[error("password validation error")]
	Argon(#[from] argon2::Error),
	#[error("you need to log in to see this page")]
	LoginRequired { next: String },
	#[error("your session has expired, log in again")]
	InvalidSessionCookie { next: String },
	#[error("A user with that username already exists.")]
	UsernameTaken,
}

pub type RouteError = error::RouteError<Error>;

pub fn routes() -> Router<AppState> {
	use route::*;

	Router::new()
		.route("/login/", get(login_form).post(login))
		.route("/signup/", get(signup_form).post(signup))
		.route("/logout/", get(logout))
}

/// The login page, returning to `next` once logged in.
pub fn login_url(next: &str) -> String {
	let query = url::form_urlencoded::Serializer::new(String::new())
		.append_pair("next", next)
		.finish();

	format!("/auth/login/?{query}")
}

impl error::ErrorShape for Error {
	fn status(&self) -> StatusCode {
		match self {
			// Shown next to the form, which is sent back for another try
			Self::InvalidUsernameOrPassword | Self::UsernameTaken => StatusCode::BAD_REQUEST,
			Self::Argon(..) => StatusCode::INTERNAL_SERVER_ERROR,
			Self::LoginRequired { .. } | Self::InvalidSessionCookie { .. } => StatusCode::SEE_OTHER,
		}
	}

	fn location(&self) -> Option<String> {
		match self {
			Self::LoginRequired { next } | Self::InvalidSessionCookie { next } => {
				Some(login_url(next))
			}
			_ => None,
		}
	}
}

#[cfg(test)]
mod test {
	use crate::test::*;

	#[test]
	fn test_form_errors_match_rerender_status() {
		use crate::error::ErrorShape;

		use super::Error;

		assert_eq!(Error::InvalidUsernameOrPassword.status(), StatusCode::BAD_REQUEST);
		assert_eq!(Error::UsernameTaken.status(), StatusCode::BAD_REQUEST);
		assert_eq!(Error::UsernameTaken.location(), None);
	}

	#[test]
	fn test_login_url_encodes_next() {
		assert_eq!(
			super::login_url("/posts/1/edit/"),
			"/auth/login/?next=%2Fposts%2F1%2Fedit%2F"
		);
	}

	#[sqlx::test]
	async fn test_signup_flow(database: Database) {
		let app = app(database.clone());

		let response = app.get("/auth/signup/").await;

		assert_eq!(response.status_code(), StatusCode::OK);

		let response = app
			.post("/auth/signup/")
			.form(&[
				("username", "john"),
				("email", "john@smith.com"),
				("password", "hunter2hunter"),
			])
			.await;

		assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
		assert_eq!(response.header("location"), "/");

		let cookie = session_cookie(&response);

		let response = app.get("/create/").add_header(header::COOKIE, cookie.clone()).await;

		assert_eq!(response.status_code(), StatusCode::OK);
		assert!(response.text().contains("john"));

		let response = app
			.get("/auth/logout/")
			.add_header(header::COOKIE, cookie.clone())
			.await;

		assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
		assert!(response
			.header("set-cookie")
			.to_str()
			.unwrap()
			.contains("Max-Age=0"));

		let response = app.get("/create/").add_header(header::COOKIE, cookie).await;

		assert_eq!(response.status_code(), StatusCode::SEE_OTHER);

		let response = app
			.post("/auth/login/")
			.form(&[
				("username", "john"),
				("password", "hunter2hunter"),
				("next", "/create/"),
			])
			.await;

		assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
		assert_eq!(response.header("location"), "/create/");

		let response = app
			.get("/create/")
			.add_header(header::COOKIE, session_cookie(&response))
			.await;

		assert_eq!(response.status_code(), StatusCode::OK);
	}

	#[sqlx::test]
	async fn test_signup_rejects_taken_username(database: Database) {
		let app = app(database.clone());

		create_user(&database, "john").await;

		let response = app
			.post("/auth/signup/")
			.form(&[
				("username", "john"),
				("email", "john@smith.com"),
				("password", "hunter2hunter"),
			])
			.await;

		assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
		assert!(response.text().contains("already exists"));
	}

	#[sqlx::test]
	async fn test_login_rejects_wrong_password(database: Database) {
		let app = app(database.clone());

		create_user(&database, "john").await;

		let response = app
			.post("/auth/login/")
			.form(&[("username", "john"), ("password", "not the password")])
			.await;

		assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
		assert!(response.text().contains("correct username and password"));
	}

	#[sqlx::test]
	async fn test_login_required_redirects(database: Database) {
		let app = app(database);

		let response = app.get("/create/").await;

		assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
		assert_eq!(
			response.header("location"),
			"/auth/login/?next=%2Fcreate%2F"
		);

		let response = app
			.get("/create/")
			.add_header(header::COOKIE, HeaderValue::from_static("session=garbage"))
			.await;

		assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
	}

	#[test]
	fn test_safe_next() {
		use super::route::safe_next;

		assert_eq!(safe_next("/posts/1/"), "/posts/1/");
		assert_eq!(safe_next("//evil.example"), "/");
		assert_eq!(safe_next("https://evil.example"), "/");
		assert_eq!(safe_next(""), "/");
	}
}
