use axum::{
	extract::{FromRef, FromRequestParts},
	http::{header, request},
};
use uuid::Uuid;

use crate::{route::auth, session, Database};

/// Extracts the session and related user from the request.
///
/// If there is no session cookie, a [`auth::Error::LoginRequired`] is returned.
/// If the session is invalid, a [`auth::Error::InvalidSessionCookie`] is returned.
/// Both redirect the client to the login page, coming back to the current page afterwards.
///
/// Pages that only change their look for logged in users take an `Option<Session>`.
///
/// ```rust
/// async fn route(session: Session) {
///   println!("{:?}", session.user);
/// }
/// ```
#[derive(Debug)]
pub struct Session {
	pub id: Uuid,
	pub user: auth::model::User,
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for Session
where
	Database: FromRef<S>,
	S: Sync + Send,
{
	type Rejection = auth::RouteError;

	async fn from_request_parts(
		parts: &mut request::Parts,
		state: &S,
	) -> Result<Self, Self::Rejection> {
		let next = parts
			.uri
			.path_and_query()
			.map_or_else(|| "/".to_string(), ToString::to_string);

		let cookies = parts
			.headers
			.get_all(header::COOKIE)
			.into_iter()
			.filter_map(|value| value.to_str().ok());

		let session_id = session::find_session_id(cookies).ok_or_else(|| {
			auth::Error::LoginRequired { next: next.clone() }
		})?;

		let session_id = Uuid::parse_str(&session_id)
			.map_err(|_| auth::Error::InvalidSessionCookie { next: next.clone() })?;

		let database = Database::from_ref(state);
		let user = sqlx::query_as::<_, auth::model::User>(
			r#"
				SELECT "user".* FROM "user"
				JOIN session ON session.user_id = "user".id
				WHERE session.id = ?
			"#,
		)
		.bind(session_id)
		.fetch_optional(&database)
		.await?;

		let user = user.ok_or(auth::Error::InvalidSessionCookie { next })?;

		Ok(Session {
			user,
			id: session_id,
		})
	}
}
