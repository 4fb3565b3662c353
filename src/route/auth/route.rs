use argon2::Argon2;
use axum::{
	extract::State,
	http::{header, StatusCode},
	response::{IntoResponse, Redirect, Response},
};
use uuid::Uuid;
use validator::ValidationError;

use crate::{
	error::ErrorShape,
	extract::{Form, Query, Session},
	session, view, AppState, Database,
};

use super::{model, Error, RouteError};

pub const KEY_LENGTH: usize = 32;

/// Hashes a password with Argon2, using the user's id as a salt.
/// Since this is only used for logging in and creating a new password,
/// the scope of this function can remain in here with no issues.
fn hash_password(
	hasher: &Argon2,
	password: &str,
	id: &Uuid,
) -> Result<[u8; KEY_LENGTH], argon2::Error> {
	let mut hash = [0; KEY_LENGTH];

	hasher.hash_password_into(password.as_bytes(), id.as_bytes(), &mut hash)?;
	Ok(hash)
}

/// Only local paths are followed after logging in.
pub fn safe_next(next: &str) -> &str {
	if next.starts_with('/') && !next.starts_with("//") {
		next
	} else {
		"/"
	}
}

async fn create_session<'e, E>(executor: E, user_id: Uuid) -> Result<Uuid, sqlx::Error>
where
	E: sqlx::SqliteExecutor<'e>,
{
	let session_id = Uuid::new_v4();

	sqlx::query("INSERT INTO session (id, user_id, created_at) VALUES (?, ?, ?)")
		.bind(session_id)
		.bind(user_id)
		.bind(chrono::Utc::now())
		.execute(executor)
		.await?;

	Ok(session_id)
}

/// Sets the session cookie and moves on to `location`.
fn logged_in(session_id: Uuid, location: &str) -> Response {
	let cookie = session::create_cookie(session_id);

	(
		[(header::SET_COOKIE, cookie.to_string())],
		Redirect::to(location),
	)
		.into_response()
}

fn render_login(
	input: &model::LoginInput,
	errors: Vec<String>,
	status: StatusCode,
) -> Result<Response, RouteError> {
	let template = model::LoginTemplate {
		viewer: None,
		username: input.username.clone(),
		next: input.next.clone(),
		errors,
	};

	Ok((status, view::render(&template)?).into_response())
}

fn render_signup(
	form: &Form<model::SignupInput>,
	status: StatusCode,
) -> Result<Response, RouteError> {
	let template = model::SignupTemplate {
		viewer: None,
		username: form.data.username.clone(),
		email: form.data.email.clone(),
		username_errors: view::field_errors(&form.errors, "username"),
		email_errors: view::field_errors(&form.errors, "email"),
		password_errors: view::field_errors(&form.errors, "password"),
	};

	Ok((status, view::render(&template)?).into_response())
}

/// Shows the login form.
pub async fn login_form(Query(input): Query<model::NextInput>) -> Result<Response, RouteError> {
	let input = model::LoginInput {
		next: input.next.unwrap_or_default(),
		..Default::default()
	};

	render_login(&input, Vec::new(), StatusCode::OK)
}

/// Logs in to an account, setting the session cookie.
pub async fn login(
	State(state): State<AppState>,
	form: Form<model::LoginInput>,
) -> Result<Response, RouteError> {
	if !form.is_valid() {
		let errors = ["username", "password"]
			.into_iter()
			.flat_map(|field| view::field_errors(&form.errors, field))
			.collect();

		return render_login(&form.data, errors, StatusCode::BAD_REQUEST);
	}

	let user = sqlx::query_as::<_, model::User>(r#"SELECT * FROM "user" WHERE username = ?"#)
		.bind(&form.data.username)
		.fetch_optional(&state.database)
		.await?;

	let invalid = || {
		let error = Error::InvalidUsernameOrPassword;

		render_login(&form.data, vec![error.to_string()], error.status())
	};

	let Some(user) = user else {
		return invalid();
	};

	let hashed =
		hash_password(&state.hasher, &form.data.password, &user.id).map_err(Error::Argon)?;

	if user.password != hashed {
		tracing::debug!(username = %user.username, "rejected login attempt");
		return invalid();
	}

	let session_id = create_session(&state.database, user.id).await?;

	tracing::info!(username = %user.username, "user logged in");

	Ok(logged_in(session_id, safe_next(&form.data.next)))
}

/// Shows the signup form.
pub async fn signup_form() -> Result<Response, RouteError> {
	let form = Form {
		data: model::SignupInput::default(),
		errors: validator::ValidationErrors::new(),
	};

	render_signup(&form, StatusCode::OK)
}

/// Registers a new account and logs in to it.
pub async fn signup(
	State(state): State<AppState>,
	mut form: Form<model::SignupInput>,
) -> Result<Response, RouteError> {
	if !form.is_valid() {
		return render_signup(&form, StatusCode::BAD_REQUEST);
	}

	let user_id = Uuid::new_v4();
	let hashed = hash_password(&state.hasher, &form.data.password, &user_id).map_err(Error::Argon)?;

	let mut tx = state.database.begin().await?;

	let inserted = sqlx::query(
		r#"
			INSERT INTO "user" (id, username, email, password, created_at)
			VALUES (?, ?, ?, ?, ?)
		"#,
	)
	.bind(user_id)
	.bind(&form.data.username)
	.bind(&form.data.email)
	.bind(&hashed[..])
	.bind(chrono::Utc::now())
	.execute(&mut *tx)
	.await;

	match inserted {
		Err(sqlx::Error::Database(ref error)) if error.is_unique_violation() => {
			let taken = Error::UsernameTaken;
			let mut error = ValidationError::new("username_taken");
			error.message = Some(taken.to_string().into());
			form.errors.add("username", error);

			return render_signup(&form, taken.status());
		}
		inserted => inserted?,
	};

	let session_id = create_session(&mut *tx, user_id).await?;

	tx.commit().await?;

	tracing::info!(username = %form.data.username, "user signed up");

	Ok(logged_in(session_id, "/"))
}

/// Logs out of the current session, if any.
pub async fn logout(
	State(database): State<Database>,
	session: Option<Session>,
) -> Result<impl IntoResponse, RouteError> {
	if let Some(session) = session {
		sqlx::query("DELETE FROM session WHERE id = ?")
			.bind(session.id)
			.execute(&database)
			.await?;

		tracing::info!(username = %session.user.username, "user logged out");
	}

	// Clear the session cookie
	Ok((
		[(header::SET_COOKIE, session::clear_cookie().to_string())],
		Redirect::to("/"),
	))
}
