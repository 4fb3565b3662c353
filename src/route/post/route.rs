use axum::{
	extract::State,
	http::StatusCode,
	response::{Html, IntoResponse, Redirect, Response},
};
use validator::{ValidationError, ValidationErrors};

use crate::{
	extract::{Form, Path, Query, Session},
	route::group,
	view as render, Database,
};

use super::{
	model,
	query::{self, PostScope},
	view, Error, RouteError,
};

/// Resolves the selected group, flagging a value that names no group the way
/// a `<select>` with a tampered value is reported.
async fn validate_group(
	database: &Database,
	form: &mut Form<model::PostForm>,
) -> Result<Option<i64>, sqlx::Error> {
	let group_id = match form.data.group_id() {
		Ok(None) => return Ok(None),
		Ok(Some(group_id)) => Some(group_id),
		Err(..) => None,
	};

	if let Some(group_id) = group_id {
		if query::group_exists(database, group_id).await? {
			return Ok(Some(group_id));
		}
	}

	let mut error = ValidationError::new("invalid_choice");
	error.message = Some("Select a valid choice.".into());
	form.errors.add("group", error);

	Ok(None)
}

/// Loads a post for editing, making sure it belongs to the session user.
async fn fetch_own_post(
	database: &Database,
	session: &Session,
	post_id: i64,
) -> Result<model::Post, RouteError> {
	let post = sqlx::query_as::<_, model::Post>("SELECT * FROM post WHERE id = ?")
		.bind(post_id)
		.fetch_optional(database)
		.await?
		.ok_or(Error::UnknownPost(post_id))?;

	if post.author_id != session.user.id {
		tracing::warn!(
			post_id,
			username = %session.user.username,
			"rejected edit of a post by another author"
		);

		return Err(Error::NotAuthor(post_id).into());
	}

	Ok(post)
}

async fn render_form(
	database: &Database,
	session: &Session,
	form: &Form<model::PostForm>,
	post_id: Option<i64>,
	status: StatusCode,
) -> Result<Response, RouteError> {
	let groups = group::query::fetch_all(database).await?;

	let template = view::PostFormTemplate {
		viewer: Some(session.user.username.clone()),
		is_edit: post_id.is_some(),
		action: post_id.map_or_else(|| "/create/".into(), |id| format!("/posts/{id}/edit/")),
		form: view::PostFormView::new(form, groups),
	};

	Ok((status, render::render(&template)?).into_response())
}

/// Lists all posts, newest first.
pub async fn index(
	State(database): State<Database>,
	viewer: Option<Session>,
	Query(paginate): Query<model::Paginate>,
) -> Result<Html<String>, RouteError> {
	let page = query::fetch_page(&database, PostScope::All, paginate.page()).await?;

	Ok(render::render(&view::IndexTemplate {
		viewer: viewer.map(|session| session.user.username),
		page,
	})?)
}

/// Shows a single post.
pub async fn post_detail(
	State(database): State<Database>,
	viewer: Option<Session>,
	Path(post_id): Path<i64>,
) -> Result<Html<String>, RouteError> {
	let post = query::fetch_card(&database, post_id)
		.await?
		.ok_or(Error::UnknownPost(post_id))?;

	let author_post_count = query::count_by_author(&database, post.author_id).await?;
	let can_edit = viewer
		.as_ref()
		.is_some_and(|session| session.user.id == post.author_id);

	Ok(render::render(&view::PostDetailTemplate {
		viewer: viewer.map(|session| session.user.username),
		post,
		author_post_count,
		can_edit,
	})?)
}

/// Shows an empty post form.
pub async fn create_form(
	State(database): State<Database>,
	session: Session,
) -> Result<Response, RouteError> {
	let form = Form {
		data: model::PostForm::default(),
		errors: ValidationErrors::new(),
	};

	render_form(&database, &session, &form, None, StatusCode::OK).await
}

/// Creates a post authored by the session user.
pub async fn create_post(
	State(database): State<Database>,
	session: Session,
	mut form: Form<model::PostForm>,
) -> Result<Response, RouteError> {
	let group_id = validate_group(&database, &mut form).await?;

	if !form.is_valid() {
		return render_form(&database, &session, &form, None, StatusCode::BAD_REQUEST).await;
	}

	let post_id = query::insert(&database, session.user.id, &form.data.text, group_id).await?;

	tracing::info!(post_id, author = %session.user.username, "post created");

	Ok(Redirect::to(&format!("/profile/{}/", session.user.username)).into_response())
}

/// Shows the form of an existing post, filled with its current content.
pub async fn edit_form(
	State(database): State<Database>,
	session: Session,
	Path(post_id): Path<i64>,
) -> Result<Response, RouteError> {
	let post = fetch_own_post(&database, &session, post_id).await?;
	let form = Form {
		data: model::PostForm::from(&post),
		errors: ValidationErrors::new(),
	};

	render_form(&database, &session, &form, Some(post_id), StatusCode::OK).await
}

/// Updates the text and group of a post owned by the session user.
pub async fn edit_post(
	State(database): State<Database>,
	session: Session,
	Path(post_id): Path<i64>,
	mut form: Form<model::PostForm>,
) -> Result<Response, RouteError> {
	fetch_own_post(&database, &session, post_id).await?;
	let group_id = validate_group(&database, &mut form).await?;

	if !form.is_valid() {
		return render_form(
			&database,
			&session,
			&form,
			Some(post_id),
			StatusCode::BAD_REQUEST,
		)
		.await;
	}

	if !query::update(&database, post_id, session.user.id, &form.data.text, group_id).await? {
		return Err(Error::UnknownPost(post_id).into());
	}

	tracing::info!(post_id, author = %session.user.username, "post updated");

	Ok(Redirect::to(&format!("/posts/{post_id}/")).into_response())
}
