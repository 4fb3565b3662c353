use axum::{
	extract::State,
	http::StatusCode,
	response::{Html, IntoResponse, Redirect, Response},
};
use validator::{ValidationError, ValidationErrors};

use crate::{
	extract::{Form, Path, Query, Session},
	route::post::{
		model::Paginate,
		query::{fetch_page, PostScope},
	},
	view, Database,
};

use super::{model, query, Error, RouteError};

fn render_form(
	session: &Session,
	form: &Form<model::GroupForm>,
	status: StatusCode,
) -> Result<Response, RouteError> {
	let template = model::GroupFormTemplate {
		viewer: Some(session.user.username.clone()),
		title: form.data.title.clone(),
		slug: form.data.slug.clone(),
		description: form.data.description.clone(),
		title_errors: view::field_errors(&form.errors, "title"),
		slug_errors: view::field_errors(&form.errors, "slug"),
	};

	Ok((status, view::render(&template)?).into_response())
}

fn slug_error(message: &'static str) -> ValidationError {
	let mut error = ValidationError::new("invalid_slug");
	error.message = Some(message.into());
	error
}

/// Lists the posts of a group, newest first.
pub async fn group_posts(
	State(database): State<Database>,
	viewer: Option<Session>,
	Path(slug): Path<String>,
	Query(paginate): Query<Paginate>,
) -> Result<Html<String>, RouteError> {
	let group = query::fetch_by_slug(&database, &slug)
		.await?
		.ok_or(Error::UnknownGroup(slug))?;

	let page = fetch_page(&database, PostScope::Group(group.id), paginate.page()).await?;

	Ok(view::render(&model::GroupTemplate {
		viewer: viewer.map(|session| session.user.username),
		group,
		page,
	})?)
}

/// Shows an empty group form.
pub async fn create_form(session: Session) -> Result<Response, RouteError> {
	let form = Form {
		data: model::GroupForm::default(),
		errors: ValidationErrors::new(),
	};

	render_form(&session, &form, StatusCode::OK)
}

/// Creates a group, deriving its slug from the title when left blank.
pub async fn create_group(
	State(database): State<Database>,
	session: Session,
	mut form: Form<model::GroupForm>,
) -> Result<Response, RouteError> {
	if !form.is_valid() {
		return render_form(&session, &form, StatusCode::BAD_REQUEST);
	}

	let slug = form.data.resolved_slug();

	if slug.is_empty() {
		form.errors.add(
			"slug",
			slug_error("Enter a slug, the title has no letters or numbers to build one from."),
		);

		return render_form(&session, &form, StatusCode::BAD_REQUEST);
	}

	let inserted = query::insert(&database, &form.data, &slug).await;

	let group_id = match inserted {
		Err(sqlx::Error::Database(ref error)) if error.is_unique_violation() => {
			form.errors
				.add("slug", slug_error("A group with this slug already exists."));

			return render_form(&session, &form, StatusCode::BAD_REQUEST);
		}
		inserted => inserted?,
	};

	tracing::info!(group_id, %slug, author = %session.user.username, "group created");

	Ok(Redirect::to(&format!("/group/{slug}/")).into_response())
}
