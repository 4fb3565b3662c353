use askama::Template;
use axum::{
	http::StatusCode,
	response::{Html, IntoResponse, Response},
};
use validator::ValidationErrors;

/// Renders a template into an HTML body.
pub fn render<T: Template>(template: &T) -> Result<Html<String>, askama::Error> {
	template.render().map(Html)
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
	pub viewer: Option<String>,
	pub status: u16,
	pub reason: &'static str,
	pub message: String,
}

/// Renders the error page, falling back to plain text if the template fails.
pub fn render_error(status: StatusCode, message: String) -> Response {
	let template = ErrorTemplate {
		viewer: None,
		status: status.as_u16(),
		reason: status.canonical_reason().unwrap_or("Error"),
		message,
	};

	match render(&template) {
		Ok(html) => (status, html).into_response(),
		Err(error) => {
			tracing::error!(%error, "failed to render error page");
			(status, template.message).into_response()
		}
	}
}

/// Collects the messages of all validation errors attached to `field`.
pub fn field_errors(errors: &ValidationErrors, field: &str) -> Vec<String> {
	errors
		.field_errors()
		.into_iter()
		.filter(|(name, _)| *name == field)
		.flat_map(|(_, errors)| errors.iter())
		.map(|error| {
			error
				.message
				.as_ref()
				.map_or_else(|| error.code.to_string(), ToString::to_string)
		})
		.collect()
}
