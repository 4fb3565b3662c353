use std::convert::Infallible;

use axum::{
	extract::rejection::{FormRejection, PathRejection, QueryRejection},
	http::StatusCode,
	response::{IntoResponse, Redirect, Response},
};

use crate::view;

/// Describes how a route-specific error is presented to the client.
///
/// The [`std::fmt::Display`] output is shown on the error page, so it should not
/// contain sensitive information.
pub trait ErrorShape: std::error::Error {
	fn status(&self) -> StatusCode;

	/// Where to send the client instead of rendering an error page.
	fn location(&self) -> Option<String> {
		None
	}
}

impl ErrorShape for Infallible {
	fn status(&self) -> StatusCode {
		match *self {}
	}
}

/// Error type for route handlers and extractors.
///
/// `T` is the error type of the route module, everything else is shared.
/// The Display output of the shared variants is only logged.
#[derive(Debug, thiserror::Error)]
pub enum RouteError<T: ErrorShape> {
	#[error(transparent)]
	Route(T),
	#[error("validation error: {0}")]
	Validation(#[from] validator::ValidationErrors),
	#[error("form error: {0}")]
	Form(#[from] FormRejection),
	#[error("query error: {0}")]
	Query(#[from] QueryRejection),
	#[error("path error: {0}")]
	Path(#[from] PathRejection),
	#[error("template error: {0}")]
	Template(#[from] askama::Error),
	#[error("database error: {0}")]
	Database(#[from] sqlx::Error),
}

/// The rejection of extractors that are not tied to a route module.
pub type ExtractError = RouteError<Infallible>;

impl<T: ErrorShape> From<T> for RouteError<T> {
	fn from(error: T) -> Self {
		Self::Route(error)
	}
}

impl<T: ErrorShape> RouteError<T> {
	pub fn status(&self) -> StatusCode {
		match self {
			Self::Route(error) => error.status(),
			Self::Validation(..) => StatusCode::BAD_REQUEST,
			Self::Form(rejection) => rejection.status(),
			Self::Query(rejection) => rejection.status(),
			// A path that does not parse does not name anything that exists
			Self::Path(..) => StatusCode::NOT_FOUND,
			Self::Template(..) | Self::Database(..) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	/// The message shown on the error page.
	fn public_message(&self) -> String {
		match self {
			Self::Route(error) => error.to_string(),
			Self::Validation(errors) => errors
				.field_errors()
				.into_iter()
				.flat_map(|(field, errors)| {
					errors.iter().map(move |error| format!("{field}: {}", error.code))
				})
				.collect::<Vec<_>>()
				.join("\n"),
			Self::Form(rejection) => rejection.body_text(),
			Self::Query(rejection) => rejection.body_text(),
			Self::Path(..) => "The page you requested does not exist.".into(),
			Self::Template(..) | Self::Database(..) => "Something went wrong on our side.".into(),
		}
	}
}

impl<T: ErrorShape> IntoResponse for RouteError<T> {
	fn into_response(self) -> Response {
		if let Self::Route(ref error) = self {
			if let Some(location) = error.location() {
				return Redirect::to(&location).into_response();
			}
		}

		let status = self.status();

		if status.is_server_error() {
			tracing::error!(error = %self, "request failed");
		} else {
			tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
		}

		view::render_error(status, self.public_message())
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[derive(Debug, thiserror::Error)]
	enum Error {
		#[error("nothing here")]
		Missing,
		#[error("log in first")]
		LoginRequired,
	}

	impl ErrorShape for Error {
		fn status(&self) -> StatusCode {
			match self {
				Self::Missing => StatusCode::NOT_FOUND,
				Self::LoginRequired => StatusCode::SEE_OTHER,
			}
		}

		fn location(&self) -> Option<String> {
			match self {
				Self::Missing => None,
				Self::LoginRequired => Some("/auth/login/".into()),
			}
		}
	}

	#[test]
	fn test_route_error_status() {
		let error = RouteError::from(Error::Missing);

		assert_eq!(error.status(), StatusCode::NOT_FOUND);
		assert_eq!(error.into_response().status(), StatusCode::NOT_FOUND);
	}

	#[test]
	fn test_route_error_redirects() {
		let response = RouteError::from(Error::LoginRequired).into_response();

		assert_eq!(response.status(), StatusCode::SEE_OTHER);
		assert_eq!(response.headers()["location"], "/auth/login/");
	}

	#[test]
	fn test_database_error_is_hidden() {
		let error = RouteError::<Error>::Database(sqlx::Error::RowNotFound);

		assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
		assert!(!error.public_message().contains("row"));
	}
}
