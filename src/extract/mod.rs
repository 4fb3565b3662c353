mod session;

pub use session::Session;

use axum::{
	extract::{FromRequest, FromRequestParts, Request},
	http::request,
};
use serde::de;
use validator::{Validate, ValidationErrors};

use crate::error::ExtractError;

/// Extractor that deserializes an urlencoded form body and validates it.
///
/// Unlike the other extractors, validation errors do not reject the request:
/// they are kept alongside the submitted data so the handler can render the
/// form again with the errors next to each field.
///
/// ```rust
/// async fn route(form: Form<PostForm>) {
///   if !form.is_valid() {
///     // ...
///   }
/// }
/// ```
#[derive(Debug)]
pub struct Form<T> {
	pub data: T,
	pub errors: ValidationErrors,
}

impl<T> Form<T> {
	pub fn is_valid(&self) -> bool {
		self.errors.is_empty()
	}
}

#[axum::async_trait]
impl<T, S> FromRequest<S> for Form<T>
where
	T: de::DeserializeOwned + Validate,
	S: Send + Sync,
{
	type Rejection = ExtractError;

	async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
		let data = axum::extract::Form::<T>::from_request(req, state).await?.0;
		let errors = data.validate().err().unwrap_or_default();

		Ok(Self { data, errors })
	}
}

/// Extractor that deserializes a query string and validates it.
///
/// ```rust
/// async fn route(Query(params): Query<Params>) {
///   // ...
/// }
/// ```
pub struct Query<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequestParts<S> for Query<T>
where
	T: de::DeserializeOwned + Validate,
	S: Send + Sync,
{
	type Rejection = ExtractError;

	async fn from_request_parts(
		parts: &mut request::Parts,
		state: &S,
	) -> Result<Self, Self::Rejection> {
		let result = axum::extract::Query::<T>::from_request_parts(parts, state)
			.await?
			.0;

		result.validate().map_err(ExtractError::Validation)?;

		Ok(Self(result))
	}
}

/// Extractor that deserializes path parameters.
///
/// Parameters that fail to parse are answered with the not found page.
pub struct Path<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequestParts<S> for Path<T>
where
	T: de::DeserializeOwned + Send,
	S: Send + Sync,
{
	type Rejection = ExtractError;

	async fn from_request_parts(
		parts: &mut request::Parts,
		state: &S,
	) -> Result<Self, Self::Rejection> {
		let result = axum::extract::Path::<T>::from_request_parts(parts, state)
			.await?
			.0;

		Ok(Self(result))
	}
}
