use std::{fmt::Display, str::FromStr};

use serde::{de, Deserialize, Deserializer};
use validator::Validate;

/// The `?page=` query of listing pages.
///
/// The value is kept raw so that a malformed number falls back to a valid
/// page instead of rejecting the request.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct Paginate {
	/// The page number to return (1-indexed).
	pub page: Option<String>,
}

impl Paginate {
	pub fn page(&self) -> Option<&str> {
		self.page.as_deref()
	}
}

/// Deserializes an optional form value, treating a blank value as missing.
///
/// HTML `<select>` elements submit an empty string for their placeholder option.
pub fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
	D: Deserializer<'de>,
	T: FromStr,
	T::Err: Display,
{
	let value = Option::<String>::deserialize(deserializer)?;

	match value.as_deref().map(str::trim) {
		None | Some("") => Ok(None),
		Some(value) => value.parse().map(Some).map_err(de::Error::custom),
	}
}

#[cfg(test)]
mod test {
	use serde::Deserialize;

	#[derive(Deserialize)]
	struct Input {
		#[serde(default, deserialize_with = "super::empty_as_none")]
		group: Option<i64>,
	}

	fn parse(query: &str) -> Result<Input, axum::extract::rejection::QueryRejection> {
		let uri: axum::http::Uri = format!("/?{query}").parse().unwrap();

		axum::extract::Query::<Input>::try_from_uri(&uri).map(|query| query.0)
	}

	#[test]
	fn test_empty_as_none() {
		assert_eq!(parse("group=").unwrap().group, None);
		assert_eq!(parse("").unwrap().group, None);
		assert_eq!(parse("group=4").unwrap().group, Some(4));
		assert!(parse("group=four").is_err());
	}
}
