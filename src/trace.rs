use axum::http::Request;
use tracing::{level_filters::LevelFilter, Span};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the tracing subscriber.
///
/// Logs at `info` and above unless `RUST_LOG` says otherwise.
pub fn init() {
	let filter = EnvFilter::builder()
		.with_default_directive(LevelFilter::INFO.into())
		.from_env_lossy();

	tracing_subscriber::registry()
		.with(filter)
		.with(tracing_subscriber::fmt::layer().with_ansi(true))
		.init();
}

/// Opens the span of an HTTP request, tagged with the id set by the request id layer.
pub fn make_span<B>(request: &Request<B>) -> Span {
	let request_id = request
		.headers()
		.get("x-request-id")
		.and_then(|id| id.to_str().ok())
		.unwrap_or_default();

	tracing::info_span!(
		"request",
		method = %request.method(),
		uri = %request.uri(),
		request_id,
	)
}

#[cfg(test)]
mod test {
	use axum::{body::Body, http::Request};

	#[test]
	fn test_make_span_without_request_id() {
		let request = Request::get("/").body(Body::empty()).unwrap();

		let _span = super::make_span(&request);
	}
}
