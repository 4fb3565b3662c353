#![warn(clippy::pedantic)]

mod config;
mod error;
mod extract;
mod pagination;
mod route;
mod session;
mod trace;
mod view;

use std::str::FromStr;

use argon2::Argon2;
use axum::Router;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tower::ServiceBuilder;
use tower_http::{
	request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
	trace::TraceLayer,
};

pub type Database = sqlx::SqlitePool;
pub type AppState = State;

/// The shared application state.
///
/// This should contain all shared dependencies that handlers need to access,
/// such as a database connection pool or a hash configuration (if it's expensive to create).
///
/// For dependencies only used by a single handler, you can combine states instead.
#[derive(Clone, axum::extract::FromRef)]
pub struct State {
	pub database: Database,
	pub hasher: Argon2<'static>,
}

#[derive(Debug, thiserror::Error)]
enum StartupError {
	#[error("invalid configuration: {0}")]
	Config(#[from] config::Error),
	#[error("database error: {0}")]
	Database(#[from] sqlx::Error),
	#[error("migration error: {0}")]
	Migrate(#[from] sqlx::migrate::MigrateError),
	#[error("io error: {0}")]
	Io(#[from] std::io::Error),
}

/// Builds the application with all routes and middleware.
pub fn app(state: State) -> Router {
	route::routes()
		.layer(
			ServiceBuilder::new()
				.layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
				.layer(TraceLayer::new_for_http().make_span_with(trace::make_span))
				.layer(PropagateRequestIdLayer::x_request_id()),
		)
		.with_state(state)
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
	dotenvy::dotenv().ok();
	trace::init();

	let config = config::Config::from_env()?;

	let options = SqliteConnectOptions::from_str(&config.database_url)?
		.create_if_missing(true)
		.foreign_keys(true);

	let database = SqlitePoolOptions::new()
		.max_connections(config.max_connections)
		.connect_with(options)
		.await?;

	sqlx::migrate!().run(&database).await?;

	let state = State {
		database,
		hasher: Argon2::default(),
	};

	let listener = tokio::net::TcpListener::bind((config.host, config.port)).await?;

	tracing::info!(host = %config.host, port = config.port, "listening");

	axum::serve(listener, app(state)).await?;

	Ok(())
}
