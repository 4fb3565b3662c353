use std::net::{IpAddr, Ipv4Addr};

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("{name} is not valid: {value:?}")]
	Invalid { name: &'static str, value: String },
}

/// Settings read from the environment on startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
	pub database_url: String,
	pub host: IpAddr,
	pub port: u16,
	pub max_connections: u32,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			database_url: "sqlite://postboard.db".into(),
			host: IpAddr::V4(Ipv4Addr::LOCALHOST),
			port: 3000,
			max_connections: 5,
		}
	}
}

impl Config {
	pub fn from_env() -> Result<Self, Error> {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	/// Reads the settings through `lookup`, keeping the default of any that is missing.
	pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
		let default = Self::default();

		Ok(Self {
			database_url: lookup("DATABASE_URL").unwrap_or(default.database_url),
			host: parse(&lookup, "HOST")?.unwrap_or(default.host),
			port: parse(&lookup, "PORT")?.unwrap_or(default.port),
			max_connections: parse(&lookup, "DATABASE_MAX_CONNECTIONS")?
				.unwrap_or(default.max_connections),
		})
	}
}

fn parse<T: std::str::FromStr>(
	lookup: &impl Fn(&str) -> Option<String>,
	name: &'static str,
) -> Result<Option<T>, Error> {
	lookup(name)
		.map(|value| value.parse().map_err(|_| Error::Invalid { name, value }))
		.transpose()
}
