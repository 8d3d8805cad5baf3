use std::fmt;
use url::Url;

/// The scheme, host, and port triple identifying a browsing context.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Origin {
	scheme: String,
	host: String,
	/// Only present when it differs from the scheme's default port
	port: Option<u16>,
	effective_port: Option<u16>,
}

impl Origin {
	/// Parses an origin such as `https://example.com` or `http://localhost:5174`.
	///
	/// Anything carrying more than an origin (credentials, a path other than `/`, a query, or a fragment) is rejected,
	/// as is anything without a host.
	pub fn parse(origin: &str) -> Option<Origin> {
		let url = Url::parse(origin).ok()?;

		if !url.username().is_empty() || url.password().is_some() || url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
			return None;
		}

		let host = url.host_str()?.to_ascii_lowercase();

		Some(Origin {
			scheme: url.scheme().to_string(),
			host,
			port: url.port(),
			effective_port: url.port_or_known_default(),
		})
	}

	/// True if the string is exactly the canonical form browsers use when reporting an origin, e.g. without a trailing slash or default port.
	pub fn is_serialized(origin: &str) -> bool {
		Origin::parse(origin).is_some_and(|parsed| parsed.to_string() == origin)
	}

	pub fn scheme(&self) -> &str {
		&self.scheme
	}

	pub fn host(&self) -> &str {
		&self.host
	}

	/// The explicit port, which is `None` when the origin uses its scheme's default port.
	pub fn port(&self) -> Option<u16> {
		self.port
	}

	/// The explicit port, or the scheme's default port if the scheme has one.
	pub fn port_or_known_default(&self) -> Option<u16> {
		self.effective_port
	}
}

impl fmt::Display for Origin {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}://{}", self.scheme, self.host)?;
		if let Some(port) = self.port {
			write!(f, ":{port}")?;
		}
		Ok(())
	}
}
