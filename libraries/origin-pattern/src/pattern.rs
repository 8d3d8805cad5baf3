use crate::Origin;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const WILDCARD: &str = "*";

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PatternError {
	#[error("The origin pattern is empty")]
	Empty,

	#[error("The origin pattern \"{0}\" has no `scheme://` prefix")]
	MissingScheme(String),

	#[error("The origin pattern \"{0}\" has no host")]
	EmptyHost(String),

	#[error("The origin pattern has an invalid port \"{0}\"")]
	InvalidPort(String),

	#[error("The origin pattern \"{0}\" contains a path, query, or fragment")]
	UnexpectedPath(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum SchemePattern {
	Any,
	Exact(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum HostPattern {
	Any,
	/// `*.example.com` matches any subdomain of `example.com` but not `example.com` itself
	Subdomain(String),
	Exact(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum PortPattern {
	/// No port was written, so only the scheme's default port is allowed
	Default,
	Any,
	Exact(u16),
}

/// A wildcard pattern over origins, written like an origin where the scheme, host, or port may be `*`.
///
/// ```
/// use origin_pattern::OriginPattern;
///
/// let pattern: OriginPattern = "http://localhost:*".parse().unwrap();
/// assert!(pattern.matches("http://localhost:5174"));
/// assert!(!pattern.matches("https://localhost:5174"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct OriginPattern {
	scheme: SchemePattern,
	host: HostPattern,
	port: PortPattern,
}

impl OriginPattern {
	/// Checks a serialized origin against the pattern. Strings that are not origins never match.
	pub fn matches(&self, origin: &str) -> bool {
		Origin::parse(origin).is_some_and(|origin| self.matches_origin(&origin))
	}

	pub fn matches_origin(&self, origin: &Origin) -> bool {
		let scheme_matches = match &self.scheme {
			SchemePattern::Any => true,
			SchemePattern::Exact(scheme) => scheme == origin.scheme(),
		};

		let host_matches = match &self.host {
			HostPattern::Any => true,
			HostPattern::Subdomain(suffix) => origin.host().strip_suffix(suffix.as_str()).is_some_and(|rest| rest.len() > 1 && rest.ends_with('.')),
			HostPattern::Exact(host) => host == origin.host(),
		};

		let port_matches = match self.port {
			PortPattern::Any => true,
			PortPattern::Default => origin.port().is_none(),
			PortPattern::Exact(port) => origin.port_or_known_default() == Some(port),
		};

		scheme_matches && host_matches && port_matches
	}
}

impl FromStr for OriginPattern {
	type Err = PatternError;

	fn from_str(pattern: &str) -> Result<Self, Self::Err> {
		let pattern = pattern.trim();
		if pattern.is_empty() {
			return Err(PatternError::Empty);
		}

		let Some((scheme, rest)) = pattern.split_once("://") else {
			return Err(PatternError::MissingScheme(pattern.to_string()));
		};
		if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.' | '*')) {
			return Err(PatternError::MissingScheme(pattern.to_string()));
		}

		// A single trailing slash is what a bare origin URL looks like once parsed, so it is tolerated
		let rest = rest.strip_suffix('/').unwrap_or(rest);
		if rest.contains(['/', '?', '#', '@']) {
			return Err(PatternError::UnexpectedPath(pattern.to_string()));
		}

		let (host, port) = split_host_and_port(rest).ok_or_else(|| PatternError::UnexpectedPath(pattern.to_string()))?;

		let scheme = match scheme {
			WILDCARD => SchemePattern::Any,
			scheme => SchemePattern::Exact(scheme.to_ascii_lowercase()),
		};

		let host = match host {
			"" => return Err(PatternError::EmptyHost(pattern.to_string())),
			WILDCARD => HostPattern::Any,
			host => match host.strip_prefix("*.") {
				Some("") => return Err(PatternError::EmptyHost(pattern.to_string())),
				Some(suffix) => HostPattern::Subdomain(suffix.to_ascii_lowercase()),
				None => HostPattern::Exact(host.to_ascii_lowercase()),
			},
		};

		let port = match port {
			None => PortPattern::Default,
			Some(WILDCARD) => PortPattern::Any,
			Some(port) => PortPattern::Exact(port.parse().map_err(|_| PatternError::InvalidPort(port.to_string()))?),
		};

		Ok(OriginPattern { scheme, host, port })
	}
}

/// Splits `host[:port]`, keeping bracketed IPv6 hosts such as `[::1]` intact.
fn split_host_and_port(authority: &str) -> Option<(&str, Option<&str>)> {
	if authority.starts_with('[') {
		let end = authority.find(']')?;
		let (host, rest) = authority.split_at(end + 1);
		return match rest {
			"" => Some((host, None)),
			rest => rest.strip_prefix(':').map(|port| (host, Some(port))),
		};
	}

	match authority.rsplit_once(':') {
		Some((host, port)) => Some((host, Some(port))),
		None => Some((authority, None)),
	}
}

impl TryFrom<String> for OriginPattern {
	type Error = PatternError;

	fn try_from(pattern: String) -> Result<Self, Self::Error> {
		pattern.parse()
	}
}

impl From<OriginPattern> for String {
	fn from(pattern: OriginPattern) -> Self {
		pattern.to_string()
	}
}

impl fmt::Display for OriginPattern {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.scheme {
			SchemePattern::Any => write!(f, "{WILDCARD}://")?,
			SchemePattern::Exact(scheme) => write!(f, "{scheme}://")?,
		}

		match &self.host {
			HostPattern::Any => write!(f, "{WILDCARD}")?,
			HostPattern::Subdomain(suffix) => write!(f, "*.{suffix}")?,
			HostPattern::Exact(host) => write!(f, "{host}")?,
		}

		match self.port {
			PortPattern::Default => Ok(()),
			PortPattern::Any => write!(f, ":{WILDCARD}"),
			PortPattern::Exact(port) => write!(f, ":{port}"),
		}
	}
}
