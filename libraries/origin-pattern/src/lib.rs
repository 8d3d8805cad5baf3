//! Parsing of browser origins (`scheme://host[:port]`) and matching them against wildcard patterns such as `http://localhost:*`.
//!
//! An origin is what a browser reports as the sender of a cross-document message. Patterns are used to allow a family of
//! origins, typically every port of a local development server, without enumerating them.

mod origin;
mod pattern;

pub use origin::Origin;
pub use pattern::{OriginPattern, PatternError};
