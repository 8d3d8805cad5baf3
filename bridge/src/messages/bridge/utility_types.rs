use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one call to open an editor, so events belonging to an earlier invocation can be told apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InvocationId(pub u64);

impl fmt::Display for InvocationId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// Lifecycle of the bridge's most recent invocation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvocationState {
	/// Nothing has been opened yet
	#[default]
	Idle,
	/// The window is open, the listener is attached, and the timer is running
	Pending,
	/// A valid result arrived first
	Resolved,
	/// The timer fired first, so no later message is accepted
	Expired,
}

impl InvocationState {
	pub fn as_str(self) -> &'static str {
		match self {
			InvocationState::Idle => "idle",
			InvocationState::Pending => "pending",
			InvocationState::Resolved => "resolved",
			InvocationState::Expired => "expired",
		}
	}
}
