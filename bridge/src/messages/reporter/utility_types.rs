use serde::{Deserialize, Serialize};

/// The window an editor posts its result to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportTarget {
	/// The window that called `window.open` to launch this editor
	Opener,
	/// The frame embedding this editor in an iframe
	Parent,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AvailableTargets {
	pub opener: bool,
	/// Only set when the editor is embedded, since a top-level window is its own parent
	pub parent: bool,
}

impl AvailableTargets {
	pub fn resolve(self, fall_back_to_parent: bool) -> Option<ReportTarget> {
		match self {
			AvailableTargets { opener: true, .. } => Some(ReportTarget::Opener),
			AvailableTargets { parent: true, .. } if fall_back_to_parent => Some(ReportTarget::Parent),
			_ => None,
		}
	}
}

/// One-way lifecycle of an editor session's result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReporterState {
	#[default]
	Armed,
	Sent,
}
