#[macro_use]
mod macros;

pub mod application;
pub mod config;
pub mod consts;
pub mod dispatcher;
pub mod editor_bridge;
pub mod error;
pub mod messages;
pub mod protocol;
pub mod reporter;
pub mod utility_traits;
pub mod workspace;

#[cfg(test)]
pub(crate) mod test_utils;

#[doc(inline)]
pub use config::{BridgeSettings, EditorConfig, EditorRegistry, ReporterSettings};
#[doc(inline)]
pub use editor_bridge::{BridgeHost, EditorBridge};
#[doc(inline)]
pub use error::{BridgeError, ConfigError};
#[doc(inline)]
pub use protocol::{EditorMessage, EditorPayload, EditorStatus, Environment};
#[doc(inline)]
pub use reporter::{Reporter, ReporterHost};
#[doc(inline)]
pub use workspace::{EditorResult, Workspace};
