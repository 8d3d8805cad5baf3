// Root
pub use crate::utility_traits::{MessageHandler, Responses};

// Message, MessageHandler
pub use crate::messages::bridge::{BridgeMessage, BridgeMessageHandler};
pub use crate::messages::frontend::FrontendMessage;
pub use crate::messages::message::Message;
pub use crate::messages::reporter::{ReporterMessage, ReporterMessageHandler};

// Utility types
pub use crate::messages::bridge::utility_types::{InvocationId, InvocationState};
pub use crate::messages::reporter::utility_types::{AvailableTargets, ReportTarget, ReporterState};

// Std
pub use std::collections::VecDeque;
