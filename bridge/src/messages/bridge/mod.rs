mod bridge_message;
mod bridge_message_handler;

pub mod utility_types;

#[doc(inline)]
pub use bridge_message::BridgeMessage;
#[doc(inline)]
pub use bridge_message_handler::BridgeMessageHandler;
