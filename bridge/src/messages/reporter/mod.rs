mod reporter_message;
mod reporter_message_handler;

pub mod utility_types;

#[doc(inline)]
pub use reporter_message::ReporterMessage;
#[doc(inline)]
pub use reporter_message_handler::ReporterMessageHandler;
