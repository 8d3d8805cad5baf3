//! The root-level messages forming the first layer of the message system architecture.

pub mod bridge;
pub mod frontend;
pub mod message;
pub mod prelude;
pub mod reporter;
