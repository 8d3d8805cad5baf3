use crate::messages::prelude::*;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Message {
	NoOp,

	Bridge(BridgeMessage),
	Frontend(FrontendMessage),
	Reporter(ReporterMessage),
}

impl_message!(Message, Bridge, BridgeMessage);
impl_message!(Message, Frontend, FrontendMessage);
impl_message!(Message, Reporter, ReporterMessage);
