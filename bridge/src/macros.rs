/// Implements `From<$child> for $parent` so a child message can be passed anywhere its parent message is expected.
///
/// # Example
///
/// ```ignore
/// impl_message!(Message, Bridge, BridgeMessage);
/// ```
///
/// lets `responses.add(BridgeMessage::TimeoutElapsed { invocation })` push a `Message::Bridge(…)`.
macro_rules! impl_message {
	($parent:ident, $variant:ident, $child:ty) => {
		impl From<$child> for $parent {
			fn from(message: $child) -> Self {
				$parent::$variant(message)
			}
		}
	};
}
