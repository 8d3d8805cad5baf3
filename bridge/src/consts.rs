// PROTOCOL
/// The `type` tag that distinguishes launch protocol messages from unrelated cross-window traffic.
pub const EDITOR_MESSAGE_TYPE: &str = "editor-message";
/// Envelopes with any other `version` are ignored by the receiver.
pub const PROTOCOL_VERSION: &str = "1.0";

// BRIDGE
pub const EDITOR_RESPONSE_TIMEOUT_MILLISECONDS: u64 = 10_000;
/// Browsing context name passed to `window.open`, which always creates a new tab or window.
pub const NEW_WINDOW_TARGET: &str = "_blank";
/// Hostnames of the caller's own page that put the bridge into the development environment.
pub const DEVELOPMENT_HOSTNAMES: &[&str] = &["localhost", "127.0.0.1", "[::1]"];

// REPORTER
/// Used when neither the embedding page nor the build provides an editor id.
pub const DEFAULT_EDITOR_ID: &str = "new-editor";
/// Set at build time to bake an editor id into the editor's binary.
pub const EDITOR_ID_BUILD_ENV: Option<&str> = option_env!("TOOLMUSE_EDITOR_ID");
/// The sender cannot know which origin legitimately opened it, so it posts to any and leaves origin checks to the receiver.
pub const ANY_TARGET_ORIGIN: &str = "*";
