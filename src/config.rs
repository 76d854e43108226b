/// Fixed settings shared by every extension context

/// Storage key holding the whitelist array
pub const WHITELIST_KEY: &str = "darkModeWhitelist";

/// chrome.storage area the whitelist lives in, synced across devices
pub const STORAGE_AREA: &str = "sync";

/// Reserved id of the injected `<style>` element
pub const MARKER_ID: &str = "dark-toggle-style";

/// Tag carried by every runtime message this extension sends
pub const MESSAGE_CHANNEL: &str = "dark-toggle";

/// Duration of the animated inversion, in seconds
pub const TRANSITION_SECS: f32 = 0.3;

/// Logger settings: verbose for dev builds, quieter for release
pub fn log_config() -> wasm_logger::Config {
    if cfg!(debug_assertions) {
        wasm_logger::Config::new(log::Level::Debug)
    } else {
        wasm_logger::Config::new(log::Level::Info)
    }
}
