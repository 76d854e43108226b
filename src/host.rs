/// Capabilities the extension needs from its host browser
///
/// The core logic only talks to these traits. `crate::chrome` implements them
/// over the `chrome.*` APIs; tests use the in-memory fakes in `crate::testing`.

use crate::tab_data::TabInfo;
use serde_json::Value;
use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum HostError {
    #[error("host call failed: {0}")]
    Bridge(String),
    #[error("failed to decode host value: {0}")]
    Decode(String),
    #[error("failed to encode host value: {0}")]
    Encode(String),
    #[error("DOM operation failed: {0}")]
    Dom(String),
    #[error("no document available")]
    NoDocument,
}

impl HostError {
    pub fn bridge(err: JsValue) -> Self {
        HostError::Bridge(format!("{:?}", err))
    }

    pub fn dom(err: JsValue) -> Self {
        HostError::Dom(format!("{:?}", err))
    }
}

/// Persisted key-value storage shared across extension contexts
#[allow(async_fn_in_trait)]
pub trait KeyValueStore {
    /// Read a key; `Ok(None)` when it was never written
    async fn get(&self, key: &str) -> Result<Option<Value>, HostError>;

    /// Write a key; resolves once the write is durable
    async fn set(&self, key: &str, value: Value) -> Result<(), HostError>;
}

/// Tab query and remote execution
#[allow(async_fn_in_trait)]
pub trait TabHost {
    async fn active_tab(&self) -> Result<Option<TabInfo>, HostError>;

    /// Run a named page command inside the tab and return its result
    async fn execute(&self, tab_id: i32, command: PageCommand) -> Result<Value, HostError>;
}

/// Zero-argument functions the popup may run in a tab's page context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageCommand {
    ApplyImmediate,
    ApplyAnimated,
    Remove,
    IsActive,
}

impl PageCommand {
    pub fn name(self) -> &'static str {
        match self {
            PageCommand::ApplyImmediate => "applyImmediate",
            PageCommand::ApplyAnimated => "applyAnimated",
            PageCommand::Remove => "remove",
            PageCommand::IsActive => "isActive",
        }
    }

    pub fn from_name(name: &str) -> Option<PageCommand> {
        match name {
            "applyImmediate" => Some(PageCommand::ApplyImmediate),
            "applyAnimated" => Some(PageCommand::ApplyAnimated),
            "remove" => Some(PageCommand::Remove),
            "isActive" => Some(PageCommand::IsActive),
            _ => None,
        }
    }
}
