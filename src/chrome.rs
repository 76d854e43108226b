/// Host capabilities backed by the chrome.* extension APIs

use crate::host::{HostError, KeyValueStore, PageCommand, TabHost};
use crate::tab_data::TabInfo;
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;

// Import JS bridge functions
#[wasm_bindgen(module = "/extension/bridge.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getStorage(area: &str, key: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setStorage(area: &str, key: &str, value: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn queryActiveTab() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn executeInTab(tab_id: i32, name: &str) -> Result<JsValue, JsValue>;

    pub(crate) fn onRuntimeMessage(channel: &str, handler: &js_sys::Function);

    pub(crate) fn onInstalled(handler: &js_sys::Function);
}

/// Convert a JSON value into a plain JS value (objects, not Maps)
pub(crate) fn to_js(value: &impl Serialize) -> Result<JsValue, HostError> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| HostError::Encode(format!("{:?}", e)))
}

pub(crate) fn from_js(value: JsValue) -> Result<Value, HostError> {
    if value.is_null() || value.is_undefined() {
        return Ok(Value::Null);
    }
    serde_wasm_bindgen::from_value(value).map_err(|e| HostError::Decode(format!("{:?}", e)))
}

/// chrome.storage.{sync,local}
#[derive(Debug, Clone, Copy)]
pub struct ChromeStorage {
    area: &'static str,
}

impl ChromeStorage {
    pub fn new(area: &'static str) -> Self {
        ChromeStorage { area }
    }
}

impl KeyValueStore for ChromeStorage {
    async fn get(&self, key: &str) -> Result<Option<Value>, HostError> {
        let value = getStorage(self.area, key).await.map_err(HostError::bridge)?;
        match from_js(value)? {
            Value::Null => Ok(None),
            value => Ok(Some(value)),
        }
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), HostError> {
        setStorage(self.area, key, to_js(&value)?)
            .await
            .map_err(HostError::bridge)
    }
}

/// chrome.tabs + chrome.scripting
#[derive(Debug, Clone, Copy, Default)]
pub struct ChromeTabs;

impl TabHost for ChromeTabs {
    async fn active_tab(&self) -> Result<Option<TabInfo>, HostError> {
        let tab_js = queryActiveTab().await.map_err(HostError::bridge)?;
        if tab_js.is_null() || tab_js.is_undefined() {
            return Ok(None);
        }
        serde_wasm_bindgen::from_value(tab_js)
            .map(Some)
            .map_err(|e| HostError::Decode(format!("Failed to parse tab: {:?}", e)))
    }

    async fn execute(&self, tab_id: i32, command: PageCommand) -> Result<Value, HostError> {
        let result = executeInTab(tab_id, command.name())
            .await
            .map_err(HostError::bridge)?;
        from_js(result)
    }
}
