//! Background worker messaging.
//!
//! Popup, content or other extension pages may ask the background for the
//! stored whitelist over `chrome.runtime.sendMessage`.
//!
//! # Message format
//!
//! Request: `{ channel: "dark-toggle", type: "getWhitelist" }`
//! Response: `{ type: "whitelist", domains: [...] }` or `{ type: "error", message }`
//!
//! Messages without the channel tag belong to someone else and are ignored.

use crate::chrome::{from_js, onInstalled, onRuntimeMessage, to_js};
use crate::config::MESSAGE_CHANNEL;
use crate::host::KeyValueStore;
use crate::whitelist::{Whitelist, WhitelistStore};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Request {
    GetWhitelist,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Response {
    Whitelist { domains: Whitelist },
    Error { message: String },
}

pub async fn dispatch<S: KeyValueStore>(request: Request, store: &WhitelistStore<S>) -> Response {
    match request {
        Request::GetWhitelist => Response::Whitelist {
            domains: store.get().await,
        },
    }
}

/// Parse an incoming message; `None` for foreign or malformed messages
pub fn parse_message(message: &serde_json::Value) -> Option<Request> {
    if message.get("channel").and_then(|c| c.as_str()) != Some(MESSAGE_CHANNEL) {
        return None;
    }
    serde_json::from_value(message.clone()).ok()
}

/// Register the runtime listeners of the background worker
pub fn install<S>(store: WhitelistStore<S>)
where
    S: KeyValueStore + Clone + 'static,
{
    let on_installed = Closure::wrap(Box::new(move |details: JsValue| {
        let reason = from_js(details)
            .ok()
            .and_then(|d| d.get("reason").and_then(|r| r.as_str()).map(str::to_string))
            .unwrap_or_else(|| "unknown".to_string());
        log::info!("Dark mode extension installed ({})", reason);
    }) as Box<dyn FnMut(JsValue)>);
    onInstalled(on_installed.as_ref().unchecked_ref());

    let on_message = Closure::wrap(Box::new(move |message: JsValue| -> JsValue {
        let request = match from_js(message).ok().as_ref().and_then(parse_message) {
            Some(request) => request,
            None => return JsValue::FALSE,
        };

        let store = store.clone();
        future_to_promise(async move {
            let response = dispatch(request, &store).await;
            to_js(&response).map_err(|e| JsValue::from_str(&e.to_string()))
        })
        .into()
    }) as Box<dyn FnMut(JsValue) -> JsValue>);
    onRuntimeMessage(MESSAGE_CHANNEL, on_message.as_ref().unchecked_ref());

    // Leak the closures so they live for the worker lifetime
    on_installed.forget();
    on_message.forget();
}
