/// Dark Toggle - color-inverting dark mode extension
/// Built with Rust + WASM + Yew

pub mod applier;
pub mod background;
pub mod chrome;
pub mod config;
pub mod dom;
pub mod domain;
pub mod host;
pub mod style;
pub mod tab_data;
pub mod toggle;
pub mod ui;
pub mod whitelist;

#[cfg(test)]
mod testing;

use wasm_bindgen::prelude::*;

use crate::chrome::{ChromeStorage, ChromeTabs};
use crate::dom::PageDocument;
use crate::host::PageCommand;
use crate::style::{StyleInjector, run_page_command};
use crate::whitelist::WhitelistStore;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(config::log_config());
}

pub(crate) fn chrome_whitelist() -> WhitelistStore<ChromeStorage> {
    WhitelistStore::new(ChromeStorage::new(config::STORAGE_AREA))
}

pub(crate) fn chrome_controller() -> toggle::ToggleController<ChromeStorage, ChromeTabs> {
    toggle::ToggleController::new(chrome_whitelist(), ChromeTabs)
}

// Re-export hostname extraction for JavaScript access
#[wasm_bindgen]
pub fn extract_hostname(url: &str) -> Option<String> {
    domain::extract_hostname(url)
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}

// Content script: dark mode on page load for whitelisted hostnames
#[wasm_bindgen]
pub async fn run_content_script() {
    let document = match PageDocument::current() {
        Ok(document) => document,
        Err(e) => {
            log::warn!("Content script without document: {}", e);
            return;
        }
    };
    let url = match document.document().url() {
        Ok(url) => url,
        Err(e) => {
            log::warn!("Could not read page URL: {:?}", e);
            return;
        }
    };

    let outcome = applier::auto_apply(&url, &chrome_whitelist(), &StyleInjector::new(document)).await;
    log::debug!("Page load check: {:?}", outcome);
}

// Page-context entry for commands sent from the popup
#[wasm_bindgen]
pub fn run_page_command_by_name(name: &str) -> JsValue {
    let Some(command) = PageCommand::from_name(name) else {
        log::warn!("Unknown page command: {}", name);
        return JsValue::NULL;
    };
    match PageDocument::current() {
        Ok(document) => JsValue::from_bool(
            run_page_command(&StyleInjector::new(document), command)
                .as_bool()
                .unwrap_or(false),
        ),
        Err(e) => {
            log::warn!("Page command {} without document: {}", name, e);
            JsValue::FALSE
        }
    }
}

// Background worker listeners
#[wasm_bindgen]
pub fn start_background() {
    background::install(chrome_whitelist());
}
