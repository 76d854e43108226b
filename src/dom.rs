/// `StyleHost` over the live page document

use crate::config::MARKER_ID;
use crate::host::HostError;
use crate::style::{DeferredAttach, StyleHost};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, MutationObserver, MutationObserverInit};

#[derive(Clone)]
pub struct PageDocument {
    document: Document,
}

impl PageDocument {
    pub fn new(document: Document) -> Self {
        PageDocument { document }
    }

    /// Document of the current window
    pub fn current() -> Result<Self, HostError> {
        web_sys::window()
            .and_then(|window| window.document())
            .map(PageDocument::new)
            .ok_or(HostError::NoDocument)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

impl StyleHost for PageDocument {
    fn has_marker(&self) -> bool {
        self.document.get_element_by_id(MARKER_ID).is_some()
    }

    fn head_ready(&self) -> bool {
        self.document.head().is_some()
    }

    fn attach_marker(&self, css: &str) -> Result<(), HostError> {
        insert_marker(&self.document, css)
    }

    fn detach_marker(&self) -> bool {
        match self.document.get_element_by_id(MARKER_ID) {
            Some(element) => {
                element.remove();
                true
            }
            None => false,
        }
    }

    fn attach_when_ready(&self, css: String) -> Result<(), HostError> {
        let pending = Rc::new(DeferredAttach::new(css));
        let observer_slot: Rc<RefCell<Option<MutationObserver>>> = Rc::new(RefCell::new(None));

        // Shared by the load listener and the observer; the first one that
        // sees a head attaches, every later call is a no-op.
        let attempt: Rc<dyn Fn()> = {
            let host = self.clone();
            let observer_slot = observer_slot.clone();
            Rc::new(move || {
                if pending.attempt(&host) {
                    if let Some(observer) = observer_slot.borrow_mut().take() {
                        observer.disconnect();
                    }
                }
            })
        };

        let on_mutation = {
            let attempt = attempt.clone();
            Closure::wrap(Box::new(move |_records: js_sys::Array, _observer: MutationObserver| {
                attempt();
            }) as Box<dyn FnMut(js_sys::Array, MutationObserver)>)
        };
        let observer = MutationObserver::new(on_mutation.as_ref().unchecked_ref()).map_err(HostError::dom)?;
        let init = MutationObserverInit::new();
        init.set_child_list(true);
        init.set_subtree(true);
        observer
            .observe_with_options(&self.document, &init)
            .map_err(HostError::dom)?;
        *observer_slot.borrow_mut() = Some(observer);

        let on_loaded = Closure::wrap(Box::new(move |_event: Event| {
            attempt();
        }) as Box<dyn FnMut(Event)>);
        self.document
            .add_event_listener_with_callback("DOMContentLoaded", on_loaded.as_ref().unchecked_ref())
            .map_err(HostError::dom)?;

        // Both callbacks live for the rest of the page
        on_mutation.forget();
        on_loaded.forget();
        Ok(())
    }
}

fn insert_marker(document: &Document, css: &str) -> Result<(), HostError> {
    let head = document.head().ok_or(HostError::NoDocument)?;
    let style = document.create_element("style").map_err(HostError::dom)?;
    style.set_id(MARKER_ID);
    style.set_text_content(Some(css));
    head.append_child(&style).map_err(HostError::dom)?;
    Ok(())
}
