/// In-memory host fakes for unit tests

use crate::host::{HostError, KeyValueStore, PageCommand, TabHost};
use crate::style::{DeferredAttach, StyleHost, StyleInjector, run_page_command};
use crate::tab_data::TabInfo;
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

/// Key-value storage; clones share the same entries
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, Value>>>,
    fail_reads: Rc<Cell<bool>>,
    fail_writes: Rc<Cell<bool>>,
    writes: Rc<Cell<usize>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: Value) -> Self {
        let store = Self::new();
        store.entries.borrow_mut().insert(key.to_string(), value);
        store
    }

    pub fn raw(&self, key: &str) -> Option<Value> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn writes(&self) -> usize {
        self.writes.get()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, HostError> {
        if self.fail_reads.get() {
            return Err(HostError::Bridge("storage read rejected".to_string()));
        }
        Ok(self.raw(key))
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), HostError> {
        if self.fail_writes.get() {
            return Err(HostError::Bridge("storage write rejected".to_string()));
        }
        self.entries.borrow_mut().insert(key.to_string(), value);
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

/// Document with a controllable head; clones share the same page
#[derive(Clone, Default)]
pub struct FakeDocument {
    head: Rc<Cell<bool>>,
    markers: Rc<RefCell<Vec<String>>>,
    pending: Rc<RefCell<Option<Rc<DeferredAttach>>>>,
    fail_attach: Rc<Cell<bool>>,
}

impl FakeDocument {
    pub fn with_head() -> Self {
        let document = Self::default();
        document.head.set(true);
        document
    }

    pub fn without_head() -> Self {
        Self::default()
    }

    /// Parser creates `<head>` without notifying anyone
    pub fn set_head(&self) {
        self.head.set(true);
    }

    /// Parser creates `<head>` and the mutation observer sees it
    pub fn create_head(&self) {
        self.set_head();
        self.fire_mutation();
    }

    pub fn fire_mutation(&self) {
        self.run_pending();
    }

    /// DOMContentLoaded
    pub fn fire_loaded(&self) {
        self.run_pending();
    }

    // Both triggers stay registered and share one pending attach
    fn run_pending(&self) {
        let pending = self.pending.borrow().clone();
        if let Some(pending) = pending {
            pending.attempt(self);
        }
    }

    pub fn marker_count(&self) -> usize {
        self.markers.borrow().len()
    }

    pub fn marker_css(&self) -> Option<String> {
        self.markers.borrow().first().cloned()
    }

    pub fn fail_attach(&self, fail: bool) {
        self.fail_attach.set(fail);
    }
}

impl StyleHost for FakeDocument {
    fn has_marker(&self) -> bool {
        !self.markers.borrow().is_empty()
    }

    fn head_ready(&self) -> bool {
        self.head.get()
    }

    fn attach_marker(&self, css: &str) -> Result<(), HostError> {
        if self.fail_attach.get() {
            return Err(HostError::Dom("appendChild rejected".to_string()));
        }
        self.markers.borrow_mut().push(css.to_string());
        Ok(())
    }

    fn detach_marker(&self) -> bool {
        self.markers.borrow_mut().pop().is_some()
    }

    fn attach_when_ready(&self, css: String) -> Result<(), HostError> {
        *self.pending.borrow_mut() = Some(Rc::new(DeferredAttach::new(css)));
        Ok(())
    }
}

/// Single-tab browser whose page is a `FakeDocument`
#[derive(Clone)]
pub struct FakeTabs {
    tab: Option<TabInfo>,
    page: FakeDocument,
    fail_execute: Rc<Cell<bool>>,
    executed: Rc<RefCell<Vec<PageCommand>>>,
}

impl FakeTabs {
    pub fn new(url: &str, page: FakeDocument) -> Self {
        FakeTabs {
            tab: Some(TabInfo::new(1, Some(url.to_string()), None)),
            page,
            fail_execute: Rc::new(Cell::new(false)),
            executed: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn no_tab() -> Self {
        FakeTabs {
            tab: None,
            ..Self::new("about:blank", FakeDocument::with_head())
        }
    }

    pub fn page(&self) -> &FakeDocument {
        &self.page
    }

    pub fn executed(&self) -> Vec<PageCommand> {
        self.executed.borrow().clone()
    }

    pub fn fail_execute(&self, fail: bool) {
        self.fail_execute.set(fail);
    }
}

impl TabHost for FakeTabs {
    async fn active_tab(&self) -> Result<Option<TabInfo>, HostError> {
        Ok(self.tab.clone())
    }

    async fn execute(&self, tab_id: i32, command: PageCommand) -> Result<Value, HostError> {
        if self.fail_execute.get() {
            return Err(HostError::Bridge(format!("cannot access tab {}", tab_id)));
        }
        self.executed.borrow_mut().push(command);
        Ok(run_page_command(&StyleInjector::new(self.page.clone()), command))
    }
}
