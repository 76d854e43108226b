/// Popup-side state and actions for the manual toggle

use crate::host::{HostError, KeyValueStore, PageCommand, TabHost};
use crate::style::MarkerState;
use crate::tab_data::TabInfo;
use crate::whitelist::{Whitelist, WhitelistStore};
use serde_json::Value;

/// Everything the popup renders
#[derive(Debug, Clone, PartialEq)]
pub struct PopupSnapshot {
    pub tab_id: Option<i32>,
    pub hostname: Option<String>,
    pub dark_mode: MarkerState,
    pub whitelisted: bool,
    pub whitelist: Whitelist,
}

impl PopupSnapshot {
    pub fn toggle_label(&self) -> &'static str {
        if self.dark_mode.is_active() { "ON" } else { "OFF" }
    }

    pub fn domain_label(&self) -> &str {
        self.hostname.as_deref().unwrap_or("Not a website")
    }

    /// `None` hides the whitelist button
    pub fn whitelist_button_label(&self) -> Option<&'static str> {
        self.hostname.as_ref().map(|_| {
            if self.whitelisted {
                "Remove from Whitelist"
            } else {
                "Add to Whitelist"
            }
        })
    }
}

#[derive(Debug, Clone)]
pub struct ToggleController<S, T> {
    store: WhitelistStore<S>,
    tabs: T,
}

impl<S: KeyValueStore, T: TabHost> ToggleController<S, T> {
    pub fn new(store: WhitelistStore<S>, tabs: T) -> Self {
        ToggleController { store, tabs }
    }

    /// Gather the active tab's state when the popup opens
    pub async fn open(&self) -> PopupSnapshot {
        let tab = match self.tabs.active_tab().await {
            Ok(tab) => tab,
            Err(e) => {
                log::warn!("Active tab query failed: {}", e);
                None
            }
        };

        let hostname = tab.as_ref().and_then(TabInfo::hostname);
        let tab_id = tab.map(|t| t.id);

        let mut dark_mode = match tab_id {
            Some(id) => self.read_state(id).await.unwrap_or(MarkerState::Inactive),
            None => MarkerState::Inactive,
        };

        let whitelist = self.store.get().await;
        let whitelisted = hostname.as_deref().is_some_and(|h| whitelist.contains(h));

        // Whitelisted pages loaded without the content script catch up here
        if let (Some(id), true, MarkerState::Inactive) = (tab_id, whitelisted, dark_mode) {
            match self.tabs.execute(id, PageCommand::ApplyImmediate).await {
                Ok(Value::Bool(true)) => dark_mode = MarkerState::Active,
                Ok(_) => log::debug!("Catch-up apply did not take effect in tab {}", id),
                Err(e) => log::warn!("Catch-up apply failed in tab {}: {}", id, e),
            }
        }

        PopupSnapshot {
            tab_id,
            hostname,
            dark_mode,
            whitelisted,
            whitelist,
        }
    }

    /// Flip dark mode in the tab and update the snapshot without re-querying
    ///
    /// The page is asked for its state right before choosing the command, so
    /// a tab reloaded while the popup stayed open still flips the right way.
    pub async fn toggle(&self, snapshot: &mut PopupSnapshot) {
        let Some(id) = snapshot.tab_id else {
            return;
        };

        let current = self.read_state(id).await.unwrap_or(snapshot.dark_mode);

        let command = match current {
            MarkerState::Active => PageCommand::Remove,
            MarkerState::Inactive => PageCommand::ApplyAnimated,
        };

        match self.tabs.execute(id, command).await {
            Ok(_) => {
                snapshot.dark_mode = current.toggled();
                log::info!("Dark mode {} in tab {}", snapshot.toggle_label(), id);
            }
            Err(e) => log::warn!("Toggle failed in tab {}: {}", id, e),
        }
    }

    /// Add or remove the current hostname
    pub async fn toggle_whitelist(&self, snapshot: &mut PopupSnapshot) {
        let Some(hostname) = snapshot.hostname.clone() else {
            return;
        };

        let result = if snapshot.whitelisted {
            self.store.remove(&hostname).await
        } else {
            self.store.add(&hostname).await
        };
        self.finish_edit(snapshot, result).await;
    }

    /// Remove any listed hostname, e.g. from the whitelist list view
    pub async fn remove_domain(&self, snapshot: &mut PopupSnapshot, hostname: &str) {
        let result = self.store.remove(hostname).await;
        self.finish_edit(snapshot, result).await;
    }

    async fn finish_edit(&self, snapshot: &mut PopupSnapshot, result: Result<bool, HostError>) {
        if let Err(e) = result {
            log::warn!("Whitelist update failed: {}", e);
        }
        self.refresh(snapshot).await;
    }

    async fn refresh(&self, snapshot: &mut PopupSnapshot) {
        snapshot.whitelist = self.store.get().await;
        snapshot.whitelisted = snapshot
            .hostname
            .as_deref()
            .is_some_and(|h| snapshot.whitelist.contains(h));
    }

    /// `None` when the page could not be asked
    async fn read_state(&self, tab_id: i32) -> Option<MarkerState> {
        match self.tabs.execute(tab_id, PageCommand::IsActive).await {
            Ok(value) => Some(MarkerState::from_present(value.as_bool().unwrap_or(false))),
            Err(e) => {
                log::warn!("Could not read dark mode state of tab {}: {}", tab_id, e);
                None
            }
        }
    }
}
