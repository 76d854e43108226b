/// Whitelist of hostnames that get dark mode on page load

use crate::config::WHITELIST_KEY;
use crate::host::{HostError, KeyValueStore};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Ordered list of unique hostnames, stored as a plain JSON array
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Whitelist {
    domains: Vec<String>,
}

impl Whitelist {
    pub fn new() -> Self {
        Whitelist { domains: Vec::new() }
    }

    pub fn contains(&self, hostname: &str) -> bool {
        self.domains.iter().any(|d| d == hostname)
    }

    /// Append `hostname` unless already listed; returns whether it was added
    pub fn add(&mut self, hostname: &str) -> bool {
        if self.contains(hostname) {
            return false;
        }
        self.domains.push(hostname.to_string());
        true
    }

    /// Remove `hostname`; returns whether it was listed
    pub fn remove(&mut self, hostname: &str) -> bool {
        match self.domains.iter().position(|d| d == hostname) {
            Some(index) => {
                self.domains.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.domains.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

// Lists written by other writers may contain repeats; keep first occurrences.
impl From<Vec<String>> for Whitelist {
    fn from(domains: Vec<String>) -> Self {
        domains.into_iter().fold(Whitelist::new(), |mut list, domain| {
            list.add(&domain);
            list
        })
    }
}

impl From<Whitelist> for Vec<String> {
    fn from(list: Whitelist) -> Self {
        list.domains
    }
}

/// Anything that can hand out the current whitelist
#[allow(async_fn_in_trait)]
pub trait WhitelistSource {
    async fn whitelist(&self) -> Whitelist;
}

/// Whitelist persisted under a single storage key
#[derive(Debug, Clone)]
pub struct WhitelistStore<S> {
    storage: S,
}

impl<S: KeyValueStore> WhitelistStore<S> {
    pub fn new(storage: S) -> Self {
        WhitelistStore { storage }
    }

    /// Stored whitelist; empty when unset or unreadable
    pub async fn get(&self) -> Whitelist {
        match self.load().await {
            Ok(list) => list,
            Err(e) => {
                log::warn!("Whitelist read failed, treating as empty: {}", e);
                Whitelist::new()
            }
        }
    }

    pub async fn contains(&self, hostname: &str) -> bool {
        self.get().await.contains(hostname)
    }

    /// Add `hostname`; resolves after the write completed
    pub async fn add(&self, hostname: &str) -> Result<bool, HostError> {
        let mut list = self.load().await?;
        if !list.add(hostname) {
            return Ok(false);
        }
        self.save(&list).await?;
        log::info!("Added {} to whitelist", hostname);
        Ok(true)
    }

    pub async fn remove(&self, hostname: &str) -> Result<bool, HostError> {
        let mut list = self.load().await?;
        if !list.remove(hostname) {
            return Ok(false);
        }
        self.save(&list).await?;
        log::info!("Removed {} from whitelist", hostname);
        Ok(true)
    }

    async fn load(&self) -> Result<Whitelist, HostError> {
        match self.storage.get(WHITELIST_KEY).await? {
            None | Some(Value::Null) => Ok(Whitelist::new()),
            Some(value) => serde_json::from_value(value)
                .map_err(|e| HostError::Decode(format!("{} is not a list of hostnames: {}", WHITELIST_KEY, e))),
        }
    }

    async fn save(&self, list: &Whitelist) -> Result<(), HostError> {
        let value = serde_json::to_value(list).map_err(|e| HostError::Encode(e.to_string()))?;
        self.storage.set(WHITELIST_KEY, value).await
    }
}

impl<S: KeyValueStore> WhitelistSource for WhitelistStore<S> {
    async fn whitelist(&self) -> Whitelist {
        self.get().await
    }
}
