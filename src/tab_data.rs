/// Data structures describing browser tabs
use serde::{Deserialize, Serialize};

use crate::domain::extract_hostname;

/// What the host reports about a tab
///
/// `url` and `title` are missing for tabs the extension has no access to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TabInfo {
    pub id: i32,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

impl TabInfo {
    pub fn new(id: i32, url: Option<String>, title: Option<String>) -> TabInfo {
        TabInfo { id, url, title }
    }

    /// Hostname of the tab's page, if it is a manageable website
    pub fn hostname(&self) -> Option<String> {
        self.url.as_deref().and_then(extract_hostname)
    }
}
