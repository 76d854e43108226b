/// Page-load dark mode for whitelisted hostnames

use crate::domain::extract_hostname;
use crate::style::{ApplyOutcome, InvertStyle, StyleHost, StyleInjector};
use crate::whitelist::WhitelistSource;

#[derive(Debug, Clone, PartialEq)]
pub enum AutoApply {
    /// Not an http(s) page
    Unmanageable,
    NotListed(String),
    Applied(String, ApplyOutcome),
    Failed(String),
}

/// Apply the no-transition style if the page's hostname is whitelisted
pub async fn auto_apply<W, H>(page_url: &str, source: &W, injector: &StyleInjector<H>) -> AutoApply
where
    W: WhitelistSource,
    H: StyleHost,
{
    let Some(hostname) = extract_hostname(page_url) else {
        return AutoApply::Unmanageable;
    };

    if !source.whitelist().await.contains(&hostname) {
        return AutoApply::NotListed(hostname);
    }

    match injector.apply(InvertStyle::Immediate) {
        Ok(outcome) => {
            log::debug!("Auto-applied dark mode on {} ({:?})", hostname, outcome);
            AutoApply::Applied(hostname, outcome)
        }
        Err(e) => {
            log::warn!("Auto-apply failed on {}: {}", hostname, e);
            AutoApply::Failed(hostname)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WHITELIST_KEY;
    use crate::testing::{FakeDocument, MemoryStore};
    use crate::whitelist::WhitelistStore;
    use futures::executor::block_on;
    use serde_json::json;

    fn store_with(domains: serde_json::Value) -> WhitelistStore<MemoryStore> {
        WhitelistStore::new(MemoryStore::with_entry(WHITELIST_KEY, domains))
    }

    #[test]
    fn test_whitelisted_page_gets_immediate_style() {
        let store = store_with(json!(["a.com"]));
        let injector = StyleInjector::new(FakeDocument::with_head());

        let result = block_on(auto_apply("https://a.com/x", &store, &injector));

        assert_eq!(result, AutoApply::Applied("a.com".to_string(), ApplyOutcome::Attached));
        assert_eq!(injector.host().marker_count(), 1);
        let css = injector.host().marker_css().unwrap();
        assert!(css.contains("filter: invert(1) hue-rotate(180deg) !important;"));
        assert!(!css.contains("transition"));
    }

    #[test]
    fn test_empty_whitelist_leaves_page_alone() {
        let store = store_with(json!([]));
        let injector = StyleInjector::new(FakeDocument::with_head());

        let result = block_on(auto_apply("https://b.com", &store, &injector));

        assert_eq!(result, AutoApply::NotListed("b.com".to_string()));
        assert_eq!(injector.host().marker_count(), 0);
    }

    #[test]
    fn test_internal_page_is_skipped() {
        let store = store_with(json!(["extensions"]));
        let injector = StyleInjector::new(FakeDocument::with_head());

        let result = block_on(auto_apply("chrome://extensions", &store, &injector));

        assert_eq!(result, AutoApply::Unmanageable);
        assert_eq!(injector.host().marker_count(), 0);
    }

    #[test]
    fn test_subdomain_does_not_match() {
        let store = store_with(json!(["a.com"]));
        let injector = StyleInjector::new(FakeDocument::with_head());

        let result = block_on(auto_apply("https://www.a.com/", &store, &injector));

        assert_eq!(result, AutoApply::NotListed("www.a.com".to_string()));
    }

    #[test]
    fn test_early_document_defers_until_head() {
        let store = store_with(json!(["a.com"]));
        let injector = StyleInjector::new(FakeDocument::without_head());

        let result = block_on(auto_apply("https://a.com/", &store, &injector));

        assert_eq!(result, AutoApply::Applied("a.com".to_string(), ApplyOutcome::Deferred));
        injector.host().create_head();
        assert_eq!(injector.host().marker_count(), 1);
    }

    #[test]
    fn test_unreadable_storage_fails_open() {
        let storage = MemoryStore::with_entry(WHITELIST_KEY, json!(["a.com"]));
        storage.fail_reads(true);
        let store = WhitelistStore::new(storage);
        let injector = StyleInjector::new(FakeDocument::with_head());

        let result = block_on(auto_apply("https://a.com/", &store, &injector));

        assert_eq!(result, AutoApply::NotListed("a.com".to_string()));
        assert_eq!(injector.host().marker_count(), 0);
    }

    #[test]
    fn test_insert_failure_is_reported_not_raised() {
        let store = store_with(json!(["a.com"]));
        let document = FakeDocument::with_head();
        document.fail_attach(true);
        let injector = StyleInjector::new(document);

        let result = block_on(auto_apply("https://a.com/", &store, &injector));

        assert_eq!(result, AutoApply::Failed("a.com".to_string()));
    }
}
