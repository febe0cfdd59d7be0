use cloudguard_provider::{ConnectionOptions, KeyMetadataSource};
use cloudguard_types::{AuditState, KeyManager, TrustClass};
use tracing::debug;

/// Cached provider metadata for one encryption key.
///
/// `given_key_id` is the identifier the caller originally supplied, which
/// may differ from the ARN and bare key id the provider reports.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyMetadataCacheEntry {
    pub key_arn: Option<String>,
    pub key_id: Option<String>,
    pub given_key_id: Option<String>,
    pub key_manager: KeyManager,
}

/// Process-lifetime cache of key metadata, owned by one scan driver.
///
/// Entries are appended on first successful fetch and never updated or
/// evicted; the cache dies with the driver.
#[derive(Debug, Default)]
pub struct KeyTrustCache {
    entries: Vec<KeyMetadataCacheEntry>,
}

impl KeyTrustCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[KeyMetadataCacheEntry] {
        &self.entries
    }

    /// Alias lookup, first match wins: ARN, then the identifier the caller
    /// originally supplied, then the bare key id.
    fn position(&self, key_identifier: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.key_arn.as_deref() == Some(key_identifier))
            .or_else(|| {
                self.entries
                    .iter()
                    .position(|e| e.given_key_id.as_deref() == Some(key_identifier))
            })
            .or_else(|| {
                self.entries
                    .iter()
                    .position(|e| e.key_id.as_deref() == Some(key_identifier))
            })
    }

    /// Resolve a key identifier to a cached entry, fetching metadata on a
    /// miss. A failed fetch is swallowed and reported as not-found: an
    /// unreachable or deleted key is a compliance signal, not an
    /// operational fault.
    pub fn find_key(
        &mut self,
        key_identifier: &str,
        options: &ConnectionOptions,
        source: &dyn KeyMetadataSource,
    ) -> Option<&KeyMetadataCacheEntry> {
        if self.position(key_identifier).is_none() {
            match source.key_metadata(key_identifier, options) {
                Ok(desc) => self.entries.push(KeyMetadataCacheEntry {
                    key_arn: desc.key_arn,
                    key_id: desc.key_id,
                    given_key_id: Some(key_identifier.to_string()),
                    key_manager: desc.key_manager,
                }),
                Err(err) => {
                    debug!(key = key_identifier, error = %err, "key metadata fetch failed; treating key as not found");
                }
            }
        }
        self.position(key_identifier).map(|i| &self.entries[i])
    }

    /// Resolve a key identifier against the requested trust class.
    ///
    /// Not-found is `Fail`. A found key satisfies a `Provider` request
    /// unconditionally. A `Customer` request defaults to `Warning` (some
    /// encryption exists, but ownership is unverified) and upgrades to `Ok`
    /// only when the key manager is `Customer`.
    pub fn is_trusted(
        &mut self,
        key_identifier: &str,
        requested: TrustClass,
        options: &ConnectionOptions,
        source: &dyn KeyMetadataSource,
    ) -> AuditState {
        match self.find_key(key_identifier, options, source) {
            None => AuditState::Fail,
            Some(entry) => match requested {
                TrustClass::Provider => AuditState::Ok,
                TrustClass::Customer => {
                    if entry.key_manager == KeyManager::Customer {
                        AuditState::Ok
                    } else {
                        AuditState::Warning
                    }
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloudguard_provider::{KeyDescription, ProviderError};
    use std::cell::RefCell;
    use std::collections::BTreeMap;

    struct FakeKeys {
        keys: BTreeMap<String, KeyDescription>,
        fetches: RefCell<Vec<String>>,
    }

    impl FakeKeys {
        fn new() -> Self {
            Self {
                keys: BTreeMap::new(),
                fetches: RefCell::new(Vec::new()),
            }
        }

        fn with_key(mut self, identifier: &str, description: KeyDescription) -> Self {
            self.keys.insert(identifier.to_string(), description);
            self
        }

        fn fetch_count(&self) -> usize {
            self.fetches.borrow().len()
        }
    }

    impl KeyMetadataSource for FakeKeys {
        fn key_metadata(
            &self,
            key_identifier: &str,
            _options: &ConnectionOptions,
        ) -> Result<KeyDescription, ProviderError> {
            self.fetches.borrow_mut().push(key_identifier.to_string());
            self.keys
                .get(key_identifier)
                .cloned()
                .ok_or_else(|| ProviderError::transport("describe_key", "unreachable"))
        }
    }

    fn customer_key(arn: &str, id: &str) -> KeyDescription {
        KeyDescription {
            key_arn: Some(arn.to_string()),
            key_id: Some(id.to_string()),
            key_manager: KeyManager::Customer,
        }
    }

    fn provider_key(arn: &str, id: &str) -> KeyDescription {
        KeyDescription {
            key_arn: Some(arn.to_string()),
            key_id: Some(id.to_string()),
            key_manager: KeyManager::Provider,
        }
    }

    fn options() -> ConnectionOptions {
        ConnectionOptions::new("us-east-1", None)
    }

    #[test]
    fn miss_fetches_once_then_serves_from_cache() {
        let source = FakeKeys::new().with_key("arn:key-1", customer_key("arn:key-1", "key-1"));
        let mut cache = KeyTrustCache::new();

        assert!(cache.find_key("arn:key-1", &options(), &source).is_some());
        assert!(cache.find_key("arn:key-1", &options(), &source).is_some());
        assert_eq!(source.fetch_count(), 1);
        assert_eq!(cache.entries().len(), 1);
    }

    #[test]
    fn aliases_resolve_to_the_same_entry_without_refetch() {
        let source = FakeKeys::new().with_key("arn:key-1", customer_key("arn:key-1", "key-1"));
        let mut cache = KeyTrustCache::new();

        cache.find_key("arn:key-1", &options(), &source).unwrap();
        // bare key id hits the cached entry's key_id alias
        let entry = cache.find_key("key-1", &options(), &source).unwrap();
        assert_eq!(entry.key_arn.as_deref(), Some("arn:key-1"));
        assert_eq!(source.fetch_count(), 1);
    }

    #[test]
    fn fetch_tags_entry_with_the_given_identifier() {
        let source = FakeKeys::new().with_key("alias-1", customer_key("arn:key-1", "key-1"));
        let mut cache = KeyTrustCache::new();

        let entry = cache.find_key("alias-1", &options(), &source).unwrap();
        assert_eq!(entry.given_key_id.as_deref(), Some("alias-1"));
        assert_eq!(entry.key_manager, KeyManager::Customer);
    }

    #[test]
    fn fetch_failure_is_swallowed_and_reports_not_found() {
        let source = FakeKeys::new();
        let mut cache = KeyTrustCache::new();

        assert!(cache.find_key("missing-key", &options(), &source).is_none());
        assert!(cache.entries().is_empty());
    }

    #[test]
    fn trust_matrix() {
        let source = FakeKeys::new()
            .with_key("arn:cust", customer_key("arn:cust", "cust"))
            .with_key("arn:prov", provider_key("arn:prov", "prov"));
        let mut cache = KeyTrustCache::new();

        // not-found
        assert_eq!(
            cache.is_trusted("missing", TrustClass::Provider, &options(), &source),
            AuditState::Fail
        );
        // provider request accepts any managed key
        assert_eq!(
            cache.is_trusted("arn:prov", TrustClass::Provider, &options(), &source),
            AuditState::Ok
        );
        assert_eq!(
            cache.is_trusted("arn:cust", TrustClass::Provider, &options(), &source),
            AuditState::Ok
        );
        // customer request: OK only for customer-managed, else WARNING
        assert_eq!(
            cache.is_trusted("arn:cust", TrustClass::Customer, &options(), &source),
            AuditState::Ok
        );
        assert_eq!(
            cache.is_trusted("arn:prov", TrustClass::Customer, &options(), &source),
            AuditState::Warning
        );
    }

    #[test]
    fn trusted_after_fetch_with_customer_manager() {
        let source = FakeKeys::new().with_key("arn:key-1", customer_key("arn:key-1", "key-1"));
        let mut cache = KeyTrustCache::new();

        assert_eq!(
            cache.is_trusted("arn:key-1", TrustClass::Customer, &options(), &source),
            AuditState::Ok
        );
        assert_eq!(source.fetch_count(), 1);
    }

    #[test]
    fn failed_lookup_is_retried_on_next_resolution() {
        // A swallowed failure appends nothing, so the next resolution
        // fetches again.
        let source = FakeKeys::new();
        let mut cache = KeyTrustCache::new();
        cache.find_key("key-x", &options(), &source);
        cache.find_key("key-x", &options(), &source);
        assert_eq!(source.fetch_count(), 2);
    }
}
