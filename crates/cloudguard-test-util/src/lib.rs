//! Shared test fakes for the cloudguard workspace.
//!
//! `FakeProvider` scripts listing pages, region discovery, and key metadata
//! behind the transport traits, and counts every call so tests can assert
//! on caching and fail-fast behavior. `ScriptedRule` records the regions it
//! was driven through. `normalize_report` strips non-deterministic report
//! fields for golden-file comparison.

#![forbid(unsafe_code)]

use cloudguard_engine::{
    ProgressReporter, RegionTarget, Rule, ScanContext, ScanError,
};
use cloudguard_provider::{
    scripted_pages, ConnectionOptions, KeyDescription, KeyMetadataSource, ListClient, ListRequest,
    ProviderError, RegionDiscovery, RegionRecord, ValuePage,
};
use cloudguard_types::{AuditResult, AuditState};
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};

/// Scripted in-memory provider implementing all three transport traits.
#[derive(Default)]
pub struct FakeProvider {
    regions: Vec<RegionRecord>,
    fail_region_discovery: bool,
    /// Keyed by `<region>/<service>.<operation>`.
    pages: BTreeMap<String, Vec<Value>>,
    keys: BTreeMap<String, KeyDescription>,
    key_errors: BTreeSet<String>,

    pub region_calls: Cell<usize>,
    pub list_calls: RefCell<Vec<String>>,
    pub key_fetches: RefCell<Vec<String>>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_regions(mut self, names: &[&str]) -> Self {
        self.regions = names.iter().map(|n| RegionRecord::named(n)).collect();
        self
    }

    pub fn with_failing_region_discovery(mut self) -> Self {
        self.fail_region_discovery = true;
        self
    }

    pub fn with_pages(
        mut self,
        region: &str,
        service: &str,
        operation: &str,
        pages: Vec<Value>,
    ) -> Self {
        self.pages
            .insert(format!("{region}/{service}.{operation}"), pages);
        self
    }

    pub fn with_key(mut self, identifier: &str, description: KeyDescription) -> Self {
        self.keys.insert(identifier.to_string(), description);
        self
    }

    /// Make metadata fetches for `identifier` fail with a transport error.
    pub fn with_key_error(mut self, identifier: &str) -> Self {
        self.key_errors.insert(identifier.to_string());
        self
    }

    pub fn key_fetch_count(&self) -> usize {
        self.key_fetches.borrow().len()
    }
}

impl ListClient for FakeProvider {
    fn list(
        &self,
        request: &ListRequest<'_>,
        options: &ConnectionOptions,
    ) -> Result<ValuePage, ProviderError> {
        let key = format!(
            "{}/{}.{}",
            options.region, request.service, request.operation
        );
        self.list_calls.borrow_mut().push(key.clone());
        let docs = self
            .pages
            .get(&key)
            .cloned()
            .ok_or_else(|| ProviderError::transport(request.operation, format!("no scripted response for {key}")))?;
        Ok(scripted_pages(
            docs.into(),
            request.items_field,
            "NextToken",
            request.operation,
        ))
    }
}

impl RegionDiscovery for FakeProvider {
    fn regions(&self, _options: &ConnectionOptions) -> Result<Vec<RegionRecord>, ProviderError> {
        self.region_calls.set(self.region_calls.get() + 1);
        if self.fail_region_discovery {
            return Err(ProviderError::transport("describe_regions", "unreachable"));
        }
        Ok(self.regions.clone())
    }
}

impl KeyMetadataSource for FakeProvider {
    fn key_metadata(
        &self,
        key_identifier: &str,
        _options: &ConnectionOptions,
    ) -> Result<KeyDescription, ProviderError> {
        self.key_fetches
            .borrow_mut()
            .push(key_identifier.to_string());
        if self.key_errors.contains(key_identifier) {
            return Err(ProviderError::transport("describe_key", "unreachable"));
        }
        self.keys
            .get(key_identifier)
            .cloned()
            .ok_or_else(|| ProviderError::not_found("key", key_identifier))
    }
}

/// Progress reporter that records events as `start:<label>`, `succeed`, and
/// `fail:<message>` strings.
#[derive(Default)]
pub struct RecordingProgress {
    pub events: RefCell<Vec<String>>,
}

impl RecordingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }
}

impl ProgressReporter for RecordingProgress {
    fn start(&self, label: &str) {
        self.events.borrow_mut().push(format!("start:{label}"));
    }

    fn succeed(&self) {
        self.events.borrow_mut().push("succeed".to_string());
    }

    fn fail(&self, message: &str) {
        self.events.borrow_mut().push(format!("fail:{message}"));
    }
}

/// Rule that emits one `Ok` audit per region and records the regions it was
/// driven through, optionally failing in a named region.
pub struct ScriptedRule {
    pub global: bool,
    pub fail_in: Option<String>,
    pub seen: Vec<(String, Option<String>)>,
}

impl ScriptedRule {
    pub fn new() -> Self {
        Self {
            global: false,
            fail_in: None,
            seen: Vec::new(),
        }
    }

    pub fn global_rule() -> Self {
        Self {
            global: true,
            ..Self::new()
        }
    }

    pub fn failing_in(region_name: &str) -> Self {
        Self {
            fail_in: Some(region_name.to_string()),
            ..Self::new()
        }
    }

    /// Display labels of the regions scanned, in order.
    pub fn seen_regions(&self) -> Vec<String> {
        self.seen.iter().map(|(r, _)| r.clone()).collect()
    }
}

impl Default for ScriptedRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for ScriptedRule {
    fn service(&self) -> &str {
        "fake"
    }

    fn rule_id(&self) -> &str {
        "fake.scripted"
    }

    fn is_global(&self) -> bool {
        self.global
    }

    fn scan(
        &mut self,
        cx: &mut ScanContext<'_>,
        region: &RegionTarget,
        resource_id: Option<&str>,
    ) -> Result<Vec<AuditResult>, ScanError> {
        self.seen
            .push((region.display.clone(), resource_id.map(str::to_string)));
        if self.fail_in.as_deref() == Some(region.name.as_str()) {
            return Err(ScanError::Rule {
                rule: self.rule_id().to_string(),
                message: format!("scripted failure in {}", region.name),
            });
        }
        let mut audit = AuditResult::begin(
            resource_id.unwrap_or("resource-1"),
            self.service(),
            "fake.scripted",
            &region.display,
            cx.options.profile.clone(),
        );
        audit.conclude(AuditState::Ok, None);
        Ok(vec![audit])
    }
}

/// Normalize non-deterministic report fields for comparison: timestamps
/// become `__TIMESTAMP__` and the envelope tool version `__VERSION__`.
pub fn normalize_report(mut value: Value) -> Value {
    if let Some(tool) = value.get_mut("tool").and_then(Value::as_object_mut) {
        if tool.contains_key("version") {
            tool.insert("version".to_string(), Value::String("__VERSION__".to_string()));
        }
    }
    normalize_times(&mut value);
    value
}

fn normalize_times(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for field in ["started_at", "finished_at", "time"] {
                if map.contains_key(field) {
                    map.insert(field.to_string(), Value::String("__TIMESTAMP__".to_string()));
                }
            }
            for val in map.values_mut() {
                normalize_times(val);
            }
        }
        Value::Array(arr) => {
            for val in arr.iter_mut() {
                normalize_times(val);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalize_strips_timestamps_at_any_depth() {
        let input = json!({
            "schema": "cloudguard.report.v1",
            "tool": {"name": "cloudguard", "version": "0.1.0"},
            "started_at": "2026-01-01T00:00:00Z",
            "finished_at": "2026-01-01T00:00:01Z",
            "results": [{"physical_id": "b-1", "time": "2026-01-01T00:00:00.5Z"}]
        });
        let normalized = normalize_report(input);
        assert_eq!(normalized["tool"]["version"], "__VERSION__");
        assert_eq!(normalized["started_at"], "__TIMESTAMP__");
        assert_eq!(normalized["results"][0]["time"], "__TIMESTAMP__");
        // identity fields are untouched
        assert_eq!(normalized["results"][0]["physical_id"], "b-1");
    }
}
