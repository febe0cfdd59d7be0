//! Offline provider client backed by a directory of canned JSON responses.
//!
//! Layout under the snapshot root:
//!
//! ```text
//! regions.json                              # array of region records
//! <region>/<service>.<operation>.json       # array of raw page documents
//! <region>/keys/<sanitized identifier>.json # one key description
//! ```
//!
//! Listing files hold the full page sequence for one operation; pages signal
//! continuation with a string `NextToken` field. Key identifiers are
//! sanitized for the filesystem by replacing `:` and `/` with `_`.

use crate::client::{ListClient, ListRequest};
use crate::error::ProviderError;
use crate::keys::{KeyDescription, KeyMetadataSource};
use crate::options::ConnectionOptions;
use crate::page::{scripted_pages, ValuePage};
use crate::regions::{RegionDiscovery, RegionRecord};
use camino::{Utf8Path, Utf8PathBuf};
use serde_json::Value;

/// Pagination token field used by snapshot page documents.
pub const TOKEN_FIELD: &str = "NextToken";

#[derive(Clone, Debug)]
pub struct SnapshotClient {
    root: Utf8PathBuf,
}

impl SnapshotClient {
    /// Open a snapshot directory. The directory must exist; individual
    /// response files are resolved lazily per call.
    pub fn open(root: impl Into<Utf8PathBuf>) -> Result<Self, ProviderError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(ProviderError::transport(
                "snapshot",
                format!("snapshot directory does not exist: {root}"),
            ));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    fn read_json(&self, path: &Utf8Path, operation: &str) -> Result<Value, ProviderError> {
        let text = std::fs::read_to_string(path)
            .map_err(|err| ProviderError::transport(operation, format!("read {path}: {err}")))?;
        serde_json::from_str(&text)
            .map_err(|err| ProviderError::malformed(operation, format!("parse {path}: {err}")))
    }
}

/// Make a key identifier safe to use as a file name.
pub fn sanitize_key_identifier(identifier: &str) -> String {
    identifier.replace([':', '/'], "_")
}

impl ListClient for SnapshotClient {
    fn list(
        &self,
        request: &ListRequest<'_>,
        options: &ConnectionOptions,
    ) -> Result<ValuePage, ProviderError> {
        let path = self
            .root
            .join(&options.region)
            .join(format!("{}.{}.json", request.service, request.operation));
        if !path.is_file() {
            return Err(ProviderError::transport(
                request.operation,
                format!("no snapshot for {}.{} in {}", request.service, request.operation, options.region),
            ));
        }
        let doc = self.read_json(&path, request.operation)?;
        let Value::Array(docs) = doc else {
            return Err(ProviderError::malformed(
                request.operation,
                format!("{path} must hold an array of page documents"),
            ));
        };
        Ok(scripted_pages(
            docs.into(),
            request.items_field,
            TOKEN_FIELD,
            request.operation,
        ))
    }
}

impl RegionDiscovery for SnapshotClient {
    fn regions(&self, _options: &ConnectionOptions) -> Result<Vec<RegionRecord>, ProviderError> {
        let path = self.root.join("regions.json");
        if !path.is_file() {
            return Err(ProviderError::transport(
                "describe_regions",
                format!("no snapshot at {path}"),
            ));
        }
        let doc = self.read_json(&path, "describe_regions")?;
        serde_json::from_value(doc)
            .map_err(|err| ProviderError::malformed("describe_regions", err.to_string()))
    }
}

impl KeyMetadataSource for SnapshotClient {
    fn key_metadata(
        &self,
        key_identifier: &str,
        options: &ConnectionOptions,
    ) -> Result<KeyDescription, ProviderError> {
        let path = self
            .root
            .join(&options.region)
            .join("keys")
            .join(format!("{}.json", sanitize_key_identifier(key_identifier)));
        if !path.is_file() {
            return Err(ProviderError::not_found("key", key_identifier));
        }
        let doc = self.read_json(&path, "describe_key")?;
        serde_json::from_value(doc)
            .map_err(|err| ProviderError::malformed("describe_key", err.to_string()))
    }
}
