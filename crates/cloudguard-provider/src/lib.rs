//! Transport boundary for cloudguard.
//!
//! Everything the engine needs from a provider SDK is expressed here as a
//! small set of traits: a paginated listing call, region discovery, and
//! key-metadata fetches. The engine stays schema-agnostic; concrete clients
//! decide which response field holds items and how pagination tokens flow.
//!
//! The [`snapshot`] module implements all three traits over a directory of
//! canned JSON responses, for offline runs and integration tests.

#![forbid(unsafe_code)]

mod client;
mod error;
mod keys;
mod options;
mod page;
mod regions;
pub mod snapshot;

pub use client::{ListClient, ListRequest};
pub use error::ProviderError;
pub use keys::{KeyDescription, KeyMetadataSource};
pub use options::ConnectionOptions;
pub use page::{collect_all, scripted_pages, FetchNext, Page, ValuePage};
pub use regions::{RegionDiscovery, RegionRecord};
pub use snapshot::SnapshotClient;
