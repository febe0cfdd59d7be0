//! Scan orchestration and key-trust resolution.
//!
//! Input: a rule implementation plus provider handles.
//! Output: an ordered list of audit results, region by region.
//!
//! Execution is single-threaded and strictly sequential: each region's scan
//! completes before the next begins, and the first failure aborts the rest.

#![forbid(unsafe_code)]

mod driver;
mod error;
mod keycache;
mod progress;
mod resolve;
mod rule;
mod scope;

pub use driver::{DriverState, ScanDriver, ScanRequest};
pub use error::ScanError;
pub use keycache::{KeyMetadataCacheEntry, KeyTrustCache};
pub use progress::{LogProgress, ProgressReporter};
pub use resolve::resolve_scope;
pub use rule::{Rule, ScanContext};
pub use scope::{RegionTarget, ScanScope};
