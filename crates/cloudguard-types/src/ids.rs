//! Stable identifiers for services, rules, and region sentinels.
//!
//! `rule` ids are a dotted namespace under the owning service name.

/// Provider tag recorded on every audit result.
pub const PROVIDER: &str = "aws";

/// User-facing sentinel meaning "every discoverable region".
pub const ALL_REGIONS: &str = "all";

/// Conventional region used for region discovery and for global rules.
pub const HOME_REGION: &str = "us-east-1";

/// Display label substituted for the home region when a global rule runs.
pub const GLOBAL_REGION_LABEL: &str = "global";

// Services
pub const SERVICE_S3: &str = "s3";
pub const SERVICE_CLOUDTRAIL: &str = "cloudtrail";

// Rules
pub const RULE_BUCKET_ENCRYPTION: &str = "s3.bucket_encryption";
pub const RULE_TRAIL_MULTI_REGION: &str = "cloudtrail.multi_region";
