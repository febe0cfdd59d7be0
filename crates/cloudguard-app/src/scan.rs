//! The `scan` use case: run one rule over the resolved scope and wrap the
//! results in the report envelope.

use anyhow::Context;
use cloudguard_engine::{ProgressReporter, ScanDriver, ScanRequest};
use cloudguard_provider::{
    ConnectionOptions, KeyMetadataSource, ListClient, RegionDiscovery,
};
use cloudguard_settings::ScanSettings;
use cloudguard_types::ids::HOME_REGION;
use cloudguard_types::{ScanReport, StateCounts, ToolMeta, SCHEMA_REPORT_V1};
use time::OffsetDateTime;

/// Run the selected rule to completion and produce the report.
///
/// A scan failure propagates as an error after the progress collaborator
/// has been notified; no partial report is produced in that case.
pub fn run_scan<P>(
    settings: &ScanSettings,
    provider: &P,
    progress: &dyn ProgressReporter,
) -> anyhow::Result<ScanReport>
where
    P: ListClient + RegionDiscovery + KeyMetadataSource,
{
    let started_at = OffsetDateTime::now_utc();

    let rule = cloudguard_rules::build(&settings.rule, settings.trust_class).with_context(|| {
        format!(
            "unknown rule: {} (available: {})",
            settings.rule,
            cloudguard_rules::available().join(", ")
        )
    })?;

    let request = ScanRequest {
        region: settings.region.clone(),
        resource_id: settings.resource_id.clone(),
    };
    let base_options = ConnectionOptions::new(HOME_REGION, settings.profile.clone());

    let mut driver = ScanDriver::new(rule, request, base_options, progress);
    driver
        .start(provider)
        .with_context(|| format!("scan {} failed", settings.rule))?;

    let results = driver.into_results();
    let finished_at = OffsetDateTime::now_utc();

    Ok(ScanReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "cloudguard".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at,
        finished_at,
        rule: settings.rule.clone(),
        counts: StateCounts::from_results(&results),
        results,
    })
}
