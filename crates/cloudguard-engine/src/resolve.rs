use crate::error::ScanError;
use crate::scope::{RegionTarget, ScanScope};
use cloudguard_provider::{ConnectionOptions, RegionDiscovery};
use cloudguard_types::ids::{ALL_REGIONS, GLOBAL_REGION_LABEL, HOME_REGION};
use std::collections::BTreeSet;

/// Turn the requested region plus the rule's global flag into the concrete
/// list of regions to scan.
///
/// - A single-resource request requires a concrete region, never the `all`
///   sentinel; violation is fatal and raised before any remote call.
/// - A concrete requested region wins regardless of the global flag.
/// - A global rule over `all` executes once against the home region,
///   displayed as `global`; no discovery call is made.
/// - Otherwise the full region list is discovered once against the home
///   region, provider order preserved, with no region scanned twice.
pub fn resolve_scope(
    requested_region: &str,
    is_global_rule: bool,
    resource_id: Option<&str>,
    discovery: &dyn RegionDiscovery,
    options: &ConnectionOptions,
) -> Result<ScanScope, ScanError> {
    if resource_id.is_some() && requested_region == ALL_REGIONS {
        return Err(ScanError::precondition(
            "a single-resource scan requires a concrete region, not \"all\"",
        ));
    }

    let regions = if requested_region != ALL_REGIONS {
        vec![RegionTarget::new(requested_region)]
    } else if is_global_rule {
        vec![RegionTarget::relabeled(HOME_REGION, GLOBAL_REGION_LABEL)]
    } else {
        discover_regions(discovery, options)?
    };

    Ok(ScanScope {
        regions,
        single_resource_id: resource_id.map(str::to_string),
        is_global_rule,
    })
}

fn discover_regions(
    discovery: &dyn RegionDiscovery,
    options: &ConnectionOptions,
) -> Result<Vec<RegionTarget>, ScanError> {
    let records = discovery.regions(&options.for_region(HOME_REGION))?;
    if records.is_empty() {
        return Err(ScanError::precondition(
            "region discovery returned no regions",
        ));
    }

    let mut seen = BTreeSet::new();
    let mut regions = Vec::with_capacity(records.len());
    for record in records {
        let name = record.name.ok_or_else(|| {
            ScanError::precondition("region discovery returned an entry without a name")
        })?;
        if seen.insert(name.clone()) {
            regions.push(RegionTarget::new(&name));
        }
    }
    Ok(regions)
}
