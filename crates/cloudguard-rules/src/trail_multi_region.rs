use cloudguard_engine::{RegionTarget, Rule, ScanContext, ScanError};
use cloudguard_provider::ListRequest;
use cloudguard_types::{ids, AuditResult, AuditState};
use serde_json::Value;

const DESCRIBE_TRAILS: ListRequest<'static> = ListRequest {
    service: ids::SERVICE_CLOUDTRAIL,
    operation: "describe_trails",
    items_field: "trailList",
};

/// Global rule: every trail must span all regions.
#[derive(Default)]
pub struct TrailMultiRegion;

impl TrailMultiRegion {
    pub fn new() -> Self {
        Self
    }
}

impl Rule for TrailMultiRegion {
    fn service(&self) -> &str {
        ids::SERVICE_CLOUDTRAIL
    }

    fn rule_id(&self) -> &str {
        ids::RULE_TRAIL_MULTI_REGION
    }

    fn is_global(&self) -> bool {
        true
    }

    fn scan(
        &mut self,
        cx: &mut ScanContext<'_>,
        region: &RegionTarget,
        resource_id: Option<&str>,
    ) -> Result<Vec<AuditResult>, ScanError> {
        let trails = cx.collect(&DESCRIBE_TRAILS)?;
        let mut out = Vec::new();

        for trail in &trails {
            let Some(name) = trail.get("Name").and_then(Value::as_str) else {
                return Err(ScanError::precondition(
                    "listing returned a trail without a Name",
                ));
            };
            if resource_id.is_some_and(|id| id != name) {
                continue;
            }

            let mut audit = AuditResult::begin(
                name,
                self.service(),
                self.rule_id(),
                &region.display,
                cx.options.profile.clone(),
            );
            let multi_region = trail
                .get("IsMultiRegionTrail")
                .and_then(Value::as_bool)
                .unwrap_or(false);
            if multi_region {
                audit.conclude(AuditState::Ok, None);
            } else {
                audit.conclude(
                    AuditState::Fail,
                    Some("trail does not span all regions".to_string()),
                );
            }
            out.push(audit);
        }

        if let Some(id) = resource_id {
            if out.is_empty() {
                let mut audit = AuditResult::begin(
                    id,
                    self.service(),
                    self.rule_id(),
                    &region.display,
                    cx.options.profile.clone(),
                );
                audit.conclude(AuditState::Fail, Some("trail not found".to_string()));
                out.push(audit);
            }
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloudguard_engine::{ScanDriver, ScanRequest};
    use cloudguard_provider::ConnectionOptions;
    use cloudguard_test_util::{FakeProvider, RecordingProgress};
    use cloudguard_types::ids::{ALL_REGIONS, HOME_REGION};
    use serde_json::json;

    #[test]
    fn global_rule_reports_under_the_global_label() {
        // The listing is served from the home region, but audits display as
        // "global".
        let provider = FakeProvider::new().with_pages(
            HOME_REGION,
            "cloudtrail",
            "describe_trails",
            vec![json!({"trailList": [
                {"Name": "everywhere", "IsMultiRegionTrail": true},
                {"Name": "one-region", "IsMultiRegionTrail": false}
            ]})],
        );
        let progress = RecordingProgress::new();
        let mut driver = ScanDriver::new(
            TrailMultiRegion::new(),
            ScanRequest {
                region: ALL_REGIONS.to_string(),
                resource_id: None,
            },
            ConnectionOptions::new(HOME_REGION, None),
            &progress,
        );
        driver.start(&provider).unwrap();

        let results = driver.into_results();
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.region == "global"));
        assert_eq!(results[0].state, AuditState::Ok);
        assert_eq!(results[1].state, AuditState::Fail);
        assert_eq!(provider.region_calls.get(), 0);
    }

    #[test]
    fn missing_flag_counts_as_single_region() {
        let provider = FakeProvider::new().with_pages(
            HOME_REGION,
            "cloudtrail",
            "describe_trails",
            vec![json!({"trailList": [{"Name": "bare"}]})],
        );
        let progress = RecordingProgress::new();
        let mut driver = ScanDriver::new(
            TrailMultiRegion::new(),
            ScanRequest {
                region: ALL_REGIONS.to_string(),
                resource_id: None,
            },
            ConnectionOptions::new(HOME_REGION, None),
            &progress,
        );
        driver.start(&provider).unwrap();
        assert_eq!(driver.results()[0].state, AuditState::Fail);
    }
}
