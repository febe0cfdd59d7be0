use crate::audit::{AuditResult, AuditState};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Stable schema identifier for the emitted report.
pub const SCHEMA_REPORT_V1: &str = "cloudguard.report.v1";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// Per-state tally over one invocation's audit results.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StateCounts {
    pub ok: u32,
    pub fail: u32,
    pub warning: u32,
    pub unknown: u32,
}

impl StateCounts {
    pub fn from_results(results: &[AuditResult]) -> Self {
        let mut counts = StateCounts::default();
        for r in results {
            match r.state {
                AuditState::Ok => counts.ok += 1,
                AuditState::Fail => counts.fail += 1,
                AuditState::Warning => counts.warning += 1,
                AuditState::Unknown => counts.unknown += 1,
            }
        }
        counts
    }
}

/// Full-invocation report envelope written as the JSON artifact.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScanReport {
    pub schema: String,
    pub tool: ToolMeta,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub rule: String,
    pub counts: StateCounts,
    /// Region-then-resource iteration order, as produced by the driver.
    pub results: Vec<AuditResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn concluded(id: &str, state: AuditState) -> AuditResult {
        let mut audit = AuditResult::begin(id, "s3", "s3.bucket_encryption", "us-east-1", None);
        audit.conclude(state, None);
        audit
    }

    #[test]
    fn counts_tally_each_state() {
        let results = vec![
            concluded("a", AuditState::Ok),
            concluded("b", AuditState::Fail),
            concluded("c", AuditState::Ok),
            concluded("d", AuditState::Warning),
        ];
        let counts = StateCounts::from_results(&results);
        assert_eq!(counts.ok, 2);
        assert_eq!(counts.fail, 1);
        assert_eq!(counts.warning, 1);
        assert_eq!(counts.unknown, 0);
    }
}
