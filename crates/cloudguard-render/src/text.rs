use cloudguard_types::{AuditState, ScanReport};

/// Render the report for a terminal: one line per audited resource plus a
/// summary line.
pub fn render_text(report: &ScanReport) -> String {
    let mut out = String::new();

    for result in &report.results {
        let state = state_label(result.state);
        out.push_str(&format!(
            "[{}] {}/{} {} ({})",
            state, result.service, result.rule, result.physical_id, result.region
        ));
        if let Some(comment) = &result.comment {
            out.push_str(&format!(" - {comment}"));
        }
        out.push('\n');
    }

    if report.results.is_empty() {
        out.push_str("No resources audited.\n");
    }

    out.push_str(&format!(
        "{}: {} ok, {} fail, {} warning, {} unknown\n",
        report.rule,
        report.counts.ok,
        report.counts.fail,
        report.counts.warning,
        report.counts.unknown
    ));

    out
}

fn state_label(state: AuditState) -> &'static str {
    match state {
        AuditState::Ok => "OK",
        AuditState::Fail => "FAIL",
        AuditState::Warning => "WARN",
        AuditState::Unknown => "UNKNOWN",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloudguard_types::{AuditResult, StateCounts, ToolMeta, SCHEMA_REPORT_V1};
    use time::OffsetDateTime;

    fn report_with(results: Vec<AuditResult>) -> ScanReport {
        ScanReport {
            schema: SCHEMA_REPORT_V1.to_string(),
            tool: ToolMeta {
                name: "cloudguard".to_string(),
                version: "0.0.0".to_string(),
            },
            started_at: OffsetDateTime::UNIX_EPOCH,
            finished_at: OffsetDateTime::UNIX_EPOCH,
            rule: "s3.bucket_encryption".to_string(),
            counts: StateCounts::from_results(&results),
            results,
        }
    }

    #[test]
    fn renders_one_line_per_result_with_comment() {
        let mut audit =
            AuditResult::begin("bucket-1", "s3", "s3.bucket_encryption", "us-east-1", None);
        audit.conclude(AuditState::Fail, Some("no encryption".to_string()));
        let text = render_text(&report_with(vec![audit]));
        assert!(text.contains("[FAIL] s3/s3.bucket_encryption bucket-1 (us-east-1) - no encryption"));
        assert!(text.contains("1 fail"));
    }

    #[test]
    fn renders_empty_report() {
        let text = render_text(&report_with(Vec::new()));
        assert!(text.contains("No resources audited."));
        assert!(text.contains("0 ok, 0 fail"));
    }
}
