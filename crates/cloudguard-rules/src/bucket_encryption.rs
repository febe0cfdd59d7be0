use cloudguard_engine::{RegionTarget, Rule, ScanContext, ScanError};
use cloudguard_provider::ListRequest;
use cloudguard_types::{ids, AuditResult, AuditState, TrustClass};
use serde_json::Value;

const LIST_BUCKETS: ListRequest<'static> = ListRequest {
    service: ids::SERVICE_S3,
    operation: "list_buckets",
    items_field: "Buckets",
};

/// Audits bucket default encryption against the requested key-trust class.
pub struct BucketEncryption {
    trust: TrustClass,
}

impl BucketEncryption {
    pub fn new(trust: TrustClass) -> Self {
        Self { trust }
    }
}

impl Rule for BucketEncryption {
    fn service(&self) -> &str {
        ids::SERVICE_S3
    }

    fn rule_id(&self) -> &str {
        ids::RULE_BUCKET_ENCRYPTION
    }

    fn scan(
        &mut self,
        cx: &mut ScanContext<'_>,
        region: &RegionTarget,
        resource_id: Option<&str>,
    ) -> Result<Vec<AuditResult>, ScanError> {
        let buckets = cx.collect(&LIST_BUCKETS)?;
        let mut out = Vec::new();

        for bucket in &buckets {
            let Some(name) = bucket.get("Name").and_then(Value::as_str) else {
                return Err(ScanError::precondition(
                    "listing returned a bucket without a Name",
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
            match bucket.get("KmsKeyId").and_then(Value::as_str) {
                None => audit.conclude(
                    AuditState::Fail,
                    Some("bucket has no key-backed default encryption".to_string()),
                ),
                Some(key) => {
                    let state = cx.key_trust(key, self.trust);
                    audit.conclude(state, trust_comment(state));
                }
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
                audit.conclude(AuditState::Fail, Some("bucket not found".to_string()));
                out.push(audit);
            }
        }

        Ok(out)
    }
}

fn trust_comment(state: AuditState) -> Option<String> {
    match state {
        AuditState::Warning => {
            Some("encrypted, but key ownership is not customer-verified".to_string())
        }
        AuditState::Fail => Some("encryption key is missing or unresolvable".to_string()),
        _ => None,
    }
}
