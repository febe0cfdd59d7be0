//! Demonstration rules for the cloudguard engine.
//!
//! The production rule catalog lives outside this repository; the two rules
//! here exist to exercise every engine seam end-to-end: a regional rule that
//! consults the key-trust cache, and a global rule doing a plain field
//! check.

#![forbid(unsafe_code)]

mod bucket_encryption;
mod trail_multi_region;

pub use bucket_encryption::BucketEncryption;
pub use trail_multi_region::TrailMultiRegion;

use cloudguard_engine::Rule;
use cloudguard_types::ids;
use cloudguard_types::TrustClass;

/// Instantiate a rule by its stable identifier.
pub fn build(rule_id: &str, trust: TrustClass) -> Option<Box<dyn Rule>> {
    match rule_id {
        ids::RULE_BUCKET_ENCRYPTION => Some(Box::new(BucketEncryption::new(trust))),
        ids::RULE_TRAIL_MULTI_REGION => Some(Box::new(TrailMultiRegion::new())),
        _ => None,
    }
}

/// Rule identifiers this crate can build.
pub fn available() -> &'static [&'static str] {
    &[ids::RULE_BUCKET_ENCRYPTION, ids::RULE_TRAIL_MULTI_REGION]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_every_advertised_rule() {
        for id in available() {
            let rule = build(id, TrustClass::Provider).unwrap();
            assert_eq!(rule.rule_id(), *id);
        }
    }

    #[test]
    fn unknown_rule_is_none() {
        assert!(build("nope.nothing", TrustClass::Provider).is_none());
    }
}
