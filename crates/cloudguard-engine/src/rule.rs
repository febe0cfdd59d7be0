use crate::error::ScanError;
use crate::keycache::KeyTrustCache;
use crate::scope::RegionTarget;
use cloudguard_provider::{
    collect_all, ConnectionOptions, KeyMetadataSource, ListClient, ListRequest,
};
use cloudguard_types::{AuditResult, AuditState, TrustClass};
use serde_json::Value;

/// Per-region handles the driver lends to a rule's `scan` call.
///
/// `options` is already bound to the region under scan. Rules hold no
/// provider state of their own.
pub struct ScanContext<'a> {
    pub options: ConnectionOptions,
    pub list: &'a dyn ListClient,
    pub keys: &'a dyn KeyMetadataSource,
    pub key_cache: &'a mut KeyTrustCache,
}

impl ScanContext<'_> {
    /// Run a listing operation to completion across all of its pages.
    pub fn collect(&self, request: &ListRequest<'_>) -> Result<Vec<Value>, ScanError> {
        let mut page = self.list.list(request, &self.options)?;
        Ok(collect_all(&mut page)?)
    }

    /// Resolve an encryption key against the requested trust class.
    pub fn key_trust(&mut self, key_identifier: &str, requested: TrustClass) -> AuditState {
        self.key_cache
            .is_trusted(key_identifier, requested, &self.options, self.keys)
    }
}

/// A named compliance check producing one audit result per evaluated
/// resource.
///
/// Implementations audit every resource the listing returns, or only the
/// requested one when `resource_id` is set.
pub trait Rule {
    /// Owning service name, recorded on every audit result.
    fn service(&self) -> &str;

    /// Stable rule identifier.
    fn rule_id(&self) -> &str;

    /// Global rules execute once against the home region.
    fn is_global(&self) -> bool {
        false
    }

    fn scan(
        &mut self,
        cx: &mut ScanContext<'_>,
        region: &RegionTarget,
        resource_id: Option<&str>,
    ) -> Result<Vec<AuditResult>, ScanError>;
}

impl<R: Rule + ?Sized> Rule for &mut R {
    fn service(&self) -> &str {
        (**self).service()
    }

    fn rule_id(&self) -> &str {
        (**self).rule_id()
    }

    fn is_global(&self) -> bool {
        (**self).is_global()
    }

    fn scan(
        &mut self,
        cx: &mut ScanContext<'_>,
        region: &RegionTarget,
        resource_id: Option<&str>,
    ) -> Result<Vec<AuditResult>, ScanError> {
        (**self).scan(cx, region, resource_id)
    }
}

impl<R: Rule + ?Sized> Rule for Box<R> {
    fn service(&self) -> &str {
        (**self).service()
    }

    fn rule_id(&self) -> &str {
        (**self).rule_id()
    }

    fn is_global(&self) -> bool {
        (**self).is_global()
    }

    fn scan(
        &mut self,
        cx: &mut ScanContext<'_>,
        region: &RegionTarget,
        resource_id: Option<&str>,
    ) -> Result<Vec<AuditResult>, ScanError> {
        (**self).scan(cx, region, resource_id)
    }
}
