use crate::error::ScanError;
use crate::keycache::KeyTrustCache;
use crate::progress::ProgressReporter;
use crate::resolve::resolve_scope;
use crate::rule::{Rule, ScanContext};
use cloudguard_provider::{ConnectionOptions, KeyMetadataSource, ListClient, RegionDiscovery};
use cloudguard_types::AuditResult;
use tracing::debug;

/// Lifecycle of one scan invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    Starting,
    Scanning,
    Succeeded,
    Failed,
}

/// What the caller asked to scan. `region` may be the `all` sentinel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanRequest {
    pub region: String,
    pub resource_id: Option<String>,
}

/// Composes scope resolution, per-region rule execution, and progress
/// reporting for one rule over one invocation.
///
/// Region iteration is strictly sequential; the first failure aborts the
/// remaining regions, is reported to the progress collaborator, and is then
/// re-raised unmodified. The key cache and result list live and die with
/// the driver.
pub struct ScanDriver<'a, R: Rule> {
    rule: R,
    request: ScanRequest,
    base_options: ConnectionOptions,
    progress: &'a dyn ProgressReporter,
    key_cache: KeyTrustCache,
    results: Vec<AuditResult>,
    state: DriverState,
}

impl<'a, R: Rule> ScanDriver<'a, R> {
    pub fn new(
        rule: R,
        request: ScanRequest,
        base_options: ConnectionOptions,
        progress: &'a dyn ProgressReporter,
    ) -> Self {
        Self {
            rule,
            request,
            base_options,
            progress,
            key_cache: KeyTrustCache::new(),
            results: Vec::new(),
            state: DriverState::Idle,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Collected results in region-then-resource iteration order.
    pub fn results(&self) -> &[AuditResult] {
        &self.results
    }

    pub fn into_results(self) -> Vec<AuditResult> {
        self.results
    }

    /// Run the scan to completion.
    ///
    /// Errors from scope resolution or any region's scan are reported to the
    /// progress collaborator and re-raised to the caller; nothing is
    /// swallowed at this layer.
    pub fn start<P>(&mut self, provider: &P) -> Result<(), ScanError>
    where
        P: ListClient + RegionDiscovery + KeyMetadataSource,
    {
        self.state = DriverState::Starting;
        self.progress.start(self.rule.rule_id());

        match self.run(provider) {
            Ok(()) => {
                self.state = DriverState::Succeeded;
                self.progress.succeed();
                Ok(())
            }
            Err(err) => {
                self.state = DriverState::Failed;
                self.progress.fail(&err.to_string());
                Err(err)
            }
        }
    }

    fn run<P>(&mut self, provider: &P) -> Result<(), ScanError>
    where
        P: ListClient + RegionDiscovery + KeyMetadataSource,
    {
        let scope = resolve_scope(
            &self.request.region,
            self.rule.is_global(),
            self.request.resource_id.as_deref(),
            provider,
            &self.base_options,
        )?;

        self.state = DriverState::Scanning;
        for region in &scope.regions {
            debug!(region = %region.name, "scanning region");
            let mut cx = ScanContext {
                options: self.base_options.for_region(&region.name),
                list: provider,
                keys: provider,
                key_cache: &mut self.key_cache,
            };
            let produced = self
                .rule
                .scan(&mut cx, region, scope.single_resource_id.as_deref())?;
            self.results.extend(produced);
        }
        Ok(())
    }
}
