/// One region a scan will execute against.
///
/// `name` is the identifier used on provider calls; `display` is what audit
/// records show. They differ only for global rules, which execute against
/// the home region but report as `global`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionTarget {
    pub name: String,
    pub display: String,
}

impl RegionTarget {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            display: name.to_string(),
        }
    }

    pub fn relabeled(name: &str, display: &str) -> Self {
        Self {
            name: name.to_string(),
            display: display.to_string(),
        }
    }
}

/// Resolved execution plan for one invocation. Immutable once created.
///
/// Invariant: when `single_resource_id` is set, `regions` holds exactly one
/// concrete region. `resolve_scope` enforces this before any network call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanScope {
    /// Insertion order is scan order.
    pub regions: Vec<RegionTarget>,
    pub single_resource_id: Option<String>,
    pub is_global_rule: bool,
}
