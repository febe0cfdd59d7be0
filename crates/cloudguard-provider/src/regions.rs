use crate::error::ProviderError;
use crate::options::ConnectionOptions;
use serde::Deserialize;

/// One entry from the provider's region-listing API.
///
/// The name is optional because providers have returned partially-populated
/// records; scope resolution treats a missing name as fatal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct RegionRecord {
    #[serde(rename = "RegionName", default)]
    pub name: Option<String>,
}

impl RegionRecord {
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
        }
    }
}

/// Lists the regions available to the account.
pub trait RegionDiscovery {
    fn regions(&self, options: &ConnectionOptions) -> Result<Vec<RegionRecord>, ProviderError>;
}
