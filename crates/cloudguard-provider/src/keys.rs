use crate::error::ProviderError;
use crate::options::ConnectionOptions;
use cloudguard_types::KeyManager;
use serde::Deserialize;

/// Provider metadata for one encryption key.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct KeyDescription {
    #[serde(rename = "Arn", default)]
    pub key_arn: Option<String>,
    #[serde(rename = "KeyId", default)]
    pub key_id: Option<String>,
    #[serde(rename = "KeyManager")]
    pub key_manager: KeyManager,
}

/// Fetches key metadata by any identifier the provider accepts (ARN, bare
/// key id, or alias).
pub trait KeyMetadataSource {
    fn key_metadata(
        &self,
        key_identifier: &str,
        options: &ConnectionOptions,
    ) -> Result<KeyDescription, ProviderError>;
}
