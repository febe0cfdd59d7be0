use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The caller's requested encryption-key ownership requirement.
///
/// `Provider` accepts any managed key; `Customer` requires the key to be
/// verifiably customer-owned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TrustClass {
    Provider,
    Customer,
}

/// Who manages an encryption key, as reported by the provider's key metadata.
///
/// The wire value for provider-managed keys is `"AWS"`; `"PROVIDER"` is also
/// accepted so canned fixtures can use the neutral spelling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum KeyManager {
    #[serde(alias = "AWS")]
    Provider,
    Customer,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_manager_accepts_provider_wire_spelling() {
        let m: KeyManager = serde_json::from_str("\"AWS\"").unwrap();
        assert_eq!(m, KeyManager::Provider);
        let m: KeyManager = serde_json::from_str("\"PROVIDER\"").unwrap();
        assert_eq!(m, KeyManager::Provider);
        let m: KeyManager = serde_json::from_str("\"CUSTOMER\"").unwrap();
        assert_eq!(m, KeyManager::Customer);
    }

    #[test]
    fn trust_class_round_trips_lowercase() {
        assert_eq!(serde_json::to_string(&TrustClass::Customer).unwrap(), "\"customer\"");
        let t: TrustClass = serde_json::from_str("\"provider\"").unwrap();
        assert_eq!(t, TrustClass::Provider);
    }
}
