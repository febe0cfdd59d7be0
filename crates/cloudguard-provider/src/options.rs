/// Per-call connection options handed to every remote operation.
///
/// The engine never inspects credentials; it only rebinds the region field
/// before each call. Credential material stays with the concrete client.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConnectionOptions {
    pub region: String,
    /// Named credential profile, recorded on audit results when set.
    pub profile: Option<String>,
}

impl ConnectionOptions {
    pub fn new(region: &str, profile: Option<String>) -> Self {
        Self {
            region: region.to_string(),
            profile,
        }
    }

    /// Clone these options rebound to another region.
    pub fn for_region(&self, region: &str) -> Self {
        Self {
            region: region.to_string(),
            profile: self.profile.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_region_keeps_profile() {
        let base = ConnectionOptions::new("us-east-1", Some("audit".to_string()));
        let rebound = base.for_region("eu-central-1");
        assert_eq!(rebound.region, "eu-central-1");
        assert_eq!(rebound.profile.as_deref(), Some("audit"));
        // the original is untouched
        assert_eq!(base.region, "us-east-1");
    }
}
