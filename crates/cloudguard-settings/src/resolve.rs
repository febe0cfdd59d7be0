use crate::model::CloudguardConfigV1;
use cloudguard_types::ids::ALL_REGIONS;
use cloudguard_types::TrustClass;

/// CLI overrides; each takes precedence over the config file.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub region: Option<String>,
    pub profile: Option<String>,
    pub resource_id: Option<String>,
    pub key_type: Option<String>,
    pub rule: Option<String>,
    pub verbosity: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Debug,
}

/// Effective settings one scan invocation runs under.
#[derive(Clone, Debug, PartialEq)]
pub struct ScanSettings {
    /// May be the `all` sentinel.
    pub region: String,
    pub profile: Option<String>,
    pub resource_id: Option<String>,
    pub trust_class: TrustClass,
    pub rule: String,
    pub verbosity: Verbosity,
}

pub fn resolve_settings(
    cfg: CloudguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ScanSettings> {
    let region = overrides
        .region
        .or(cfg.region)
        .unwrap_or_else(|| ALL_REGIONS.to_string());

    let rule = overrides.rule.or(cfg.rule).ok_or_else(|| {
        anyhow::anyhow!("no rule selected (set `rule` in cloudguard.toml or pass --rule)")
    })?;

    let trust_class = match overrides.key_type.or(cfg.key_type).as_deref() {
        None => TrustClass::Provider,
        Some(v) => parse_trust_class(v)?,
    };

    let verbosity = match overrides.verbosity.or(cfg.verbosity).as_deref() {
        None => Verbosity::Normal,
        Some(v) => parse_verbosity(v)?,
    };

    Ok(ScanSettings {
        region,
        profile: overrides.profile.or(cfg.profile),
        resource_id: overrides.resource_id,
        trust_class,
        rule,
        verbosity,
    })
}

pub fn parse_trust_class(v: &str) -> anyhow::Result<TrustClass> {
    match v {
        "provider" => Ok(TrustClass::Provider),
        "customer" => Ok(TrustClass::Customer),
        other => anyhow::bail!("unknown key type: {other} (expected 'provider' or 'customer')"),
    }
}

fn parse_verbosity(v: &str) -> anyhow::Result<Verbosity> {
    match v {
        "quiet" => Ok(Verbosity::Quiet),
        "normal" => Ok(Verbosity::Normal),
        "debug" => Ok(Verbosity::Debug),
        other => anyhow::bail!("unknown verbosity: {other} (expected quiet|normal|debug)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(text: &str) -> CloudguardConfigV1 {
        crate::model::parse_config_toml(text).unwrap()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let settings = resolve_settings(
            CloudguardConfigV1::default(),
            Overrides {
                rule: Some("s3.bucket_encryption".to_string()),
                ..Overrides::default()
            },
        )
        .unwrap();
        assert_eq!(settings.region, ALL_REGIONS);
        assert_eq!(settings.trust_class, TrustClass::Provider);
        assert_eq!(settings.verbosity, Verbosity::Normal);
        assert!(settings.profile.is_none());
    }

    #[test]
    fn overrides_beat_config_values() {
        let cfg = config("region = \"us-east-1\"\nrule = \"a.b\"\nkey_type = \"provider\"\n");
        let settings = resolve_settings(
            cfg,
            Overrides {
                region: Some("eu-west-1".to_string()),
                key_type: Some("customer".to_string()),
                ..Overrides::default()
            },
        )
        .unwrap();
        assert_eq!(settings.region, "eu-west-1");
        assert_eq!(settings.trust_class, TrustClass::Customer);
        assert_eq!(settings.rule, "a.b");
    }

    #[test]
    fn missing_rule_is_an_error() {
        let err = resolve_settings(CloudguardConfigV1::default(), Overrides::default())
            .unwrap_err();
        assert!(err.to_string().contains("no rule selected"));
    }

    #[test]
    fn invalid_trust_class_is_rejected_before_any_scan() {
        let err = resolve_settings(
            CloudguardConfigV1::default(),
            Overrides {
                rule: Some("a.b".to_string()),
                key_type: Some("both".to_string()),
                ..Overrides::default()
            },
        )
        .unwrap_err();
        assert!(err.to_string().contains("unknown key type"));
    }

    #[test]
    fn invalid_verbosity_is_rejected() {
        let err = resolve_settings(
            CloudguardConfigV1::default(),
            Overrides {
                rule: Some("a.b".to_string()),
                verbosity: Some("loud".to_string()),
                ..Overrides::default()
            },
        )
        .unwrap_err();
        assert!(err.to_string().contains("unknown verbosity"));
    }
}
