use crate::ids;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Terminal-or-pending verdict for a single resource under a single rule.
///
/// `Unknown` is the initial state; a rule concludes an audit exactly once to
/// one of the terminal states, or leaves it `Unknown` when it cannot decide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum AuditState {
    Unknown,
    Ok,
    Fail,
    Warning,
}

impl AuditState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, AuditState::Unknown)
    }
}

/// One verdict for one resource under one rule.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AuditResult {
    pub provider: String,
    /// The resource's provider-assigned identifier.
    pub physical_id: String,
    pub service: String,
    pub rule: String,
    pub region: String,
    pub state: AuditState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    /// Timestamp at audit completion.
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub time: OffsetDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl AuditResult {
    /// Open an audit record for one resource, in the `Unknown` state.
    pub fn begin(
        physical_id: &str,
        service: &str,
        rule: &str,
        region: &str,
        profile: Option<String>,
    ) -> Self {
        Self {
            provider: ids::PROVIDER.to_string(),
            physical_id: physical_id.to_string(),
            service: service.to_string(),
            rule: rule.to_string(),
            region: region.to_string(),
            state: AuditState::Unknown,
            profile,
            time: OffsetDateTime::now_utc(),
            comment: None,
        }
    }

    /// Conclude the audit with a terminal state and stamp the completion time.
    ///
    /// An audit is concluded at most once.
    pub fn conclude(&mut self, state: AuditState, comment: Option<String>) {
        debug_assert!(
            !self.state.is_terminal(),
            "audit for {} concluded twice",
            self.physical_id
        );
        self.state = state;
        self.comment = comment;
        self.time = OffsetDateTime::now_utc();
    }
}
