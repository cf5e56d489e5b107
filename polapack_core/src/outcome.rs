use serde::Serialize;

use crate::reward::Open;

/// One context entry attached to a reward status update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutcomeContext {
    #[serde(rename = "type")]
    pub kind: String,
    pub key: String,
    pub value: String,
}

/// Feedback payload recorded when a reveal completes, mirroring the campaign
/// backend's offer-feedback mutation input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutcomeUpdate {
    pub outcome: String,
    pub contexts: Vec<OutcomeContext>,
}

impl OutcomeUpdate {
    pub fn reward(reward_value: &str) -> Self {
        Self {
            outcome: "Clicked".to_string(),
            contexts: vec![OutcomeContext {
                kind: "StatusUpdate".to_string(),
                key: "Reward".to_string(),
                value: reward_value.to_string(),
            }],
        }
    }
}

/// Fire-and-forget analytics hook. Called exactly once per completed reveal;
/// failures must never affect the game flow.
pub trait OutcomeSink {
    fn reward_outcome(&mut self, intent: Open, reward_value: &str);
}

/// Default sink: serializes the update and logs it. Stands in for the native
/// bridge on builds without one.
#[derive(Debug, Default)]
pub struct LogOutcomeSink;

impl OutcomeSink for LogOutcomeSink {
    fn reward_outcome(&mut self, intent: Open, reward_value: &str) {
        let update = OutcomeUpdate::reward(reward_value);
        match serde_json::to_string(&update) {
            Ok(body) => {
                tracing::info!(intent = intent.as_str(), body = %body, "reward outcome recorded");
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to serialize reward outcome");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_serializes_with_wire_field_names() {
        let update = OutcomeUpdate::reward("travel");
        let json = serde_json::to_string(&update).unwrap();
        assert!(json.contains(r#""outcome":"Clicked""#));
        assert!(json.contains(r#""type":"StatusUpdate""#));
        assert!(json.contains(r#""key":"Reward""#));
        assert!(json.contains(r#""value":"travel""#));
    }
}
