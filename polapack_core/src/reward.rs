use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::RewardError;

/// What the player asked for: one pack, or every remaining pack at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Open {
    One,
    All,
}

impl Open {
    pub fn as_str(self) -> &'static str {
        match self {
            Open::One => "one",
            Open::All => "all",
        }
    }
}

/// One issued reward card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardCard {
    pub name: String,
    pub image_url: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub group_id: String,
}

/// One prize line shown on the result panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prize {
    pub description: String,
}

/// Wire payload of a reward request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RewardPayload {
    pub cards: Vec<RewardCard>,
    pub prizes: Vec<Prize>,
    pub packs_left: u32,
    pub total_chances: u32,
}

impl RewardPayload {
    /// Groups issued cards by group id, preserving first-seen order.
    pub fn card_groups(&self) -> Vec<(&str, Vec<&RewardCard>)> {
        let mut groups: Vec<(&str, Vec<&RewardCard>)> = Vec::new();
        for card in &self.cards {
            match groups.iter_mut().find(|(id, _)| *id == card.group_id) {
                Some((_, members)) => members.push(card),
                None => groups.push((card.group_id.as_str(), vec![card])),
            }
        }
        groups
    }
}

/// Backend abstraction for the pack-open request. Implementations run on a
/// worker thread, so blocking in `fetch` is expected.
pub trait RewardSource: Send {
    fn fetch(&mut self, intent: Open) -> Result<RewardPayload, RewardError>;
}

/// Canned-data source with an artificial delay. This is a first-class
/// operating mode, not a test shim: the bridge-backed path only exists on
/// device builds.
#[derive(Debug, Clone)]
pub struct MockRewardSource {
    delay: Duration,
    packs_left: u32,
}

impl MockRewardSource {
    pub fn new(delay: Duration) -> Self {
        Self::with_packs(delay, 8)
    }

    pub fn with_packs(delay: Duration, packs_left: u32) -> Self {
        Self { delay, packs_left }
    }

    fn catalog() -> Vec<(RewardCard, Prize)> {
        let entry = |name: &str, image: &str, kind: &str, prize: &str| {
            (
                RewardCard {
                    name: name.to_string(),
                    image_url: image.to_string(),
                    kind: kind.to_string(),
                    group_id: kind.to_string(),
                },
                Prize {
                    description: prize.to_string(),
                },
            )
        };
        vec![
            entry(
                "Dining Card",
                "images/packs/photo-card-dining.png",
                "dining",
                "1 Michelin-starred dining experience (for two) card",
            ),
            entry(
                "Travel Card",
                "images/packs/photo-card-travel.png",
                "travel",
                "1 pair of flight tickets card",
            ),
            entry(
                "Luggage Card",
                "images/packs/photo-card-luggage.png",
                "luggage",
                "1 additional chance in the Grand Draw",
            ),
        ]
    }
}

impl RewardSource for MockRewardSource {
    fn fetch(&mut self, intent: Open) -> Result<RewardPayload, RewardError> {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        if self.packs_left == 0 {
            return Err(RewardError::Network("no packs left to open".to_string()));
        }

        let catalog = Self::catalog();
        let issued: Vec<(RewardCard, Prize)> = match intent {
            Open::One => {
                let pick = rand::thread_rng().gen_range(0..catalog.len());
                self.packs_left -= 1;
                vec![catalog[pick].clone()]
            }
            Open::All => {
                self.packs_left = 0;
                catalog
            }
        };

        Ok(RewardPayload {
            cards: issued.iter().map(|(card, _)| card.clone()).collect(),
            prizes: issued.into_iter().map(|(_, prize)| prize).collect(),
            packs_left: self.packs_left,
            total_chances: 301,
        })
    }
}

/// A single in-flight reward request: runs the source on a worker thread and
/// is drained by non-blocking polls from the tick loop. The hard timeout is
/// enforced here; a timed-out request reports exactly like a failed one.
#[derive(Debug)]
pub struct RewardRequest {
    rx: Receiver<Result<RewardPayload, RewardError>>,
    started: Instant,
    timeout: Duration,
    intent: Open,
    settled: bool,
}

impl RewardRequest {
    pub fn spawn<S: RewardSource + 'static>(
        mut source: S,
        intent: Open,
        timeout: Duration,
        now: Instant,
    ) -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let _ = tx.send(source.fetch(intent));
        });
        Self {
            rx,
            started: now,
            timeout,
            intent,
            settled: false,
        }
    }

    pub fn intent(&self) -> Open {
        self.intent
    }

    pub fn started(&self) -> Instant {
        self.started
    }

    /// Returns the outcome once, then `None` forever. A worker result that
    /// arrives after the timeout already fired is dropped.
    pub fn poll(&mut self, now: Instant) -> Option<Result<RewardPayload, RewardError>> {
        if self.settled {
            return None;
        }
        match self.rx.try_recv() {
            Ok(outcome) => {
                self.settled = true;
                Some(outcome)
            }
            Err(TryRecvError::Empty) => {
                if now.saturating_duration_since(self.started) >= self.timeout {
                    self.settled = true;
                    tracing::warn!(intent = self.intent.as_str(), "reward request timed out");
                    Some(Err(RewardError::Timeout))
                } else {
                    None
                }
            }
            Err(TryRecvError::Disconnected) => {
                self.settled = true;
                Some(Err(RewardError::Network(
                    "reward worker disconnected".to_string(),
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_open_one_issues_single_group() {
        let mut source = MockRewardSource::new(Duration::ZERO);
        let payload = source.fetch(Open::One).unwrap();
        assert_eq!(payload.cards.len(), 1);
        assert_eq!(payload.prizes.len(), 1);
        assert_eq!(payload.packs_left, 7);
    }

    #[test]
    fn test_mock_open_all_drains_packs() {
        let mut source = MockRewardSource::new(Duration::ZERO);
        let payload = source.fetch(Open::All).unwrap();
        assert_eq!(payload.cards.len(), 3);
        assert_eq!(payload.packs_left, 0);
        // Nothing left to open afterwards.
        assert!(source.fetch(Open::One).is_err());
    }

    #[test]
    fn test_payload_wire_names_are_camel_case() {
        let payload: RewardPayload = serde_json::from_str(
            r#"{
                "cards": [{"imageUrl": "a.png", "name": "Dining Card", "type": "dining"}],
                "prizes": [{"description": "1 additional chance"}],
                "packsLeft": 8,
                "totalChances": 301
            }"#,
        )
        .unwrap();
        assert_eq!(payload.cards[0].image_url, "a.png");
        assert_eq!(payload.cards[0].kind, "dining");
        assert_eq!(payload.packs_left, 8);
    }

    #[test]
    fn test_card_groups_preserve_first_seen_order() {
        let card = |group: &str| RewardCard {
            name: group.to_string(),
            image_url: String::new(),
            kind: group.to_string(),
            group_id: group.to_string(),
        };
        let payload = RewardPayload {
            cards: vec![card("travel"), card("dining"), card("travel")],
            ..RewardPayload::default()
        };
        let groups = payload.card_groups();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "travel");
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, "dining");
    }

    #[test]
    fn test_request_times_out_like_a_failure() {
        struct Stalled;
        impl RewardSource for Stalled {
            fn fetch(&mut self, _intent: Open) -> Result<RewardPayload, RewardError> {
                thread::sleep(Duration::from_secs(60));
                Ok(RewardPayload::default())
            }
        }

        let t0 = Instant::now();
        let mut request = RewardRequest::spawn(Stalled, Open::One, Duration::from_millis(10), t0);
        assert!(request.poll(t0).is_none());
        let outcome = request.poll(t0 + Duration::from_millis(20));
        assert_eq!(outcome, Some(Err(RewardError::Timeout)));
        // Settled: nothing further is reported.
        assert!(request.poll(t0 + Duration::from_secs(120)).is_none());
    }

    #[test]
    fn test_request_delivers_mock_payload() {
        let t0 = Instant::now();
        let mut request = RewardRequest::spawn(
            MockRewardSource::new(Duration::ZERO),
            Open::One,
            Duration::from_secs(65),
            t0,
        );
        let outcome = loop {
            if let Some(outcome) = request.poll(Instant::now()) {
                break outcome;
            }
            thread::yield_now();
        };
        assert_eq!(outcome.unwrap().cards.len(), 1);
    }
}
