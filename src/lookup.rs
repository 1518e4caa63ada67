use crate::api::client::{RecommendQuery, ServiceClient};
use crate::api::models::{MasteryDto, PredictRequest, PredictResponse, RecommendationDto};
use crate::display::output::display_warn;
use crate::draft::Side;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

/// Identifies the roster slot a lookup was dispatched for, pinned to the
/// slot's epoch at dispatch time. A completion whose epoch no longer matches
/// the slot is stale and must be discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotToken {
    pub side: Side,
    pub slot: usize,
    pub epoch: u64,
}

pub enum LookupOutcome {
    Masteries {
        token: SlotToken,
        masteries: Vec<MasteryDto>,
    },
    Recommendations {
        token: SlotToken,
        items: Vec<RecommendationDto>,
    },
    Prediction {
        seq: u64,
        response: Option<PredictResponse>,
    },
}

/// Runs service lookups on background threads so the draft loop never blocks.
/// Results come back over a channel and are drained between user actions.
/// Failures resolve to empty or absent results, never to a blocking error.
pub struct LookupDispatcher {
    client: Arc<ServiceClient>,
    tx: Sender<LookupOutcome>,
    rx: Receiver<LookupOutcome>,
    prediction_seq: u64,
}

impl LookupDispatcher {
    pub fn new(client: Arc<ServiceClient>) -> Self {
        let (tx, rx) = mpsc::channel();
        LookupDispatcher {
            client,
            tx,
            rx,
            prediction_seq: 0,
        }
    }

    pub fn dispatch_masteries(&self, token: SlotToken, game_name: &str, tag_line: &str, limit: usize) {
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        let game_name = game_name.to_string();
        let tag_line = tag_line.to_string();

        thread::spawn(move || {
            let masteries = match client.lookup_masteries(&game_name, &tag_line, limit) {
                Ok(response) => response.masteries,
                Err(e) => {
                    display_warn(&format!("Mastery lookup failed: {}", e));
                    Vec::new()
                }
            };
            let _ = tx.send(LookupOutcome::Masteries { token, masteries });
        });
    }

    pub fn dispatch_recommendations(&self, token: SlotToken, riot_id: &str, query: RecommendQuery) {
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        let riot_id = riot_id.to_string();

        thread::spawn(move || {
            let items = match client.recommend(&riot_id, &query) {
                Ok(response) => response
                    .recommendations
                    .into_values()
                    .flatten()
                    .collect(),
                Err(e) => {
                    display_warn(&format!("Recommendation lookup failed: {}", e));
                    Vec::new()
                }
            };
            let _ = tx.send(LookupOutcome::Recommendations { token, items });
        });
    }

    /// Single attempt per roster change; on failure the local heuristic stays
    /// authoritative.
    pub fn dispatch_prediction(&mut self, request: PredictRequest) -> u64 {
        let seq = self.begin_prediction();
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();

        thread::spawn(move || {
            let response = client.predict(&request).ok();
            let _ = tx.send(LookupOutcome::Prediction { seq, response });
        });
        seq
    }

    fn begin_prediction(&mut self) -> u64 {
        self.prediction_seq += 1;
        self.prediction_seq
    }

    /// Whether a completed prediction is still the most recently requested
    /// one. Older completions carry stale board state.
    pub fn is_current_prediction(&self, seq: u64) -> bool {
        seq == self.prediction_seq
    }

    /// Drop any in-flight prediction. Completions dispatched before this call
    /// stop being current, so a slow response cannot land on a board that was
    /// reset underneath it.
    pub fn invalidate_predictions(&mut self) {
        self.prediction_seq += 1;
    }

    /// Collect every completed lookup without blocking.
    pub fn drain(&self) -> Vec<LookupOutcome> {
        self.rx.try_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn dispatcher() -> LookupDispatcher {
        let config = Config {
            service_url: "http://localhost:1".to_string(),
            region: "euw1".to_string(),
        };
        LookupDispatcher::new(Arc::new(ServiceClient::new(config)))
    }

    #[test]
    fn only_the_latest_prediction_is_current() {
        let mut dispatcher = dispatcher();
        let first = dispatcher.begin_prediction();
        let second = dispatcher.begin_prediction();

        assert!(!dispatcher.is_current_prediction(first));
        assert!(dispatcher.is_current_prediction(second));
    }

    #[test]
    fn invalidation_discards_an_inflight_prediction() {
        let mut dispatcher = dispatcher();
        let seq = dispatcher.begin_prediction();
        assert!(dispatcher.is_current_prediction(seq));

        // Board reset while the request is in flight: the pre-reset response
        // must not be treated as current when it completes.
        dispatcher.invalidate_predictions();
        assert!(!dispatcher.is_current_prediction(seq));

        // The next dispatched prediction is current again.
        let next = dispatcher.begin_prediction();
        assert!(dispatcher.is_current_prediction(next));
    }

    #[test]
    fn failed_lookup_resolves_to_an_empty_mastery_list() {
        // Nothing listens on port 1, so the lookup fails and must come back
        // as an empty result rather than an error.
        let dispatcher = dispatcher();
        let token = SlotToken {
            side: Side::Blue,
            slot: 0,
            epoch: 0,
        };
        dispatcher.dispatch_masteries(token, "Name", "TAG", 10);

        let outcome = dispatcher
            .rx
            .recv_timeout(std::time::Duration::from_secs(10))
            .expect("worker reports back");
        match outcome {
            LookupOutcome::Masteries {
                token: got,
                masteries,
            } => {
                assert_eq!(got, token);
                assert!(masteries.is_empty());
            }
            _ => panic!("expected a mastery outcome"),
        }
    }
}
