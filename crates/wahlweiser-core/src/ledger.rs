//! Per-session record of scored statements.

use serde::Serialize;

use crate::party::{PartyCode, ScoreMap};

/// One scored statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerEntry {
    pub statement: String,
    pub scores: ScoreMap,
}

/// Insertion-ordered map from statement text to its scores.
///
/// Only successful evaluations belong here. Re-recording a statement replaces
/// its scores in place; its position never changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SessionLedger {
    entries: Vec<LedgerEntry>,
}

impl SessionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the entry keyed by exact statement text.
    ///
    /// Returns `true` when the statement was new.
    pub fn record(&mut self, statement: impl Into<String>, scores: ScoreMap) -> bool {
        let statement = statement.into();
        match self.entries.iter_mut().find(|e| e.statement == statement) {
            Some(existing) => {
                existing.scores = scores;
                false
            }
            None => {
                self.entries.push(LedgerEntry { statement, scores });
                true
            }
        }
    }

    pub fn get(&self, statement: &str) -> Option<&ScoreMap> {
        self.entries
            .iter()
            .find(|e| e.statement == statement)
            .map(|e| &e.scores)
    }

    /// Entries in insertion order. Call again to replay from the start.
    pub fn entries(&self) -> std::slice::Iter<'_, LedgerEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Per-party arithmetic mean over all entries, or the neutral map when
    /// nothing has been recorded yet.
    pub fn mean(&self) -> ScoreMap {
        if self.entries.is_empty() {
            return ScoreMap::neutral();
        }
        let n = self.entries.len() as f64;
        let mut mean = ScoreMap::uniform(0.0);
        for party in PartyCode::ALL {
            let sum: f64 = self.entries.iter().map(|e| e.scores.get(party)).sum();
            mean.set(party, sum / n);
        }
        mean
    }

    pub fn reset(&mut self) {
        self.entries.clear();
    }
}

impl<'a> IntoIterator for &'a SessionLedger {
    type Item = &'a LedgerEntry;
    type IntoIter = std::slice::Iter<'a, LedgerEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steuern() -> ScoreMap {
        ScoreMap::from_ordered([70.0, 30.0, 20.0, 90.0, 10.0, 60.0])
    }

    fn klima() -> ScoreMap {
        ScoreMap::from_ordered([30.0, 70.0, 80.0, 10.0, 90.0, 40.0])
    }

    #[test]
    fn empty_ledger_mean_is_neutral() {
        let ledger = SessionLedger::new();
        assert!(ledger.is_empty());
        let mean = ledger.mean();
        for party in PartyCode::ALL {
            assert_eq!(mean.get(party), 50.0);
        }
    }

    #[test]
    fn single_entry_mean_equals_entry() {
        let mut ledger = SessionLedger::new();
        assert!(ledger.record("Steuern senken", steuern()));
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.mean(), steuern());
    }

    #[test]
    fn two_opposite_entries_average_to_neutral() {
        let mut ledger = SessionLedger::new();
        ledger.record("Steuern senken", steuern());
        ledger.record("Klimaschutz ausbauen", klima());
        assert_eq!(ledger.mean(), ScoreMap::neutral());
    }

    #[test]
    fn mean_is_exact_arithmetic_mean() {
        let mut ledger = SessionLedger::new();
        ledger.record("a", ScoreMap::uniform(10.0));
        ledger.record("b", ScoreMap::uniform(20.0));
        ledger.record("c", ScoreMap::uniform(31.0));
        for (_, score) in ledger.mean().iter() {
            assert!((score - 61.0 / 3.0).abs() < 1e-9);
        }
    }

    #[test]
    fn re_recording_overwrites_in_place() {
        let mut ledger = SessionLedger::new();
        ledger.record("first", steuern());
        ledger.record("second", klima());
        ledger.record("third", ScoreMap::uniform(5.0));

        assert!(!ledger.record("second", ScoreMap::uniform(99.0)));
        assert_eq!(ledger.len(), 3);

        let order: Vec<_> = ledger.entries().map(|e| e.statement.as_str()).collect();
        assert_eq!(order, ["first", "second", "third"]);
        assert_eq!(ledger.get("second"), Some(&ScoreMap::uniform(99.0)));
    }

    #[test]
    fn keys_are_exact_strings() {
        let mut ledger = SessionLedger::new();
        ledger.record("Steuern senken", steuern());
        ledger.record("steuern senken", klima());
        assert_eq!(ledger.len(), 2);
        assert!(ledger.get("Steuern senken ").is_none());
    }

    #[test]
    fn entries_are_restartable() {
        let mut ledger = SessionLedger::new();
        ledger.record("a", steuern());
        ledger.record("b", klima());
        let first: Vec<_> = ledger.entries().cloned().collect();
        let second: Vec<_> = (&ledger).into_iter().cloned().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn reset_clears_everything() {
        let mut ledger = SessionLedger::new();
        ledger.record("Steuern senken", steuern());
        ledger.record("Klimaschutz ausbauen", klima());
        ledger.reset();
        assert!(ledger.is_empty());
        assert_eq!(ledger.entries().count(), 0);
        assert_eq!(ledger.mean(), ScoreMap::neutral());
    }

    #[test]
    fn serializes_as_ordered_list() {
        let mut ledger = SessionLedger::new();
        ledger.record("Steuern senken", steuern());
        let json = serde_json::to_value(&ledger).unwrap();
        assert_eq!(json[0]["statement"], "Steuern senken");
        assert_eq!(json[0]["scores"]["FDP"], 90.0);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        fn score_map() -> impl Strategy<Value = ScoreMap> {
            proptest::array::uniform6(0.0f64..=100.0).prop_map(ScoreMap::from_ordered)
        }

        proptest! {
            #[test]
            fn mean_is_per_party_average(maps in prop::collection::vec(score_map(), 1..40)) {
                let mut ledger = SessionLedger::new();
                for (i, scores) in maps.iter().enumerate() {
                    ledger.record(format!("statement {}", i), *scores);
                }
                let mean = ledger.mean();
                let n = maps.len() as f64;
                for party in PartyCode::ALL {
                    let expected = maps.iter().map(|m| m.get(party)).sum::<f64>() / n;
                    prop_assert!((mean.get(party) - expected).abs() < 1e-9);
                    prop_assert!((0.0..=100.0).contains(&mean.get(party)));
                }
            }

            #[test]
            fn record_matches_ordered_map_model(
                ops in prop::collection::vec((0usize..8, score_map()), 0..60)
            ) {
                let mut ledger = SessionLedger::new();
                let mut model: Vec<(String, ScoreMap)> = Vec::new();
                for (key, scores) in ops {
                    let statement = format!("Aussage {}", key);
                    let fresh = ledger.record(statement.clone(), scores);
                    match model.iter_mut().find(|(s, _)| *s == statement) {
                        Some(slot) => {
                            prop_assert!(!fresh);
                            slot.1 = scores;
                        }
                        None => {
                            prop_assert!(fresh);
                            model.push((statement, scores));
                        }
                    }
                }
                prop_assert_eq!(ledger.len(), model.len());
                let actual: Vec<(String, ScoreMap)> = ledger
                    .entries()
                    .map(|e| (e.statement.clone(), e.scores))
                    .collect();
                prop_assert_eq!(actual, model);
            }
        }
    }
}
