//! Party identifiers and per-party score maps.

use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Lowest score the model may report for a party.
pub const SCORE_MIN: f64 = 0.0;
/// Highest score the model may report for a party.
pub const SCORE_MAX: f64 = 100.0;
/// Midpoint used for the aggregate before any statement was scored.
pub const NEUTRAL_SCORE: f64 = 50.0;

/// One of the six parties a statement is scored against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PartyCode {
    Cdu,
    Spd,
    Gruene,
    Fdp,
    Linke,
    Afd,
}

impl PartyCode {
    pub const COUNT: usize = 6;

    /// All parties in display order.
    pub const ALL: [PartyCode; Self::COUNT] = [
        PartyCode::Cdu,
        PartyCode::Spd,
        PartyCode::Gruene,
        PartyCode::Fdp,
        PartyCode::Linke,
        PartyCode::Afd,
    ];

    /// Identifier used on the wire and in charts.
    pub fn code(self) -> &'static str {
        match self {
            PartyCode::Cdu => "CDU",
            PartyCode::Spd => "SPD",
            PartyCode::Gruene => "Grüne",
            PartyCode::Fdp => "FDP",
            PartyCode::Linke => "Linke",
            PartyCode::Afd => "AfD",
        }
    }

    pub fn long_name(self) -> &'static str {
        match self {
            PartyCode::Cdu => "Christlich Demokratische Union",
            PartyCode::Spd => "Sozialdemokratische Partei Deutschlands",
            PartyCode::Gruene => "Bündnis 90/Die Grünen",
            PartyCode::Fdp => "Freie Demokratische Partei",
            PartyCode::Linke => "Die Linke",
            PartyCode::Afd => "Alternative für Deutschland",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for PartyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown party code: {0}")]
pub struct UnknownParty(pub String);

impl FromStr for PartyCode {
    type Err = UnknownParty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PartyCode::ALL
            .into_iter()
            .find(|p| p.code() == s)
            .ok_or_else(|| UnknownParty(s.to_string()))
    }
}

impl Serialize for PartyCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// A score for every party.
///
/// Dense by construction: a `ScoreMap` can never be missing a party, so
/// completeness is checked once at the parse boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreMap {
    scores: [f64; PartyCode::COUNT],
}

impl ScoreMap {
    pub fn uniform(value: f64) -> Self {
        Self {
            scores: [value; PartyCode::COUNT],
        }
    }

    /// Every party at [`NEUTRAL_SCORE`].
    pub fn neutral() -> Self {
        Self::uniform(NEUTRAL_SCORE)
    }

    /// Build from exactly one value per party, in [`PartyCode::ALL`] order.
    pub fn from_ordered(scores: [f64; PartyCode::COUNT]) -> Self {
        Self { scores }
    }

    /// Build from `(party, score)` pairs. Returns `None` unless every party
    /// appears exactly once.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (PartyCode, f64)>) -> Option<Self> {
        let mut slots: [Option<f64>; PartyCode::COUNT] = [None; PartyCode::COUNT];
        for (party, score) in pairs {
            let slot = &mut slots[party.index()];
            if slot.is_some() {
                return None;
            }
            *slot = Some(score);
        }
        let mut scores = [0.0; PartyCode::COUNT];
        for (dst, src) in scores.iter_mut().zip(slots) {
            *dst = src?;
        }
        Some(Self { scores })
    }

    pub fn get(&self, party: PartyCode) -> f64 {
        self.scores[party.index()]
    }

    pub fn set(&mut self, party: PartyCode, score: f64) {
        self.scores[party.index()] = score;
    }

    /// Scores in display order.
    pub fn iter(&self) -> impl Iterator<Item = (PartyCode, f64)> + '_ {
        PartyCode::ALL.into_iter().map(|p| (p, self.get(p)))
    }

    /// Party with the highest score; ties resolve to the earlier party.
    pub fn leader(&self) -> PartyCode {
        let mut best = PartyCode::ALL[0];
        for (party, score) in self.iter() {
            if score > self.get(best) {
                best = party;
            }
        }
        best
    }
}

impl Default for ScoreMap {
    fn default() -> Self {
        Self::neutral()
    }
}

impl Serialize for ScoreMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(PartyCode::COUNT))?;
        for (party, score) in self.iter() {
            map.serialize_entry(party.code(), &score)?;
        }
        map.end()
    }
}
