//! Strict decoding of the model's structured reply.

use crate::errors::EvalError;
use crate::party::{PartyCode, ScoreMap, SCORE_MAX, SCORE_MIN};

/// Decode a reply into a complete [`ScoreMap`].
///
/// The trimmed reply must be a single JSON object whose keys are exactly the
/// six party codes, each mapped to a number in `SCORE_MIN..=SCORE_MAX`.
/// Anything else is a parse failure carrying the raw reply.
pub fn parse_scores(raw: &str) -> Result<ScoreMap, EvalError> {
    let value: serde_json::Value = serde_json::from_str(raw.trim())
        .map_err(|e| EvalError::parse(format!("reply is not valid JSON: {}", e), raw))?;

    let obj = value
        .as_object()
        .ok_or_else(|| EvalError::parse("reply is not a JSON object", raw))?;

    let mut pairs = Vec::with_capacity(PartyCode::COUNT);
    for (key, val) in obj {
        let party: PartyCode = key
            .parse()
            .map_err(|_| EvalError::parse(format!("unexpected key '{}'", key), raw))?;
        let score = val.as_f64().ok_or_else(|| {
            EvalError::parse(format!("score for {} is not a number: {}", party, val), raw)
        })?;
        if !(SCORE_MIN..=SCORE_MAX).contains(&score) {
            return Err(EvalError::parse(
                format!(
                    "score for {} out of range {}..={}: {}",
                    party, SCORE_MIN, SCORE_MAX, score
                ),
                raw,
            ));
        }
        pairs.push((party, score));
    }

    ScoreMap::from_pairs(pairs).ok_or_else(|| {
        let missing: Vec<&str> = PartyCode::ALL
            .into_iter()
            .filter(|p| !obj.contains_key(p.code()))
            .map(PartyCode::code)
            .collect();
        EvalError::parse(format!("missing parties: {}", missing.join(", ")), raw)
    })
}
