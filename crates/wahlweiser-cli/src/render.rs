//! Plain-text charts and messages for the terminal.

use wahlweiser_core::{EvalError, PartyCode, ScoreMap, SCORE_MAX};

pub const TITLE: &str = "WahlWeiser";
pub const INTRO: &str = "Welche Partei passt zu dir? Gebe eine Aussage ein und eine KI bewertet, \
wie gut diese Aussage zu den großen deutschen Parteien passt.";
pub const THINKING: &str = "Die KI denkt nach...";
pub const AGGREGATE_HEADING: &str = "Wie gut passen die Aussagen zu den Parteien?";
pub const REPO: &str = "Github: Wahlweiser/WahlWeiser (https://github.com/Wahlweiser/WahlWeiser)";

pub const BAR_WIDTH: usize = 40;

const FILLED: char = '█';
const EMPTY: char = '░';

/// Width of the widest party code, in chars.
fn label_width() -> usize {
    PartyCode::ALL
        .iter()
        .map(|p| p.code().chars().count())
        .max()
        .unwrap_or(0)
}

pub fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{:.0}", score)
    } else {
        format!("{:.1}", score)
    }
}

/// One horizontal bar per party, in display order.
pub fn bar_chart(scores: &ScoreMap, width: usize) -> String {
    let label = label_width();
    let mut out = String::new();
    for (party, score) in scores.iter() {
        let ratio = (score / SCORE_MAX).clamp(0.0, 1.0);
        let filled = (ratio * width as f64).round() as usize;
        let bar: String = std::iter::repeat(FILLED)
            .take(filled)
            .chain(std::iter::repeat(EMPTY).take(width - filled))
            .collect();
        out.push_str(&format!(
            "  {:<label$}  {}  {:>5}\n",
            party.code(),
            bar,
            format_score(score),
            label = label
        ));
    }
    out
}

/// Party with the highest mean, named in full.
pub fn leader_line(scores: &ScoreMap) -> String {
    let leader = scores.leader();
    format!(
        "Am besten passt: {} ({}, {})",
        leader.code(),
        leader.long_name(),
        format_score(scores.get(leader))
    )
}

pub fn statement_heading(statement: &str) -> String {
    format!("» {}", statement)
}

/// User-facing failure text, plus the detail and raw payload for diagnosis.
pub fn failure(error: &EvalError) -> String {
    format!(
        "Fehler bei der Bewertung ({}). Bitte versuche es erneut.\n  Fehlermeldung: {}\n  Response: `{}`\n",
        error.kind(),
        error,
        error.raw().unwrap_or("(keine)")
    )
}

pub fn parties() -> String {
    let label = label_width();
    PartyCode::ALL
        .iter()
        .map(|p| format!("  {:<label$}  {}\n", p.code(), p.long_name(), label = label))
        .collect()
}

pub fn about(model: &str) -> String {
    format!(
        "Über WahlWeiser:\n\
         Dieses Projekt ist nur ein Experiment und erhebt keine Ansprüche auf Richtigkeit. \
         Zur Bewertung der Aussagen wird die KI {} verwendet. \
         Die Bewertungen sind daher nicht unbedingt repräsentativ für die Parteien.\n\
         Die eingegebenen Aussagen werden zur Bewertung an den KI-Anbieter übermittelt. \
         Gebe daher keine privaten Daten ein.\n\
         {}\n",
        model, REPO
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use wahlweiser_core::ProviderError;

    #[test]
    fn chart_has_one_line_per_party_in_order() {
        let chart = bar_chart(
            &ScoreMap::from_ordered([70.0, 30.0, 20.0, 90.0, 10.0, 60.0]),
            10,
        );
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[0].trim_start().starts_with("CDU"));
        assert!(lines[2].trim_start().starts_with("Grüne"));
        assert!(lines[5].trim_start().starts_with("AfD"));
        assert!(lines[3].contains("█████████░"));
        assert!(lines[3].ends_with("90"));
    }

    #[test]
    fn bars_are_aligned_despite_umlaut() {
        let chart = bar_chart(&ScoreMap::neutral(), 10);
        let starts: Vec<usize> = chart
            .lines()
            .map(|l| l.chars().position(|c| c == '█').unwrap())
            .collect();
        assert!(starts.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn empty_and_full_scores_render_at_the_edges() {
        let mut scores = ScoreMap::uniform(0.0);
        scores.set(PartyCode::Spd, 100.0);
        let chart = bar_chart(&scores, 4);
        let lines: Vec<&str> = chart.lines().collect();
        assert!(lines[0].contains("░░░░"));
        assert!(lines[1].contains("████"));
    }

    #[test]
    fn fractional_means_keep_one_decimal() {
        assert_eq!(format_score(50.0), "50");
        assert_eq!(format_score(50.5), "50.5");
        assert_eq!(format_score(61.0 / 3.0), "20.3");
    }

    #[test]
    fn failure_names_kind_and_raw_payload() {
        let text = failure(&EvalError::parse("reply is not a JSON object", "[1]"));
        assert!(text.contains("Fehler bei der Bewertung (ParseFailure)"));
        assert!(text.contains("Response: `[1]`"));

        let text = failure(&EvalError::from(ProviderError::Network {
            message: "connection refused".into(),
        }));
        assert!(text.contains("(TransportFailure)"));
        assert!(text.contains("connection refused"));
        assert!(text.contains("Response: `(keine)`"));
    }

    #[test]
    fn leader_line_names_highest_party() {
        let line = leader_line(&ScoreMap::from_ordered([70.0, 30.0, 20.0, 90.0, 10.0, 60.0]));
        assert_eq!(line, "Am besten passt: FDP (Freie Demokratische Partei, 90)");
    }

    #[test]
    fn parties_lists_long_names() {
        let text = parties();
        assert!(text.contains("Bündnis 90/Die Grünen"));
        assert_eq!(text.lines().count(), 6);
    }
}
