//! Heuristic place-name extraction from generated itinerary text.
//!
//! A line is only scanned when it contains one of [`TRIGGER_KEYWORDS`]. How a
//! keyword has to appear is controlled by [`TriggerMatch`]:
//!
//! - [`TriggerMatch::WordStart`] (default) requires the keyword to begin a
//!   word, so "visiting" and "attend" fire but "weather" and "great" do not.
//! - [`TriggerMatch::Substring`] is a plain case-insensitive substring test.
//!   With the `"at"` keyword this fires on almost any line ("weather",
//!   "breakfast", "theatre").
//!
//! Scanned lines yield every run of title-cased words. A run that opens with a
//! trigger keyword ("Visit Central Park", "Head To Trevi Fountain") loses those
//! leading words, so sentence-initial verbs neither glue onto the place name
//! nor stand alone as candidates. Runs are whitespace-normalized (tabs and
//! non-breaking spaces become single spaces) before the length check and
//! de-duplication.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Lowercase keywords that mark a line as likely to mention a place.
pub const TRIGGER_KEYWORDS: &[&str] = &[
    "visit", "explore", "reach", "head to", "stop at", "at", "see",
];

/// Shortest accepted candidate, in characters, after trimming.
pub const MIN_CANDIDATE_CHARS: usize = 3;

static TITLE_CASE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Z][a-z]+(?:\s[A-Z][a-z]+)*").expect("valid title-case pattern"));

static WORD_START_TRIGGER: Lazy<Regex> = Lazy::new(|| {
    let alternatives = TRIGGER_KEYWORDS
        .iter()
        .map(|kw| regex::escape(kw))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{})", alternatives)).expect("valid trigger pattern")
});

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TriggerMatch {
    #[default]
    WordStart,
    Substring,
}

impl TriggerMatch {
    pub fn matches(&self, line: &str) -> bool {
        match self {
            TriggerMatch::WordStart => WORD_START_TRIGGER.is_match(line),
            TriggerMatch::Substring => {
                let lowered = line.to_lowercase();
                TRIGGER_KEYWORDS.iter().any(|kw| lowered.contains(kw))
            }
        }
    }
}

/// Returns the de-duplicated candidate place names found in `text`, in order
/// of first appearance.
pub fn extract_candidates(text: &str) -> Vec<String> {
    extract_candidates_with(text, TriggerMatch::default())
}

pub fn extract_candidates_with(text: &str, trigger: TriggerMatch) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    for line in text.lines().filter(|line| trigger.matches(line)) {
        for found in TITLE_CASE_RUN.find_iter(line) {
            let Some(name) = candidate_from_run(found.as_str()) else {
                continue;
            };
            if seen.insert(name.clone()) {
                candidates.push(name);
            }
        }
    }

    candidates
}

/// Number of leading words of `words` that spell out (a prefix of) a trigger
/// keyword, so both "Head" and "Head To" are recognised.
fn leading_trigger_len(words: &[&str]) -> usize {
    TRIGGER_KEYWORDS
        .iter()
        .map(|kw| {
            kw.split_whitespace()
                .zip(words)
                .take_while(|(keyword, word)| keyword.eq_ignore_ascii_case(word))
                .count()
        })
        .max()
        .unwrap_or(0)
}

fn candidate_from_run(run: &str) -> Option<String> {
    let words: Vec<&str> = run.split_whitespace().collect();
    let name = words[leading_trigger_len(&words)..].join(" ");
    (name.chars().count() >= MIN_CANDIDATE_CHARS).then_some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visit_line_yields_both_places() {
        let candidates = extract_candidates("Visit Central Park and Times Square today.");
        assert!(candidates.contains(&"Central Park".to_string()));
        assert!(candidates.contains(&"Times Square".to_string()));
    }

    #[test]
    fn test_leading_trigger_verb_is_dropped_from_run() {
        let cases = [
            ("Visit Central Park.", "Central Park"),
            ("See Notre Dame.", "Notre Dame"),
            ("Explore Times Square.", "Times Square"),
            ("Reach Montmartre by noon.", "Montmartre"),
            ("Head To Trevi Fountain.", "Trevi Fountain"),
            ("Stop At Cafe Florian.", "Cafe Florian"),
            ("At Grand Central, meet the group.", "Grand Central"),
        ];
        for (line, expected) in cases {
            assert_eq!(extract_candidates(line), vec![expected], "line: {}", line);
        }
    }

    #[test]
    fn test_lone_trigger_verb_is_not_a_candidate() {
        assert_eq!(extract_candidates("Visit the Pantheon"), vec!["Pantheon"]);
        assert!(extract_candidates("Explore freely").is_empty());
    }

    #[test]
    fn test_runs_are_whitespace_normalized_before_dedup() {
        let text = "Visit Central\u{a0}Park.\nSee Central Park.\nExplore Times\tSquare.";
        assert_eq!(extract_candidates(text), vec!["Central Park", "Times Square"]);
    }

    #[test]
    fn test_line_without_trigger_contributes_nothing() {
        assert!(extract_candidates("The weather is nice.").is_empty());
        assert!(extract_candidates("Louvre Museum Paris Opera").is_empty());
    }

    #[test]
    fn test_substring_mode_over_triggers_on_at() {
        // "weather" and "great" both contain "at".
        assert!(TriggerMatch::Substring.matches("The weather is nice."));
        assert_eq!(
            extract_candidates_with("The weather is nice.", TriggerMatch::Substring),
            vec!["The"]
        );
        assert_eq!(
            extract_candidates_with("Great Wall Tour", TriggerMatch::Substring),
            vec!["Great Wall Tour"]
        );
        assert!(extract_candidates("Great Wall Tour").is_empty());
    }

    #[test]
    fn test_word_start_mode_accepts_inflections() {
        assert!(TriggerMatch::WordStart.matches("Visiting the Louvre"));
        assert!(TriggerMatch::WordStart.matches("We will head to the river"));
        assert!(!TriggerMatch::WordStart.matches("A great breakfast"));
    }

    #[test]
    fn test_keywords_match_case_insensitively() {
        assert_eq!(extract_candidates("EXPLORE the Old Town"), vec!["Old Town"]);
    }

    #[test]
    fn test_short_matches_are_dropped() {
        assert_eq!(extract_candidates("Go, then visit Rome"), vec!["Rome"]);
    }

    #[test]
    fn test_duplicates_are_removed_across_lines() {
        let text = "Visit the Colosseum in the morning.\nHead to Trevi Fountain.\nSee the Colosseum at night.";
        let candidates = extract_candidates(text);
        assert_eq!(candidates, vec!["Colosseum", "Trevi Fountain"]);
    }

    #[test]
    fn test_no_entry_is_short_or_duplicated() {
        let text = "At 9am: visit Le Marais.\nLunch at Chez Janou, then see Place Des Vosges.\n\
                    Stop at Le Marais again. Explore Ile Saint Louis.";
        for mode in [TriggerMatch::WordStart, TriggerMatch::Substring] {
            let candidates = extract_candidates_with(text, mode);
            let unique: HashSet<_> = candidates.iter().collect();
            assert_eq!(unique.len(), candidates.len());
            assert!(candidates.iter().all(|c| c.trim().chars().count() > 2));
            assert!(candidates.contains(&"Le Marais".to_string()));
        }
    }

    #[test]
    fn test_trigger_line_without_title_case_run() {
        assert!(extract_candidates("visit the market at noon").is_empty());
    }
}
