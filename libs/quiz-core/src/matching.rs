//! Multi-strategy fuzzy answer matching.
//!
//! Free-text answers from young learners arrive misspelled, abbreviated or
//! phrased differently from the answer key. The matcher runs a fixed set of
//! strategies per acceptable answer, each yielding a confidence in [0, 1],
//! and keeps the strongest result. Strategy order (which also breaks
//! confidence ties, first wins): exact, edit distance, synonym, phonetic,
//! abbreviation, misspelling table, partial/substring.

use crate::text::{levenshtein, normalize, normalized_similarity};
use crate::types::{MatchMethod, Verdict};
use serde::{Deserialize, Serialize};

/// Tuning knobs for [`FuzzyMatcher::match_answer`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchConfig {
    pub enable_synonyms: bool,
    pub enable_phonetic: bool,
    pub enable_abbreviations: bool,
    /// Edit-distance matches beyond this many edits are rejected outright.
    pub max_edit_distance: usize,
    /// A strategy result below this confidence does not count as a match.
    pub min_confidence: f64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            enable_synonyms: true,
            enable_phonetic: true,
            enable_abbreviations: true,
            max_edit_distance: 2,
            min_confidence: 0.6,
        }
    }
}

/// Approximate string matcher over immutable lookup tables.
///
/// The tables are injected at construction so tests and callers can supply
/// their own; [`FuzzyMatcher::default`] ships the built-in English tables.
#[derive(Debug, Clone)]
pub struct FuzzyMatcher {
    /// Words in the same group are interchangeable (first entry is the base).
    synonym_groups: Vec<Vec<String>>,
    /// Known misspelling -> correction pairs, matched in either direction.
    misspellings: Vec<(String, String)>,
    /// Ordered letter-substitution rules approximating pronunciation.
    phonetic_rules: Vec<(String, String)>,
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new(
            builtin_synonym_groups(),
            builtin_misspellings(),
            builtin_phonetic_rules(),
        )
    }
}

impl FuzzyMatcher {
    pub fn new(
        synonym_groups: Vec<Vec<String>>,
        misspellings: Vec<(String, String)>,
        phonetic_rules: Vec<(String, String)>,
    ) -> Self {
        Self {
            synonym_groups,
            misspellings,
            phonetic_rules,
        }
    }

    /// Match user text against a set of acceptable answers.
    ///
    /// Every (answer, strategy) pair is evaluated independently; results
    /// below `config.min_confidence` are dropped and the highest surviving
    /// confidence wins. When nothing matches, the verdict carries the
    /// closest acceptable answer as a suggestion if it is at least vaguely
    /// similar.
    pub fn match_answer(
        &self,
        user_text: &str,
        acceptable_answers: &[String],
        config: &MatchConfig,
    ) -> Verdict {
        if user_text.is_empty() || acceptable_answers.is_empty() {
            return Verdict::incorrect();
        }

        let user = normalize(user_text);
        let mut results: Vec<(f64, MatchMethod, &String)> = Vec::new();

        for original in acceptable_answers {
            let correct = normalize(original);

            if user == correct {
                // Exact match trumps everything for this answer.
                results.push((1.0, MatchMethod::Exact, original));
                continue;
            }

            let mut consider = |confidence: f64, method: MatchMethod| {
                if confidence >= config.min_confidence {
                    results.push((confidence, method, original));
                }
            };

            consider(
                self.edit_distance_confidence(&user, &correct, config),
                MatchMethod::EditDistance,
            );
            if config.enable_synonyms {
                consider(self.synonym_confidence(&user, &correct), MatchMethod::Synonym);
            }
            if config.enable_phonetic {
                consider(self.phonetic_confidence(&user, &correct), MatchMethod::Phonetic);
            }
            if config.enable_abbreviations {
                consider(
                    self.abbreviation_confidence(&user, &correct),
                    MatchMethod::Abbreviation,
                );
            }
            consider(
                self.misspelling_confidence(&user, &correct),
                MatchMethod::Misspelling,
            );
            consider(self.partial_confidence(&user, &correct), MatchMethod::Partial);
        }

        let best = results
            .iter()
            .fold(None::<&(f64, MatchMethod, &String)>, |best, current| {
                match best {
                    Some(b) if current.0 <= b.0 => Some(b),
                    _ => Some(current),
                }
            });

        match best {
            Some(&(confidence, method, original)) => {
                let is_match = confidence >= config.min_confidence;
                Verdict {
                    correct: is_match,
                    confidence,
                    method,
                    matched_answer: Some(original.clone()),
                    suggestion: if is_match {
                        None
                    } else {
                        Some(original.clone())
                    },
                }
            }
            None => Verdict {
                suggestion: self.best_suggestion(&user, acceptable_answers),
                ..Verdict::incorrect()
            },
        }
    }

    fn edit_distance_confidence(&self, user: &str, correct: &str, config: &MatchConfig) -> f64 {
        let distance = levenshtein(user, correct);
        let max_len = user.chars().count().max(correct.chars().count());

        if distance <= config.max_edit_distance && max_len > 0 {
            (1.0 - distance as f64 / max_len as f64).max(0.0)
        } else {
            0.0
        }
    }

    fn synonym_confidence(&self, user: &str, correct: &str) -> f64 {
        for group in &self.synonym_groups {
            let has_user = group.iter().any(|w| w == user);
            let has_correct = group.iter().any(|w| w == correct);
            if has_user && has_correct {
                return 0.8;
            }
        }
        0.0
    }

    fn phonetic_confidence(&self, user: &str, correct: &str) -> f64 {
        let phonetic_user = self.to_phonetic(user);
        let phonetic_correct = self.to_phonetic(correct);

        if phonetic_user == phonetic_correct {
            return 0.7;
        }

        let distance = levenshtein(&phonetic_user, &phonetic_correct);
        let max_len = phonetic_user
            .chars()
            .count()
            .max(phonetic_correct.chars().count());

        if distance <= 1 && max_len > 0 {
            (0.6 * (1.0 - distance as f64 / max_len as f64)).max(0.0)
        } else {
            0.0
        }
    }

    /// Rewrite text with the phonetic substitution rules, in table order.
    fn to_phonetic(&self, text: &str) -> String {
        let mut phonetic = text.to_string();
        for (pattern, replacement) in &self.phonetic_rules {
            phonetic = phonetic.replace(pattern.as_str(), replacement);
        }
        phonetic
    }

    fn abbreviation_confidence(&self, user: &str, correct: &str) -> f64 {
        if user == first_letter_acronym(correct) || correct == first_letter_acronym(user) {
            0.75
        } else {
            0.0
        }
    }

    fn misspelling_confidence(&self, user: &str, correct: &str) -> f64 {
        for (misspelling, correction) in &self.misspellings {
            if (misspelling == user && correction == correct)
                || (misspelling == correct && correction == user)
            {
                return 0.9;
            }
        }
        0.0
    }

    fn partial_confidence(&self, user: &str, correct: &str) -> f64 {
        let user_words: Vec<&str> = user.split_whitespace().collect();
        let correct_words: Vec<&str> = correct.split_whitespace().collect();

        // Every user word appears within (or contains) some answer word.
        let all_user_words_found = !user_words.is_empty()
            && user_words.iter().all(|user_word| {
                correct_words
                    .iter()
                    .any(|correct_word| correct_word.contains(user_word) || user_word.contains(correct_word))
            });

        if all_user_words_found && !correct_words.is_empty() {
            return (user_words.len() as f64 / correct_words.len() as f64).min(0.7);
        }

        if correct.contains(user) && user.len() >= 3 {
            return 0.6;
        }
        if user.contains(correct) && correct.len() >= 3 {
            return 0.6;
        }

        0.0
    }

    /// Closest acceptable answer by edit-distance similarity, for feedback
    /// when no strategy matched. Suppressed below 0.3 similarity so wildly
    /// wrong answers do not leak the answer key.
    fn best_suggestion(&self, user: &str, acceptable_answers: &[String]) -> Option<String> {
        let mut best: Option<(f64, &String)> = None;

        for original in acceptable_answers {
            let similarity = normalized_similarity(user, &normalize(original));
            match best {
                Some((score, _)) if similarity <= score => {}
                _ => best = Some((similarity, original)),
            }
        }

        best.filter(|(score, _)| *score > 0.3)
            .map(|(_, original)| original.clone())
    }
}

/// First letter of each whitespace-separated word.
fn first_letter_acronym(text: &str) -> String {
    text.split_whitespace()
        .filter_map(|word| word.chars().next())
        .collect()
}

fn builtin_synonym_groups() -> Vec<Vec<String>> {
    let groups: &[&[&str]] = &[
        &["big", "large", "huge", "enormous", "massive", "giant"],
        &["small", "tiny", "little", "miniature", "minor"],
        &["happy", "joyful", "glad", "cheerful", "pleased", "delighted"],
        &["sad", "unhappy", "sorrowful", "depressed", "gloomy"],
        &["fast", "quick", "rapid", "speedy", "swift"],
        &["slow", "sluggish", "gradual", "leisurely"],
        &["good", "excellent", "great", "fine", "wonderful", "nice"],
        &["bad", "poor", "terrible", "awful", "horrible"],
    ];
    groups
        .iter()
        .map(|group| group.iter().map(|w| w.to_string()).collect())
        .collect()
}

fn builtin_misspellings() -> Vec<(String, String)> {
    [
        ("recieve", "receive"),
        ("seperate", "separate"),
        ("definately", "definitely"),
        ("occured", "occurred"),
        ("begining", "beginning"),
        ("existance", "existence"),
        ("independant", "independent"),
        ("neccessary", "necessary"),
    ]
    .iter()
    .map(|(a, b)| (a.to_string(), b.to_string()))
    .collect()
}

fn builtin_phonetic_rules() -> Vec<(String, String)> {
    // Order matters: "ck" must rewrite before the bare "c" rule.
    [
        ("ph", "f"),
        ("ck", "k"),
        ("qu", "kw"),
        ("x", "ks"),
        ("z", "s"),
        ("c", "k"),
    ]
    .iter()
    .map(|(a, b)| (a.to_string(), b.to_string()))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn matcher() -> FuzzyMatcher {
        FuzzyMatcher::default()
    }

    #[test]
    fn test_exact_match() {
        let verdict = matcher().match_answer(
            "paris",
            &answers(&["paris", "france capital"]),
            &MatchConfig::default(),
        );
        assert!(verdict.correct);
        assert_eq!(verdict.confidence, 1.0);
        assert_eq!(verdict.method, MatchMethod::Exact);
        assert_eq!(verdict.matched_answer.as_deref(), Some("paris"));
    }

    #[test]
    fn test_exact_match_ignores_case_and_punctuation() {
        let verdict =
            matcher().match_answer("  Paris!  ", &answers(&["paris"]), &MatchConfig::default());
        assert!(verdict.correct);
        assert_eq!(verdict.confidence, 1.0);
    }

    #[test]
    fn test_edit_distance_match() {
        // One deletion: confidence 1 - 1/5 = 0.8
        let verdict = matcher().match_answer("pari", &answers(&["paris"]), &MatchConfig::default());
        assert!(verdict.correct);
        assert_eq!(verdict.method, MatchMethod::EditDistance);
        assert!((verdict.confidence - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_edit_distance_rejects_beyond_limit() {
        let verdict =
            matcher().match_answer("london", &answers(&["paris"]), &MatchConfig::default());
        assert!(!verdict.correct);
        assert_eq!(verdict.confidence, 0.0);
    }

    #[test]
    fn test_synonym_match() {
        let verdict = matcher().match_answer("huge", &answers(&["big"]), &MatchConfig::default());
        assert!(verdict.correct);
        assert_eq!(verdict.method, MatchMethod::Synonym);
        assert!((verdict.confidence - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_synonym_match_can_be_disabled() {
        let config = MatchConfig {
            enable_synonyms: false,
            ..MatchConfig::default()
        };
        let verdict = matcher().match_answer("huge", &answers(&["big"]), &config);
        assert!(!verdict.correct);
    }

    #[test]
    fn test_phonetic_match() {
        // "foto" and "photo" collapse to the same phonetic form.
        let verdict = matcher().match_answer("foto", &answers(&["photo"]), &MatchConfig::default());
        assert!(verdict.correct);
        assert!((verdict.confidence - 0.7).abs() < 1e-9 || verdict.confidence > 0.7);
    }

    #[test]
    fn test_abbreviation_match() {
        let verdict = matcher().match_answer(
            "usa",
            &answers(&["united states america"]),
            &MatchConfig::default(),
        );
        assert!(verdict.correct);
        assert_eq!(verdict.method, MatchMethod::Abbreviation);
        assert!((verdict.confidence - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_misspelling_table_match() {
        let verdict =
            matcher().match_answer("recieve", &answers(&["receive"]), &MatchConfig::default());
        assert!(verdict.correct);
        // Edit distance also matches here; misspelling wins at 0.9.
        assert_eq!(verdict.method, MatchMethod::Misspelling);
        assert!((verdict.confidence - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_partial_match_word_subset() {
        let verdict = matcher().match_answer(
            "nile river",
            &answers(&["the nile river"]),
            &MatchConfig::default(),
        );
        assert!(verdict.correct);
        assert_eq!(verdict.method, MatchMethod::Partial);
        assert!((verdict.confidence - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_partial_word_subset_below_threshold_is_dropped() {
        // One word out of three caps the ratio at 1/3, under min_confidence.
        let verdict = matcher().match_answer(
            "nile",
            &answers(&["the nile river"]),
            &MatchConfig::default(),
        );
        assert!(!verdict.correct);
    }

    #[test]
    fn test_no_match_produces_suggestion() {
        let verdict = matcher().match_answer(
            "pariz mitropolis",
            &answers(&["paris metropolis"]),
            &MatchConfig {
                max_edit_distance: 0,
                enable_phonetic: false,
                ..MatchConfig::default()
            },
        );
        assert!(!verdict.correct);
        assert_eq!(verdict.suggestion.as_deref(), Some("paris metropolis"));
    }

    #[test]
    fn test_no_suggestion_when_nothing_is_close() {
        let verdict = matcher().match_answer(
            "zzzzzzzzzz",
            &answers(&["paris"]),
            &MatchConfig::default(),
        );
        assert!(!verdict.correct);
        assert_eq!(verdict.suggestion, None);
    }

    #[test]
    fn test_empty_input_never_matches() {
        let verdict = matcher().match_answer("", &answers(&["paris"]), &MatchConfig::default());
        assert!(!verdict.correct);
        assert_eq!(verdict.method, MatchMethod::None);

        let verdict = matcher().match_answer("paris", &[], &MatchConfig::default());
        assert!(!verdict.correct);
    }

    #[test]
    fn test_highest_confidence_wins_across_answers() {
        // "pari" is 1 edit from "paris" (0.8) and exactly "pari" nowhere;
        // an exact acceptable answer later in the list must still win.
        let verdict = matcher().match_answer(
            "pari",
            &answers(&["paris", "pari"]),
            &MatchConfig::default(),
        );
        assert_eq!(verdict.method, MatchMethod::Exact);
        assert_eq!(verdict.matched_answer.as_deref(), Some("pari"));
    }

    #[test]
    fn test_first_result_wins_on_tied_confidence() {
        // Both acceptable answers are 1 edit away from "pariz" with equal
        // length, so confidences tie; iteration order decides.
        let config = MatchConfig {
            enable_phonetic: false,
            ..MatchConfig::default()
        };
        let verdict = matcher().match_answer("pariz", &answers(&["pariz1", "parizz"]), &config);
        assert_eq!(verdict.matched_answer.as_deref(), Some("pariz1"));
    }

    #[test]
    fn test_custom_tables_are_honored() {
        let custom = FuzzyMatcher::new(
            vec![vec!["car".to_string(), "automobile".to_string()]],
            vec![],
            vec![],
        );
        let verdict =
            custom.match_answer("automobile", &answers(&["car"]), &MatchConfig::default());
        assert!(verdict.correct);
        assert_eq!(verdict.method, MatchMethod::Synonym);

        // Built-in groups are absent from the custom matcher.
        let verdict = custom.match_answer("huge", &answers(&["big"]), &MatchConfig::default());
        assert!(!verdict.correct);
    }
}
