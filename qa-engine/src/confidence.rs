//! Heuristic confidence scoring for generated answers.
//!
//! The score is a pure function of the retrieval results and the answer
//! text — no I/O, fully deterministic. It is a heuristic summary of
//! retrieval quality and answer shape, not a calibrated probability.
//!
//! The weighting, phrase list, and thresholds below are fixed policy; tests
//! reproduce them bit for bit.

use rag_store::SearchResult;
use tracing::debug;

/// Phrases (lowercase) whose presence in an answer signals uncertainty.
pub const UNCERTAINTY_PHRASES: [&str; 12] = [
    "don't know",
    "do not know",
    "cannot",
    "can't",
    "insufficient information",
    "sorry",
    "unable to",
    "not found",
    "no information",
    "not provided",
    "not in the context",
    "no data",
];

/// Number of top results averaged for the similarity component.
const TOP_RESULTS: usize = 3;

/// Results scoring above this count toward the relevance factor.
const RELEVANCE_CUTOFF: f64 = 0.01;

/// Answers at or beyond this many characters get the full length factor.
const FULL_LENGTH_CHARS: f64 = 200.0;

/// Flat penalty applied when any uncertainty phrase is present.
const UNCERTAINTY_PENALTY: f64 = 0.3;

/// Scores the trustworthiness of `answer` given the search results that
/// produced its context. Returns a value in `[0, 1]`, rounded to three
/// decimal places.
pub fn score(results: &[SearchResult], answer: &str) -> f64 {
    if results.is_empty() {
        return 0.0;
    }

    let mut top: Vec<f64> = results
        .iter()
        .map(|r| f64::from(r.similarity_score))
        .collect();
    top.sort_by(|a, b| b.total_cmp(a));
    top.truncate(TOP_RESULTS);
    if top.is_empty() {
        return 0.0;
    }

    let avg_similarity = top.iter().sum::<f64>() / top.len() as f64;
    let max_similarity = top[0];

    // Counted over the FULL result set, not just the averaged top slice.
    let relevant_count = results
        .iter()
        .filter(|r| f64::from(r.similarity_score) > RELEVANCE_CUTOFF)
        .count();
    let relevance_factor = (relevant_count as f64 / TOP_RESULTS as f64).min(1.0);

    let length_factor = (answer.chars().count() as f64 / FULL_LENGTH_CHARS).min(1.0);

    let lowered = answer.to_lowercase();
    let has_uncertainty = UNCERTAINTY_PHRASES.iter().any(|p| lowered.contains(p));
    let penalty = if has_uncertainty {
        UNCERTAINTY_PENALTY
    } else {
        0.0
    };

    let raw = avg_similarity * 0.4
        + max_similarity * 0.3
        + relevance_factor * 0.2
        + length_factor * 0.1
        - penalty;

    let final_confidence = round3(raw.clamp(0.0, 1.0));

    debug!(
        avg_similarity,
        max_similarity,
        relevant_count,
        has_uncertainty,
        final_confidence,
        "confidence computed"
    );

    final_confidence
}

fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(id: &str, score: f32) -> SearchResult {
        SearchResult {
            id: id.into(),
            content: format!("content of {id}"),
            similarity_score: score,
        }
    }

    fn long_answer() -> String {
        "The winter examination period starts on the ninth of January and runs for \
         three weeks. Consult the faculty schedule for the exact dates of each exam \
         and arrive at least fifteen minutes early with your student card."
            .to_string()
    }

    #[test]
    fn empty_results_score_zero() {
        assert_eq!(score(&[], &long_answer()), 0.0);
        assert_eq!(score(&[], ""), 0.0);
    }

    #[test]
    fn score_is_deterministic() {
        let results = vec![result("a_0", 0.8), result("a_1", 0.4)];
        let answer = long_answer();
        assert_eq!(score(&results, &answer), score(&results, &answer));
    }

    #[test]
    fn score_stays_within_bounds() {
        let cases = [
            vec![result("a_0", 1.0), result("a_1", 1.0), result("a_2", 1.0)],
            vec![result("b_0", 0.0)],
            vec![result("c_0", 0.005), result("c_1", 0.002)],
        ];
        for results in &cases {
            for answer in ["", "short", &long_answer(), "sorry, no data"] {
                let s = score(results, answer);
                assert!((0.0..=1.0).contains(&s), "score {s} out of bounds");
            }
        }
    }

    #[test]
    fn reference_scenario_scores_0_783() {
        // avg=0.533, max=0.9, relevance=1.0 (all three > 0.01), length=1.0,
        // no penalty → 0.2133 + 0.27 + 0.2 + 0.1 = 0.783 after rounding.
        let results = vec![
            result("faq.txt_0", 0.9),
            result("faq.txt_1", 0.5),
            result("faq.txt_2", 0.2),
        ];
        let answer = long_answer();
        assert!(answer.chars().count() >= 200);
        assert_eq!(score(&results, &answer), 0.783);
    }

    #[test]
    fn uncertainty_phrase_costs_exactly_0_3() {
        let results = vec![
            result("faq.txt_0", 0.9),
            result("faq.txt_1", 0.5),
            result("faq.txt_2", 0.2),
        ];
        let confident = long_answer();
        for phrase in UNCERTAINTY_PHRASES {
            let hedged = format!("{confident} I {phrase}.");
            assert!(hedged.chars().count() >= 200);
            let delta = score(&results, &confident) - score(&results, &hedged);
            assert!(
                (delta - 0.3).abs() < 1e-9,
                "phrase '{phrase}' changed the score by {delta}, expected 0.3"
            );
        }
    }

    #[test]
    fn detection_is_case_insensitive() {
        let results = vec![result("a_0", 0.9), result("a_1", 0.5), result("a_2", 0.2)];
        let answer = format!("{} SORRY, I DON'T KNOW.", long_answer());
        assert_eq!(score(&results, &answer), 0.483);
    }

    #[test]
    fn short_answers_earn_a_partial_length_factor() {
        let results = vec![result("a_0", 0.9), result("a_1", 0.5), result("a_2", 0.2)];
        // 100 chars → length factor 0.5 → 0.2133 + 0.27 + 0.2 + 0.05 = 0.733.
        let answer = "x".repeat(100);
        assert_eq!(score(&results, &answer), 0.733);
    }

    #[test]
    fn relevance_counts_the_full_result_set() {
        // Four results above the cutoff, only three averaged: the factor
        // saturates at 1.0 from the full set.
        let results = vec![
            result("a_0", 0.9),
            result("a_1", 0.5),
            result("a_2", 0.2),
            result("a_3", 0.1),
        ];
        let answer = long_answer();
        assert_eq!(score(&results, &answer), 0.783);

        // Scores at or below the cutoff do not count as relevant.
        let weak = vec![result("b_0", 0.009), result("b_1", 0.003)];
        // avg=0.006, max=0.009, relevance=0, length=1.0
        // → 0.0024 + 0.0027 + 0.0 + 0.1 = 0.105.
        assert_eq!(score(&weak, &answer), 0.105);
    }

    #[test]
    fn fewer_than_three_results_average_what_exists() {
        // avg = max = 0.6, relevance = 1/3, length = 1.0
        // → 0.24 + 0.18 + 0.0667 + 0.1 = 0.587 after rounding.
        let results = vec![result("a_0", 0.6)];
        assert_eq!(score(&results, &long_answer()), 0.587);
    }
}
