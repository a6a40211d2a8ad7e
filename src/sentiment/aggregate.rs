//! Two-level emotion aggregation.
//!
//! Stage one drops low-confidence emotion readings per keyword
//! occurrence; stage two partitions the survivors by polarity and takes
//! each bucket's mean. Filtering before averaging keeps noisy trace
//! emotions out while a single confident occurrence cannot swamp an
//! otherwise neutral message.

use crate::sentiment::{
    EmotionVector, MAIN_EMOTION_THRESHOLD, NEGATIVE_EMOTIONS, POSITIVE_EMOTIONS, SentimentScore,
};

/// Collapse per-keyword emotion vectors into one sentiment score.
///
/// No keyword occurrences at all yields the neutral zero score.
pub fn aggregate(vectors: &[EmotionVector]) -> SentimentScore {
    let mut positive_sum = 0.0;
    let mut positive_count = 0u32;
    let mut negative_sum = 0.0;
    let mut negative_count = 0u32;

    for vector in vectors {
        for (label, score) in main_emotions(vector) {
            if POSITIVE_EMOTIONS.contains(&label.as_str()) {
                positive_sum += score;
                positive_count += 1;
            } else if NEGATIVE_EMOTIONS.contains(&label.as_str()) {
                negative_sum += score;
                negative_count += 1;
            }
            // Labels outside the fixed 5-label set are ignored.
        }
    }

    SentimentScore {
        positive: mean(positive_sum, positive_count),
        negative: mean(negative_sum, negative_count),
    }
}

/// A keyword occurrence's main emotions: labels ordered by score
/// descending, with anything below the threshold dropped.
fn main_emotions(vector: &EmotionVector) -> Vec<(String, f64)> {
    let mut entries: Vec<(String, f64)> = vector
        .iter()
        .filter(|(_, score)| **score >= MAIN_EMOTION_THRESHOLD)
        .map(|(label, score)| (label.clone(), *score))
        .collect();
    entries.sort_by(|a, b| b.1.total_cmp(&a.1));
    entries
}

fn mean(sum: f64, count: u32) -> f64 {
    if count > 0 { sum / f64::from(count) } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(pairs: &[(&str, f64)]) -> EmotionVector {
        pairs
            .iter()
            .map(|(label, score)| (label.to_string(), *score))
            .collect()
    }

    #[test]
    fn empty_input_is_neutral() {
        assert_eq!(aggregate(&[]), SentimentScore::NEUTRAL);
    }

    #[test]
    fn below_threshold_emotions_are_dropped() {
        let score = aggregate(&[vector(&[("joy", 0.9), ("anger", 0.05)])]);
        assert_eq!(score.positive, 0.9);
        assert_eq!(score.negative, 0.0);
    }

    #[test]
    fn negative_bucket_is_the_mean_across_vectors() {
        let score = aggregate(&[vector(&[("anger", 0.5)]), vector(&[("sadness", 0.3)])]);
        assert!((score.negative - 0.4).abs() < 1e-12);
        assert_eq!(score.positive, 0.0);
    }

    #[test]
    fn buckets_average_independently() {
        let score = aggregate(&[
            vector(&[("joy", 0.6), ("fear", 0.2)]),
            vector(&[("joy", 0.4), ("disgust", 0.4)]),
        ]);
        assert!((score.positive - 0.5).abs() < 1e-12);
        assert!((score.negative - 0.3).abs() < 1e-12);
    }

    #[test]
    fn unknown_labels_are_ignored() {
        let score = aggregate(&[vector(&[("confusion", 0.8), ("joy", 0.3)])]);
        assert_eq!(score.positive, 0.3);
        assert_eq!(score.negative, 0.0);
    }

    #[test]
    fn scores_stay_within_unit_interval() {
        let vectors: Vec<EmotionVector> = (0..20)
            .map(|i| {
                vector(&[
                    ("joy", f64::from(i) / 20.0),
                    ("anger", 1.0 - f64::from(i) / 20.0),
                    ("fear", 0.11),
                ])
            })
            .collect();
        let score = aggregate(&vectors);
        assert!((0.0..=1.0).contains(&score.positive));
        assert!((0.0..=1.0).contains(&score.negative));
    }

    #[test]
    fn intensity_is_the_stronger_bucket() {
        let score = SentimentScore {
            positive: 0.2,
            negative: 0.7,
        };
        assert_eq!(score.intensity(), 0.7);
        assert_eq!(SentimentScore::NEUTRAL.intensity(), 0.0);
    }

    #[test]
    fn exact_threshold_is_kept() {
        let score = aggregate(&[vector(&[("sadness", 0.10)])]);
        assert_eq!(score.negative, 0.10);
    }
}
