//! Keyword-targeted sentiment scoring.
//!
//! The NLU collaborator returns one emotion vector per occurrence of a
//! vocabulary keyword in the body text; `aggregate` collapses those
//! vectors into a single positive/negative score pair.

pub mod aggregate;
pub mod nlu;

pub use aggregate::aggregate;
pub use nlu::{EmotionAnalyzer, WatsonNlu};

use std::collections::HashMap;

/// Urgency/security vocabulary the NLU call targets. Tunable policy, not
/// derived data.
pub const TARGET_KEYWORDS: &[&str] = &[
    "important",
    "urgent",
    "asap",
    "emergency",
    "unusual",
    "bug",
    "error",
    "compromised",
    "issue",
    "software",
    "voicemail",
    "quickly",
];

/// Emotion labels counted toward the positive bucket.
pub const POSITIVE_EMOTIONS: &[&str] = &["joy"];

/// Emotion labels counted toward the negative bucket.
pub const NEGATIVE_EMOTIONS: &[&str] = &["anger", "disgust", "fear", "sadness"];

/// Minimum per-keyword score for an emotion to count at all.
pub const MAIN_EMOTION_THRESHOLD: f64 = 0.10;

/// Emotion label → score in [0, 1], one vector per keyword occurrence.
pub type EmotionVector = HashMap<String, f64>;

/// Aggregated sentiment for one message.
///
/// The buckets are averaged independently — they are not complementary
/// and need not sum to 1.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SentimentScore {
    pub positive: f64,
    pub negative: f64,
}

impl SentimentScore {
    /// Score for a message with no scorable body.
    pub const NEUTRAL: Self = Self {
        positive: 0.0,
        negative: 0.0,
    };

    /// Single scalar stored in the persisted record — the stronger of
    /// the two buckets. Lossy on purpose.
    pub fn intensity(&self) -> f64 {
        self.positive.max(self.negative)
    }
}
