//! Sentiment labels, label extraction and per-document tallies

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// Sentiment label a sentence can be classified as.
///
/// Declaration order is the extraction priority.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

/// Find the sentiment label named in a raw model response.
///
/// Labels are tried in priority order (positive, negative, neutral) and the
/// first one occurring anywhere in the lower-cased response wins, regardless
/// of where it appears. `sentence` is only used for diagnostics.
pub fn extract_label(response: &str, sentence: &str) -> Option<Sentiment> {
    let lowered = response.to_lowercase();
    let label = Sentiment::iter().find(|label| lowered.contains(label.as_ref()));
    if label.is_none() {
        tracing::trace!(sentence, response, "no sentiment label in response");
    }
    label
}

/// Result of classifying one sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassificationOutcome {
    Labeled(Sentiment),
    /// No label was recognised within the attempt budget
    Unclassified { attempts: usize },
}

impl ClassificationOutcome {
    pub fn label(&self) -> Option<Sentiment> {
        match self {
            Self::Labeled(label) => Some(*label),
            Self::Unclassified { .. } => None,
        }
    }
}

/// Per-document sentiment counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentTally {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    /// Sentences for which no label could be recognised
    pub unclassified: usize,
}

impl SentimentTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one classified sentence
    pub fn record(&mut self, outcome: ClassificationOutcome) {
        match outcome {
            ClassificationOutcome::Labeled(Sentiment::Positive) => self.positive += 1,
            ClassificationOutcome::Labeled(Sentiment::Negative) => self.negative += 1,
            ClassificationOutcome::Labeled(Sentiment::Neutral) => self.neutral += 1,
            ClassificationOutcome::Unclassified { .. } => self.unclassified += 1,
        }
    }

    pub fn count(&self, label: Sentiment) -> usize {
        match label {
            Sentiment::Positive => self.positive,
            Sentiment::Negative => self.negative,
            Sentiment::Neutral => self.neutral,
        }
    }

    /// Number of sentences that received a label
    pub fn labeled(&self) -> usize {
        self.positive + self.negative + self.neutral
    }

    /// Number of sentences seen, labeled or not
    pub fn total(&self) -> usize {
        self.labeled() + self.unclassified
    }
}

impl FromIterator<ClassificationOutcome> for SentimentTally {
    fn from_iter<I: IntoIterator<Item = ClassificationOutcome>>(iter: I) -> Self {
        let mut tally = Self::new();
        for outcome in iter {
            tally.record(outcome);
        }
        tally
    }
}
