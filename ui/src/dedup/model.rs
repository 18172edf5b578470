//! Typed shape of the deduplication service response.
//!
//! The service speaks snake_case JSON (`question`, `source_pdf`,
//! `minimal_coverage_set`, ...); field names here follow the dashboard's own
//! vocabulary and are mapped with serde renames. Values are immutable once
//! decoded: the engine derives everything else on demand.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::UploadError;

/// Largest tolerated gap between the reported and recomputed reduction
/// percentage. The service rounds to two decimals.
const REDUCTION_TOLERANCE: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Fixed presentation order. Charts rely on it for stable colouring.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub(crate) fn position(self) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 1,
            Difficulty::Hard => 2,
        }
    }

    /// CSS modifier used by badges and chart bars.
    pub fn css_modifier(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One occurrence of a question inside a cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionInstance {
    #[serde(rename = "question")]
    pub text: String,
    pub difficulty: Difficulty,
    #[serde(rename = "source_pdf")]
    pub source_document: String,
    /// Closeness to the cluster's canonical question, in `[0, 1]`.
    pub similarity: f64,
}

/// Representative chosen by the service for a cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalQuestion {
    #[serde(rename = "question")]
    pub text: String,
    pub difficulty: Difficulty,
    #[serde(rename = "source_pdf")]
    pub source_document: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    #[serde(rename = "cluster_confidence")]
    pub confidence: f64,
    #[serde(rename = "canonical_question")]
    pub canonical: CanonicalQuestion,
    /// Display order. Never empty in a validated result.
    #[serde(rename = "questions")]
    pub members: Vec<QuestionInstance>,
}

impl Cluster {
    pub fn is_duplicate_group(&self) -> bool {
        self.members.len() > 1
    }
}

/// One entry of the minimal coverage set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageItem {
    #[serde(rename = "question")]
    pub text: String,
    pub difficulty: Difficulty,
    #[serde(rename = "source_pdf")]
    pub source_document: String,
    pub cluster_confidence: f64,
}

/// Root document returned by a successful upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResult {
    pub total_questions: u64,
    pub total_clusters: u64,
    #[serde(rename = "reduced_questions")]
    pub reduced_question_count: u64,
    pub reduction_percent: f64,
    pub clusters: Vec<Cluster>,
    #[serde(rename = "minimal_coverage_set")]
    pub coverage_set: Vec<CoverageItem>,
}

impl UploadResult {
    /// Decode and validate a success body. Missing fields, unknown
    /// difficulties and inconsistent totals all surface as
    /// [`UploadError::Malformed`].
    pub fn from_json(body: &str) -> Result<Self, UploadError> {
        let result: UploadResult =
            serde_json::from_str(body).map_err(|err| UploadError::malformed(err.to_string()))?;
        result.validate()?;
        Ok(result)
    }

    /// Every question instance across every cluster, in display order.
    pub fn instances(&self) -> impl Iterator<Item = &QuestionInstance> + '_ {
        self.clusters.iter().flat_map(|cluster| cluster.members.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    pub fn validate(&self) -> Result<(), UploadError> {
        for (idx, cluster) in self.clusters.iter().enumerate() {
            let label = idx + 1;
            if cluster.members.is_empty() {
                return Err(UploadError::malformed(format!("cluster {label} has no questions")));
            }
            check_unit(cluster.confidence, || format!("cluster {label} confidence"))?;
            check_text(&cluster.canonical.text, || format!("cluster {label} canonical question"))?;
            for (member_idx, member) in cluster.members.iter().enumerate() {
                let member_label = member_idx + 1;
                check_text(&member.text, || format!("cluster {label} question {member_label}"))?;
                check_unit(member.similarity, || {
                    format!("cluster {label} question {member_label} similarity")
                })?;
            }
        }

        for (idx, item) in self.coverage_set.iter().enumerate() {
            let label = idx + 1;
            check_text(&item.text, || format!("coverage item {label}"))?;
            check_unit(item.cluster_confidence, || format!("coverage item {label} confidence"))?;
        }

        if self.total_clusters > self.total_questions {
            return Err(UploadError::malformed(format!(
                "{} clusters reported for only {} questions",
                self.total_clusters, self.total_questions
            )));
        }
        if self.total_clusters != self.clusters.len() as u64 {
            return Err(UploadError::malformed(format!(
                "{} clusters reported but {} received",
                self.total_clusters,
                self.clusters.len()
            )));
        }
        if self.reduced_question_count != self.coverage_set.len() as u64 {
            return Err(UploadError::malformed(format!(
                "reduced count {} does not match {} coverage items",
                self.reduced_question_count,
                self.coverage_set.len()
            )));
        }
        if self.total_questions > 0 {
            let expected = 100.0
                * (1.0 - self.reduced_question_count as f64 / self.total_questions as f64);
            if !self.reduction_percent.is_finite()
                || (self.reduction_percent - expected).abs() > REDUCTION_TOLERANCE + f64::EPSILON
            {
                return Err(UploadError::malformed(format!(
                    "reduction {}% disagrees with computed {expected:.2}%",
                    self.reduction_percent
                )));
            }
        }

        Ok(())
    }
}

fn check_unit(value: f64, what: impl FnOnce() -> String) -> Result<(), UploadError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(UploadError::malformed(format!("{} {value} is outside [0, 1]", what())))
    }
}

fn check_text(text: &str, what: impl FnOnce() -> String) -> Result<(), UploadError> {
    if text.trim().is_empty() {
        Err(UploadError::malformed(format!("{} has empty text", what())))
    } else {
        Ok(())
    }
}
