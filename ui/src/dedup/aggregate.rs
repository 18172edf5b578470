//! Summary distributions derived from an [`UploadResult`].
//!
//! All functions are pure and cheap: components recompute them from the
//! installed result whenever it changes and never store the output back.

use std::collections::HashMap;

use super::model::{Difficulty, UploadResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifficultyCount {
    pub difficulty: Difficulty,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceCount {
    pub source: String,
    pub count: usize,
}

/// Chart input: one labelled bar or slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartPoint {
    pub name: String,
    pub value: usize,
}

/// Headline numbers for the stat cards.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSummary {
    pub total_questions: u64,
    pub total_clusters: u64,
    pub reduced_question_count: u64,
    /// Reported by the service, shown verbatim.
    pub reduction_percent: f64,
    pub instance_count: usize,
    pub duplicate_clusters: usize,
    pub mean_confidence: Option<f64>,
}

/// Question counts per difficulty, always `Easy, Medium, Hard` in that order.
///
/// Labels with no occurrences still appear with a zero count. `None` yields an
/// empty list.
pub fn difficulty_histogram(result: Option<&UploadResult>) -> Vec<DifficultyCount> {
    let Some(result) = result else {
        return Vec::new();
    };

    let mut counts = [0usize; 3];
    for question in result.instances() {
        counts[question.difficulty.position()] += 1;
    }

    Difficulty::ALL
        .into_iter()
        .zip(counts)
        .map(|(difficulty, count)| DifficultyCount { difficulty, count })
        .collect()
}

/// Question counts per source document, in first-seen order.
///
/// Source names are compared verbatim: `Paper.pdf` and `paper.pdf` are two
/// different sources.
pub fn per_source_histogram(result: Option<&UploadResult>) -> Vec<SourceCount> {
    let Some(result) = result else {
        return Vec::new();
    };

    let mut counts: Vec<SourceCount> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for question in result.instances() {
        let source = question.source_document.as_str();
        match positions.get(source) {
            Some(&pos) => counts[pos].count += 1,
            None => {
                positions.insert(source, counts.len());
                counts.push(SourceCount {
                    source: source.to_string(),
                    count: 1,
                });
            }
        }
    }

    counts
}

pub fn summarize(result: &UploadResult) -> ResultSummary {
    let instance_count = result.instances().count();
    let duplicate_clusters = result
        .clusters
        .iter()
        .filter(|cluster| cluster.is_duplicate_group())
        .count();
    let mean_confidence = if result.clusters.is_empty() {
        None
    } else {
        let total: f64 = result.clusters.iter().map(|cluster| cluster.confidence).sum();
        Some(total / result.clusters.len() as f64)
    };

    ResultSummary {
        total_questions: result.total_questions,
        total_clusters: result.total_clusters,
        reduced_question_count: result.reduced_question_count,
        reduction_percent: result.reduction_percent,
        instance_count,
        duplicate_clusters,
        mean_confidence,
    }
}

pub fn difficulty_chart(histogram: &[DifficultyCount]) -> Vec<ChartPoint> {
    histogram
        .iter()
        .map(|entry| ChartPoint {
            name: entry.difficulty.as_str().to_string(),
            value: entry.count,
        })
        .collect()
}

pub fn source_chart(histogram: &[SourceCount]) -> Vec<ChartPoint> {
    histogram
        .iter()
        .map(|entry| ChartPoint {
            name: entry.source.clone(),
            value: entry.count,
        })
        .collect()
}
