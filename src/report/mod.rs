//! Reporting utilities: sample statistics and formatted terminal output.

pub mod format;

pub use format::*;

use crate::domain::Sample;

/// Summary of a sample sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleStats {
    pub n: usize,
    pub size_min: u64,
    pub size_max: u64,
    pub duration_min: f64,
    pub duration_max: f64,
    /// Sum of measured `run` durations.
    pub duration_total: f64,
}

/// Compute stats, or `None` for an empty sequence.
pub fn sample_stats(samples: &[Sample]) -> Option<SampleStats> {
    let first = samples.first()?;
    let mut stats = SampleStats {
        n: samples.len(),
        size_min: first.size,
        size_max: first.size,
        duration_min: first.duration,
        duration_max: first.duration,
        duration_total: 0.0,
    };
    for s in samples {
        stats.size_min = stats.size_min.min(s.size);
        stats.size_max = stats.size_max.max(s.size);
        stats.duration_min = stats.duration_min.min(s.duration);
        stats.duration_max = stats.duration_max.max(s.duration);
        stats.duration_total += s.duration;
    }
    Some(stats)
}
