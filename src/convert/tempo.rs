//! Tempo estimation from the gaps between notes.

use std::ops::RangeInclusive;

use log::{debug, warn};

use super::ConvertConfig;
use crate::{
    timeline::{IntervalIndex, TimelineEvent},
    util::{
        avg, distance_of_increasing_values, flatten, linear_clusterization,
        pick_the_largest_sublist,
    },
};

/// Tempo assumed when nothing better can be estimated.
pub const FALLBACK_BPM: f64 = 120.0;

/// Estimates one tempo for a whole beatmap set.
///
/// The gaps between consecutive instantaneous notes of every difficulty are gathered, those
/// outside the configured note gaps dropped, and the rest clustered. The most common gap is
/// taken as an eighth note. The result is folded into the configured range.
///
/// Returns [`FALLBACK_BPM`] when no gap qualifies.
#[must_use]
pub fn figure_out_bpm<V: TimelineEvent + Clone>(
    indices: &[IntervalIndex<V>],
    config: &ConvertConfig,
) -> f64 {
    let gaps: Vec<i64> = flatten(indices.iter().map(|index| {
        distance_of_increasing_values(&index.retain_value(V::is_point).points_of_interest())
    }))
    .into_iter()
    .filter(|gap| (config.min_note_gap..=config.max_note_gap).contains(gap))
    .collect();
    let cluster = pick_the_largest_sublist(&linear_clusterization(&gaps, config.cluster_eps));
    let Some(gap) = avg(&cluster) else {
        return FALLBACK_BPM;
    };
    let bpm = 60000.0 / (2.0 * gap);
    if bpm <= 0.0 {
        return FALLBACK_BPM;
    }
    let folded = fold_bpm(bpm, &config.bpm_range);
    debug!(
        "most common gap {gap:.2}ms over {} gaps, {bpm:.2} bpm folded to {folded:.2}",
        gaps.len()
    );
    folded
}

/// Doubles `bpm` until it reaches the range, then halves it until it no longer exceeds it.
///
/// A range narrower than an octave may leave the result below its start. A `bpm` or a range
/// that is not finite and positive gives [`FALLBACK_BPM`], and so does an empty range.
#[must_use]
pub fn fold_bpm(mut bpm: f64, range: &RangeInclusive<f64>) -> f64 {
    let (start, end) = (*range.start(), *range.end());
    if !bpm.is_finite() || bpm <= 0.0 {
        return FALLBACK_BPM;
    }
    if !(start.is_finite() && end.is_finite() && 0.0 < start && start <= end) {
        warn!("tempo range {range:?} is unusable, assuming {FALLBACK_BPM} bpm");
        return FALLBACK_BPM;
    }
    while bpm < start {
        bpm *= 2.0;
    }
    while bpm > end {
        bpm /= 2.0;
    }
    bpm
}
