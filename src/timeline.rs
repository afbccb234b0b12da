//! Integer timeline of instantaneous and spanning events.
//!
//! [`IntervalIndex`] answers "what is active at `t`" and "what is active during `[lo, hi]`" over any
//! payload. The conversion fills one index per difficulty with [`TimelineEvent`]s keyed by
//! milliseconds, then derives a beat-quantized copy with [`IntervalIndex::map_keys`].
//!
//! All bounds are inclusive on both ends. A span touching a query at a single instant is active for
//! that query.

use std::collections::BTreeMap;

use itertools::Itertools;

/// Stable identity of an event, assigned when the event is extracted from the source chart.
///
/// Two events sharing position and time are still distinct if their ids differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventId(pub u64);

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Capabilities the conversion reads from an event payload. Nothing else of the payload is
/// inspected.
pub trait TimelineEvent {
    /// Identity of the event.
    fn id(&self) -> EventId;
    /// Start time in milliseconds.
    fn start_time(&self) -> i64;
    /// Finish time in milliseconds. Equal to [`Self::start_time`] for instantaneous events.
    fn finish_time(&self) -> i64;
    /// Horizontal position on the source playfield.
    fn coord_x(&self) -> i32;
    /// Vertical position on the source playfield, growing downwards.
    fn coord_y(&self) -> i32;
    /// Whether the event lies in a highlighted passage.
    fn is_kiai(&self) -> bool;
    /// Combo boundary marker, `0` when the event does not start a new combo.
    fn new_combo(&self) -> u8;

    /// Whether the event is instantaneous.
    fn is_point(&self) -> bool {
        self.start_time() == self.finish_time()
    }
}

impl<T: TimelineEvent + ?Sized> TimelineEvent for &T {
    fn id(&self) -> EventId {
        (**self).id()
    }
    fn start_time(&self) -> i64 {
        (**self).start_time()
    }
    fn finish_time(&self) -> i64 {
        (**self).finish_time()
    }
    fn coord_x(&self) -> i32 {
        (**self).coord_x()
    }
    fn coord_y(&self) -> i32 {
        (**self).coord_y()
    }
    fn is_kiai(&self) -> bool {
        (**self).is_kiai()
    }
    fn new_combo(&self) -> u8 {
        (**self).new_combo()
    }
}

/// Container of values tagged with either an instant or an inclusive span of time.
///
/// A value lives in exactly one of the two collections; the caller decides which by the length of
/// its interval. Queries never mutate the index, and transforms produce new indices.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntervalIndex<V> {
    /// Instantaneous values by time, insertion order kept per time.
    points: BTreeMap<i64, Vec<V>>,
    /// Spanning values with their inclusive `(start, end)`.
    spans: Vec<((i64, i64), V)>,
}

impl<V> Default for IntervalIndex<V> {
    fn default() -> Self {
        Self {
            points: BTreeMap::new(),
            spans: Vec::new(),
        }
    }
}

impl<V> IntervalIndex<V> {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an instantaneous value at `time`.
    pub fn append_point(&mut self, time: i64, value: V) {
        self.points.entry(time).or_default().push(value);
    }

    /// Adds a value active during `(start, end)`, both ends inclusive.
    pub fn append_span(&mut self, (start, end): (i64, i64), value: V) {
        debug_assert!(start <= end, "span must not end before it starts");
        self.spans.push(((start, end), value));
    }

    /// Number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.values().map(Vec::len).sum::<usize>() + self.spans.len()
    }

    /// Whether nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.spans.is_empty()
    }

    /// Iterates instantaneous values with their time, in time order.
    pub fn points(&self) -> impl Iterator<Item = (i64, &V)> {
        self.points
            .iter()
            .flat_map(|(&time, values)| values.iter().map(move |value| (time, value)))
    }

    /// Iterates spanning values with their interval, in insertion order.
    pub fn spans(&self) -> impl Iterator<Item = ((i64, i64), &V)> {
        self.spans.iter().map(|(span, value)| (*span, value))
    }

    /// Values active at `point`: instants exactly there, then spans containing it.
    #[must_use]
    pub fn active_at_point(&self, point: i64) -> Vec<&V> {
        self.points
            .get(&point)
            .into_iter()
            .flatten()
            .chain(
                self.spans
                    .iter()
                    .filter(|((start, end), _)| *start <= point && point <= *end)
                    .map(|(_, value)| value),
            )
            .collect()
    }

    /// Values active anywhere in `[lo, hi]`: instants inside it, then spans intersecting it.
    #[must_use]
    pub fn active_at_span(&self, (lo, hi): (i64, i64)) -> Vec<&V> {
        if lo > hi {
            return Vec::new();
        }
        self.points
            .range(lo..=hi)
            .flat_map(|(_, values)| values)
            .chain(
                self.spans
                    .iter()
                    .filter(|((start, end), _)| *start <= hi && lo <= *end)
                    .map(|(_, value)| value),
            )
            .collect()
    }

    /// Sorted, de-duplicated times of every instant and every span start.
    ///
    /// Span ends are not included, so the conversion only steps where something begins.
    #[must_use]
    pub fn points_of_interest(&self) -> Vec<i64> {
        self.points
            .keys()
            .copied()
            .chain(self.spans.iter().map(|((start, _), _)| *start))
            .sorted_unstable()
            .dedup()
            .collect()
    }
}

impl<V: Clone> IntervalIndex<V> {
    /// Creates a copy with every time transformed by `mapper`.
    ///
    /// A span whose ends collapse onto the same time becomes an instant.
    #[must_use]
    pub fn map_keys(&self, mapper: impl Fn(i64) -> i64) -> Self {
        let mut other = Self::new();
        for ((start, end), value) in &self.spans {
            let (new_start, new_end) = (mapper(*start), mapper(*end));
            if new_start == new_end {
                other.append_point(new_start, value.clone());
            } else {
                other.append_span((new_start, new_end), value.clone());
            }
        }
        for (time, value) in self.points() {
            other.append_point(mapper(time), value.clone());
        }
        other
    }

    /// Creates a copy keeping only the values satisfying `condition`.
    #[must_use]
    pub fn retain_value(&self, condition: impl Fn(&V) -> bool) -> Self {
        let mut other = Self::new();
        for (span, value) in self.spans() {
            if condition(value) {
                other.append_span(span, value.clone());
            }
        }
        for (time, value) in self.points() {
            if condition(value) {
                other.append_point(time, value.clone());
            }
        }
        other
    }
}
