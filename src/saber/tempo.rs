//! Beat quantization of millisecond times.
//!
//! The target format places everything on beats of a fixed 4/4 signature, so every millisecond
//! time is snapped to the nearest quarter of a beat.

use thiserror::Error;

/// Subdivisions of a beat every time is snapped to.
pub const STEPS_PER_BEAT: f64 = 4.0;

/// Error type for [`Tempo::new`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("positive finite tempo expected: {0}")]
pub struct InvalidTempoError(pub f64);

/// A constant tempo in beats per minute.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tempo {
    bpm: f64,
    ms_per_step: f64,
}

impl Tempo {
    /// Creates a tempo of `bpm` beats per minute.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTempoError`] unless `bpm` is finite and positive.
    pub fn new(bpm: f64) -> Result<Self, InvalidTempoError> {
        if !bpm.is_finite() || bpm <= 0.0 {
            return Err(InvalidTempoError(bpm));
        }
        Ok(Self {
            bpm,
            ms_per_step: 60000.0 / (STEPS_PER_BEAT * bpm),
        })
    }

    /// Beats per minute.
    #[must_use]
    pub const fn bpm(&self) -> f64 {
        self.bpm
    }

    /// Milliseconds between two quarter-beat steps.
    #[must_use]
    pub const fn ms_per_step(&self) -> f64 {
        self.ms_per_step
    }

    /// Snaps `ms` to the nearest step, still in milliseconds.
    #[must_use]
    pub fn round_to_beat(&self, ms: i64) -> i64 {
        ((ms as f64 / self.ms_per_step).round_ties_even() * self.ms_per_step).round_ties_even()
            as i64
    }

    /// Snaps `ms` to the nearest step and expresses it in beats, rounded to two decimals.
    #[must_use]
    pub fn convert_to_beat(&self, ms: i64) -> f64 {
        let steps = (ms as f64 / self.ms_per_step).round_ties_even();
        (steps / STEPS_PER_BEAT * 100.0).round_ties_even() / 100.0
    }
}

impl Default for Tempo {
    fn default() -> Self {
        Self {
            bpm: 120.0,
            ms_per_step: 125.0,
        }
    }
}
