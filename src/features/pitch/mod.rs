//! Multi-pitch tracking and dominant-pitch selection
//!
//! The dominant-pitch analyzer is polymorphic over the underlying
//! pitch-tracking transform through the [`PitchTracker`] trait: any transform
//! that produces (frequency, salience) candidates per internal time slice can
//! drive it. The default transform is the spectral-peak tracker in
//! [`piptrack`].

pub mod dominant;
pub mod piptrack;

use crate::error::AnalysisError;

/// A candidate pitch in one time slice
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchCandidate {
    /// Candidate fundamental frequency in Hz
    pub frequency_hz: f32,

    /// Estimated confidence/strength in (0.0, 1.0], relative to the
    /// strongest candidate in the same time slice
    pub salience: f32,
}

/// The single strongest qualifying pitch of one time slice
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DominantPitch {
    /// Fundamental frequency in Hz
    pub frequency_hz: f32,

    /// Salience of the winning candidate
    pub salience: f32,
}

/// A time/frequency pitch-tracking transform
///
/// Implementations slice the input into internal time slices and report
/// pitch candidates with saliences per slice. Slices with no candidates
/// report an empty list.
pub trait PitchTracker {
    /// Track pitch candidates over an audio frame
    ///
    /// Returns one candidate list per internal time slice, in time order.
    fn track(
        &self,
        samples: &[f32],
        sample_rate: u32,
    ) -> Result<Vec<Vec<PitchCandidate>>, AnalysisError>;
}
