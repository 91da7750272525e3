//! Dominant pitch analysis
//!
//! For one short audio frame: separate the harmonic content, run the pitch
//! tracker on it, and keep at most one pitch per internal time slice: the
//! strongest candidate that clears the salience threshold inside the target
//! frequency band. Slices with no qualifying candidate contribute nothing,
//! so the output length is at most the tracker's slice count.

use super::{DominantPitch, PitchTracker};
use crate::error::AnalysisError;
use crate::features::hpss::harmonic_component;

/// Extract the per-slice dominant pitches of a frame
///
/// # Arguments
///
/// * `frame` - Audio frame (mono)
/// * `sample_rate` - Sample rate in Hz
/// * `tracker` - Pitch-tracking transform
/// * `n_fft` - FFT size for the harmonic-percussive pre-separation
/// * `hop` - Hop size for the harmonic-percussive pre-separation
/// * `salience_threshold` - Candidates must have salience strictly above this
/// * `frequency_band_hz` - (low, high) band in Hz; candidates outside are
///   ignored
///
/// # Returns
///
/// Dominant pitches in slice order; an empty frame yields an empty list
///
/// # Errors
///
/// Propagates failures from the separation or tracking transforms. Per-frame
/// failures are fatal for the frame rather than silently zero-filled, since a
/// substituted zero count would corrupt downstream averaging.
pub fn dominant_pitches<T: PitchTracker>(
    frame: &[f32],
    sample_rate: u32,
    tracker: &T,
    n_fft: usize,
    hop: usize,
    salience_threshold: f32,
    frequency_band_hz: (f32, f32),
) -> Result<Vec<DominantPitch>, AnalysisError> {
    if frame.is_empty() {
        return Ok(Vec::new());
    }

    let (low, high) = frequency_band_hz;
    if low < 0.0 || high <= low {
        return Err(AnalysisError::InvalidInput(format!(
            "Invalid frequency band: [{:.1}, {:.1}] Hz",
            low, high
        )));
    }

    let harmonic = harmonic_component(frame, n_fft, hop)?;
    let slices = tracker.track(&harmonic, sample_rate)?;

    let mut dominants = Vec::new();
    for candidates in &slices {
        let strongest = candidates
            .iter()
            .filter(|c| {
                c.salience > salience_threshold
                    && c.frequency_hz >= low
                    && c.frequency_hz <= high
            })
            .max_by(|a, b| {
                a.salience
                    .partial_cmp(&b.salience)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

        if let Some(c) = strongest {
            dominants.push(DominantPitch {
                frequency_hz: c.frequency_hz,
                salience: c.salience,
            });
        }
    }

    log::debug!(
        "Dominant pitch analysis: {} slices, {} dominant pitches",
        slices.len(),
        dominants.len()
    );

    Ok(dominants)
}
