//! Guitar playing-style classification
//!
//! Sub-divides each input interval into fixed-duration frames, counts the
//! dominant pitches the analyzer finds per sub-frame, and labels the interval
//! single-note or chordal from the average count. Few simultaneous dominant
//! pitches means melodic single-note playing; many means chords.
//!
//! Intervals are independent units of work: they are classified in parallel,
//! failures are reported per interval, and the output list is reconstructed
//! in input order.
//!
//! # Example
//!
//! ```no_run
//! use solo_dsp::analysis::style::classify_intervals;
//! use solo_dsp::config::StyleConfig;
//!
//! let samples = vec![0.0f32; 22050 * 30];
//! let intervals = [(1.0, 13.0), (20.68, 30.65)];
//! let outcomes = classify_intervals(&samples, 22050, &intervals, &StyleConfig::default())?;
//! for outcome in outcomes {
//!     match outcome {
//!         Ok(style) => println!("{:.2}-{:.2}s: {}", style.start_seconds, style.end_seconds, style.label),
//!         Err(e) => eprintln!("interval failed: {}", e),
//!     }
//! }
//! # Ok::<(), solo_dsp::AnalysisError>(())
//! ```

use crate::analysis::result::{StyleInterval, StyleLabel};
use crate::config::StyleConfig;
use crate::error::AnalysisError;
use crate::features::pitch::dominant::dominant_pitches;
use crate::features::pitch::piptrack::SpectralPeakTracker;
use crate::features::pitch::PitchTracker;
use rayon::prelude::*;

/// STFT size for the harmonic-percussive pre-separation inside each sub-frame
const HPSS_N_FFT: usize = 2048;

/// STFT hop for the harmonic-percussive pre-separation
const HPSS_HOP: usize = 512;

/// Classify one interval of the waveform
///
/// # Arguments
///
/// * `samples` - Full waveform (mono)
/// * `sample_rate` - Sample rate in Hz
/// * `interval` - (start, end) in seconds; must satisfy start < end and lie
///   inside the waveform
/// * `tracker` - Pitch-tracking transform used per sub-frame
/// * `config` - Classification parameters
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInterval` for a malformed or out-of-bounds
/// interval; the interval is never clamped or skipped silently. Pitch
/// analysis failures propagate.
pub fn classify_interval<T: PitchTracker>(
    samples: &[f32],
    sample_rate: u32,
    interval: (f32, f32),
    tracker: &T,
    config: &StyleConfig,
) -> Result<StyleInterval, AnalysisError> {
    let (start_s, end_s) = interval;

    if !start_s.is_finite() || !end_s.is_finite() || start_s < 0.0 || start_s >= end_s {
        return Err(AnalysisError::InvalidInterval(format!(
            "Malformed interval: {:.3}s - {:.3}s",
            start_s, end_s
        )));
    }

    let start_sample = (start_s * sample_rate as f32) as usize;
    let end_sample = (end_s * sample_rate as f32) as usize;

    if end_sample > samples.len() {
        return Err(AnalysisError::InvalidInterval(format!(
            "Interval {:.3}s - {:.3}s exceeds waveform duration {:.3}s",
            start_s,
            end_s,
            samples.len() as f32 / sample_rate as f32
        )));
    }

    let section = &samples[start_sample..end_sample];
    let sub_frame_len = (config.sub_frame_duration_s * sample_rate as f32) as usize;

    if sub_frame_len == 0 {
        return Err(AnalysisError::InvalidInput(format!(
            "Sub-frame duration {:.4}s is below one sample at {} Hz",
            config.sub_frame_duration_s, sample_rate
        )));
    }

    log::debug!(
        "Classifying interval {:.2}s - {:.2}s ({} samples, sub-frame {} samples)",
        start_s,
        end_s,
        section.len(),
        sub_frame_len
    );

    // Non-overlapping sub-frames; the final one takes whatever remains, and
    // even a section shorter than one sub-frame yields a single sub-frame
    let num_sub_frames = section.len().div_ceil(sub_frame_len).max(1);
    let mut total_dominant_pitches = 0usize;

    for i in 0..num_sub_frames {
        let frame_start = i * sub_frame_len;
        let frame_end = ((i + 1) * sub_frame_len).min(section.len());
        let frame = &section[frame_start..frame_end];

        let dominants = dominant_pitches(
            frame,
            sample_rate,
            tracker,
            HPSS_N_FFT,
            HPSS_HOP,
            config.pitch_salience_threshold,
            config.frequency_band_hz,
        )?;
        total_dominant_pitches += dominants.len();
    }

    let avg_count = total_dominant_pitches as f32 / num_sub_frames as f32;

    // Inclusive on the single-note side: exactly at the threshold is still
    // single-note playing
    let label = if avg_count <= config.single_note_max_avg_pitches {
        StyleLabel::SingleNote
    } else {
        StyleLabel::Chordal
    };

    log::debug!(
        "Interval {:.2}s - {:.2}s: avg dominant pitch count {:.2} -> {}",
        start_s,
        end_s,
        avg_count,
        label
    );

    Ok(StyleInterval {
        start_seconds: start_s,
        end_seconds: end_s,
        label,
        avg_dominant_pitch_count: avg_count,
    })
}

/// Classify a list of intervals, in parallel, with per-interval outcomes
///
/// Intervals are independent and are processed on the rayon thread pool; the
/// returned list matches the input order. A malformed interval yields an
/// `Err` in its slot without discarding the other intervals' results.
///
/// # Errors
///
/// The outer `Err` is reserved for invalid waveform input (empty samples,
/// zero sample rate); everything interval-specific is reported per slot.
pub fn classify_intervals(
    samples: &[f32],
    sample_rate: u32,
    intervals: &[(f32, f32)],
    config: &StyleConfig,
) -> Result<Vec<Result<StyleInterval, AnalysisError>>, AnalysisError> {
    if samples.is_empty() {
        return Err(AnalysisError::InvalidInput(
            "Empty audio samples".to_string(),
        ));
    }

    if sample_rate == 0 {
        return Err(AnalysisError::InvalidInput(
            "Invalid sample rate: 0".to_string(),
        ));
    }

    log::debug!(
        "Classifying {} intervals: {} samples at {} Hz",
        intervals.len(),
        samples.len(),
        sample_rate
    );

    let tracker = SpectralPeakTracker::new();

    let outcomes: Vec<Result<StyleInterval, AnalysisError>> = intervals
        .par_iter()
        .map(|&interval| classify_interval(samples, sample_rate, interval, &tracker, config))
        .collect();

    Ok(outcomes)
}
