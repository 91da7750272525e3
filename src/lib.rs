//! # solo-dsp
//!
//! An audio analysis engine for separated stems, built around two tasks:
//!
//! - **Silence detection**: locate sustained silent intervals in a vocal
//!   stem. Long vocal silences mark instrumental breaks, the candidate
//!   sections for an instrumental solo.
//! - **Playing-style classification**: within given time intervals of a
//!   guitar stem, decide whether the playing is single-note (melodic) or
//!   chordal, from the average dominant-pitch count per sub-frame.
//!
//! Both tasks are pure transformations over in-memory sample buffers. Audio
//! decoding lives in [`io`]; persistence of the results is the caller's
//! concern (see [`analysis::result::SoloRecord`]).
//!
//! ## Quick Start
//!
//! ```no_run
//! use solo_dsp::{classify_guitar_style, detect_silent_sections, SilenceConfig, StyleConfig};
//!
//! // Load stems (mono, f32, normalized) through solo_dsp::io or elsewhere
//! let vocals: Vec<f32> = vec![];
//! let guitar: Vec<f32> = vec![];
//! let sample_rate = 22050;
//!
//! let breaks = detect_silent_sections(&vocals, sample_rate, &SilenceConfig::new(-30.0))?;
//!
//! let intervals: Vec<(f32, f32)> = breaks
//!     .iter()
//!     .map(|iv| (iv.start_seconds, iv.end_seconds))
//!     .collect();
//! let styles = classify_guitar_style(&guitar, sample_rate, &intervals, &StyleConfig::default())?;
//!
//! for style in &styles {
//!     println!("{:.2}s - {:.2}s: {}", style.start_seconds, style.end_seconds, style.label);
//! }
//! # Ok::<(), solo_dsp::AnalysisError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! vocal stem  → frame energy → silence grouping            → SilenceInterval list
//! guitar stem → per-interval sub-frames → HPSS → pitch tracking → StyleInterval list
//! ```
//!
//! The calibration constants (silence threshold, salience threshold, the
//! single-note count threshold of 2) are empirically tuned, not derived; see
//! [`config`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod features;
pub mod io;
pub mod preprocessing;

// Re-export main types
pub use analysis::result::{SilenceInterval, SoloRecord, StyleInterval, StyleLabel};
pub use config::{SilenceConfig, StyleConfig};
pub use error::AnalysisError;

/// Detect sustained silent intervals in a vocal stem
///
/// Computes per-frame energies and groups contiguous silent frames into
/// intervals of at least the configured minimum duration.
///
/// # Arguments
///
/// * `samples` - Mono audio samples, normalized to [-1.0, 1.0]
/// * `sample_rate` - Sample rate in Hz
/// * `config` - Silence detection parameters (threshold is required; the
///   common choices are -30.0 dB and 0.0 dB depending on how the stem was
///   normalized)
///
/// # Returns
///
/// Ordered, disjoint [`SilenceInterval`] list
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` for an empty waveform, a zero
/// sample rate, or zero frame geometry
pub fn detect_silent_sections(
    samples: &[f32],
    sample_rate: u32,
    config: &SilenceConfig,
) -> Result<Vec<SilenceInterval>, AnalysisError> {
    use std::time::Instant;
    let start_time = Instant::now();

    log::debug!(
        "Starting silence detection: {} samples at {} Hz",
        samples.len(),
        sample_rate
    );

    let intervals = features::silence::detect_silence(samples, sample_rate, config)?;

    log::debug!(
        "Silence detection complete: {} intervals in {:.2} ms",
        intervals.len(),
        start_time.elapsed().as_secs_f32() * 1000.0
    );

    Ok(intervals)
}

/// Classify the guitar playing style of the given intervals
///
/// All-or-nothing wrapper around
/// [`analysis::style::classify_intervals`]: classifies every interval and
/// fails on the first per-interval error. Callers that need partial results
/// in the presence of malformed intervals should use `classify_intervals`
/// directly, which reports outcomes per slot.
///
/// # Arguments
///
/// * `samples` - Mono guitar-stem samples, normalized to [-1.0, 1.0]
/// * `sample_rate` - Sample rate in Hz
/// * `intervals` - (start, end) interval list in seconds
/// * `config` - Classification parameters
///
/// # Returns
///
/// One [`StyleInterval`] per input interval, in input order
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` for an invalid waveform and
/// `AnalysisError::InvalidInterval` for a malformed or out-of-bounds
/// interval
pub fn classify_guitar_style(
    samples: &[f32],
    sample_rate: u32,
    intervals: &[(f32, f32)],
    config: &StyleConfig,
) -> Result<Vec<StyleInterval>, AnalysisError> {
    use std::time::Instant;
    let start_time = Instant::now();

    let outcomes = analysis::style::classify_intervals(samples, sample_rate, intervals, config)?;
    let styles = outcomes.into_iter().collect::<Result<Vec<_>, _>>()?;

    log::debug!(
        "Style classification complete: {} intervals in {:.2} ms",
        styles.len(),
        start_time.elapsed().as_secs_f32() * 1000.0
    );

    Ok(styles)
}
