//! Silence interval detection
//!
//! Consumes the per-frame energy sequence and groups contiguous silent frames
//! into intervals, keeping only runs that reach a minimum duration. Intended
//! for separated vocal stems, where a long silent run marks an instrumental
//! break.
//!
//! The grouping is a single forward pass implemented as an explicit two-state
//! machine (`Voiced` / `SilenceOpen`), driven by the silent/non-silent
//! predicate per frame. The states are public to keep the transition logic
//! independently testable.
//!
//! # Example
//!
//! ```no_run
//! use solo_dsp::config::SilenceConfig;
//! use solo_dsp::features::silence::detect_silence;
//!
//! let samples = vec![0.0f32; 22050 * 20];
//! let intervals = detect_silence(&samples, 22050, &SilenceConfig::new(-30.0))?;
//! for iv in &intervals {
//!     println!("silence: {:.2}s - {:.2}s", iv.start_seconds, iv.end_seconds);
//! }
//! # Ok::<(), solo_dsp::AnalysisError>(())
//! ```

use crate::analysis::result::SilenceInterval;
use crate::config::SilenceConfig;
use crate::error::AnalysisError;
use crate::features::energy::{energy_samples, EnergySample};

/// Detector state while scanning the energy sequence
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DetectorState {
    /// Currently inside voiced (non-silent) audio
    Voiced,
    /// Inside a run of silent frames
    SilenceOpen {
        /// Start time of the run in seconds
        start_seconds: f32,
        /// Silent time accumulated so far, in seconds (one hop per frame)
        accumulated_s: f32,
    },
}

impl DetectorState {
    /// Advance the state machine by one frame
    ///
    /// Returns the new state and, when a qualifying silent run was closed by a
    /// loud frame, the emitted interval. A loud frame always resets
    /// accumulation: two silent runs separated by a single loud frame are
    /// never merged.
    pub fn step(
        self,
        frame: &EnergySample,
        threshold_db: f32,
        min_duration_s: f32,
        hop_duration_s: f32,
    ) -> (DetectorState, Option<SilenceInterval>) {
        // Strict comparison: a frame exactly at the threshold is not silent
        let is_silent = frame.energy_db < threshold_db;

        match (self, is_silent) {
            (DetectorState::Voiced, false) => (DetectorState::Voiced, None),
            (DetectorState::Voiced, true) => (
                DetectorState::SilenceOpen {
                    start_seconds: frame.time_seconds,
                    accumulated_s: hop_duration_s,
                },
                None,
            ),
            (
                DetectorState::SilenceOpen {
                    start_seconds,
                    accumulated_s,
                },
                true,
            ) => (
                DetectorState::SilenceOpen {
                    start_seconds,
                    accumulated_s: accumulated_s + hop_duration_s,
                },
                None,
            ),
            (
                DetectorState::SilenceOpen {
                    start_seconds,
                    accumulated_s,
                },
                false,
            ) => {
                let interval = if accumulated_s >= min_duration_s {
                    Some(SilenceInterval {
                        start_seconds,
                        end_seconds: frame.time_seconds,
                    })
                } else {
                    // Run too short: dropped silently, not reported
                    None
                };
                (DetectorState::Voiced, interval)
            }
        }
    }

    /// Close the state machine at end of stream
    ///
    /// An open run that reached the minimum duration is closed against the
    /// waveform's total duration.
    pub fn finish(self, total_duration_s: f32, min_duration_s: f32) -> Option<SilenceInterval> {
        match self {
            DetectorState::Voiced => None,
            DetectorState::SilenceOpen {
                start_seconds,
                accumulated_s,
            } => {
                if accumulated_s >= min_duration_s {
                    Some(SilenceInterval {
                        start_seconds,
                        end_seconds: total_duration_s,
                    })
                } else {
                    None
                }
            }
        }
    }
}

/// Group silent frames from an energy sequence into intervals
///
/// # Arguments
///
/// * `frames` - Per-frame energy samples in ascending time order
/// * `threshold_db` - Frames with `energy_db` strictly below this are silent
/// * `min_duration_s` - Minimum silent-run duration to report
/// * `hop_duration_s` - Time step between frames in seconds
/// * `total_duration_s` - Waveform duration, used to close a trailing run
///
/// # Returns
///
/// Ordered, disjoint intervals; every interval's duration is at least
/// `min_duration_s`
pub fn group_silent_frames(
    frames: impl IntoIterator<Item = EnergySample>,
    threshold_db: f32,
    min_duration_s: f32,
    hop_duration_s: f32,
    total_duration_s: f32,
) -> Vec<SilenceInterval> {
    let mut intervals = Vec::new();
    let mut state = DetectorState::Voiced;

    for frame in frames {
        let (next, emitted) = state.step(&frame, threshold_db, min_duration_s, hop_duration_s);
        if let Some(interval) = emitted {
            log::debug!(
                "Detected silence from {:.2}s to {:.2}s",
                interval.start_seconds,
                interval.end_seconds
            );
            intervals.push(interval);
        }
        state = next;
    }

    if let Some(interval) = state.finish(total_duration_s, min_duration_s) {
        log::debug!(
            "Detected trailing silence from {:.2}s to {:.2}s",
            interval.start_seconds,
            interval.end_seconds
        );
        intervals.push(interval);
    }

    intervals
}

/// Detect sustained silent intervals in a waveform
///
/// Computes per-frame energies with the configured frame geometry, then runs
/// the grouping pass above.
///
/// # Arguments
///
/// * `samples` - Audio samples (mono, normalized to [-1.0, 1.0])
/// * `sample_rate` - Sample rate in Hz
/// * `config` - Silence detection parameters
///
/// # Returns
///
/// Ordered, disjoint [`SilenceInterval`] list
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` for an empty waveform or invalid
/// frame geometry
pub fn detect_silence(
    samples: &[f32],
    sample_rate: u32,
    config: &SilenceConfig,
) -> Result<Vec<SilenceInterval>, AnalysisError> {
    let frames = energy_samples(samples, sample_rate, config.frame_length, config.hop_length)?;
    let hop_duration_s = frames.hop_duration_s();
    let total_duration_s = frames.total_duration_s();

    log::debug!(
        "Detecting silence: threshold={:.1} dB, min duration={:.1}s over {} frames",
        config.threshold_db,
        config.min_silence_duration_s,
        frames.num_frames()
    );

    let intervals = group_silent_frames(
        frames,
        config.threshold_db,
        config.min_silence_duration_s,
        hop_duration_s,
        total_duration_s,
    );

    log::debug!("Silence detection found {} intervals", intervals.len());

    Ok(intervals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    const SR: u32 = 22050;

    /// Silence followed by a loud sine tone
    fn silence_then_tone(silence_s: f32, tone_s: f32) -> Vec<f32> {
        let silent = vec![0.0f32; (silence_s * SR as f32) as usize];
        let tone: Vec<f32> = (0..(tone_s * SR as f32) as usize)
            .map(|i| (2.0 * PI * 440.0 * i as f32 / SR as f32).sin() * 0.8)
            .collect();
        let mut samples = silent;
        samples.extend(tone);
        samples
    }

    #[test]
    fn test_silence_then_signal_scenario() {
        // 10s of silence below -30 dB followed by 3s of signal above it
        let samples = silence_then_tone(10.0, 3.0);
        let config = SilenceConfig::new(-30.0);

        let intervals = detect_silence(&samples, SR, &config).unwrap();

        assert_eq!(intervals.len(), 1, "expected exactly one interval");
        assert!(intervals[0].start_seconds.abs() < 1e-6);
        assert!(
            (intervals[0].end_seconds - 10.0).abs() < 0.2,
            "end should be near 10.0s, got {:.3}",
            intervals[0].end_seconds
        );
    }

    #[test]
    fn test_entirely_silent_waveform() {
        let samples = vec![0.0f32; SR as usize * 8];
        let intervals = detect_silence(&samples, SR, &SilenceConfig::new(-30.0)).unwrap();

        // One interval spanning the whole waveform
        assert_eq!(intervals.len(), 1);
        assert!(intervals[0].start_seconds.abs() < 1e-6);
        assert!((intervals[0].end_seconds - 8.0).abs() < 1e-3);
    }

    #[test]
    fn test_entirely_silent_but_too_short() {
        let samples = vec![0.0f32; SR as usize * 3];
        let intervals = detect_silence(&samples, SR, &SilenceConfig::new(-30.0)).unwrap();
        assert!(intervals.is_empty());
    }

    #[test]
    fn test_neg_infinity_threshold_finds_nothing() {
        let samples = vec![0.0f32; SR as usize * 10];
        let intervals =
            detect_silence(&samples, SR, &SilenceConfig::new(f32::NEG_INFINITY)).unwrap();
        assert!(intervals.is_empty(), "no frame can be below -inf dB");
    }

    #[test]
    fn test_min_duration_guarantee() {
        // Alternating 6s silence / 1s tone / 6s silence
        let mut samples = silence_then_tone(6.0, 1.0);
        samples.extend(vec![0.0f32; SR as usize * 6]);

        let config = SilenceConfig::new(-30.0);
        let intervals = detect_silence(&samples, SR, &config).unwrap();

        assert_eq!(intervals.len(), 2);
        for iv in &intervals {
            assert!(iv.end_seconds - iv.start_seconds >= config.min_silence_duration_s - 0.2);
        }
        // Disjoint and separated by the loud second
        assert!(intervals[0].end_seconds < intervals[1].start_seconds);
    }

    #[test]
    fn test_loud_frame_resets_accumulation() {
        // 3s silence, 1s tone, 3s silence: neither run alone reaches 5s even
        // though the total silent time does
        let mut samples = silence_then_tone(3.0, 1.0);
        samples.extend(vec![0.0f32; SR as usize * 3]);

        let intervals = detect_silence(&samples, SR, &SilenceConfig::new(-30.0)).unwrap();
        assert!(intervals.is_empty(), "runs must not merge across a loud frame");
    }

    #[test]
    fn test_idempotence() {
        let samples = silence_then_tone(7.0, 2.0);
        let config = SilenceConfig::new(-30.0);

        let first = detect_silence(&samples, SR, &config).unwrap();
        let second = detect_silence(&samples, SR, &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_threshold_is_strict() {
        let frame = EnergySample {
            frame_index: 0,
            time_seconds: 0.0,
            energy_db: -30.0,
        };

        // Exactly at threshold: not silent, state stays voiced
        let (state, emitted) = DetectorState::Voiced.step(&frame, -30.0, 5.0, 0.023);
        assert_eq!(state, DetectorState::Voiced);
        assert!(emitted.is_none());
    }

    #[test]
    fn test_state_machine_short_run_dropped() {
        let hop = 0.5;
        let silent = EnergySample {
            frame_index: 0,
            time_seconds: 0.0,
            energy_db: -60.0,
        };
        let loud = EnergySample {
            frame_index: 1,
            time_seconds: 0.5,
            energy_db: 0.0,
        };

        let (state, _) = DetectorState::Voiced.step(&silent, -30.0, 5.0, hop);
        let (state, emitted) = state.step(&loud, -30.0, 5.0, hop);

        assert_eq!(state, DetectorState::Voiced);
        assert!(emitted.is_none(), "a single short silent frame is dropped");
    }
}
