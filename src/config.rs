//! Configuration parameters for stem analysis
//!
//! All numeric thresholds in this module are calibration constants, tuned
//! empirically against separated stems rather than derived from first
//! principles. They are exposed as overridable fields so callers can
//! re-calibrate without touching the algorithms.

/// Average dominant-pitch count at or below which an interval is classified
/// as single-note playing (default: 2.0)
///
/// The comparison is inclusive: `avg_count <= SINGLE_NOTE_MAX_AVG_PITCHES`
/// means single-note, anything above means chordal. Empirically tuned.
pub const SINGLE_NOTE_MAX_AVG_PITCHES: f32 = 2.0;

/// Silence detection configuration
///
/// There is deliberately no `Default` impl: the silence threshold is the one
/// parameter with no agreed-upon default (call sites in practice disagree
/// between -30 dB and 0 dB for separated vocal stems), so it is a required
/// constructor argument.
#[derive(Debug, Clone)]
pub struct SilenceConfig {
    /// Silence threshold in dB. Frames with energy strictly below this
    /// threshold are considered silent
    pub threshold_db: f32,

    /// Minimum silence duration in seconds (default: 5.0)
    /// Shorter silent runs are dropped, not reported
    pub min_silence_duration_s: f32,

    /// Frame length in samples for energy analysis (default: 2048)
    pub frame_length: usize,

    /// Hop length in samples between frames (default: 512)
    pub hop_length: usize,
}

impl SilenceConfig {
    /// Create a silence configuration with the given threshold and the
    /// standard frame geometry (2048/512) and 5 s minimum duration
    pub fn new(threshold_db: f32) -> Self {
        Self {
            threshold_db,
            min_silence_duration_s: 5.0,
            frame_length: 2048,
            hop_length: 512,
        }
    }

    /// Override the minimum silence duration in seconds
    pub fn with_min_duration(mut self, seconds: f32) -> Self {
        self.min_silence_duration_s = seconds;
        self
    }

    /// Override the analysis frame geometry
    pub fn with_frame_geometry(mut self, frame_length: usize, hop_length: usize) -> Self {
        self.frame_length = frame_length;
        self.hop_length = hop_length;
        self
    }
}

/// Playing-style classification configuration
#[derive(Debug, Clone)]
pub struct StyleConfig {
    /// Sub-frame duration in seconds (default: 0.1)
    /// Each input interval is partitioned into non-overlapping sub-frames of
    /// this length before pitch analysis
    pub sub_frame_duration_s: f32,

    /// Minimum pitch salience for a candidate to count as strong (default: 0.6)
    /// Salience is relative to the strongest spectral peak in the same time
    /// slice, so it lies in (0.0, 1.0]
    pub pitch_salience_threshold: f32,

    /// Frequency band in Hz considered for dominant pitches (default: 80-1500,
    /// roughly the fundamental range of a guitar)
    pub frequency_band_hz: (f32, f32),

    /// Classification threshold on the average dominant-pitch count per
    /// sub-frame (default: [`SINGLE_NOTE_MAX_AVG_PITCHES`])
    pub single_note_max_avg_pitches: f32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            sub_frame_duration_s: 0.1,
            pitch_salience_threshold: 0.6,
            frequency_band_hz: (80.0, 1500.0),
            single_note_max_avg_pitches: SINGLE_NOTE_MAX_AVG_PITCHES,
        }
    }
}
