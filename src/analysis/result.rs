//! Analysis result types
//!
//! Plain serializable values handed to external collaborators (persistence,
//! reporting). All of them are transient per-invocation results with no
//! identity beyond their value.

use serde::{Deserialize, Serialize};

/// A sustained silent interval in a vocal stem
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SilenceInterval {
    /// Interval start in seconds
    pub start_seconds: f32,

    /// Interval end in seconds (always >= start)
    pub end_seconds: f32,
}

impl SilenceInterval {
    /// Interval duration in seconds
    pub fn duration_s(&self) -> f32 {
        self.end_seconds - self.start_seconds
    }
}

/// Guitar playing style of an interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleLabel {
    /// Melodic single-note playing (few simultaneous dominant pitches)
    SingleNote,
    /// Chordal playing (several simultaneous dominant pitches)
    Chordal,
}

impl StyleLabel {
    /// Stable string form, matching the serialized representation
    pub fn as_str(&self) -> &'static str {
        match self {
            StyleLabel::SingleNote => "single_note",
            StyleLabel::Chordal => "chordal",
        }
    }
}

impl std::fmt::Display for StyleLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Playing-style classification of one input interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StyleInterval {
    /// Interval start in seconds (as supplied by the caller)
    pub start_seconds: f32,

    /// Interval end in seconds (as supplied by the caller)
    pub end_seconds: f32,

    /// Assigned playing style
    pub label: StyleLabel,

    /// Average dominant-pitch count per sub-frame, the score the label was
    /// derived from
    pub avg_dominant_pitch_count: f32,
}

/// Persistence-ready record for a detected solo section
///
/// Shaped for the external persistence collaborator: one row per interval,
/// keyed by an identifier this crate never interprets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoloRecord {
    /// External identifier of the source track
    pub song_id: i64,

    /// Section start in seconds
    pub start_seconds: f32,

    /// Section end in seconds
    pub end_seconds: f32,

    /// Whether a guitar solo was confirmed in this section
    pub is_guitar_solo: bool,

    /// Classification score, if the section was classified
    pub score: Option<f32>,
}

impl SoloRecord {
    /// Build an unclassified record from a detected silence interval
    pub fn from_silence(song_id: i64, interval: &SilenceInterval) -> Self {
        Self {
            song_id,
            start_seconds: interval.start_seconds,
            end_seconds: interval.end_seconds,
            is_guitar_solo: false,
            score: None,
        }
    }

    /// Build a classified record from a style interval
    ///
    /// Single-note playing is what marks a guitar solo here; the averaged
    /// dominant-pitch count is carried as the score.
    pub fn from_style(song_id: i64, interval: &StyleInterval) -> Self {
        Self {
            song_id,
            start_seconds: interval.start_seconds,
            end_seconds: interval.end_seconds,
            is_guitar_solo: interval.label == StyleLabel::SingleNote,
            score: Some(interval.avg_dominant_pitch_count),
        }
    }
}
