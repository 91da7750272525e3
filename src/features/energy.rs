//! Frame energy extraction
//!
//! Slides a window over a waveform and computes per-frame signal energy in
//! decibels. Frames start at every hop-aligned offset across the whole
//! waveform; the window is clipped to the waveform bounds, so trailing frames
//! are shorter than `frame_length`.
//!
//! # Example
//!
//! ```no_run
//! use solo_dsp::features::energy::energy_samples;
//!
//! let samples = vec![0.0f32; 22050];
//! let frames = energy_samples(&samples, 22050, 2048, 512)?;
//! for frame in frames {
//!     println!("{:.2}s: {:.1} dB", frame.time_seconds, frame.energy_db);
//! }
//! # Ok::<(), solo_dsp::AnalysisError>(())
//! ```

use crate::error::AnalysisError;

/// Epsilon added to frame energy before the logarithm, to avoid log10(0)
const ENERGY_EPSILON: f32 = 1e-6;

/// Per-frame energy measurement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergySample {
    /// Frame index (0-based)
    pub frame_index: usize,

    /// Frame start time in seconds: `frame_index * hop_length / sample_rate`
    pub time_seconds: f32,

    /// Frame energy in dB: `10 * log10(sum(x^2) + epsilon)`
    pub energy_db: f32,
}

/// Lazy iterator over per-frame energy samples
///
/// Finite, restartable (via `Clone`) and strictly ascending in time.
#[derive(Debug, Clone)]
pub struct EnergySamples<'a> {
    samples: &'a [f32],
    sample_rate: u32,
    frame_length: usize,
    hop_length: usize,
    next_frame: usize,
}

impl<'a> EnergySamples<'a> {
    /// Total number of frames this iterator will yield
    ///
    /// One frame per hop offset in `[0, len)`, so `ceil(len / hop_length)`.
    pub fn num_frames(&self) -> usize {
        self.samples.len().div_ceil(self.hop_length)
    }

    /// Total waveform duration in seconds
    pub fn total_duration_s(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate as f32
    }

    /// Hop duration in seconds (the time step between consecutive frames)
    pub fn hop_duration_s(&self) -> f32 {
        self.hop_length as f32 / self.sample_rate as f32
    }
}

impl<'a> Iterator for EnergySamples<'a> {
    type Item = EnergySample;

    fn next(&mut self) -> Option<EnergySample> {
        let start = self.next_frame * self.hop_length;
        if start >= self.samples.len() {
            return None;
        }

        let end = (start + self.frame_length).min(self.samples.len());
        let energy: f32 = self.samples[start..end].iter().map(|&x| x * x).sum();
        let energy_db = 10.0 * (energy + ENERGY_EPSILON).log10();

        let frame_index = self.next_frame;
        self.next_frame += 1;

        Some(EnergySample {
            frame_index,
            time_seconds: frame_index as f32 * self.hop_length as f32 / self.sample_rate as f32,
            energy_db,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.num_frames().saturating_sub(self.next_frame);
        (remaining, Some(remaining))
    }
}

impl<'a> ExactSizeIterator for EnergySamples<'a> {}

/// Create a per-frame energy iterator over a waveform
///
/// # Arguments
///
/// * `samples` - Audio samples (mono, normalized to [-1.0, 1.0])
/// * `sample_rate` - Sample rate in Hz
/// * `frame_length` - Analysis window length in samples (typically 2048)
/// * `hop_length` - Stride between frame starts in samples (typically 512)
///
/// # Returns
///
/// An [`EnergySamples`] iterator yielding one [`EnergySample`] per hop offset,
/// in ascending time order
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` if the waveform is empty, the sample
/// rate is zero, or either frame geometry parameter is zero
pub fn energy_samples(
    samples: &[f32],
    sample_rate: u32,
    frame_length: usize,
    hop_length: usize,
) -> Result<EnergySamples<'_>, AnalysisError> {
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

    if frame_length == 0 {
        return Err(AnalysisError::InvalidInput(
            "Frame length must be > 0".to_string(),
        ));
    }

    if hop_length == 0 {
        return Err(AnalysisError::InvalidInput(
            "Hop length must be > 0".to_string(),
        ));
    }

    log::debug!(
        "Computing frame energies: {} samples at {} Hz, frame={}, hop={}",
        samples.len(),
        sample_rate,
        frame_length,
        hop_length
    );

    Ok(EnergySamples {
        samples,
        sample_rate,
        frame_length,
        hop_length,
        next_frame: 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_energy_frame_count() {
        let samples = vec![0.5f32; 22050];
        let frames = energy_samples(&samples, 22050, 2048, 512).unwrap();

        // One frame per hop offset across the whole waveform
        assert_eq!(frames.num_frames(), 22050usize.div_ceil(512));
        assert_eq!(frames.count(), 22050usize.div_ceil(512));
    }

    #[test]
    fn test_energy_times_ascending() {
        let samples = vec![0.1f32; 8192];
        let frames: Vec<_> = energy_samples(&samples, 22050, 2048, 512).unwrap().collect();

        for pair in frames.windows(2) {
            assert!(pair[1].time_seconds > pair[0].time_seconds);
            assert_eq!(pair[1].frame_index, pair[0].frame_index + 1);
        }

        assert_eq!(frames[0].time_seconds, 0.0);
        assert!((frames[1].time_seconds - 512.0 / 22050.0).abs() < 1e-6);
    }

    #[test]
    fn test_energy_silence_is_floor_db() {
        let samples = vec![0.0f32; 4096];
        let frames: Vec<_> = energy_samples(&samples, 22050, 2048, 512).unwrap().collect();

        // Energy of all-zero frames is exactly 10*log10(epsilon) = -60 dB
        for frame in &frames {
            assert!((frame.energy_db - (-60.0)).abs() < 1e-3);
        }
    }

    #[test]
    fn test_energy_loud_above_silence() {
        let mut samples = vec![0.0f32; 4096];
        for x in samples.iter_mut().take(2048) {
            *x = 0.5;
        }
        let frames: Vec<_> = energy_samples(&samples, 22050, 2048, 512).unwrap().collect();

        // First frame covers the loud half, last frames only zeros
        assert!(frames[0].energy_db > frames.last().unwrap().energy_db);
        // 2048 * 0.25 = 512 -> 10*log10(512) ~= 27.1 dB
        assert!((frames[0].energy_db - 27.09).abs() < 0.1);
    }

    #[test]
    fn test_energy_restartable() {
        let samples = vec![0.3f32; 8192];
        let frames = energy_samples(&samples, 22050, 2048, 512).unwrap();

        let first: Vec<_> = frames.clone().collect();
        let second: Vec<_> = frames.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_energy_invalid_input() {
        assert!(energy_samples(&[], 22050, 2048, 512).is_err());
        assert!(energy_samples(&[0.0], 0, 2048, 512).is_err());
        assert!(energy_samples(&[0.0], 22050, 0, 512).is_err());
        assert!(energy_samples(&[0.0], 22050, 2048, 0).is_err());
    }
}
