//! Spectral-peak pitch tracking
//!
//! The default [`PitchTracker`] implementation: a Hann-windowed STFT, local
//! maxima in each magnitude slice, and parabolic interpolation of the peak
//! position for sub-bin frequency resolution. Salience of a peak is its
//! interpolated magnitude normalized by the strongest bin of the same slice,
//! so the strongest peak of every slice has salience 1.0 and weaker peaks
//! fall off toward 0.

use super::{PitchCandidate, PitchTracker};
use crate::error::AnalysisError;
use crate::features::stft::stft;

/// STFT-based multi-pitch tracker
#[derive(Debug, Clone)]
pub struct SpectralPeakTracker {
    n_fft: usize,
    hop: usize,
    /// Peaks below this fraction of the slice maximum are discarded outright
    floor: f32,
}

impl SpectralPeakTracker {
    /// Create a tracker with the default geometry: FFT 4096, hop 4096
    ///
    /// Non-overlapping slices sized so that one 0.1 s sub-frame at common
    /// sample rates maps to a single internal time slice. Since the dominant
    /// analyzer keeps at most one pitch per slice, denser slicing directly
    /// inflates per-sub-frame pitch counts; override with [`with_hop`](Self::with_hop)
    /// when that is wanted.
    pub fn new() -> Self {
        Self {
            n_fft: 4096,
            hop: 4096,
            floor: 0.01,
        }
    }

    /// Override the FFT size
    pub fn with_fft_size(mut self, n_fft: usize) -> Self {
        self.n_fft = n_fft;
        self
    }

    /// Override the hop size
    pub fn with_hop(mut self, hop: usize) -> Self {
        self.hop = hop;
        self
    }

    /// FFT size used by the internal STFT
    pub fn n_fft(&self) -> usize {
        self.n_fft
    }

    /// Hop size used by the internal STFT
    pub fn hop(&self) -> usize {
        self.hop
    }

    /// Parabolic interpolation around a magnitude peak
    ///
    /// Returns (bin offset in [-0.5, 0.5], interpolated magnitude).
    fn interpolate_peak(mags: &[f32], k: usize) -> (f32, f32) {
        if k == 0 || k + 1 >= mags.len() {
            return (0.0, mags[k]);
        }

        let y0 = mags[k - 1];
        let y1 = mags[k];
        let y2 = mags[k + 1];

        let denom = y0 - 2.0 * y1 + y2;
        if denom.abs() < f32::EPSILON {
            return (0.0, y1);
        }

        let shift = (0.5 * (y0 - y2) / denom).clamp(-0.5, 0.5);
        let height = y1 - 0.25 * (y0 - y2) * shift;
        (shift, height)
    }
}

impl Default for SpectralPeakTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PitchTracker for SpectralPeakTracker {
    fn track(
        &self,
        samples: &[f32],
        sample_rate: u32,
    ) -> Result<Vec<Vec<PitchCandidate>>, AnalysisError> {
        if samples.is_empty() {
            return Ok(Vec::new());
        }

        if sample_rate == 0 {
            return Err(AnalysisError::InvalidInput(
                "Invalid sample rate: 0".to_string(),
            ));
        }

        let spec = stft(samples, self.n_fft, self.hop)?;
        let bin_hz = sample_rate as f32 / self.n_fft as f32;

        let mut slices = Vec::with_capacity(spec.num_slices());

        for col in &spec.columns {
            let mags: Vec<f32> = col.iter().map(|c| c.norm()).collect();
            let slice_max = mags.iter().copied().fold(0.0f32, f32::max);

            if slice_max <= f32::EPSILON {
                // Fully silent slice
                slices.push(Vec::new());
                continue;
            }

            let mut candidates = Vec::new();
            for k in 1..mags.len() - 1 {
                if mags[k] > mags[k - 1] && mags[k] >= mags[k + 1] && mags[k] > self.floor * slice_max
                {
                    let (shift, height) = Self::interpolate_peak(&mags, k);
                    candidates.push(PitchCandidate {
                        frequency_hz: (k as f32 + shift) * bin_hz,
                        salience: (height / slice_max).min(1.0),
                    });
                }
            }

            slices.push(candidates);
        }

        Ok(slices)
    }
}
