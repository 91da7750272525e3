//! Short-time Fourier transform utilities
//!
//! Shared by harmonic-percussive separation and spectral pitch tracking.
//! Hann-windowed frames, FFT via rustfft, and an overlap-add inverse for
//! resynthesis after spectral masking.

use crate::error::AnalysisError;
use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

/// Complex STFT: `columns[t][k]` is bin `k` of time slice `t`
#[derive(Debug, Clone)]
pub struct Stft {
    /// Complex spectrum per time slice (bins 0..=n_fft/2)
    pub columns: Vec<Vec<Complex<f32>>>,
    /// FFT size
    pub n_fft: usize,
    /// Hop between slices in samples
    pub hop: usize,
    /// Original signal length in samples, for inverse reconstruction
    pub signal_len: usize,
}

impl Stft {
    /// Number of time slices
    pub fn num_slices(&self) -> usize {
        self.columns.len()
    }

    /// Number of frequency bins per slice (`n_fft / 2 + 1`)
    pub fn num_bins(&self) -> usize {
        self.n_fft / 2 + 1
    }

    /// Center frequency of bin `k` in Hz
    pub fn bin_frequency(&self, k: usize, sample_rate: u32) -> f32 {
        k as f32 * sample_rate as f32 / self.n_fft as f32
    }

    /// Magnitude spectrogram: `out[t][k] = |columns[t][k]|`
    pub fn magnitudes(&self) -> Vec<Vec<f32>> {
        self.columns
            .iter()
            .map(|col| col.iter().map(|c| c.norm()).collect())
            .collect()
    }
}

fn hann_window(n: usize) -> Vec<f32> {
    (0..n)
        .map(|i| {
            let x = std::f32::consts::PI * i as f32 / n as f32;
            x.sin() * x.sin()
        })
        .collect()
}

/// Compute the STFT of a signal
///
/// Frames start at every hop offset while a full window fits; the tail that
/// does not fill a window is zero-padded so short signals still produce at
/// least one slice.
///
/// # Arguments
///
/// * `samples` - Input signal
/// * `n_fft` - FFT size (power of two, typically 2048)
/// * `hop` - Hop between slices in samples (typically `n_fft / 4`)
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` if `n_fft` or `hop` is zero
pub fn stft(samples: &[f32], n_fft: usize, hop: usize) -> Result<Stft, AnalysisError> {
    if n_fft == 0 {
        return Err(AnalysisError::InvalidInput("FFT size must be > 0".to_string()));
    }
    if hop == 0 {
        return Err(AnalysisError::InvalidInput("Hop size must be > 0".to_string()));
    }

    // One slice per hop offset that still touches the signal
    let num_slices = samples.len().div_ceil(hop);

    let window = hann_window(n_fft);
    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(n_fft);
    let num_bins = n_fft / 2 + 1;

    let mut columns = Vec::with_capacity(num_slices);
    let mut buffer = vec![Complex::new(0.0f32, 0.0); n_fft];

    for slice_idx in 0..num_slices {
        let start = slice_idx * hop;
        let end = (start + n_fft).min(samples.len());

        for (i, c) in buffer.iter_mut().enumerate() {
            let sample = if start + i < end { samples[start + i] } else { 0.0 };
            *c = Complex::new(sample * window[i], 0.0);
        }

        fft.process(&mut buffer);
        columns.push(buffer[..num_bins].to_vec());
    }

    Ok(Stft {
        columns,
        n_fft,
        hop,
        signal_len: samples.len(),
    })
}

/// Inverse STFT via overlap-add
///
/// Reconstructs a real signal of the original length from (possibly masked)
/// spectrum columns, dividing by the accumulated squared window to undo the
/// analysis windowing.
pub fn istft(spec: &Stft) -> Result<Vec<f32>, AnalysisError> {
    if spec.columns.is_empty() {
        return Ok(vec![0.0; spec.signal_len]);
    }

    let n_fft = spec.n_fft;
    let window = hann_window(n_fft);
    let mut planner = FftPlanner::new();
    let ifft = planner.plan_fft_inverse(n_fft);

    let mut output = vec![0.0f32; spec.signal_len];
    let mut window_sum = vec![0.0f32; spec.signal_len];
    let mut buffer = vec![Complex::new(0.0f32, 0.0); n_fft];

    for (slice_idx, col) in spec.columns.iter().enumerate() {
        // Rebuild the full spectrum from the one-sided half via conjugate symmetry
        for (k, c) in col.iter().enumerate() {
            buffer[k] = *c;
        }
        for k in col.len()..n_fft {
            buffer[k] = col[n_fft - k].conj();
        }

        ifft.process(&mut buffer);

        let start = slice_idx * spec.hop;
        let scale = 1.0 / n_fft as f32;
        for i in 0..n_fft {
            let pos = start + i;
            if pos >= spec.signal_len {
                break;
            }
            output[pos] += buffer[i].re * scale * window[i];
            window_sum[pos] += window[i] * window[i];
        }
    }

    for (sample, w) in output.iter_mut().zip(window_sum.iter()) {
        if *w > 1e-8 {
            *sample /= *w;
        }
    }

    Ok(output)
}
