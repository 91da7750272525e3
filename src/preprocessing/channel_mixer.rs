//! Channel mixing utilities (multi-channel to mono conversion)

use crate::error::AnalysisError;

/// Downmix interleaved multi-channel samples to mono by averaging channels
///
/// # Arguments
///
/// * `interleaved` - Interleaved samples (frame-major: c0, c1, ..., c0, c1, ...)
/// * `channels` - Number of channels
///
/// # Returns
///
/// Mono samples, one per input frame. A trailing partial frame is averaged
/// over the samples it actually has.
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` if `channels` is zero
pub fn downmix_to_mono(interleaved: &[f32], channels: usize) -> Result<Vec<f32>, AnalysisError> {
    if channels == 0 {
        return Err(AnalysisError::InvalidInput(
            "Channel count must be > 0".to_string(),
        ));
    }

    if channels == 1 {
        return Ok(interleaved.to_vec());
    }

    log::debug!(
        "Downmixing {} interleaved samples from {} channels",
        interleaved.len(),
        channels
    );

    let mono = interleaved
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
        .collect();

    Ok(mono)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downmix_stereo() {
        let interleaved = vec![1.0, 0.0, 0.5, 0.5, -1.0, 1.0];
        let mono = downmix_to_mono(&interleaved, 2).unwrap();
        assert_eq!(mono, vec![0.5, 0.5, 0.0]);
    }

    #[test]
    fn test_downmix_mono_passthrough() {
        let samples = vec![0.1, 0.2, 0.3];
        assert_eq!(downmix_to_mono(&samples, 1).unwrap(), samples);
    }

    #[test]
    fn test_downmix_partial_trailing_frame() {
        let interleaved = vec![1.0, 0.0, 0.6];
        let mono = downmix_to_mono(&interleaved, 2).unwrap();
        assert_eq!(mono, vec![0.5, 0.6]);
    }

    #[test]
    fn test_downmix_zero_channels() {
        assert!(downmix_to_mono(&[0.0], 0).is_err());
    }
}
