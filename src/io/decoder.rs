//! Audio decoding using Symphonia
//!
//! Decodes the separated stem files (wav, mp3) this crate analyzes into mono
//! f32 sample buffers. Analysis itself stays sample-based; this is the only
//! place the crate touches the filesystem.

use std::fs::File;
use std::path::Path;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::error::AnalysisError;
use crate::preprocessing::channel_mixer::downmix_to_mono;

/// Decode an audio file to mono PCM samples
///
/// # Arguments
///
/// * `path` - Path to the audio file (wav, mp3)
///
/// # Returns
///
/// Tuple of (mono samples, sample rate in Hz). Multi-channel audio is
/// downmixed by channel averaging.
///
/// # Errors
///
/// Returns `AnalysisError::DecodingError` if the file cannot be opened,
/// probed, or decoded, or contains no audio track
pub fn decode_audio(path: &Path) -> Result<(Vec<f32>, u32), AnalysisError> {
    log::debug!("Decoding audio file: {}", path.display());

    let src = File::open(path)
        .map_err(|e| AnalysisError::DecodingError(format!("Failed to open {}: {}", path.display(), e)))?;
    let mss = MediaSourceStream::new(Box::new(src), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| AnalysisError::DecodingError(format!("Unsupported format: {}", e)))?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| AnalysisError::DecodingError("No supported audio tracks found".to_string()))?;

    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| AnalysisError::DecodingError("Missing sample rate".to_string()))?;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| AnalysisError::DecodingError(format!("Failed to create decoder: {}", e)))?;

    let mut interleaved: Vec<f32> = Vec::new();
    let mut channels = 1usize;
    let mut sample_buf: Option<SampleBuffer<f32>> = None;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(_)) => break, // end of stream
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => {
                return Err(AnalysisError::DecodingError(format!(
                    "Failed to read packet: {}",
                    e
                )))
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                let spec = *decoded.spec();
                channels = spec.channels.count();

                let needed = decoded.capacity() * channels;
                if sample_buf.as_ref().map_or(true, |b| b.capacity() < needed) {
                    sample_buf = Some(SampleBuffer::<f32>::new(decoded.capacity() as u64, spec));
                }
                if let Some(buf) = sample_buf.as_mut() {
                    buf.copy_interleaved_ref(decoded);
                    interleaved.extend_from_slice(buf.samples());
                }
            }
            Err(SymphoniaError::DecodeError(e)) => {
                // Recoverable: skip the corrupt packet
                log::warn!("Skipping undecodable packet in {}: {}", path.display(), e);
            }
            Err(e) => {
                return Err(AnalysisError::DecodingError(format!(
                    "Decode failed: {}",
                    e
                )))
            }
        }
    }

    if interleaved.is_empty() {
        return Err(AnalysisError::DecodingError(format!(
            "No audio data decoded from {}",
            path.display()
        )));
    }

    let mono = downmix_to_mono(&interleaved, channels)?;

    log::debug!(
        "Decoded {}: {} mono samples at {} Hz ({} channels)",
        path.display(),
        mono.len(),
        sample_rate,
        channels
    );

    Ok((mono, sample_rate))
}
