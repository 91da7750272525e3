//! Integration tests for the stem analysis engine
//!
//! All inputs are synthetic signals generated in-process: silence, pure
//! tones, chords, and concatenations of them. No fixture files.

use solo_dsp::{
    classify_guitar_style, detect_silent_sections, AnalysisError, SilenceConfig, StyleConfig,
    StyleLabel,
};
use std::f32::consts::PI;

const SR: u32 = 22050;

fn silence(duration_s: f32) -> Vec<f32> {
    vec![0.0f32; (duration_s * SR as f32) as usize]
}

fn tone(freq: f32, duration_s: f32, amplitude: f32) -> Vec<f32> {
    (0..(duration_s * SR as f32) as usize)
        .map(|i| (2.0 * PI * freq * i as f32 / SR as f32).sin() * amplitude)
        .collect()
}

#[test]
fn test_silence_then_signal_scenario() {
    // 10s below -30 dB followed by 3s of signal above it, frame 2048, hop 512,
    // min duration 5s: exactly one interval covering approximately [0, 10]
    let mut samples = silence(10.0);
    samples.extend(tone(440.0, 3.0, 0.8));

    let intervals = detect_silent_sections(&samples, SR, &SilenceConfig::new(-30.0)).unwrap();

    assert_eq!(intervals.len(), 1);
    assert!(intervals[0].start_seconds.abs() < 1e-6);
    assert!((intervals[0].end_seconds - 10.0).abs() < 0.2);
}

#[test]
fn test_silence_intervals_meet_minimum_and_are_disjoint() {
    // silence(6) tone(1) silence(7) tone(1) silence(2)
    let mut samples = silence(6.0);
    samples.extend(tone(330.0, 1.0, 0.8));
    samples.extend(silence(7.0));
    samples.extend(tone(330.0, 1.0, 0.8));
    samples.extend(silence(2.0));

    let config = SilenceConfig::new(-30.0);
    let intervals = detect_silent_sections(&samples, SR, &config).unwrap();

    // The trailing 2s run is below the minimum and must be dropped
    assert_eq!(intervals.len(), 2);
    for iv in &intervals {
        assert!(iv.duration_s() >= config.min_silence_duration_s - 0.2);
    }
    for pair in intervals.windows(2) {
        assert!(
            pair[0].end_seconds < pair[1].start_seconds,
            "intervals must be disjoint with a loud gap between them"
        );
    }
}

#[test]
fn test_silence_detection_is_idempotent() {
    let mut samples = silence(8.0);
    samples.extend(tone(440.0, 2.0, 0.5));

    let config = SilenceConfig::new(0.0);
    let first = detect_silent_sections(&samples, SR, &config).unwrap();
    let second = detect_silent_sections(&samples, SR, &config).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_zero_db_threshold_call_site() {
    // The loose 0 dB threshold treats quiet-but-nonzero audio as silent too
    let mut samples = tone(440.0, 8.0, 0.001);
    samples.extend(tone(440.0, 3.0, 0.8));

    let quiet_is_silent = detect_silent_sections(&samples, SR, &SilenceConfig::new(0.0)).unwrap();
    let strict = detect_silent_sections(&samples, SR, &SilenceConfig::new(-60.0)).unwrap();

    assert_eq!(quiet_is_silent.len(), 1);
    assert!(strict.is_empty());
}

#[test]
fn test_empty_waveform_is_invalid_input() {
    let result = detect_silent_sections(&[], SR, &SilenceConfig::new(-30.0));
    assert!(matches!(result, Err(AnalysisError::InvalidInput(_))));
}

#[test]
fn test_pure_tone_interval_classified_single_note() {
    // A sustained in-band tone: one dominant pitch per sub-frame
    let samples = tone(440.0, 1.0, 0.8);

    let styles =
        classify_guitar_style(&samples, SR, &[(0.0, 1.0)], &StyleConfig::default()).unwrap();

    assert_eq!(styles.len(), 1);
    assert_eq!(styles[0].label, StyleLabel::SingleNote);
    assert!(
        (styles[0].avg_dominant_pitch_count - 1.0).abs() < 0.5,
        "avg count should be near 1, got {:.2}",
        styles[0].avg_dominant_pitch_count
    );
}

#[test]
fn test_style_output_round_trips_interval_bounds() {
    let samples = tone(440.0, 5.0, 0.8);
    let intervals = [(0.0, 1.5), (1.5, 3.0), (3.25, 5.0)];

    let styles =
        classify_guitar_style(&samples, SR, &intervals, &StyleConfig::default()).unwrap();

    let bounds: Vec<(f32, f32)> = styles
        .iter()
        .map(|s| (s.start_seconds, s.end_seconds))
        .collect();
    assert_eq!(bounds, intervals.to_vec());
}

#[test]
fn test_out_of_bounds_interval_fails_wrapper() {
    let samples = tone(440.0, 2.0, 0.8);
    let result = classify_guitar_style(&samples, SR, &[(1.0, 4.0)], &StyleConfig::default());
    assert!(matches!(result, Err(AnalysisError::InvalidInterval(_))));
}

#[test]
fn test_per_interval_errors_do_not_discard_others() {
    use solo_dsp::analysis::style::classify_intervals;

    let samples = tone(440.0, 3.0, 0.8);
    let intervals = [(0.0, 1.0), (2.0, 10.0), (1.0, 2.0)];

    let outcomes = classify_intervals(&samples, SR, &intervals, &StyleConfig::default()).unwrap();

    assert_eq!(outcomes.len(), 3);
    assert!(outcomes[0].is_ok());
    assert!(matches!(outcomes[1], Err(AnalysisError::InvalidInterval(_))));
    assert!(outcomes[2].is_ok());
}

#[test]
fn test_silence_to_style_pipeline() {
    // Vocal stem: 6s silence then 4s of voice; guitar stem: a tone under the
    // vocal silence. The detected break feeds classification directly.
    let mut vocals = silence(6.0);
    vocals.extend(tone(220.0, 4.0, 0.8));
    let guitar = tone(440.0, 10.0, 0.8);

    let config = SilenceConfig::new(-30.0);
    let breaks = detect_silent_sections(&vocals, SR, &config).unwrap();
    assert_eq!(breaks.len(), 1);

    let intervals: Vec<(f32, f32)> = breaks
        .iter()
        .map(|iv| (iv.start_seconds, iv.end_seconds))
        .collect();
    let styles = classify_guitar_style(&guitar, SR, &intervals, &StyleConfig::default()).unwrap();

    assert_eq!(styles.len(), 1);
    assert_eq!(styles[0].label, StyleLabel::SingleNote);
    assert_eq!(styles[0].start_seconds, breaks[0].start_seconds);
    assert_eq!(styles[0].end_seconds, breaks[0].end_seconds);
}

#[test]
fn test_solo_record_emission() {
    use solo_dsp::SoloRecord;

    let samples = tone(440.0, 2.0, 0.8);
    let styles =
        classify_guitar_style(&samples, SR, &[(0.0, 2.0)], &StyleConfig::default()).unwrap();

    let record = SoloRecord::from_style(7, &styles[0]);
    assert_eq!(record.song_id, 7);
    assert!(record.is_guitar_solo);
    assert_eq!(record.score, Some(styles[0].avg_dominant_pitch_count));

    // Serializable for the persistence collaborator
    let json = serde_json::to_string(&record).unwrap();
    assert!(json.contains("\"is_guitar_solo\":true"));
}
