//! Feature extraction modules
//!
//! This module contains the analysis primitives:
//! - Frame energy extraction
//! - Silence interval detection
//! - STFT / inverse STFT
//! - Harmonic-percussive separation
//! - Multi-pitch tracking and dominant-pitch selection

pub mod energy;
pub mod hpss;
pub mod pitch;
pub mod silence;
pub mod stft;
