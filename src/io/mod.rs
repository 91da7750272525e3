//! Audio I/O modules
//!
//! File decoding to analysis-ready sample buffers using Symphonia.

pub mod decoder;
