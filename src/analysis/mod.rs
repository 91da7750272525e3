//! Analysis and result aggregation modules
//!
//! - Playing-style classification
//! - Result types handed to external collaborators

pub mod result;
pub mod style;
