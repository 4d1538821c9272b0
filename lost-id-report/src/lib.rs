//! # lost-id-report
//!
//! Report a lost identity document with a liveness-gated selfie.
//!
//! The selfie comes from [`face_capture_core::CaptureCoordinator`]; this crate
//! holds the report the selfie is attached to and the checks that gate its
//! submission.

pub mod form;
pub mod id_number;

pub use form::{LostIdReport, ReportError, ReportField};
