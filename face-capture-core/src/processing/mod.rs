pub mod jpeg;
pub mod luminance;
