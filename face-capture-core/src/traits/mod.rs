pub mod camera_provider;
pub mod capture_delegate;
pub mod face_detector;
pub mod frame_pacer;
pub mod image_encoder;
pub mod model_loader;
