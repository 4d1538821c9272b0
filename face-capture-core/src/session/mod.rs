pub mod coordinator;
pub mod frame_loop;
pub mod media;
pub mod model_registry;
pub mod monitor;
pub mod pacer;
