use async_trait::async_trait;

/// Source of the frame-loop cadence, one tick per display refresh.
#[async_trait]
pub trait FramePacer: Send {
    /// Resolves when the next frame should be analysed.
    async fn next_frame(&mut self);
}
