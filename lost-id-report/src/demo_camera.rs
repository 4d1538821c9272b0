use async_trait::async_trait;

use face_capture_core::{CameraProvider, CameraStream, CaptureError, Frame, MediaConstraints};

/// Synthetic camera: a bright oval on a background that starts dark and
/// brightens frame by frame, like a user turning towards a light.
pub struct DemoCamera {
    width: u32,
    height: u32,
}

impl DemoCamera {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

#[async_trait]
impl CameraProvider for DemoCamera {
    async fn acquire(
        &self,
        constraints: &MediaConstraints,
    ) -> Result<Box<dyn CameraStream>, CaptureError> {
        log::info!("demo camera opened ({:?} facing)", constraints.facing_mode);
        Ok(Box::new(DemoStream {
            width: self.width,
            height: self.height,
            frames: 0,
            playing: false,
        }))
    }
}

struct DemoStream {
    width: u32,
    height: u32,
    frames: u32,
    playing: bool,
}

impl DemoStream {
    fn render(&self, n: u32) -> Option<Frame> {
        let background = n.saturating_mul(2).min(90) as u8;
        let (cx, cy) = (self.width as f32 / 2.0, self.height as f32 / 2.0);
        let (rx, ry) = (self.width as f32 / 5.0, self.height as f32 / 3.0);

        let mut pixels = Vec::with_capacity((self.width * self.height * 4) as usize);
        for y in 0..self.height {
            for x in 0..self.width {
                let dx = (x as f32 - cx) / rx;
                let dy = (y as f32 - cy) / ry;
                let level = if dx * dx + dy * dy <= 1.0 {
                    background.saturating_add(60)
                } else {
                    background
                };
                pixels.extend_from_slice(&[level, level, level.saturating_sub(10), 255]);
            }
        }
        Frame::from_rgba(self.width, self.height, pixels).ok()
    }
}

#[async_trait]
impl CameraStream for DemoStream {
    async fn start(&mut self) -> Result<(), CaptureError> {
        self.playing = true;
        Ok(())
    }

    fn current_frame(&mut self) -> Option<Frame> {
        if !self.playing {
            return None;
        }
        self.frames += 1;
        self.render(self.frames)
    }

    fn stop(&mut self) {
        self.playing = false;
        log::info!("demo camera stopped after {} frames", self.frames);
    }

    fn label(&self) -> String {
        format!("demo camera {}x{}", self.width, self.height)
    }
}
