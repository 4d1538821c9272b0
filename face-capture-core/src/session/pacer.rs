use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{interval, Interval, MissedTickBehavior};

use crate::traits::frame_pacer::FramePacer;

/// Paces the frame loop at the display refresh rate.
///
/// The first tick resolves immediately. If analysing a frame takes longer
/// than one refresh, the missed refreshes are skipped rather than replayed.
pub struct RefreshPacer {
    period: Duration,
    ticker: Option<Interval>,
}

impl RefreshPacer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            ticker: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

#[async_trait]
impl FramePacer for RefreshPacer {
    async fn next_frame(&mut self) {
        // Interval needs a running timer, so it is created on first use.
        let period = self.period;
        let ticker = self.ticker.get_or_insert_with(|| {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            ticker
        });
        ticker.tick().await;
    }
}
