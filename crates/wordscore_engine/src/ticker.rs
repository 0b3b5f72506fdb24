use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use wordscore_logging::score_debug;

use crate::{EngineEvent, EventSink};

/// Repeating poll timer. Emits [`EngineEvent::PollTick`] every `period`, the
/// first one a full period after start, until stopped.
pub struct PollTicker {
    cancel: CancellationToken,
}

impl PollTicker {
    pub fn start(runtime: &Handle, period: Duration, sink: Arc<dyn EventSink>) -> Self {
        let period = period.max(Duration::from_millis(1));
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        runtime.spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            // A slow consumer must not get a burst of catch-up ticks.
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    _ = interval.tick() => sink.emit(EngineEvent::PollTick),
                }
            }
            score_debug!("Poll ticker stopped");
        });
        Self { cancel }
    }

    /// Cancels the timer. No tick is emitted once the task observes the cancellation.
    pub fn stop(self) {
        self.cancel.cancel();
    }
}

impl Drop for PollTicker {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
