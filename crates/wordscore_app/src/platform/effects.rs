use std::time::Duration;

use wordscore_core::{Effect, Msg, TaskStatus};
use wordscore_engine::{EngineError, EngineEvent, EngineHandle, StatusReport};
use wordscore_logging::{score_debug, score_info, score_warn};

/// Executes core effects on the engine and turns engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn execute(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::PostJob { request } => {
                    score_info!(
                        "PostJob page_url={} word_len={}",
                        request.page_url,
                        request.word.len()
                    );
                    self.engine.submit(request.page_url, request.word);
                }
                Effect::StartPolling { task_id, interval } => {
                    score_info!("StartPolling task_id={} interval={:?}", task_id, interval);
                    self.engine.start_polling(interval);
                }
                Effect::FetchStatus { task_id } => {
                    score_debug!("FetchStatus task_id={}", task_id);
                    self.engine.fetch_status(task_id);
                }
                Effect::StopPolling { reason } => {
                    score_info!("StopPolling reason={:?}", reason);
                    self.engine.stop_polling();
                }
            }
        }
    }

    /// Waits up to `timeout` for the next engine event.
    pub fn next_msg(&self, timeout: Duration) -> Result<Option<Msg>, EngineError> {
        Ok(self.engine.recv_timeout(timeout)?.map(map_event))
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::SubmitCompleted { result } => Msg::SubmitReplied(match result {
            Ok(reply) => Ok(reply.task_id),
            Err(err) => {
                score_warn!("Submit failed: {}", err);
                Err(err.message)
            }
        }),
        EngineEvent::StatusFetched { task_id, result } => Msg::StatusReplied {
            result: match result {
                Ok(report) => Ok(map_status(report)),
                Err(err) => {
                    score_warn!("Status check for {} failed: {}", task_id, err);
                    Err(err.message)
                }
            },
            task_id,
        },
        EngineEvent::PollTick => Msg::PollTick,
    }
}

fn map_status(report: StatusReport) -> TaskStatus {
    match report {
        StatusReport::Pending { progress } => TaskStatus::Pending { progress },
        StatusReport::Success {
            total_occurrences,
            all_pages,
        } => TaskStatus::Success {
            total_occurrences,
            all_pages,
        },
        StatusReport::Error { message } => TaskStatus::Error { message },
        StatusReport::Unrecognized { body } => {
            score_warn!("Unexpected status reply: {}", body);
            TaskStatus::Unrecognized { raw: body }
        }
    }
}
