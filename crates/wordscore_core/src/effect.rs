use std::time::Duration;

use crate::{JobRequest, TaskId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send the start-job request.
    PostJob { request: JobRequest },
    /// Start the repeating poll timer for a freshly accepted task.
    StartPolling { task_id: TaskId, interval: Duration },
    /// Issue one status request.
    FetchStatus { task_id: TaskId },
    /// Cancel the repeating poll timer. Emitted once per polling session.
    StopPolling { reason: StopReason },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Completed,
    JobFailed,
    Unexpected,
    TransportFailed,
    AttemptsExhausted,
}
