use crate::{JobRequest, TaskId, TaskStatus};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User submitted the form.
    FormSubmitted(JobRequest),
    /// Start-job reply. `Ok(None)` means the backend answered without a task id;
    /// `Err` carries the transport error text.
    SubmitReplied(Result<Option<TaskId>, String>),
    /// Repeating poll timer fired.
    PollTick,
    /// Status reply for `task_id`. `Err` carries the transport error text.
    StatusReplied {
        task_id: TaskId,
        result: Result<TaskStatus, String>,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}
