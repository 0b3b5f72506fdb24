use crate::{Phase, TaskId};

pub const MSG_PROCESSING: &str = "Processing...";
pub const MSG_COMPLETED: &str = "Completed!";
pub const MSG_MISSING_TASK_ID: &str = "Error: Task ID not received.";
pub const MSG_UNEXPECTED: &str = "Unexpected response received.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub phase: Phase,
    /// Hidden until the first submission.
    pub result_visible: bool,
    pub status: String,
    pub total_occurrences: Option<u64>,
    pub pages: Vec<String>,
    pub task_id: Option<TaskId>,
    pub polls: u32,
    pub dirty: bool,
}
