use crate::view_model::{
    AppViewModel, MSG_COMPLETED, MSG_MISSING_TASK_ID, MSG_PROCESSING, MSG_UNEXPECTED,
};
use crate::{Effect, FormError, PollPolicy, StopReason, TaskStatus};

pub type TaskId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Submitting,
    Polling,
    Succeeded,
    Failed,
    Unexpected,
}

impl Phase {
    /// A job is in flight; new submissions are refused.
    pub fn is_busy(self) -> bool {
        matches!(self, Phase::Submitting | Phase::Polling)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Succeeded | Phase::Failed | Phase::Unexpected)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    policy: PollPolicy,
    phase: Phase,
    result_visible: bool,
    status: String,
    total_occurrences: Option<u64>,
    pages: Vec<String>,
    task_id: Option<TaskId>,
    attempts: u32,
    request_in_flight: bool,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: PollPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> PollPolicy {
        self.policy
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            phase: self.phase,
            result_visible: self.result_visible,
            status: self.status.clone(),
            total_occurrences: self.total_occurrences,
            pages: self.pages.clone(),
            task_id: self.task_id.clone(),
            polls: self.attempts,
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Back to `Idle` with only the validation message showing; nothing of
    /// the previous session survives.
    pub(crate) fn reject_form(&mut self, err: &FormError) {
        self.phase = Phase::Idle;
        self.result_visible = true;
        self.status = format!("Error: {err}");
        self.total_occurrences = None;
        self.pages.clear();
        self.task_id = None;
        self.attempts = 0;
        self.request_in_flight = false;
        self.dirty = true;
    }

    pub(crate) fn begin_submission(&mut self) {
        self.phase = Phase::Submitting;
        self.result_visible = true;
        self.status = MSG_PROCESSING.to_string();
        self.total_occurrences = None;
        self.pages.clear();
        self.task_id = None;
        self.attempts = 0;
        self.request_in_flight = false;
        self.dirty = true;
    }

    pub(crate) fn begin_polling(&mut self, task_id: TaskId) {
        self.phase = Phase::Polling;
        self.task_id = Some(task_id);
        self.dirty = true;
    }

    pub(crate) fn fail_submission(&mut self, status: String) {
        self.phase = Phase::Failed;
        self.status = status;
        self.dirty = true;
    }

    pub(crate) fn missing_task_id(&mut self) {
        self.fail_submission(MSG_MISSING_TASK_ID.to_string());
    }

    /// Claims the next poll slot. `None` while not polling or while a status
    /// request is still outstanding.
    pub(crate) fn next_poll(&mut self) -> Option<TaskId> {
        if self.phase != Phase::Polling || self.request_in_flight {
            return None;
        }
        let task_id = self.task_id.clone()?;
        self.attempts = self.attempts.saturating_add(1);
        self.request_in_flight = true;
        Some(task_id)
    }

    fn is_polling(&self, task_id: &str) -> bool {
        self.phase == Phase::Polling && self.task_id.as_deref() == Some(task_id)
    }

    pub(crate) fn apply_status(
        &mut self,
        task_id: &str,
        result: Result<TaskStatus, String>,
    ) -> Vec<Effect> {
        if !self.is_polling(task_id) {
            return Vec::new();
        }
        self.request_in_flight = false;

        match result {
            Err(text) => self.finish(
                Phase::Failed,
                format!("Error: status check failed: {text}"),
                StopReason::TransportFailed,
            ),
            Ok(TaskStatus::Pending { progress }) => {
                self.status = pending_message(progress);
                self.dirty = true;
                if self.policy.is_exhausted(self.attempts) {
                    let attempts = self.attempts;
                    self.finish(
                        Phase::Failed,
                        format!("Error: no result after {attempts} status checks."),
                        StopReason::AttemptsExhausted,
                    )
                } else {
                    Vec::new()
                }
            }
            Ok(TaskStatus::Success {
                total_occurrences,
                all_pages,
            }) => {
                self.total_occurrences = Some(total_occurrences);
                self.pages = all_pages;
                self.finish(
                    Phase::Succeeded,
                    MSG_COMPLETED.to_string(),
                    StopReason::Completed,
                )
            }
            Ok(TaskStatus::Error { message }) => self.finish(
                Phase::Failed,
                format!("Error: {message}"),
                StopReason::JobFailed,
            ),
            Ok(TaskStatus::Unrecognized { .. }) => self.finish(
                Phase::Unexpected,
                MSG_UNEXPECTED.to_string(),
                StopReason::Unexpected,
            ),
        }
    }

    /// Leaves `Polling`. The task handle is dropped with it.
    fn finish(&mut self, phase: Phase, status: String, reason: StopReason) -> Vec<Effect> {
        self.phase = phase;
        self.status = status;
        self.task_id = None;
        self.request_in_flight = false;
        self.dirty = true;
        vec![Effect::StopPolling { reason }]
    }
}

fn pending_message(progress: Option<f64>) -> String {
    match progress.filter(|p| p.is_finite()) {
        Some(p) => format!("{MSG_PROCESSING} ({p}%)"),
        None => MSG_PROCESSING.to_string(),
    }
}
