//! Word score core: pure submit-and-poll state machine and view-model helpers.
mod effect;
mod msg;
mod policy;
mod request;
mod state;
mod status;
mod update;
mod view_model;

pub use effect::{Effect, StopReason};
pub use msg::Msg;
pub use policy::{PollPolicy, DEFAULT_POLL_INTERVAL};
pub use request::{FormError, JobRequest};
pub use state::{AppState, Phase, TaskId};
pub use status::TaskStatus;
pub use update::update;
pub use view_model::{
    AppViewModel, MSG_COMPLETED, MSG_MISSING_TASK_ID, MSG_PROCESSING, MSG_UNEXPECTED,
};
