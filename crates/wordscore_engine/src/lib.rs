//! Word score engine: HTTP calls, poll timer and effect execution.
mod client;
mod engine;
mod sink;
mod ticker;
mod types;
mod wire;

pub use client::{ClientSettings, JobClient, ReqwestJobClient, CSRF_HEADER};
pub use engine::EngineHandle;
pub use sink::{ChannelEventSink, EventSink};
pub use ticker::PollTicker;
pub use types::{EngineError, EngineEvent, FailureKind, RequestError, StatusReport, SubmitReply};
pub use wire::{parse_status_body, parse_submit_body};
