use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FormSubmitted(request) => {
            // One job at a time: a second submission would start a competing poller.
            if state.phase().is_busy() {
                return (state, Vec::new());
            }
            if let Err(err) = request.validate() {
                state.reject_form(&err);
                return (state, Vec::new());
            }
            state.begin_submission();
            vec![Effect::PostJob { request }]
        }
        Msg::SubmitReplied(result) => {
            if state.phase() != crate::Phase::Submitting {
                return (state, Vec::new());
            }
            match result {
                Ok(Some(task_id)) if !task_id.trim().is_empty() => {
                    let interval = state.policy().interval();
                    state.begin_polling(task_id.clone());
                    vec![Effect::StartPolling { task_id, interval }]
                }
                Ok(_) => {
                    state.missing_task_id();
                    Vec::new()
                }
                Err(text) => {
                    state.fail_submission(format!("Request error: {text}"));
                    Vec::new()
                }
            }
        }
        Msg::PollTick => match state.next_poll() {
            Some(task_id) => vec![Effect::FetchStatus { task_id }],
            None => Vec::new(),
        },
        Msg::StatusReplied { task_id, result } => state.apply_status(&task_id, result),
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
