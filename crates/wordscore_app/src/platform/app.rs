use std::collections::VecDeque;
use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use wordscore_core::{update, AppState, JobRequest, Msg, Phase, PollPolicy};
use wordscore_logging::score_info;

use super::effects::EffectRunner;
use super::render::{render, PageListStyle};

/// How long to block on the engine before re-checking the session.
const EVENT_WAIT: Duration = Duration::from_millis(250);

/// Drives one submit-and-poll session to a terminal phase, rendering every
/// visible change to `out`. Returns the final phase; `Idle` means the form
/// was rejected before anything was sent.
pub fn run_session(
    runner: &EffectRunner,
    policy: PollPolicy,
    request: JobRequest,
    style: PageListStyle,
    out: &mut dyn Write,
) -> Result<Phase> {
    let mut state = AppState::with_policy(policy);
    let mut inbox = VecDeque::from([Msg::FormSubmitted(request)]);
    let mut last_rendered: Vec<String> = Vec::new();

    loop {
        while let Some(msg) = inbox.pop_front() {
            let (next, effects) = update(state, msg);
            state = next;
            runner.execute(effects);

            if state.consume_dirty() {
                let lines = render(&state.view(), style);
                if lines != last_rendered {
                    for line in &lines {
                        writeln!(out, "{line}")?;
                    }
                    out.flush()?;
                    last_rendered = lines;
                }
            }
        }

        let phase = state.phase();
        if phase.is_terminal() || phase == Phase::Idle {
            score_info!("Session ended phase={:?} polls={}", phase, state.view().polls);
            return Ok(phase);
        }

        if let Some(msg) = runner.next_msg(EVENT_WAIT)? {
            inbox.push_back(msg);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};
    use wordscore_engine::{ClientSettings, EngineHandle};

    fn runner_for(base_url: String) -> EffectRunner {
        let engine = EngineHandle::new(ClientSettings {
            base_url,
            ..ClientSettings::default()
        })
        .expect("engine");
        EffectRunner::new(engine)
    }

    fn fast_policy() -> PollPolicy {
        PollPolicy::new(Duration::from_millis(10), Some(50))
    }

    async fn run_blocking(
        base_url: String,
        request: JobRequest,
        style: PageListStyle,
    ) -> (Phase, String) {
        tokio::task::spawn_blocking(move || {
            let runner = runner_for(base_url);
            let mut out = Vec::new();
            let phase = run_session(&runner, fast_policy(), request, style, &mut out)
                .expect("session");
            (phase, String::from_utf8(out).expect("utf8"))
        })
        .await
        .expect("join")
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn polls_until_success_and_renders_result() {
        wordscore_logging::initialize_for_tests();
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/word_score/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"task_id": "t42"})),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/task-status/t42/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({"status": "pending", "progress": 50}),
            ))
            .up_to_n_times(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/task-status/t42/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "success",
                "total_occurrences": 42,
                "all_pages": ["/a", "/b"]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (phase, output) = run_blocking(
            server.uri(),
            JobRequest::new("https://example.com", "rust"),
            PageListStyle::List,
        )
        .await;

        assert_eq!(phase, Phase::Succeeded);
        assert!(output.contains("Processing... (50%)"), "{output}");
        assert!(output.contains("Completed!"), "{output}");
        assert!(output.contains("42"), "{output}");
        assert!(output.contains("/a") && output.contains("/b"), "{output}");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn missing_task_id_never_polls() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/word_score/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let (phase, output) = run_blocking(
            server.uri(),
            JobRequest::new("https://example.com", "rust"),
            PageListStyle::List,
        )
        .await;

        assert_eq!(phase, Phase::Failed);
        assert!(output.contains("Error: Task ID not received."), "{output}");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn submit_transport_error_is_shown_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/word_score/"))
            .respond_with(ResponseTemplate::new(500).set_body_string("worker queue unavailable"))
            .mount(&server)
            .await;

        let (phase, output) = run_blocking(
            server.uri(),
            JobRequest::new("https://example.com", "rust"),
            PageListStyle::Inline,
        )
        .await;

        assert_eq!(phase, Phase::Failed);
        assert!(output.contains("worker queue unavailable"), "{output}");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn invalid_form_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let (phase, output) = run_blocking(
            server.uri(),
            JobRequest::new("https://example.com", ""),
            PageListStyle::List,
        )
        .await;

        assert_eq!(phase, Phase::Idle);
        assert!(output.contains("Please enter a word."), "{output}");
    }
}
