use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use wordscore_logging::{score_debug, score_info};

use crate::client::{ClientSettings, JobClient, ReqwestJobClient};
use crate::{ChannelEventSink, EngineError, EngineEvent, EventSink, PollTicker};

enum EngineCommand {
    Request(RequestCommand),
    StartPolling { interval: Duration },
    StopPolling,
}

/// Commands that become one HTTP call on the runtime.
enum RequestCommand {
    Submit { page_url: String, word: String },
    FetchStatus { task_id: String },
}

/// Owns a tokio runtime on a background thread. Commands go in over one
/// channel, [`EngineEvent`]s come back over another.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings) -> Result<Self, EngineError> {
        let client = ReqwestJobClient::new(settings)?;
        Self::with_client(Arc::new(client))
    }

    pub fn with_client(client: Arc<dyn JobClient>) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Runtime::new()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let sink: Arc<dyn EventSink> = Arc::new(ChannelEventSink::new(event_tx));
            let mut ticker: Option<PollTicker> = None;

            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::StartPolling { interval } => {
                        if let Some(previous) = ticker.take() {
                            previous.stop();
                        }
                        score_debug!("Poll ticker started interval={:?}", interval);
                        ticker = Some(PollTicker::start(runtime.handle(), interval, sink.clone()));
                    }
                    EngineCommand::StopPolling => {
                        if let Some(active) = ticker.take() {
                            active.stop();
                        }
                    }
                    EngineCommand::Request(command) => {
                        let client = client.clone();
                        let sink = sink.clone();
                        runtime.spawn(async move {
                            handle_request(client.as_ref(), command, sink.as_ref()).await;
                        });
                    }
                }
            }

            if let Some(active) = ticker.take() {
                active.stop();
            }
            score_info!("Engine command channel closed; shutting down runtime");
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn submit(&self, page_url: impl Into<String>, word: impl Into<String>) {
        self.send(EngineCommand::Request(RequestCommand::Submit {
            page_url: page_url.into(),
            word: word.into(),
        }));
    }

    pub fn fetch_status(&self, task_id: impl Into<String>) {
        self.send(EngineCommand::Request(RequestCommand::FetchStatus {
            task_id: task_id.into(),
        }));
    }

    pub fn start_polling(&self, interval: Duration) {
        self.send(EngineCommand::StartPolling { interval });
    }

    pub fn stop_polling(&self) {
        self.send(EngineCommand::StopPolling);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Waits up to `timeout` for the next event. `Ok(None)` on timeout.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<EngineEvent>, EngineError> {
        match self.event_rx.recv_timeout(timeout) {
            Ok(event) => Ok(Some(event)),
            Err(mpsc::RecvTimeoutError::Timeout) => Ok(None),
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(EngineError::Stopped),
        }
    }

    fn send(&self, command: EngineCommand) {
        // Only fails once the engine thread is gone, which ends the session anyway.
        let _ = self.cmd_tx.send(command);
    }
}

async fn handle_request(client: &dyn JobClient, command: RequestCommand, sink: &dyn EventSink) {
    match command {
        RequestCommand::Submit { page_url, word } => {
            let result = client.submit(&page_url, &word).await;
            sink.emit(EngineEvent::SubmitCompleted { result });
        }
        RequestCommand::FetchStatus { task_id } => {
            let result = client.status(&task_id).await;
            sink.emit(EngineEvent::StatusFetched { task_id, result });
        }
    }
}
