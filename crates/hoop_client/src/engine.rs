use std::sync::{mpsc, Arc};
use std::thread;

use hoop_logging::hoop_warn;

use crate::backend::{ApiBackend, ApiSettings, HttpBackend};
use crate::error::ApiError;
use crate::types::{
    ConsentRecord, JobRequest, ResultItem, RewriteRequest, RewriteResponse, TranscribeRequest,
};

/// Requests the shell hands to the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCommand {
    StartJob {
        request: JobRequest,
    },
    Transcribe {
        request: TranscribeRequest,
    },
    Rewrite {
        card_id: u64,
        request: RewriteRequest,
    },
    /// Fire-and-forget; failures are logged and swallowed.
    LogConsent {
        record: ConsentRecord,
    },
}

/// Completions the engine reports back. Consent logging emits none.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    JobFinished {
        result: Result<Vec<ResultItem>, ApiError>,
    },
    TranscribeFinished {
        result: Result<Vec<ResultItem>, ApiError>,
    },
    RewriteFinished {
        card_id: u64,
        result: Result<RewriteResponse, ApiError>,
    },
}

/// Runs API requests on a background tokio runtime. Commands arrive over an
/// mpsc channel and each runs as its own task, so a slow transcription does
/// not block a card's rewrite.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(settings: ApiSettings) -> Result<(Self, mpsc::Receiver<EngineEvent>), ApiError> {
        let backend = Arc::new(HttpBackend::new(settings)?);
        Ok(Self::with_backend(backend))
    }

    pub fn with_backend(
        backend: Arc<dyn ApiBackend>,
    ) -> (Self, mpsc::Receiver<EngineEvent>) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let backend = backend.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(backend.as_ref(), command, event_tx).await;
                });
            }
        });

        (Self { cmd_tx }, event_rx)
    }

    pub fn submit(&self, command: EngineCommand) {
        let _ = self.cmd_tx.send(command);
    }
}

async fn handle_command(
    backend: &dyn ApiBackend,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::StartJob { request } => {
            let result = backend.start_job(&request).await;
            let _ = event_tx.send(EngineEvent::JobFinished { result });
        }
        EngineCommand::Transcribe { request } => {
            let result = backend.transcribe(&request).await;
            let _ = event_tx.send(EngineEvent::TranscribeFinished { result });
        }
        EngineCommand::Rewrite { card_id, request } => {
            let result = backend.rewrite(&request).await;
            let _ = event_tx.send(EngineEvent::RewriteFinished { card_id, result });
        }
        EngineCommand::LogConsent { record } => {
            if let Err(err) = backend.log_consent(&record).await {
                hoop_warn!("consent log failed: {err}");
            }
        }
    }
}
