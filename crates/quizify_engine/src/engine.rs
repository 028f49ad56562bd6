use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use quizify_logging::{quiz_info, quiz_warn};
use thiserror::Error;

use crate::submit::{ReqwestSubmitter, SubmitSettings, Submitter};
use crate::{EngineEvent, FailureKind, McqRequest, RequestId, SubmitError};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("submitter setup failed: {0}")]
    Setup(#[from] SubmitError),
    #[error("a submission is already in flight")]
    Busy,
    #[error("engine thread has stopped")]
    Stopped,
}

enum EngineCommand {
    Submit {
        request_id: RequestId,
        path: PathBuf,
        file_name: String,
        num_mcqs: u32,
    },
}

/// Background executor for submissions. At most one submission is outstanding at a time.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
    in_flight: Arc<AtomicBool>,
}

impl EngineHandle {
    pub fn new(settings: SubmitSettings) -> Result<Self, EngineError> {
        let submitter = ReqwestSubmitter::new(settings)?;
        Self::with_submitter(Arc::new(submitter))
    }

    pub fn with_submitter(submitter: Arc<dyn Submitter>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let in_flight = Arc::new(AtomicBool::new(false));
        let runtime = tokio::runtime::Runtime::new()?;

        let flag = in_flight.clone();
        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let submitter = submitter.clone();
                let event_tx = event_tx.clone();
                let flag = flag.clone();
                runtime.spawn(async move {
                    handle_command(submitter.as_ref(), command, &flag, event_tx).await;
                });
            }
        });

        Ok(Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
            in_flight,
        })
    }

    /// Queue a submission. Refused with `EngineError::Busy` while another is outstanding.
    pub fn submit(
        &self,
        request_id: RequestId,
        path: impl Into<PathBuf>,
        file_name: impl Into<String>,
        num_mcqs: u32,
    ) -> Result<(), EngineError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            quiz_warn!("Refusing request {}; a submission is in flight", request_id);
            return Err(EngineError::Busy);
        }

        let command = EngineCommand::Submit {
            request_id,
            path: path.into(),
            file_name: file_name.into(),
            num_mcqs,
        };
        if self.cmd_tx.send(command).is_err() {
            self.in_flight.store(false, Ordering::Release);
            return Err(EngineError::Stopped);
        }
        Ok(())
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    submitter: &dyn Submitter,
    command: EngineCommand,
    in_flight: &AtomicBool,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Submit {
            request_id,
            path,
            file_name,
            num_mcqs,
        } => {
            let result = match tokio::fs::read(&path).await {
                Ok(pdf) => {
                    let request = McqRequest {
                        file_name,
                        pdf,
                        num_mcqs,
                    };
                    submitter.submit(request).await
                }
                Err(err) => Err(SubmitError::new(FailureKind::FileRead, err.to_string())),
            };
            match &result {
                Ok(response) => quiz_info!(
                    "Request {} succeeded (status {}) with {} response bytes",
                    request_id,
                    response.status,
                    response.byte_len
                ),
                Err(err) => quiz_warn!("Request {} failed: {}", request_id, err),
            }
            // Release the guard before reporting so the receiver can resubmit immediately.
            in_flight.store(false, Ordering::Release);
            let _ = event_tx.send(EngineEvent::SubmissionCompleted { request_id, result });
        }
    }
}
