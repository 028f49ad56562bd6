use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use chrono::Utc;
use quizify_core::{Effect, Msg, SubmitFailure};
use quizify_engine::{
    AtomicFileWriter, EngineError, EngineEvent, EngineHandle, FailureKind, SubmitError,
    SubmitSettings,
};
use quizify_logging::{quiz_error, quiz_info, quiz_warn};

use super::app::AppEvent;
use super::clipboard::ClipboardWriter;

pub struct EffectRunner {
    engine: EngineHandle,
    clipboard: ClipboardWriter,
    output_dir: PathBuf,
    event_tx: mpsc::Sender<AppEvent>,
}

impl EffectRunner {
    pub fn new(
        settings: SubmitSettings,
        output_dir: PathBuf,
        event_tx: mpsc::Sender<AppEvent>,
    ) -> Result<Self, EngineError> {
        let engine = EngineHandle::new(settings)?;
        Ok(Self::with_engine(engine, output_dir, event_tx))
    }

    pub fn with_engine(
        engine: EngineHandle,
        output_dir: PathBuf,
        event_tx: mpsc::Sender<AppEvent>,
    ) -> Self {
        let runner = Self {
            engine,
            clipboard: ClipboardWriter::default(),
            output_dir,
            event_tx,
        };
        runner.spawn_event_loop();
        runner
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SubmitPdf {
                    request_id,
                    file,
                    question_count,
                } => {
                    quiz_info!(
                        "SubmitPdf request_id={} path={:?} count={}",
                        request_id,
                        file.path,
                        question_count
                    );
                    if let Err(err) =
                        self.engine
                            .submit(request_id, file.path, file.name, question_count)
                    {
                        // Resolve the request so the form never stays locked.
                        quiz_error!("Engine refused request {}: {}", request_id, err);
                        self.send(Msg::SubmissionFinished {
                            request_id,
                            outcome: Err(SubmitFailure::Network(Some(err.to_string()))),
                        });
                    }
                }
                Effect::CopyToClipboard { text } => {
                    let result = self.clipboard.set_text(&text);
                    if let Err(reason) = &result {
                        quiz_warn!("Clipboard write failed: {}", reason);
                    }
                    self.send(Msg::CopyCompleted(result));
                }
                Effect::ExportResult { text, file_name } => {
                    let file_name = file_name.unwrap_or_else(default_export_name);
                    let writer = AtomicFileWriter::new(self.output_dir.clone());
                    let result = match writer.write(&file_name, &text) {
                        Ok(path) => {
                            quiz_info!("Exported {} bytes to {:?}", text.len(), path);
                            Ok(path.display().to_string())
                        }
                        Err(err) => {
                            quiz_error!("Export to {:?} failed: {}", self.output_dir, err);
                            Err(err.to_string())
                        }
                    };
                    self.send(Msg::ExportCompleted(result));
                }
            }
        }
    }

    fn send(&self, msg: Msg) {
        let _ = self.event_tx.send(AppEvent::Core(msg));
    }

    fn spawn_event_loop(&self) {
        let engine = self.engine.clone();
        let event_tx = self.event_tx.clone();
        thread::spawn(move || loop {
            let Some(event) = engine.recv_timeout(Duration::from_millis(100)) else {
                continue;
            };
            let msg = match event {
                EngineEvent::SubmissionCompleted { request_id, result } => {
                    Msg::SubmissionFinished {
                        request_id,
                        outcome: result.map(|response| response.mcqs).map_err(map_failure),
                    }
                }
            };
            if event_tx.send(AppEvent::Core(msg)).is_err() {
                break;
            }
        });
    }
}

fn default_export_name() -> String {
    format!("mcqs-{}.txt", Utc::now().format("%Y%m%dT%H%M%SZ"))
}

fn map_failure(err: SubmitError) -> SubmitFailure {
    match err.kind {
        FailureKind::HttpStatus { status, detail } => SubmitFailure::HttpStatus { status, detail },
        FailureKind::UnexpectedContentType { .. }
        | FailureKind::MalformedBody
        | FailureKind::TooLarge { .. } => SubmitFailure::UnexpectedFormat,
        FailureKind::ServerError { message } => SubmitFailure::Server(message),
        FailureKind::FileRead => SubmitFailure::FileUnreadable(err.message),
        FailureKind::Timeout
        | FailureKind::Network
        | FailureKind::InvalidEndpoint
        | FailureKind::InvalidRequest => SubmitFailure::Network(Some(err.message)),
    }
}
