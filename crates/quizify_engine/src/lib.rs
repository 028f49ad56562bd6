//! Quizify engine: MCQ submission over HTTP and result export.
mod engine;
mod export;
mod submit;
mod types;

pub use engine::{EngineError, EngineHandle};
pub use export::{ensure_output_dir, safe_file_name, AtomicFileWriter, PersistError};
pub use submit::{ReqwestSubmitter, SubmitSettings, Submitter, DEFAULT_ENDPOINT};
pub use types::{
    EngineEvent, FailureKind, McqRequest, McqResponse, RequestId, SubmitError,
};
