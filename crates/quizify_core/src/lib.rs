//! Quizify core: pure state machine, MCQ text handling and view-model helpers.
mod effect;
mod mcq;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use mcq::{classify_line, split_mcq_blocks, LineKind};
pub use msg::Msg;
pub use state::{
    AppState, RequestId, SelectedFile, SubmitFailure, DEFAULT_QUESTIONS, MAX_QUESTIONS,
    MIN_QUESTIONS, MISSING_FILE_MESSAGE,
};
pub use update::update;
pub use view_model::{AppViewModel, McqCard, McqLine};
