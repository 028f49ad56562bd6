use std::fmt;
use std::path::PathBuf;

use crate::mcq::split_mcq_blocks;
use crate::view_model::{AppViewModel, McqCard};

pub type RequestId = u64;

pub const MIN_QUESTIONS: u32 = 1;
pub const MAX_QUESTIONS: u32 = 50;
pub const DEFAULT_QUESTIONS: u32 = 5;

pub const MISSING_FILE_MESSAGE: &str = "Please upload a PDF file.";
const UNEXPECTED_FORMAT_MESSAGE: &str = "Unexpected response format from server.";
const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error occurred.";
const CONNECT_FAILED_MESSAGE: &str = "Failed to connect to backend.";

/// Handle to the user's chosen PDF. Only the path is kept; bytes are read at submit time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub path: PathBuf,
}

impl SelectedFile {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { name, path }
    }
}

/// Why a submission round trip did not produce MCQ text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitFailure {
    /// Non-2xx status, with the server's error string when it sent one.
    HttpStatus { status: u16, detail: Option<String> },
    /// Body was not JSON, or not the expected shape.
    UnexpectedFormat,
    /// 2xx JSON without MCQ text.
    Server(Option<String>),
    /// Request never completed.
    Network(Option<String>),
    /// The selected PDF could not be read.
    FileUnreadable(String),
}

impl SubmitFailure {
    /// Text shown inline under the form.
    pub fn user_message(&self) -> String {
        match self {
            SubmitFailure::HttpStatus {
                status,
                detail: Some(detail),
            } => format!("HTTP error! status: {status}: {detail}"),
            SubmitFailure::HttpStatus { status, detail: None } => {
                format!("HTTP error! status: {status}")
            }
            SubmitFailure::UnexpectedFormat => UNEXPECTED_FORMAT_MESSAGE.to_string(),
            SubmitFailure::Server(message) => non_empty(message.as_deref())
                .unwrap_or(UNKNOWN_ERROR_MESSAGE)
                .to_string(),
            SubmitFailure::Network(message) => non_empty(message.as_deref())
                .unwrap_or(CONNECT_FAILED_MESSAGE)
                .to_string(),
            SubmitFailure::FileUnreadable(reason) => {
                format!("Could not read the selected PDF: {reason}")
            }
        }
    }
}

impl fmt::Display for SubmitFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.user_message())
    }
}

fn non_empty(message: Option<&str>) -> Option<&str> {
    message.filter(|m| !m.trim().is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    form_visible: bool,
    file: Option<SelectedFile>,
    question_count: u32,
    loading: bool,
    in_flight: Option<RequestId>,
    next_request_id: RequestId,
    error: String,
    result: String,
    notice: Option<String>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_question_count(DEFAULT_QUESTIONS)
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with a configured default count, clamped into range.
    pub fn with_question_count(count: u32) -> Self {
        Self {
            form_visible: false,
            file: None,
            question_count: clamp_count(count),
            loading: false,
            in_flight: None,
            next_request_id: 1,
            error: String::new(),
            result: String::new(),
            notice: None,
            dirty: false,
        }
    }

    pub fn view(&self) -> AppViewModel {
        let cards = split_mcq_blocks(&self.result)
            .into_iter()
            .map(McqCard::from_block)
            .collect();
        AppViewModel {
            form_visible: self.form_visible,
            file_name: self.file.as_ref().map(|f| f.name.clone()),
            question_count: self.question_count,
            loading: self.loading,
            inputs_enabled: !self.loading,
            submit_label: if self.loading {
                "Generating..."
            } else {
                "Generate MCQs"
            },
            error: (!self.error.is_empty()).then(|| self.error.clone()),
            result_text: self.result.clone(),
            cards,
            notice: self.notice.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn result_text(&self) -> &str {
        &self.result
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn show_form(&mut self) -> bool {
        if self.form_visible {
            return false;
        }
        self.form_visible = true;
        self.mark_dirty();
        true
    }

    pub(crate) fn select_file(&mut self, file: Option<SelectedFile>) {
        if self.file != file {
            self.file = file;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_question_count(&mut self, count: u32) {
        let count = clamp_count(count);
        if self.question_count != count {
            self.question_count = count;
            self.mark_dirty();
        }
    }

    pub(crate) fn selected_file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    pub(crate) fn question_count(&self) -> u32 {
        self.question_count
    }

    pub(crate) fn clear_outcome(&mut self) {
        if !self.error.is_empty() || !self.result.is_empty() || self.notice.is_some() {
            self.error.clear();
            self.result.clear();
            self.notice = None;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_error(&mut self, message: impl Into<String>) {
        self.error = message.into();
        self.mark_dirty();
    }

    /// Enters the loading state and returns the id of the new request.
    pub(crate) fn begin_request(&mut self) -> RequestId {
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.loading = true;
        self.in_flight = Some(request_id);
        self.mark_dirty();
        request_id
    }

    /// Leaves the loading state. Returns false when `request_id` is not the outstanding request.
    pub(crate) fn finish_request(&mut self, request_id: RequestId) -> bool {
        if self.in_flight != Some(request_id) {
            return false;
        }
        self.in_flight = None;
        self.loading = false;
        self.file = None;
        self.mark_dirty();
        true
    }

    pub(crate) fn set_result(&mut self, text: String) {
        self.result = text;
        self.mark_dirty();
    }

    pub(crate) fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
        self.mark_dirty();
    }
}

fn clamp_count(count: u32) -> u32 {
    count.clamp(MIN_QUESTIONS, MAX_QUESTIONS)
}
