use std::fmt;

pub type RequestId = u64;

/// One submission: the PDF bytes and the number of questions wanted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct McqRequest {
    pub file_name: String,
    pub pdf: Vec<u8>,
    pub num_mcqs: u32,
}

/// Accepted server reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct McqResponse {
    pub mcqs: String,
    pub status: u16,
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    SubmissionCompleted {
        request_id: RequestId,
        result: Result<McqResponse, SubmitError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitError {
    pub kind: FailureKind,
    pub message: String,
}

impl SubmitError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for SubmitError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidEndpoint,
    InvalidRequest,
    FileRead,
    HttpStatus { status: u16, detail: Option<String> },
    UnexpectedContentType { content_type: Option<String> },
    MalformedBody,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    ServerError { message: Option<String> },
    Timeout,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            FailureKind::InvalidRequest => write!(f, "invalid request"),
            FailureKind::FileRead => write!(f, "could not read pdf"),
            FailureKind::HttpStatus { status, .. } => write!(f, "http status {status}"),
            FailureKind::UnexpectedContentType { content_type } => {
                write!(f, "unexpected content type {content_type:?}")
            }
            FailureKind::MalformedBody => write!(f, "malformed response body"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::ServerError { message } => {
                write!(f, "server error {message:?}")
            }
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
