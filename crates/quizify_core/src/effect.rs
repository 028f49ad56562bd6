use crate::{RequestId, SelectedFile};

/// Side effects requested by `update`; executed by the platform layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SubmitPdf {
        request_id: RequestId,
        file: SelectedFile,
        question_count: u32,
    },
    CopyToClipboard { text: String },
    ExportResult {
        text: String,
        file_name: Option<String>,
    },
}
