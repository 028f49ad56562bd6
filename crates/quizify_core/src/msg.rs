#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User clicked "Get Started"; reveals the upload form.
    GetStartedClicked,
    /// User picked a file (or emptied the file input).
    FileSelected(Option<crate::SelectedFile>),
    /// User set the question count; clamped into the allowed range.
    QuestionCountChanged(u32),
    /// Raw text from the count input. Non-numeric text is ignored.
    QuestionCountEdited(String),
    /// User submitted the form.
    SubmitClicked,
    /// The network round trip for `request_id` resolved.
    SubmissionFinished {
        request_id: crate::RequestId,
        outcome: Result<String, crate::SubmitFailure>,
    },
    /// User asked to copy the result text.
    CopyClicked,
    /// Clipboard write finished.
    CopyCompleted(Result<(), String>),
    /// User asked to save the result text, optionally under a given file name.
    ExportClicked { file_name: Option<String> },
    /// Export finished; carries the written path or the failure.
    ExportCompleted(Result<String, String>),
    /// Render tick.
    Tick,
    NoOp,
}
