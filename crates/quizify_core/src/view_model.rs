use crate::mcq::{classify_line, LineKind};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub form_visible: bool,
    pub file_name: Option<String>,
    pub question_count: u32,
    pub loading: bool,
    pub inputs_enabled: bool,
    pub submit_label: &'static str,
    pub error: Option<String>,
    pub result_text: String,
    pub cards: Vec<McqCard>,
    pub notice: Option<String>,
    pub dirty: bool,
}

/// One question block, kept verbatim alongside its classified lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct McqCard {
    pub text: String,
    pub lines: Vec<McqLine>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct McqLine {
    pub kind: LineKind,
    pub text: String,
}

impl McqCard {
    pub(crate) fn from_block(block: &str) -> Self {
        let lines = block
            .lines()
            .map(|line| McqLine {
                kind: classify_line(line),
                text: line.to_string(),
            })
            .collect();
        Self {
            text: block.to_string(),
            lines,
        }
    }
}
