use quizify_core::{AppViewModel, LineKind, McqCard};

/// How MCQ cards are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderStyle {
    /// Each block printed verbatim.
    Plain,
    /// Question, option and answer lines styled differently.
    #[default]
    Classified,
}

const OPTION_INDENT: &str = "    ";
const ANSWER_PREFIX: &str = "  -> ";

pub fn render_status(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    if view.form_visible {
        let file = view.file_name.as_deref().unwrap_or("<none>");
        let locked = if view.inputs_enabled { "" } else { " (locked)" };
        lines.push(format!(
            "PDF: {file} | Questions: {}{locked} | [{}]",
            view.question_count, view.submit_label
        ));
    } else {
        lines.push("Type 'start' to get started.".to_string());
    }

    if let Some(error) = &view.error {
        lines.push(format!("Error: {error}"));
    }
    if let Some(notice) = &view.notice {
        lines.push(notice.clone());
    }
    lines
}

pub fn render_cards(view: &AppViewModel, style: RenderStyle) -> Vec<String> {
    if view.cards.is_empty() {
        return Vec::new();
    }

    let total = view.cards.len();
    let mut lines = vec![format!("Generated MCQs ({total})")];
    for (idx, card) in view.cards.iter().enumerate() {
        lines.push(format!("--- {} / {total} ---", idx + 1));
        match style {
            RenderStyle::Plain => lines.push(card.text.clone()),
            RenderStyle::Classified => lines.extend(classified_lines(card)),
        }
    }
    lines.push(String::new());
    lines
}

fn classified_lines(card: &McqCard) -> impl Iterator<Item = String> + '_ {
    card.lines.iter().map(|line| match line.kind {
        LineKind::Question => line.text.clone(),
        LineKind::Option => format!("{OPTION_INDENT}{}", line.text),
        LineKind::Answer => format!("{ANSWER_PREFIX}{}", line.text),
    })
}
