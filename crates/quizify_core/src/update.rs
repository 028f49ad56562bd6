use quizify_logging::{quiz_debug, quiz_info, quiz_warn};

use crate::{AppState, Effect, Msg, SelectedFile, MISSING_FILE_MESSAGE};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::GetStartedClicked => {
            state.show_form();
            Vec::new()
        }
        Msg::FileSelected(file) => {
            // Inputs are disabled while a request is outstanding.
            if !state.is_loading() {
                state.select_file(file);
            }
            Vec::new()
        }
        Msg::QuestionCountChanged(count) => {
            if !state.is_loading() {
                state.set_question_count(count);
            }
            Vec::new()
        }
        Msg::QuestionCountEdited(raw) => {
            if !state.is_loading() {
                match raw.trim().parse::<u32>() {
                    Ok(count) => state.set_question_count(count),
                    Err(_) => quiz_debug!("Ignoring non-numeric question count {:?}", raw),
                }
            }
            Vec::new()
        }
        Msg::SubmitClicked => submit(&mut state),
        Msg::SubmissionFinished {
            request_id,
            outcome,
        } => {
            if !state.finish_request(request_id) {
                quiz_warn!("Ignoring completion for stale request {}", request_id);
                return (state, Vec::new());
            }
            match outcome {
                Ok(text) => {
                    quiz_info!("Request {} produced {} bytes of MCQ text", request_id, text.len());
                    state.set_result(text);
                }
                Err(failure) => {
                    quiz_warn!("Request {} failed: {:?}", request_id, failure);
                    state.set_error(failure.user_message());
                }
            }
            Vec::new()
        }
        Msg::CopyClicked => {
            let text = state.result_text();
            if text.is_empty() {
                Vec::new()
            } else {
                vec![Effect::CopyToClipboard {
                    text: text.to_string(),
                }]
            }
        }
        Msg::CopyCompleted(result) => {
            match result {
                Ok(()) => state.set_notice("Copied to clipboard."),
                Err(reason) => state.set_notice(format!("Copy failed: {reason}")),
            }
            Vec::new()
        }
        Msg::ExportClicked { file_name } => {
            let text = state.result_text();
            if text.is_empty() {
                Vec::new()
            } else {
                vec![Effect::ExportResult {
                    text: text.to_string(),
                    file_name,
                }]
            }
        }
        Msg::ExportCompleted(result) => {
            match result {
                Ok(path) => state.set_notice(format!("Saved MCQs to {path}")),
                Err(reason) => state.set_notice(format!("Save failed: {reason}")),
            }
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn submit(state: &mut AppState) -> Vec<Effect> {
    // Single flight: a second submit while loading is rejected outright.
    if state.is_loading() {
        quiz_debug!("Submit rejected; a request is already in flight");
        return Vec::new();
    }
    state.clear_outcome();

    let Some(file) = state.selected_file().cloned() else {
        state.set_error(MISSING_FILE_MESSAGE);
        return Vec::new();
    };
    let question_count = state.question_count();
    let request_id = state.begin_request();
    quiz_info!(
        "Submitting {} for {} questions (request {})",
        describe(&file),
        question_count,
        request_id
    );

    vec![Effect::SubmitPdf {
        request_id,
        file,
        question_count,
    }]
}

fn describe(file: &SelectedFile) -> String {
    format!("{:?} ({})", file.name, file.path.display())
}
