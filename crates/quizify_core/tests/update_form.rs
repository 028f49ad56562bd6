use std::sync::Once;

use pretty_assertions::assert_eq;
use quizify_core::{
    update, AppState, Msg, SelectedFile, DEFAULT_QUESTIONS, MAX_QUESTIONS, MIN_QUESTIONS,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(quizify_logging::initialize_for_tests);
}

#[test]
fn form_starts_hidden_and_get_started_reveals_it() {
    init_logging();
    let state = AppState::new();
    assert!(!state.view().form_visible);

    let (mut state, effects) = update(state, Msg::GetStartedClicked);
    assert!(effects.is_empty());
    assert!(state.view().form_visible);
    assert!(state.consume_dirty());

    let (mut state, _) = update(state, Msg::GetStartedClicked);
    assert!(!state.consume_dirty());
}

#[test]
fn defaults_match_the_form() {
    init_logging();
    let view = AppState::new().view();

    assert_eq!(view.question_count, DEFAULT_QUESTIONS);
    assert_eq!(view.file_name, None);
    assert!(!view.loading);
    assert!(view.inputs_enabled);
    assert_eq!(view.submit_label, "Generate MCQs");
    assert_eq!(view.error, None);
    assert!(view.cards.is_empty());
}

#[test]
fn question_count_is_clamped_into_range() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::QuestionCountChanged(0));
    assert_eq!(state.view().question_count, MIN_QUESTIONS);

    let (state, _) = update(state, Msg::QuestionCountChanged(500));
    assert_eq!(state.view().question_count, MAX_QUESTIONS);

    let (state, _) = update(state, Msg::QuestionCountChanged(12));
    assert_eq!(state.view().question_count, 12);

    assert_eq!(AppState::with_question_count(99).view().question_count, MAX_QUESTIONS);
}

#[test]
fn edited_count_ignores_non_numeric_text() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::QuestionCountEdited(" 8 ".to_string()));
    assert_eq!(state.view().question_count, 8);

    let (mut state, _) = update(state, Msg::QuestionCountEdited("ten".to_string()));
    assert_eq!(state.view().question_count, 8);
    state.consume_dirty();

    let (mut state, _) = update(state, Msg::QuestionCountEdited("-3".to_string()));
    assert_eq!(state.view().question_count, 8);
    assert!(!state.consume_dirty());
}

#[test]
fn file_selection_uses_file_name_for_display() {
    init_logging();
    let file = SelectedFile::from_path("/tmp/docs/lecture notes.pdf");
    assert_eq!(file.name, "lecture notes.pdf");

    let (state, _) = update(AppState::new(), Msg::FileSelected(Some(file)));
    assert_eq!(state.view().file_name.as_deref(), Some("lecture notes.pdf"));

    let (state, _) = update(state, Msg::FileSelected(None));
    assert_eq!(state.view().file_name, None);
}
