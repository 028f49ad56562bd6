use std::sync::Once;

use pretty_assertions::assert_eq;
use quizify_core::{
    update, AppState, Effect, LineKind, Msg, RequestId, SelectedFile, SubmitFailure,
    MISSING_FILE_MESSAGE,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(quizify_logging::initialize_for_tests);
}

fn with_file(count: u32) -> AppState {
    let (state, _) = update(AppState::new(), Msg::GetStartedClicked);
    let (state, _) = update(
        state,
        Msg::FileSelected(Some(SelectedFile::from_path("valid.pdf"))),
    );
    let (state, _) = update(state, Msg::QuestionCountChanged(count));
    state
}

fn submitted(count: u32) -> (AppState, RequestId) {
    let (state, effects) = update(with_file(count), Msg::SubmitClicked);
    let request_id = match effects.as_slice() {
        [Effect::SubmitPdf { request_id, .. }] => *request_id,
        other => panic!("expected one submit effect, got {other:?}"),
    };
    (state, request_id)
}

fn finish(
    state: AppState,
    request_id: RequestId,
    outcome: Result<String, SubmitFailure>,
) -> AppState {
    let (state, effects) = update(
        state,
        Msg::SubmissionFinished {
            request_id,
            outcome,
        },
    );
    assert!(effects.is_empty());
    state
}

#[test]
fn submit_without_file_sets_error_and_emits_nothing() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::GetStartedClicked);
    let (state, effects) = update(state, Msg::SubmitClicked);

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.error.as_deref(), Some(MISSING_FILE_MESSAGE));
    assert!(!view.loading);
    assert!(view.inputs_enabled);
}

#[test]
fn submit_emits_request_with_file_and_count() {
    init_logging();
    let (state, effects) = update(with_file(5), Msg::SubmitClicked);

    assert_eq!(
        effects,
        vec![Effect::SubmitPdf {
            request_id: 1,
            file: SelectedFile::from_path("valid.pdf"),
            question_count: 5,
        }]
    );
    let view = state.view();
    assert!(view.loading);
    assert!(!view.inputs_enabled);
    assert_eq!(view.submit_label, "Generating...");
}

#[test]
fn successful_payload_renders_one_card_per_block() {
    init_logging();
    let (state, request_id) = submitted(5);
    let text = "1. Q?\nA. x\nB. y\n\n2. Q2?\nA. x\nB. y".to_string();
    let state = finish(state, request_id, Ok(text.clone()));

    let view = state.view();
    assert_eq!(view.cards.len(), 2);
    assert!(!view.loading);
    assert_eq!(view.error, None);
    assert_eq!(view.result_text, text);
    assert_eq!(view.cards[0].text, "1. Q?\nA. x\nB. y");
    let kinds: Vec<_> = view.cards[1].lines.iter().map(|l| l.kind).collect();
    assert_eq!(kinds, vec![LineKind::Question, LineKind::Option, LineKind::Option]);
}

#[test]
fn http_failure_mentions_status_and_leaves_result_empty() {
    init_logging();
    let (state, request_id) = submitted(5);
    let state = finish(
        state,
        request_id,
        Err(SubmitFailure::HttpStatus {
            status: 500,
            detail: None,
        }),
    );

    let view = state.view();
    assert_eq!(view.error.as_deref(), Some("HTTP error! status: 500"));
    assert!(view.result_text.is_empty());
    assert!(view.cards.is_empty());
    assert!(!view.loading);

    let (state, request_id) = submitted(5);
    let state = finish(
        state,
        request_id,
        Err(SubmitFailure::HttpStatus {
            status: 500,
            detail: Some("Gemini quota exceeded".into()),
        }),
    );
    assert_eq!(
        state.view().error.as_deref(),
        Some("HTTP error! status: 500: Gemini quota exceeded")
    );
    assert!(state.view().result_text.is_empty());
}

#[test]
fn unexpected_format_is_reported() {
    init_logging();
    let (state, request_id) = submitted(3);
    let state = finish(state, request_id, Err(SubmitFailure::UnexpectedFormat));

    let view = state.view();
    assert_eq!(
        view.error.as_deref(),
        Some("Unexpected response format from server.")
    );
    assert!(view.result_text.is_empty());
}

#[test]
fn server_and_network_errors_fall_back_to_generic_text() {
    init_logging();
    let cases = [
        (SubmitFailure::Server(Some("quota exceeded".into())), "quota exceeded"),
        (SubmitFailure::Server(None), "Unknown error occurred."),
        (SubmitFailure::Network(Some("connection refused".into())), "connection refused"),
        (SubmitFailure::Network(Some("  ".into())), "Failed to connect to backend."),
    ];
    for (failure, expected) in cases {
        let (state, request_id) = submitted(5);
        let state = finish(state, request_id, Err(failure));
        assert_eq!(state.view().error.as_deref(), Some(expected));
    }
}

#[test]
fn server_error_text_is_shown_verbatim() {
    init_logging();
    let (state, request_id) = submitted(5);
    let state = finish(
        state,
        request_id,
        Err(SubmitFailure::Server(Some("  Quota exceeded.\n".into()))),
    );
    assert_eq!(state.view().error.as_deref(), Some("  Quota exceeded.\n"));
}

#[test]
fn loading_spans_exactly_the_round_trip() {
    init_logging();
    let state = with_file(5);
    assert!(!state.view().loading);

    let (state, request_id) = {
        let (state, effects) = update(state, Msg::SubmitClicked);
        assert_eq!(effects.len(), 1);
        (state, 1)
    };
    assert!(state.view().loading);

    let (state, _) = update(state, Msg::Tick);
    assert!(state.view().loading);

    let state = finish(state, request_id, Err(SubmitFailure::Network(None)));
    let view = state.view();
    assert!(!view.loading);
    assert!(view.inputs_enabled);
}

#[test]
fn second_submit_while_loading_is_rejected() {
    init_logging();
    let (state, _) = submitted(5);
    let before = state.clone();

    let (state, effects) = update(state, Msg::SubmitClicked);
    assert!(effects.is_empty());
    assert_eq!(state, before);
}

#[test]
fn inputs_are_ignored_while_loading() {
    init_logging();
    let (state, _) = submitted(5);
    let (state, _) = update(state, Msg::QuestionCountChanged(20));
    let (state, _) = update(state, Msg::FileSelected(None));

    let view = state.view();
    assert_eq!(view.question_count, 5);
    assert_eq!(view.file_name.as_deref(), Some("valid.pdf"));
}

#[test]
fn file_is_cleared_after_round_trip_but_not_after_validation_failure() {
    init_logging();
    let (state, request_id) = submitted(5);
    let state = finish(state, request_id, Ok("1. Q?".into()));
    assert_eq!(state.view().file_name, None);

    let (state, _) = update(state, Msg::SubmitClicked);
    assert_eq!(state.view().error.as_deref(), Some(MISSING_FILE_MESSAGE));
    assert!(state.view().result_text.is_empty());
}

#[test]
fn stale_completion_is_ignored() {
    init_logging();
    let (state, request_id) = submitted(5);
    let (mut state, effects) = update(
        state,
        Msg::SubmissionFinished {
            request_id: request_id + 7,
            outcome: Ok("1. Q?".into()),
        },
    );

    assert!(effects.is_empty());
    assert!(state.view().loading);
    assert!(state.view().result_text.is_empty());
    state.consume_dirty();

    let state = finish(state, request_id, Ok("1. Real?".into()));
    assert_eq!(state.view().result_text, "1. Real?");
}

#[test]
fn resubmit_clears_previous_outcome_and_uses_new_id() {
    init_logging();
    let (state, first) = submitted(5);
    let state = finish(state, first, Err(SubmitFailure::UnexpectedFormat));

    let (state, _) = update(
        state,
        Msg::FileSelected(Some(SelectedFile::from_path("other.pdf"))),
    );
    let (state, effects) = update(state, Msg::SubmitClicked);
    assert_eq!(state.view().error, None);
    match effects.as_slice() {
        [Effect::SubmitPdf { request_id, file, .. }] => {
            assert_eq!(*request_id, first + 1);
            assert_eq!(file.name, "other.pdf");
        }
        other => panic!("unexpected effects {other:?}"),
    }
}

#[test]
fn copy_writes_exact_result_text() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::CopyClicked);
    assert!(effects.is_empty());

    let (state, request_id) = {
        let (s, _) = update(state, Msg::FileSelected(Some(SelectedFile::from_path("a.pdf"))));
        let (s, _) = update(s, Msg::SubmitClicked);
        (s, 1)
    };
    let text = "1. Q?\n  A. keep  spacing\n\n\n2. Q2?\n".to_string();
    let state = finish(state, request_id, Ok(text.clone()));

    let (state, effects) = update(state, Msg::CopyClicked);
    assert_eq!(effects, vec![Effect::CopyToClipboard { text }]);

    let (state, _) = update(state, Msg::CopyCompleted(Ok(())));
    assert_eq!(state.view().notice.as_deref(), Some("Copied to clipboard."));
}

#[test]
fn export_requests_result_text_and_reports_path() {
    init_logging();
    let (state, request_id) = submitted(5);
    let state = finish(state, request_id, Ok("1. Q?".into()));

    let (state, effects) = update(
        state,
        Msg::ExportClicked {
            file_name: Some("quiz.txt".into()),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::ExportResult {
            text: "1. Q?".into(),
            file_name: Some("quiz.txt".into()),
        }]
    );

    let (state, _) = update(state, Msg::ExportCompleted(Err("disk full".into())));
    assert_eq!(state.view().notice.as_deref(), Some("Save failed: disk full"));
}
