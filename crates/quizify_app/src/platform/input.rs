use quizify_core::{Msg, SelectedFile};

use super::app::AppEvent;

pub const HELP: &str = "\
Commands:
  start           show the upload form
  file <path>     choose the PDF to upload
  clear           clear the chosen PDF
  count <n>       number of questions (1-50)
  submit          generate MCQs
  copy            copy the result to the clipboard
  save [name]     save the result to the output directory
  help            show this help
  quit            exit";

/// Turn one line of stdin into an app event.
pub fn parse_command(line: &str) -> AppEvent {
    let line = line.trim();
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command.to_ascii_lowercase().as_str() {
        "" => AppEvent::Core(Msg::NoOp),
        "start" => AppEvent::Core(Msg::GetStartedClicked),
        "file" if rest.is_empty() => AppEvent::Invalid("usage: file <path>".to_string()),
        "file" => AppEvent::Core(Msg::FileSelected(Some(SelectedFile::from_path(rest)))),
        "clear" => AppEvent::Core(Msg::FileSelected(None)),
        "count" if rest.is_empty() => AppEvent::Invalid("usage: count <n>".to_string()),
        "count" => AppEvent::Core(Msg::QuestionCountEdited(rest.to_string())),
        "submit" | "generate" => AppEvent::Core(Msg::SubmitClicked),
        "copy" => AppEvent::Core(Msg::CopyClicked),
        "save" => AppEvent::Core(Msg::ExportClicked {
            file_name: (!rest.is_empty()).then(|| rest.to_string()),
        }),
        "help" | "?" => AppEvent::Help,
        "quit" | "exit" | "q" => AppEvent::Quit,
        other => AppEvent::Invalid(format!("Unknown command {other:?}. Type 'help'.")),
    }
}
