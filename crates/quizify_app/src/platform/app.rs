use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::mpsc;
use std::thread;

use anyhow::{bail, Context};
use quizify_core::{update, AppState, AppViewModel, Msg, SelectedFile};
use quizify_logging::{quiz_info, quiz_warn};

use super::config::{self, AppConfig};
use super::effects::EffectRunner;
use super::input::{self, HELP};
use super::ui::chrome;
use super::ui::render::{self, RenderStyle};
use crate::cli::Cli;

/// Everything the main loop reacts to: core messages plus front-end control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Core(Msg),
    Help,
    Quit,
    Invalid(String),
    InputClosed,
}

pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    let (mut config, config_error) = match config::load(cli.config.as_deref()) {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };
    config.apply_cli(&cli);

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    quizify_logging::initialize(config.log_destination, level, &config.log_file);
    if let Some(err) = config_error {
        quiz_warn!("Falling back to default config: {}", err);
        eprintln!("Warning: {err}; using defaults");
    }
    quiz_info!("Using endpoint {}", config.endpoint);

    let style = if cli.plain {
        RenderStyle::Plain
    } else {
        RenderStyle::Classified
    };
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(
        config.submit_settings(),
        config.output_dir.clone(),
        event_tx.clone(),
    )
    .context("failed to start submission engine")?;
    let state = AppState::with_question_count(config.default_question_count);
    let mut app = App::new(state, runner, style, io::stdout());

    app.print(chrome::navbar())?;
    let code = match &cli.pdf {
        Some(pdf) if cli.is_one_shot() => app.run_once(&event_rx, &cli, pdf.clone())?,
        _ => {
            app.print(chrome::intro())?;
            app.print(chrome::call_to_action())?;
            spawn_stdin_reader(event_tx);
            if let Some(pdf) = &cli.pdf {
                app.dispatch(Msg::GetStartedClicked)?;
                app.dispatch(Msg::FileSelected(Some(SelectedFile::from_path(pdf))))?;
            } else {
                app.print(render::render_status(&app.state.view()))?;
            }
            app.run_interactive(&event_rx)?
        }
    };
    app.print(chrome::footer())?;
    Ok(code)
}

fn spawn_stdin_reader(event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if event_tx.send(input::parse_command(&line)).is_err() {
                return;
            }
        }
        let _ = event_tx.send(AppEvent::InputClosed);
    });
}

pub struct App<W: Write> {
    state: AppState,
    effects: EffectRunner,
    style: RenderStyle,
    out: W,
    shown_result: String,
}

impl<W: Write> App<W> {
    pub fn new(state: AppState, effects: EffectRunner, style: RenderStyle, out: W) -> Self {
        Self {
            state,
            effects,
            style,
            out,
            shown_result: String::new(),
        }
    }

    /// Apply one message, run its effects, and render if anything changed.
    pub fn dispatch(&mut self, msg: Msg) -> io::Result<AppViewModel> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        let view = state.view();
        self.state = state;

        self.effects.run(effects);
        if was_dirty {
            self.render(&view)?;
        }
        Ok(view)
    }

    fn render(&mut self, view: &AppViewModel) -> io::Result<()> {
        self.print(render::render_status(view))?;
        if view.result_text != self.shown_result {
            self.shown_result = view.result_text.clone();
            self.print(render::render_cards(view, self.style))?;
        }
        Ok(())
    }

    fn print(&mut self, lines: Vec<String>) -> io::Result<()> {
        for line in lines {
            writeln!(self.out, "{line}")?;
        }
        self.out.flush()
    }

    /// Submit once, then run the requested follow-ups. Fails the exit code on a submission error.
    pub fn run_once(
        &mut self,
        events: &mpsc::Receiver<AppEvent>,
        cli: &Cli,
        pdf: PathBuf,
    ) -> anyhow::Result<ExitCode> {
        self.dispatch(Msg::GetStartedClicked)?;
        self.dispatch(Msg::FileSelected(Some(SelectedFile::from_path(pdf))))?;
        if let Some(count) = cli.count {
            self.dispatch(Msg::QuestionCountChanged(count))?;
        }

        let view = self.dispatch(Msg::SubmitClicked)?;
        let view = self.wait_while_loading(events, view)?;
        if view.error.is_some() {
            return Ok(ExitCode::FAILURE);
        }

        if cli.copy {
            self.dispatch(Msg::CopyClicked)?;
            self.pump_until(events, |msg| matches!(msg, Msg::CopyCompleted(_)))?;
        }
        if let Some(name) = &cli.output {
            self.dispatch(Msg::ExportClicked {
                file_name: Some(name.clone()),
            })?;
            self.pump_until(events, |msg| matches!(msg, Msg::ExportCompleted(_)))?;
        }
        Ok(ExitCode::SUCCESS)
    }

    /// Dispatch core events until the outstanding request, if any, has resolved.
    fn wait_while_loading(
        &mut self,
        events: &mpsc::Receiver<AppEvent>,
        mut view: AppViewModel,
    ) -> anyhow::Result<AppViewModel> {
        while view.loading {
            view = match events.recv() {
                Ok(AppEvent::Core(msg)) => self.dispatch(msg)?,
                Ok(_) => continue,
                Err(_) => bail!("submission engine stopped unexpectedly"),
            };
        }
        Ok(view)
    }

    /// Dispatch events until one matching `done` has been handled.
    fn pump_until(
        &mut self,
        events: &mpsc::Receiver<AppEvent>,
        done: impl Fn(&Msg) -> bool,
    ) -> anyhow::Result<()> {
        loop {
            match events.recv() {
                Ok(AppEvent::Core(msg)) => {
                    let finished = done(&msg);
                    self.dispatch(msg)?;
                    if finished {
                        return Ok(());
                    }
                }
                Ok(_) => {}
                Err(_) => bail!("event channel closed"),
            }
        }
    }

    pub fn run_interactive(
        &mut self,
        events: &mpsc::Receiver<AppEvent>,
    ) -> anyhow::Result<ExitCode> {
        self.print(vec!["Type 'help' for commands.".to_string()])?;
        let mut view = self.state.view();
        while let Ok(event) = events.recv() {
            match event {
                AppEvent::Core(msg) => view = self.dispatch(msg)?,
                AppEvent::Help => self.print(HELP.lines().map(str::to_string).collect())?,
                AppEvent::Invalid(reason) => self.print(vec![reason])?,
                AppEvent::Quit | AppEvent::InputClosed => {
                    // Piped input ends right after `submit`; the reply still has to land.
                    view = self.wait_while_loading(events, view)?;
                    break;
                }
            }
        }
        if view.error.is_some() {
            return Ok(ExitCode::FAILURE);
        }
        Ok(ExitCode::SUCCESS)
    }
}
