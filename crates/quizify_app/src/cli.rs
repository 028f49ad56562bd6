use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use quizify_logging::LogDestination;

/// Generate multiple-choice questions from a PDF.
#[derive(Parser, Debug, Default)]
#[command(name = "quizify", version)]
pub struct Cli {
    /// PDF to submit. Without `--interactive` this runs once and exits.
    #[arg(long)]
    pub pdf: Option<PathBuf>,
    /// Number of questions to generate.
    #[arg(long, short = 'n', value_parser = clap::value_parser!(u32).range(1..=50))]
    pub count: Option<u32>,
    /// Generation endpoint, overriding the config file.
    #[arg(long)]
    pub endpoint: Option<String>,
    /// Config file (RON). Defaults to `./quizify.ron` when present.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Save the result under this file name in the output directory.
    #[arg(long)]
    pub output: Option<String>,
    /// Directory for saved results.
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
    /// Copy the result to the clipboard.
    #[arg(long)]
    pub copy: bool,
    /// Print cards verbatim instead of styling question, option and answer lines.
    #[arg(long)]
    pub plain: bool,
    /// Read commands from stdin even when `--pdf` is given.
    #[arg(long, short = 'i')]
    pub interactive: bool,
    /// Where log output goes.
    #[arg(long, value_enum)]
    pub log: Option<LogArg>,
    /// Log at debug level.
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogArg {
    File,
    Terminal,
    Both,
    Off,
}

impl From<LogArg> for LogDestination {
    fn from(arg: LogArg) -> Self {
        match arg {
            LogArg::File => LogDestination::File,
            LogArg::Terminal => LogDestination::Terminal,
            LogArg::Both => LogDestination::Both,
            LogArg::Off => LogDestination::Off,
        }
    }
}

impl Cli {
    /// One-shot unless stdin commands were asked for or there is nothing to submit.
    pub fn is_one_shot(&self) -> bool {
        self.pdf.is_some() && !self.interactive
    }
}
