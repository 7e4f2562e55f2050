use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ToggleState {
    /// Simulate checking the light/dark switch (dark theme).
    Checked,
    /// Simulate unchecking the light/dark switch (light theme).
    Unchecked,
}

impl ToggleState {
    pub fn is_checked(self) -> bool {
        matches!(self, ToggleState::Checked)
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ProgressMode {
    /// Enable progress UI when stderr is a TTY.
    Auto,
    /// Always enable progress UI (even when piped).
    Always,
    /// Never show progress UI.
    Never,
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// One or more HTML pages to post-process.
    #[arg(long, required = true)]
    pub input: Vec<PathBuf>,

    /// Output directory; each page keeps its file name.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// JSON file holding persisted preferences (the theme choice).
    #[arg(long, default_value = "reader-decor-settings.json")]
    pub settings: PathBuf,

    /// Simulate a change of the light/dark switch after each page load.
    #[arg(long, value_enum)]
    pub toggle: Option<ToggleState>,

    /// Treat inputs as rendered Markdown fragments and wrap them in the page layout.
    #[arg(long)]
    pub fragment: bool,

    /// Page title used with `--fragment`. Defaults to the input file stem.
    #[arg(long)]
    pub title: Option<String>,

    /// Leave the theme classes and toggle state alone.
    #[arg(long)]
    pub skip_theme: bool,

    /// Leave the Markdown presentation classes alone.
    #[arg(long)]
    pub skip_decorate: bool,

    /// Progress display: `auto`, `always`, or `never`.
    #[arg(long, value_enum, default_value = "auto")]
    pub progress: ProgressMode,
}
