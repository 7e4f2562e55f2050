mod cli;
mod decorate;
pub mod dom;
mod page;
mod progress;
mod settings;
mod theme;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

pub use cli::{Args as CliArgs, ProgressMode, ToggleState};
pub use decorate::{DecorationReport, RuleOutcome, decorate};
pub use page::build_page;
pub use settings::{JsonFileStore, MemoryStore, SettingsStore};
pub use theme::{ClassDelta, THEME_KEY, TOGGLE_ID, Theme, ThemeController, compute_theme_classes};

#[derive(Debug, Clone, Default)]
pub struct PageOptions {
    /// Wrap the input in the page layout under this title first.
    pub wrap_title: Option<String>,
    pub toggle: Option<ToggleState>,
    pub skip_theme: bool,
    pub skip_decorate: bool,
}

#[derive(Debug)]
pub struct ProcessedPage {
    pub html: String,
    pub theme: Option<Theme>,
    pub decoration: Option<DecorationReport>,
}

/// Runs the content-ready decoration, then the theme load handler, then an
/// optional toggle change, the same order a browser fires them in.
pub fn process_page<S: SettingsStore>(
    html: &str,
    options: &PageOptions,
    store: &mut S,
) -> anyhow::Result<ProcessedPage> {
    let wrapped;
    let source = match &options.wrap_title {
        Some(title) => {
            wrapped = page::build_page(title, html);
            wrapped.as_str()
        }
        None => html,
    };

    let document = dom::parse_document(source);

    let decoration = (!options.skip_decorate).then(|| decorate::decorate(&document));

    let theme = if options.skip_theme {
        None
    } else {
        let mut controller = ThemeController::new(&mut *store);
        let mut theme = controller.on_load(&document)?;
        if let Some(toggle) = options.toggle {
            theme = controller.on_change(&document, toggle.is_checked())?;
        }
        Some(theme)
    };

    let html = dom::serialize_document(&document)?;
    Ok(ProcessedPage {
        html,
        theme,
        decoration,
    })
}

pub async fn run(args: CliArgs) -> anyhow::Result<()> {
    use std::io::IsTerminal as _;

    if args.title.is_some() && !args.fragment {
        tracing::warn!("--title only applies with --fragment; ignoring");
    }

    let mut out_names = HashSet::new();
    for input in &args.input {
        let file_name = input
            .file_name()
            .with_context(|| format!("{} has no file name", input.display()))?;
        if !out_names.insert(file_name) {
            anyhow::bail!(
                "{} would overwrite another input's output; rename one of them",
                input.display()
            );
        }
    }

    let progress_enabled = match args.progress {
        ProgressMode::Always => true,
        ProgressMode::Never => false,
        ProgressMode::Auto => std::io::stderr().is_terminal(),
    };
    let progress = progress::Progress::new(progress_enabled, args.input.len());

    let out_dir = args.out.clone().unwrap_or_else(|| PathBuf::from("out"));
    tokio::fs::create_dir_all(&out_dir)
        .await
        .with_context(|| format!("create {}", out_dir.display()))?;

    let mut store = JsonFileStore::open(&args.settings)?;
    tracing::debug!(settings = %store.path().display(), "using settings store");

    let res = process_inputs(&args, &out_dir, &mut store, &progress).await;
    progress.finish();
    res
}

async fn process_inputs(
    args: &CliArgs,
    out_dir: &Path,
    store: &mut JsonFileStore,
    progress: &progress::Progress,
) -> anyhow::Result<()> {
    for input in &args.input {
        let html = tokio::fs::read_to_string(input)
            .await
            .with_context(|| format!("read {}", input.display()))?;

        let options = PageOptions {
            wrap_title: args.fragment.then(|| page_title(args, input)),
            toggle: args.toggle,
            skip_theme: args.skip_theme,
            skip_decorate: args.skip_decorate,
        };
        let page = process_page(&html, &options, store)
            .with_context(|| format!("process {}", input.display()))?;

        let file_name = input
            .file_name()
            .with_context(|| format!("{} has no file name", input.display()))?;
        let out_path = out_dir.join(file_name);
        tokio::fs::write(&out_path, &page.html)
            .await
            .with_context(|| format!("write {}", out_path.display()))?;

        tracing::info!(
            input = %input.display(),
            output = %out_path.display(),
            theme = page.theme.map(Theme::as_str).unwrap_or("-"),
            decorated = page.decoration.as_ref().map_or(0, DecorationReport::changed),
            "processed page"
        );
        progress.page_done(input);
    }
    Ok(())
}

fn page_title(args: &CliArgs, input: &Path) -> String {
    args.title.clone().unwrap_or_else(|| {
        input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    })
}
