use std::path::Path;
use std::time::Duration;

use indicatif::{HumanDuration, ProgressBar, ProgressDrawTarget, ProgressStyle};

pub struct Progress {
    enabled: bool,
    pages: ProgressBar,
}

impl Progress {
    pub fn new(enabled: bool, total: usize) -> Self {
        if !enabled {
            return Self {
                enabled,
                pages: ProgressBar::hidden(),
            };
        }

        let pages = ProgressBar::with_draw_target(Some(total as u64), ProgressDrawTarget::stderr());
        if let Ok(style) = ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}") {
            pages.set_style(style.progress_chars("##-"));
        }
        pages.enable_steady_tick(Duration::from_millis(120));
        pages.set_message("pages");
        Self { enabled, pages }
    }

    pub fn page_done(&self, path: &Path) {
        if !self.enabled {
            return;
        }
        self.pages.inc(1);
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.pages.set_message(name);
    }

    pub fn finish(&self) {
        if !self.enabled {
            return;
        }
        let elapsed = self.pages.elapsed();
        self.pages.finish_with_message(format!(
            "{} pages in {}",
            self.pages.position(),
            HumanDuration(elapsed)
        ));
    }
}
