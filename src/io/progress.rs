//! Terminal progress for trace replay

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

static REPLAY_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{prefix}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Progress bar over the events of one replayed trace
///
/// A hidden manager is a no-op, so callers never branch on `--quiet`.
pub struct ReplayProgress {
    bar: Option<ProgressBar>,
}

impl ReplayProgress {
    /// Bar for `events` events of the trace at `trace`, or a no-op when `visible` is false
    pub fn new(trace: &Path, events: usize, visible: bool) -> Self {
        let bar = visible.then(|| {
            let bar = ProgressBar::new(events as u64);
            bar.set_style(REPLAY_STYLE.clone());
            bar.set_prefix(
                trace
                    .file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
                    .to_string(),
            );
            bar
        });
        Self { bar }
    }

    /// Advance by one replayed event
    pub fn event(&self) {
        if let Some(ref bar) = self.bar {
            bar.inc(1);
        }
    }

    /// Show a short status next to the bar
    pub fn status(&self, message: &str) {
        if let Some(ref bar) = self.bar {
            bar.set_message(message.to_string());
        }
    }

    /// Clear the bar from the terminal
    pub fn finish(&self) {
        if let Some(ref bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}
