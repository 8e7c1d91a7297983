use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

const BAR_TEMPLATE: &str =
    "{prefix} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})";
const SPINNER_TEMPLATE: &str = "{prefix} {spinner:.green} [{elapsed_precise}] {bytes} ({bytes_per_sec})";

/// Byte counter observing a body as it is read.
///
/// Draws to stderr so it never mixes with asset bytes written to stdout.
/// A silent tracker counts but draws nothing.
pub struct ProgressTracker {
    bar: ProgressBar,
}

impl ProgressTracker {
    /// `total` is the advertised content length; `None` or zero gives a spinner.
    pub fn new(total: Option<u64>, silent: bool) -> Self {
        let bar = match total.filter(|&t| t > 0) {
            Some(total) => {
                let bar = ProgressBar::with_draw_target(Some(total), draw_target(silent));
                if let Ok(style) = ProgressStyle::with_template(BAR_TEMPLATE) {
                    bar.set_style(style.progress_chars("=> "));
                }
                bar
            }
            None => {
                let bar = ProgressBar::with_draw_target(None, draw_target(silent));
                if let Ok(style) = ProgressStyle::with_template(SPINNER_TEMPLATE) {
                    bar.set_style(style);
                }
                bar
            }
        };
        bar.set_prefix("Downloading...");
        Self { bar }
    }

    pub fn observe(&self, chunk_len: usize) {
        self.bar.inc(chunk_len as u64);
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    pub fn length(&self) -> Option<u64> {
        self.bar.length()
    }

    pub fn finish(&self) {
        self.bar.finish();
    }

    /// Leave the bar where it stopped without claiming completion.
    pub fn abandon(&self) {
        self.bar.abandon();
    }
}

fn draw_target(silent: bool) -> ProgressDrawTarget {
    if silent {
        ProgressDrawTarget::hidden()
    } else {
        ProgressDrawTarget::stderr()
    }
}
