use batchren_core::{PlanRecord, Progress, Stage};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Progress bar on stderr. Draws nothing when hidden or not attached to a terminal.
pub struct ProgressReporter {
    bar: ProgressBar,
}

impl ProgressReporter {
    pub fn new(hidden: bool) -> Self {
        let bar = if hidden {
            ProgressBar::hidden()
        } else {
            let bar = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::stderr());
            bar.set_message("Scanning for files...");
            bar
        };
        Self { bar }
    }
}

impl Progress for ProgressReporter {
    fn start(&self, stage: Stage, total: usize) {
        let style = ProgressStyle::with_template("{msg}: [{bar:30}] {pos}/{len} ({percent}%)")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        self.bar.reset();
        self.bar.set_style(style);
        self.bar.set_length(total as u64);
        self.bar.set_message(match stage {
            Stage::Planning => "Planning",
            Stage::Renaming => "Renaming",
        });
    }

    fn advance(&self, _record: &PlanRecord) {
        self.bar.inc(1);
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
