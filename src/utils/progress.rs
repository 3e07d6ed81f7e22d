//! Progress indication for pipeline stages

use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};

/// Spinner tied to one pipeline stage, reporting elapsed time on success.
pub struct StageSpinner {
    bar: ProgressBar,
    started: Instant,
}

impl StageSpinner {
    /// Start spinning with an in-progress message.
    pub fn start(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("    {spinner:.cyan} {msg}")
                .unwrap()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self {
            bar,
            started: Instant::now(),
        }
    }

    /// Replace the spinner with a success line and the stage duration.
    pub fn succeed(self, message: &str) {
        self.bar.finish_with_message(format!(
            "✅ {} ({:.2}s)",
            message,
            self.started.elapsed().as_secs_f64()
        ));
    }
}
