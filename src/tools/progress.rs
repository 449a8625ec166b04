//! 進度顯示與中斷檢查

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

pub trait ProgressReporter {
    fn begin(&self, title: &str);
    fn update(&self, percent: u64, message: &str);
    fn is_cancelled(&self) -> bool;
    fn end(&self);
}

/// 以 indicatif 進度條顯示，並以 Ctrl-C 訊號作為中斷旗標
pub struct ConsoleProgress {
    progress_bar: ProgressBar,
    shutdown_signal: Arc<AtomicBool>,
}

impl ConsoleProgress {
    pub fn new(shutdown_signal: Arc<AtomicBool>) -> Self {
        let progress_bar = ProgressBar::new(100);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix} [{bar:40.cyan/blue}] {pos:>3}% {msg}")
        {
            progress_bar.set_style(style.progress_chars("#>-"));
        }

        Self {
            progress_bar,
            shutdown_signal,
        }
    }
}

impl ProgressReporter for ConsoleProgress {
    fn begin(&self, title: &str) {
        self.progress_bar.set_prefix(title.to_string());
        self.progress_bar.set_position(0);
    }

    fn update(&self, percent: u64, message: &str) {
        self.progress_bar.set_position(percent.min(100));
        self.progress_bar.set_message(message.to_string());
    }

    fn is_cancelled(&self) -> bool {
        self.shutdown_signal.load(Ordering::SeqCst)
    }

    fn end(&self) {
        if self.is_cancelled() {
            self.progress_bar.abandon_with_message("操作已中斷");
        } else {
            self.progress_bar.finish_and_clear();
        }
    }
}

/// 百分比計算，總數為 0 時回傳 0
#[must_use]
pub fn percent_of(processed: usize, total: usize) -> u64 {
    if total == 0 {
        return 0;
    }
    (processed as f64 / total as f64 * 100.0) as u64
}
